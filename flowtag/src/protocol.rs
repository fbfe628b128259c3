use strum_macros::{Display, IntoStaticStr};

/// IP protocols recognised in flow logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Protocol {
    Tcp,
    Udp,
    Icmp,
    Unknown,
}

impl Protocol {
    /// Maps an IANA protocol number, as written in the flow log, to a protocol.
    pub fn from_number(number: &str) -> Self {
        match number {
            "6" => Protocol::Tcp,
            "17" => Protocol::Udp,
            "1" => Protocol::Icmp,
            _ => Protocol::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}
