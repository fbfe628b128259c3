/// Lines with fewer whitespace-separated fields than this are dropped.
pub const MIN_FIELDS: usize = 14;

const DST_PORT_FIELD: usize = 5;
const PROTOCOL_FIELD: usize = 7;

/// The fields of a flow log line that take part in tagging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowRecord<'a> {
    pub dst_port: &'a str,
    pub protocol_number: &'a str,
}

impl<'a> FlowRecord<'a> {
    /// Splits a flow log line on whitespace.
    ///
    /// ### Returns
    ///
    /// `None` when the line has fewer than [`MIN_FIELDS`] fields.
    pub fn parse(line: &'a str) -> Option<Self> {
        let fields: Vec<&'a str> = line.split_whitespace().collect();
        if fields.len() < MIN_FIELDS {
            return None;
        }

        Some(FlowRecord {
            dst_port: fields[DST_PORT_FIELD],
            protocol_number: fields[PROTOCOL_FIELD],
        })
    }
}
