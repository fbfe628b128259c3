use super::Record;
use serde::Deserialize;

/// One row of the lookup table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LookupRecord {
    #[serde(rename = "dstport")]
    pub dst_port: String,
    pub protocol: String,
    pub tag: String,
}

impl Record for LookupRecord {
    const COLUMNS: &'static [&'static str] = &["dstport", "protocol", "tag"];
}
