use std::collections::HashMap;

use log::{debug, info, warn};

use crate::{
    parsers::{
        csv_parser::CsvParser,
        parser::{Parser, ReadError},
    },
    records::lookup_record::LookupRecord,
};

/// Key of the lookup table: destination port and lowercase protocol name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupKey {
    pub port: String,
    pub protocol: String,
}

impl LookupKey {
    pub fn new(port: &str, protocol: &str) -> Self {
        LookupKey {
            port: port.to_string(),
            protocol: protocol.to_lowercase(),
        }
    }
}

/// Immutable mapping from (port, protocol) to the tags assigned to it.
///
/// Tags keep the order of the rows they came from. A key that appears in
/// several rows collects every tag, duplicates included.
#[derive(Debug, Default)]
pub struct LookupIndex {
    entries: HashMap<LookupKey, Vec<String>>,
}

impl LookupIndex {
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = LookupRecord>,
    {
        let mut entries: HashMap<LookupKey, Vec<String>> = HashMap::new();
        for record in records {
            entries
                .entry(LookupKey::new(&record.dst_port, &record.protocol))
                .or_default()
                .push(record.tag);
        }
        LookupIndex { entries }
    }

    /// Loads the lookup table from a CSV file.
    ///
    /// Any row that cannot be read fails the whole load.
    pub fn from_csv(path: &str) -> Result<Self, ReadError> {
        debug!("Loading lookup table from {:?}", path);
        let records = CsvParser
            .parse::<LookupRecord>(path)?
            .collect::<Result<Vec<_>, _>>()?;
        let index = Self::from_records(records);
        if index.is_empty() {
            warn!("Lookup table {} has no rows, every flow will be untagged", path);
        }
        info!("Loaded {} lookup keys from {}", index.len(), path);
        Ok(index)
    }

    /// Returns the tags for a port and protocol name, if any row matched.
    pub fn get(&self, port: &str, protocol: &str) -> Option<&[String]> {
        self.entries
            .get(&LookupKey::new(port, protocol))
            .map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
