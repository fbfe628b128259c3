use serde::de::DeserializeOwned;

pub mod flow_record;
pub mod lookup_record;

/// A row type that can be read from a headed CSV file.
pub trait Record: DeserializeOwned {
    /// Lowercase header names that must be present for the file to load.
    const COLUMNS: &'static [&'static str];
}
