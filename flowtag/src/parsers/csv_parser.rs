use super::parser::{Parser, ReadError};
use crate::records::Record;
use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;

pub struct CsvParser;

/// Trims and lowercases the header names, keeping only the first column for
/// each name. Returns the cleaned headers and the indices of the kept columns.
fn preprocess_headers(headers: &StringRecord) -> (StringRecord, HashSet<usize>) {
    let mut unique_headers = StringRecord::new();
    let mut seen = HashSet::new();
    let mut indices = HashSet::new();

    for (index, header) in headers.iter().enumerate() {
        let normalized = header.trim().to_lowercase();
        if !seen.contains(&normalized) {
            unique_headers.push_field(&normalized);
            seen.insert(normalized);
            indices.insert(index);
        }
    }

    (unique_headers, indices)
}

fn filter_record(record: &StringRecord, indices: &HashSet<usize>) -> StringRecord {
    let mut filtered = StringRecord::new();
    for (index, field) in record.iter().enumerate() {
        if indices.contains(&index) {
            filtered.push_field(field);
        }
    }
    filtered
}

fn check_required_columns<T: Record>(headers: &StringRecord) -> Result<(), ReadError> {
    for &column in T::COLUMNS {
        if !headers.iter().any(|header| header == column) {
            return Err(ReadError::MissingColumn(column));
        }
    }
    Ok(())
}

impl CsvParser {
    /// Parses records from any reader. The first row must be a header row.
    pub fn parse_reader<T, R>(
        &self,
        reader: R,
    ) -> Result<Box<dyn Iterator<Item = Result<T, ReadError>>>, ReadError>
    where
        T: Record + 'static,
        R: Read + 'static,
    {
        let mut rdr = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let (unique_headers, indices) = preprocess_headers(&headers);
        debug!("CSV headers: {:?}", unique_headers);
        check_required_columns::<T>(&unique_headers)?;

        rdr.set_headers(unique_headers.clone());

        let iter = rdr.into_records().map(move |result| {
            result.map_err(ReadError::Csv).and_then(|record| {
                let filtered_record = filter_record(&record, &indices);

                filtered_record
                    .deserialize(Some(&unique_headers))
                    .map_err(ReadError::Csv)
            })
        });

        Ok(Box::new(iter))
    }
}

impl Parser for CsvParser {
    fn parse<T>(
        &self,
        file_path: &str,
    ) -> Result<Box<dyn Iterator<Item = Result<T, ReadError>>>, ReadError>
    where
        T: Record + 'static,
    {
        debug!("Opening CSV file: {:?}", file_path);
        let file = File::open(file_path).map_err(ReadError::Io)?;
        self.parse_reader(file)
    }
}
