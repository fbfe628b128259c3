use csv::Error as CsvError;
use std::{fmt, io};

use crate::records::Record;

#[derive(Debug)]
pub enum ReadError {
    Io(io::Error),
    Csv(CsvError),
    /// A column the record type requires is absent from the header row.
    MissingColumn(&'static str),
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::Io(err) => write!(f, "I/O error: {}", err),
            ReadError::Csv(err) => write!(f, "CSV error: {}", err),
            ReadError::MissingColumn(column) => write!(f, "missing required column `{}`", column),
        }
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReadError::Io(err) => Some(err),
            ReadError::Csv(err) => Some(err),
            ReadError::MissingColumn(_) => None,
        }
    }
}

impl From<io::Error> for ReadError {
    fn from(err: io::Error) -> Self {
        ReadError::Io(err)
    }
}

impl From<CsvError> for ReadError {
    fn from(err: CsvError) -> Self {
        ReadError::Csv(err)
    }
}

pub trait Parser {
    fn parse<T>(
        &self,
        file_path: &str,
    ) -> Result<Box<dyn Iterator<Item = Result<T, ReadError>>>, ReadError>
    where
        T: Record + 'static;
}
