use crate::error::{LetterError, Result};
use csv::{ReaderBuilder, StringRecordsIntoIter};
use eventmgr_core::domain::{symbolize_header, Attendee};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Attendees read from a CSV roster with a header row, in file order.
pub struct Roster<R: Read> {
    keys: Vec<String>,
    records: StringRecordsIntoIter<R>,
}

impl Roster<File> {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| LetterError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }
}

impl<R: Read> Roster<R> {
    pub fn from_reader(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let keys = reader.headers()?.iter().map(symbolize_header).collect();
        Ok(Self {
            keys,
            records: reader.into_records(),
        })
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }
}

impl<R: Read> Iterator for Roster<R> {
    type Item = Result<Attendee>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = match self.records.next()? {
            Ok(record) => record,
            Err(err) => return Some(Err(err.into())),
        };
        Some(Ok(Attendee::from_columns(
            self.keys.iter().map(String::as_str),
            record.iter(),
        )))
    }
}
