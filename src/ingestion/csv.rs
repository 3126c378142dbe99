//! Delimited-text row source.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::ImportResult;
use crate::types::Value;

/// Lazy, single-pass iterator over the raw rows of a delimited-text source.
///
/// Every row is yielded, header row included; each field comes back as
/// [`Value::Text`] exactly as decoded (no trimming). Rows may have differing widths.
pub struct DelimitedRows<R = File> {
    records: csv::StringRecordsIntoIter<R>,
}

impl DelimitedRows<File> {
    /// Open `path` for reading.
    pub fn from_path(path: impl AsRef<Path>) -> ImportResult<Self> {
        let rdr = builder().from_path(path)?;
        Ok(Self {
            records: rdr.into_records(),
        })
    }
}

impl<R: Read> DelimitedRows<R> {
    /// Read rows from an arbitrary byte source.
    pub fn from_reader(reader: R) -> Self {
        Self {
            records: builder().from_reader(reader).into_records(),
        }
    }
}

impl<R: Read> Iterator for DelimitedRows<R> {
    type Item = ImportResult<Vec<Value>>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        Some(
            record
                .map(|r| r.iter().map(Value::from).collect())
                .map_err(Into::into),
        )
    }
}

fn builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(false).flexible(true);
    builder
}
