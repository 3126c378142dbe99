//! Delimited-text writer.

use std::io::Write;
use std::path::Path;

use crate::error::ImportResult;
use crate::types::Record;

use super::format_row;

/// Write a header row and one row per record to `path`, creating or truncating it.
pub fn write_csv(path: impl AsRef<Path>, rows: &[Record], headers: &[String]) -> ImportResult<()> {
    let path = path.as_ref();
    let mut wtr = csv::WriterBuilder::new().flexible(true).from_path(path)?;
    write_csv_to_writer(&mut wtr, rows, headers)?;
    log::info!("wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// Write a header row and one row per record to an existing CSV writer.
///
/// `Null` cells are written as empty fields; date-times use
/// [`crate::types::DATETIME_FORMAT`].
pub fn write_csv_to_writer<W: Write>(
    wtr: &mut csv::Writer<W>,
    rows: &[Record],
    headers: &[String],
) -> ImportResult<()> {
    wtr.write_record(headers)?;
    for (idx0, record) in rows.iter().enumerate() {
        let fields = format_row(idx0 + 2, record, headers.len())?;
        wtr.write_record(fields.iter().map(|v| v.to_string()))?;
    }
    wtr.flush()?;
    Ok(())
}
