//! Writers that serialize records back to delimited text or workbooks.
//!
//! Values are written as given; nothing is coerced on the way out. Records are laid out
//! positionally: sequences and tuples as-is, mappings by their values in iteration
//! order (which the import builder keeps equal to schema order).

pub mod csv;
#[cfg(feature = "excel")]
pub mod excel;

use std::path::{Path, PathBuf};

use crate::error::{ImportError, ImportResult};
use crate::ingestion::FileFormat;
use crate::types::{DataSet, Record, Value};

pub use csv::{write_csv, write_csv_to_writer};
#[cfg(feature = "excel")]
pub use excel::{write_workbook, SheetConfig};

/// Directory that exported files are written into.
///
/// Callers pass a base name without extension; the writer appends `.csv` or `.xlsx`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDir {
    dir: PathBuf,
}

impl OutputDir {
    /// Write into `dir`. The directory is not created.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The output directory.
    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Full path for `base_name` in `format`.
    pub fn file_path(&self, base_name: &str, format: FileFormat) -> PathBuf {
        self.dir.join(format!("{base_name}.{}", format.extension()))
    }

    /// `<dir>/<base_name>.csv`.
    pub fn csv_path(&self, base_name: &str) -> PathBuf {
        self.file_path(base_name, FileFormat::Delimited)
    }

    /// `<dir>/<base_name>.xlsx`.
    pub fn xlsx_path(&self, base_name: &str) -> PathBuf {
        self.file_path(base_name, FileFormat::Workbook)
    }
}

impl Default for OutputDir {
    fn default() -> Self {
        Self::new(".")
    }
}

/// Lay a record out positionally under a header row of `width` columns.
///
/// `row` is the 1-based output row used in error messages.
///
/// Positional records are written as given, ragged or not: their values already sit at
/// column positions, so a short row leaves trailing cells empty. A mapping record is
/// keyed by name, and its values only land under the right headers when it has exactly
/// one key per header column, so a mapping whose key count differs from `width` is
/// rejected instead of being shifted silently.
pub(crate) fn format_row(row: usize, record: &Record, width: usize) -> ImportResult<Vec<&Value>> {
    if let Record::Mapping(m) = record {
        if m.len() != width {
            return Err(ImportError::UnsupportedRecordShape {
                row,
                message: format!(
                    "mapping record has {} keys but the header row has {width} columns",
                    m.len()
                ),
            });
        }
    }
    Ok(record.values().collect())
}

impl DataSet {
    /// Write records to `<out>/<base_name>.csv`.
    ///
    /// `rows` and `headers` default to this dataset's records and headers.
    pub fn write_csv(
        &self,
        out: &OutputDir,
        base_name: &str,
        rows: Option<&[Record]>,
        headers: Option<&[String]>,
    ) -> ImportResult<PathBuf> {
        let path = out.csv_path(base_name);
        write_csv(
            &path,
            rows.unwrap_or(&self.records),
            headers.unwrap_or(self.headers()),
        )?;
        Ok(path)
    }

    /// Write one sheet per config to `<out>/<base_name>.xlsx`.
    ///
    /// Returns `Ok(None)` without touching the filesystem when `sheets` is empty.
    #[cfg(feature = "excel")]
    pub fn write_workbook(
        &self,
        out: &OutputDir,
        base_name: &str,
        sheets: &[SheetConfig<'_>],
    ) -> ImportResult<Option<PathBuf>> {
        write_workbook(out.xlsx_path(base_name), sheets, self)
    }
}
