//! Format dispatch: one row iterator over either a delimited-text file or a workbook.

use std::fs::File;
use std::path::Path;

use crate::error::{ImportError, ImportResult};
use crate::types::Value;

use super::csv::DelimitedRows;
#[cfg(feature = "excel")]
use super::excel::WorkbookRows;

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    /// Comma-separated values.
    Delimited,
    /// Spreadsheet workbook (feature-gated behind `excel`).
    Workbook,
}

impl FileFormat {
    /// Classify a file extension (case-insensitive).
    ///
    /// Anything containing `csv` is delimited text; anything containing `xls` (`xls`,
    /// `xlsx`, `xlsm`, `xlsb`) is a workbook.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        if ext.contains("csv") {
            Some(Self::Delimited)
        } else if ext.contains("xls") {
            Some(Self::Workbook)
        } else {
            None
        }
    }

    /// Detect the format from a path's extension.
    pub fn detect(path: &Path) -> ImportResult<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| ImportError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
    }

    /// Extension used when writing files of this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Delimited => "csv",
            Self::Workbook => "xlsx",
        }
    }
}

enum RowSource {
    Delimited(DelimitedRows<File>),
    #[cfg(feature = "excel")]
    Workbook(WorkbookRows),
}

/// Row iterator returned by [`open`].
///
/// Owns the underlying file handle or workbook. It is released when the reader is
/// dropped or [`closed`](Self::close), whichever comes first.
pub struct RowReader {
    format: FileFormat,
    source: RowSource,
}

impl RowReader {
    /// The format this reader was opened with.
    pub fn format(&self) -> FileFormat {
        self.format
    }

    /// Release the underlying resource.
    pub fn close(self) {
        log::trace!("closing {:?} reader", self.format);
    }
}

impl Iterator for RowReader {
    type Item = ImportResult<Vec<Value>>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.source {
            RowSource::Delimited(rows) => rows.next(),
            #[cfg(feature = "excel")]
            RowSource::Workbook(rows) => rows.next(),
        }
    }
}

/// Open `path` as a row iterator.
///
/// `format` overrides extension detection. `sheet` selects a worksheet by name for
/// workbooks (default: the first sheet) and is ignored for delimited text.
pub fn open(
    path: impl AsRef<Path>,
    format: Option<FileFormat>,
    sheet: Option<&str>,
) -> ImportResult<RowReader> {
    let path = path.as_ref();
    let format = match format {
        Some(f) => f,
        None => FileFormat::detect(path)?,
    };

    #[cfg(not(feature = "excel"))]
    let _ = sheet;

    let source = match format {
        FileFormat::Delimited => RowSource::Delimited(DelimitedRows::from_path(path)?),
        #[cfg(feature = "excel")]
        FileFormat::Workbook => RowSource::Workbook(WorkbookRows::from_path(path, sheet)?),
        #[cfg(not(feature = "excel"))]
        FileFormat::Workbook => {
            return Err(ImportError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        }
    };

    Ok(RowReader { format, source })
}
