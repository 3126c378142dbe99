use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for import, grouping, and export operations.
pub type ImportResult<T> = Result<T, ImportError>;

/// Error type returned across the crate.
///
/// One enum is shared by the readers, the grouping engine and the writers. None of these
/// errors are retried internally.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Delimited-text read/write error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "excel")]
    /// Workbook read error (feature-gated behind `excel`).
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    #[cfg(feature = "excel")]
    /// Workbook write error (feature-gated behind `excel`).
    #[error("xlsx write error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// The path's extension maps to neither a delimited-text nor a workbook format.
    #[error("unsupported file type: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    /// The source produced no rows at all, so there is no header row to resolve.
    #[error("no header row found in {}", path.display())]
    EmptySource { path: PathBuf },

    /// Two columns resolved to the same name where names must be unique.
    #[error("duplicate header '{name}' at columns {first} and {second}")]
    DuplicateHeader {
        name: String,
        first: usize,
        second: usize,
    },

    /// A column rule rejected a cleaned cell value.
    #[error("failed to convert value at row {row} column '{column}': {message} (raw='{raw}')")]
    ValueConversion {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },

    /// A grouping request named a column that is not in the schema.
    #[error("missing column '{column}'. headers={headers:?}")]
    MissingColumn {
        column: String,
        headers: Vec<String>,
    },

    /// A grouping spec was empty or repeated a column.
    #[error("invalid group spec: {message}")]
    InvalidGroupSpec { message: String },

    /// A record cannot be laid out positionally under the header row being written.
    #[error("unsupported record shape at row {row}: {message}")]
    UnsupportedRecordShape { row: usize, message: String },
}
