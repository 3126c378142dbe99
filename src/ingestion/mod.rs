//! Import entrypoints and implementations.
//!
//! Most callers should use [`import_from_path`] (from [`unified`]) which:
//!
//! - detects the format by file extension (or you can override via [`ImportOptions`])
//! - resolves the header row through [`HeaderOverrides`]
//! - coerces every cell with [`NullTokens`] and per-column [`ColumnRule`]s
//! - builds records into the chosen [`crate::types::RecordShape`]
//! - optionally reports success/failure/alerts to an [`ImportObserver`]
//!
//! Row sources are also available directly under [`reader`], [`csv`] and `excel`.

pub mod coerce;
pub mod csv;
#[cfg(feature = "excel")]
pub mod excel;
pub mod headers;
pub mod observability;
pub mod reader;
pub mod unified;

pub use coerce::{coerce, ColumnRule, NullTokens, DEFAULT_NULL_TOKENS};
pub use headers::{resolve_headers, HeaderOverrides};
pub use observability::{
    CompositeObserver, ImportContext, ImportObserver, ImportSeverity, ImportStats, LogObserver,
    report,
};
pub use reader::{open, FileFormat, RowReader};
pub use unified::{import_csv_from_reader, import_from_path, ImportOptions};
