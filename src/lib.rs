//! `tabular-import` reads CSV files and Excel workbooks into an in-memory
//! [`types::DataSet`], groups the records by composite keys, and writes derived tables back
//! out as CSV or multi-sheet workbooks.
//!
//! The primary entrypoint is [`ingestion::import_from_path`], which detects the format from
//! the file extension (or you can force one via [`ingestion::ImportOptions`]).
//!
//! ## What you can import
//!
//! - **Delimited text**: any extension containing `csv`
//! - **Workbooks** (Cargo feature `excel`, on by default): any extension containing `xls`
//!   (`.xls`, `.xlsx`, `.xlsm`, `.xlsb`). The first sheet is read unless
//!   [`ingestion::ImportOptions::sheet`] names another; formula cells yield cached results.
//!
//! The first row is the header row. Headers can be renamed by position or by raw name
//! ([`ingestion::HeaderOverrides`]). Every cell is trimmed, matched against the configured
//! [`ingestion::NullTokens`], and then passed through the column's
//! [`ingestion::ColumnRule`] if it has one.
//!
//! ## Quick example
//!
//! ```no_run
//! use tabular_import::export::{OutputDir, SheetConfig};
//! use tabular_import::ingestion::{import_from_path, ColumnRule, ImportOptions};
//! use tabular_import::processing::GroupSpec;
//!
//! # fn main() -> Result<(), tabular_import::ImportError> {
//! let opts = ImportOptions::default()
//!     .with_rule("hasNewBaby", ColumnRule::Int)
//!     .with_rule("avgPurchaseAmount", ColumnRule::Float);
//! let ds = import_from_path("customers.csv", &opts)?;
//!
//! let by_baby = GroupSpec::new(["hasNewBaby"])?;
//! let by_status = GroupSpec::new(["isMarried", "isEmployed"])?;
//! let index = ds.group_by(&[by_baby.clone(), by_status])?;
//! for (key, members) in index.get(&by_baby).into_iter().flatten() {
//!     println!("{:?}: {}", key.values(), members.len());
//! }
//!
//! let out = OutputDir::new("output");
//! ds.write_workbook(&out, "analysis", &[SheetConfig::new().titled("rawData")])?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: format readers, header resolution, value coercion, import entrypoint
//! - [`types`]: values, schema, records and the in-memory dataset
//! - [`processing`]: grouping
//! - [`export`]: CSV and workbook writers
//! - [`error`]: error type used across the crate

pub mod error;
pub mod export;
pub mod ingestion;
pub mod processing;
pub mod types;

pub use error::{ImportError, ImportResult};
