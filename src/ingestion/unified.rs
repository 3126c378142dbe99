//! Import entrypoint.
//!
//! [`import_from_path`] opens a file, resolves its header row once, then coerces and
//! builds every data row into the configured [`RecordShape`].
//!
//! - If [`ImportOptions::format`] is `None`, the format is detected from the file
//!   extension.
//! - If an [`ImportObserver`] is configured, success/failure/alerts are reported to it.

use std::collections::HashMap;
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use crate::error::{ImportError, ImportResult};
use crate::types::{DataSet, RecordShape, Schema, Value};

use super::coerce::{coerce, ColumnRule, NullTokens};
use super::csv::DelimitedRows;
use super::headers::{header_text, resolve_headers, HeaderOverrides};
use super::observability::{report, ImportContext, ImportObserver, ImportSeverity};
use super::reader::{self, FileFormat};

/// Options controlling an import.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct ImportOptions {
    /// If `None`, detect format from the file extension.
    pub format: Option<FileFormat>,
    /// Worksheet to read from a workbook. `None` reads the first sheet.
    pub sheet: Option<String>,
    /// Header renames applied once to the header row.
    pub header_overrides: Option<HeaderOverrides>,
    /// Conversion per logical column name. Columns without a rule keep the cleaned value.
    pub column_rules: HashMap<String, ColumnRule>,
    /// Shape of every record in the resulting dataset.
    pub shape: RecordShape,
    /// Text values that count as missing after trimming.
    pub null_tokens: NullTokens,
    /// Maximum number of data rows to load.
    pub row_limit: Option<usize>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn ImportObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: ImportSeverity,
}

impl ImportOptions {
    /// Add a conversion rule for `column`.
    pub fn with_rule(mut self, column: impl Into<String>, rule: ColumnRule) -> Self {
        self.column_rules.insert(column.into(), rule);
        self
    }
}

impl fmt::Debug for ImportOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImportOptions")
            .field("format", &self.format)
            .field("sheet", &self.sheet)
            .field("header_overrides", &self.header_overrides)
            .field("column_rules", &self.column_rules)
            .field("shape", &self.shape)
            .field("null_tokens", &self.null_tokens)
            .field("row_limit", &self.row_limit)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            format: None,
            sheet: None,
            header_overrides: None,
            column_rules: HashMap::new(),
            shape: RecordShape::default(),
            null_tokens: NullTokens::default(),
            row_limit: None,
            observer: None,
            alert_at_or_above: ImportSeverity::Critical,
        }
    }
}

/// Import a delimited-text or workbook file into an in-memory [`DataSet`].
///
/// The first row is the header row. Each later row is padded with nulls or truncated to
/// the header width, each cell is coerced (see [`super::coerce::coerce`]), and the row is
/// built into `options.shape`. Loading stops after `options.row_limit` data rows.
///
/// The file or workbook is released before this function returns, on success and on
/// every error path.
///
/// # Examples
///
/// ```no_run
/// use tabular_import::ingestion::{import_from_path, ColumnRule, ImportOptions};
///
/// # fn main() -> Result<(), tabular_import::ImportError> {
/// let opts = ImportOptions::default()
///     .with_rule("age", ColumnRule::Int)
///     .with_rule("annualIncome", ColumnRule::Float);
///
/// let ds = import_from_path("customers.csv", &opts)?;
/// println!("rows={}", ds.row_count());
/// # Ok(())
/// # }
/// ```
pub fn import_from_path(path: impl AsRef<Path>, options: &ImportOptions) -> ImportResult<DataSet> {
    let path = path.as_ref();
    let format = match options.format {
        Some(f) => f,
        None => FileFormat::detect(path)?,
    };

    let ctx = ImportContext {
        path: path.to_path_buf(),
        format,
        sheet: options.sheet.clone(),
    };

    let result = reader::open(path, Some(format), options.sheet.as_deref()).and_then(|mut rows| {
        let loaded = load(path, &mut rows, options);
        rows.close();
        loaded
    });

    if let Some(obs) = options.observer.as_deref() {
        report(obs, &ctx, &result, options.alert_at_or_above);
    }

    result
}

/// Import delimited text from an arbitrary byte source.
///
/// `format`, `sheet` and `observer` in `options` are ignored.
pub fn import_csv_from_reader<R: Read>(
    reader: R,
    options: &ImportOptions,
) -> ImportResult<DataSet> {
    let mut rows = DelimitedRows::from_reader(reader);
    load(Path::new("<reader>"), &mut rows, options)
}

fn load<I>(source: &Path, rows: &mut I, options: &ImportOptions) -> ImportResult<DataSet>
where
    I: Iterator<Item = ImportResult<Vec<Value>>>,
{
    let raw_headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row?.iter().map(header_text).collect(),
        None => {
            return Err(ImportError::EmptySource {
                path: source.to_path_buf(),
            });
        }
    };
    let schema = Schema::new(resolve_headers(&raw_headers, options.header_overrides.as_ref()));
    if options.shape == RecordShape::Mapping {
        schema.ensure_unique()?;
    }
    log::info!("headers: {:?}", schema.columns);

    let rules: Vec<Option<&ColumnRule>> = schema
        .columns
        .iter()
        .map(|c| options.column_rules.get(c))
        .collect();

    let limit = options.row_limit.unwrap_or(usize::MAX);
    let mut records = Vec::new();
    for (row_idx0, row) in rows.by_ref().take(limit).enumerate() {
        // 1-based for users; +1 again because the header is row 1.
        let user_row = row_idx0 + 2;
        let mut cells = row?;
        cells.resize(schema.len(), Value::Null);

        let mut values = Vec::with_capacity(schema.len());
        for ((column, rule), cell) in schema.columns.iter().zip(&rules).zip(cells) {
            let raw = rule.map(|_| cell.to_string());
            let value = coerce(cell, *rule, &options.null_tokens).map_err(|message| {
                ImportError::ValueConversion {
                    row: user_row,
                    column: column.clone(),
                    raw: raw.unwrap_or_default(),
                    message,
                }
            })?;
            values.push(value);
        }

        if row_idx0 == 0 && log::log_enabled!(log::Level::Debug) {
            for (column, value) in schema.columns.iter().zip(&values) {
                log::debug!("{column} type is {}", value.type_name());
            }
        }
        records.push(options.shape.build(&schema, values));
    }

    if options.row_limit.is_some_and(|l| records.len() == l) {
        log::debug!("stopped after row limit of {limit} in {}", source.display());
    }

    Ok(DataSet::new(schema, options.shape, records))
}
