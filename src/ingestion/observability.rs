//! Import outcome reporting: severities, observer callbacks and a `log`-backed observer.
//!
//! [`import_from_path`](super::import_from_path) calls [`report`] once per attempt with
//! the loaded dataset or the error that stopped it.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{ImportError, ImportResult};
use crate::types::DataSet;

use super::reader::FileFormat;

/// Severity of a failed import, used for observer callbacks and the alert threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ImportSeverity {
    /// Informational event.
    Info,
    /// Non-fatal event.
    Warning,
    /// The import failed on its input (bad header, unconvertible value, ...).
    Error,
    /// The import failed because the source could not be read at all.
    Critical,
}

impl ImportSeverity {
    /// Severity assigned to a failed import.
    ///
    /// I/O failures, including those surfaced through the CSV reader, are critical;
    /// everything else is an error in the data or the request.
    pub fn for_error(e: &ImportError) -> Self {
        match e {
            ImportError::Io(_) => Self::Critical,
            ImportError::Csv(err) if matches!(err.kind(), csv::ErrorKind::Io(_)) => {
                Self::Critical
            }
            _ => Self::Error,
        }
    }

    /// `log` level events of this severity are emitted at.
    pub fn log_level(self) -> log::Level {
        match self {
            Self::Info => log::Level::Info,
            Self::Warning => log::Level::Warn,
            Self::Error | Self::Critical => log::Level::Error,
        }
    }
}

/// Where an import read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportContext {
    /// Source path.
    pub path: PathBuf,
    /// Format the source was read as, after detection or override.
    pub format: FileFormat,
    /// Requested worksheet, for workbooks.
    pub sheet: Option<String>,
}

impl fmt::Display for ImportContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}", self.path.display(), self.format.extension())?;
        if let Some(sheet) = &self.sheet {
            write!(f, ", sheet '{sheet}'")?;
        }
        f.write_str(")")
    }
}

/// Size of a successfully loaded dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportStats {
    /// Number of loaded records.
    pub rows: usize,
    /// Number of resolved columns.
    pub columns: usize,
}

impl ImportStats {
    /// Stats for `dataset`.
    pub fn of(dataset: &DataSet) -> Self {
        Self {
            rows: dataset.row_count(),
            columns: dataset.schema.len(),
        }
    }
}

/// Receives import outcomes. All methods default to doing nothing.
pub trait ImportObserver: Send + Sync {
    /// Called when an import succeeds.
    fn on_success(&self, _ctx: &ImportContext, _stats: ImportStats) {}

    /// Called when an import fails.
    fn on_failure(&self, _ctx: &ImportContext, _severity: ImportSeverity, _error: &ImportError) {}

    /// Called after [`Self::on_failure`] when the severity meets the alert threshold.
    fn on_alert(&self, _ctx: &ImportContext, _severity: ImportSeverity, _error: &ImportError) {}
}

/// Deliver one import outcome to `observer`.
///
/// Failures always reach [`ImportObserver::on_failure`]; those at or above `alert_at`
/// also reach [`ImportObserver::on_alert`].
pub fn report(
    observer: &dyn ImportObserver,
    ctx: &ImportContext,
    result: &ImportResult<DataSet>,
    alert_at: ImportSeverity,
) {
    match result {
        Ok(ds) => observer.on_success(ctx, ImportStats::of(ds)),
        Err(e) => {
            let severity = ImportSeverity::for_error(e);
            observer.on_failure(ctx, severity, e);
            if severity >= alert_at {
                observer.on_alert(ctx, severity, e);
            }
        }
    }
}

/// Forwards every callback to each wrapped observer, in order.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn ImportObserver>>,
}

impl CompositeObserver {
    /// Wrap `observers`.
    pub fn new(observers: Vec<Arc<dyn ImportObserver>>) -> Self {
        Self { observers }
    }

    /// Append one more observer.
    pub fn with(mut self, observer: Arc<dyn ImportObserver>) -> Self {
        self.observers.push(observer);
        self
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl ImportObserver for CompositeObserver {
    fn on_success(&self, ctx: &ImportContext, stats: ImportStats) {
        self.observers.iter().for_each(|o| o.on_success(ctx, stats));
    }

    fn on_failure(&self, ctx: &ImportContext, severity: ImportSeverity, error: &ImportError) {
        self.observers.iter().for_each(|o| o.on_failure(ctx, severity, error));
    }

    fn on_alert(&self, ctx: &ImportContext, severity: ImportSeverity, error: &ImportError) {
        self.observers.iter().for_each(|o| o.on_alert(ctx, severity, error));
    }
}

/// Emits import outcomes through the `log` facade under the `tabular_import` target.
#[derive(Debug, Default)]
pub struct LogObserver;

const LOG_TARGET: &str = "tabular_import";

impl ImportObserver for LogObserver {
    fn on_success(&self, ctx: &ImportContext, stats: ImportStats) {
        log::info!(
            target: LOG_TARGET,
            "imported {ctx}: {} rows x {} columns",
            stats.rows,
            stats.columns
        );
    }

    fn on_failure(&self, ctx: &ImportContext, severity: ImportSeverity, error: &ImportError) {
        log::log!(
            target: LOG_TARGET,
            severity.log_level(),
            "import of {ctx} failed ({severity:?}): {error}"
        );
    }

    fn on_alert(&self, ctx: &ImportContext, severity: ImportSeverity, error: &ImportError) {
        log::error!(target: LOG_TARGET, "ALERT {severity:?} importing {ctx}: {error}");
    }
}
