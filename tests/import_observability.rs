use std::sync::{Arc, Mutex};

use tabular_import::ingestion::{
    import_from_path, ColumnRule, CompositeObserver, FileFormat, ImportContext, ImportObserver,
    ImportOptions, ImportSeverity, ImportStats, LogObserver,
};
use tabular_import::ImportError;

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<Vec<ImportStats>>,
    failures: Mutex<Vec<ImportSeverity>>,
    alerts: Mutex<Vec<ImportSeverity>>,
}

impl ImportObserver for RecordingObserver {
    fn on_success(&self, _ctx: &ImportContext, stats: ImportStats) {
        self.successes.lock().unwrap().push(stats);
    }

    fn on_failure(&self, _ctx: &ImportContext, severity: ImportSeverity, _error: &ImportError) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(&self, _ctx: &ImportContext, severity: ImportSeverity, _error: &ImportError) {
        self.alerts.lock().unwrap().push(severity);
    }
}

#[test]
fn observer_receives_stats_on_success() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = ImportOptions {
        observer: Some(obs.clone()),
        ..Default::default()
    };

    import_from_path("tests/fixtures/customers.csv", &opts).unwrap();

    let successes = obs.successes.lock().unwrap().clone();
    assert_eq!(successes, vec![ImportStats { rows: 6, columns: 9 }]);
    assert!(obs.failures.lock().unwrap().is_empty());
}

#[test]
fn observer_receives_failure_and_alert_on_critical_io_error() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = ImportOptions {
        format: Some(FileFormat::Delimited),
        observer: Some(obs.clone()),
        alert_at_or_above: ImportSeverity::Critical,
        ..Default::default()
    };

    // Missing file -> Io error -> Critical
    let _ = import_from_path("tests/fixtures/does_not_exist.csv", &opts).unwrap_err();

    let failures = obs.failures.lock().unwrap().clone();
    let alerts = obs.alerts.lock().unwrap().clone();
    assert_eq!(failures, vec![ImportSeverity::Critical]);
    assert_eq!(alerts, vec![ImportSeverity::Critical]);
}

#[test]
fn observer_receives_failure_without_alert_for_conversion_error() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = ImportOptions {
        observer: Some(obs.clone()),
        alert_at_or_above: ImportSeverity::Critical,
        ..Default::default()
    }
    .with_rule("sex", ColumnRule::Int);

    // Conversion failure -> Error severity (not Critical) -> should not alert
    let _ = import_from_path("tests/fixtures/customers.csv", &opts).unwrap_err();

    let failures = obs.failures.lock().unwrap().clone();
    assert_eq!(failures, vec![ImportSeverity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn composite_observer_fans_out() {
    let a = Arc::new(RecordingObserver::default());
    let b = Arc::new(RecordingObserver::default());
    let observers: Vec<Arc<dyn ImportObserver>> = vec![a.clone(), b.clone(), Arc::new(LogObserver)];
    let composite = CompositeObserver::new(observers);
    let opts = ImportOptions {
        observer: Some(Arc::new(composite)),
        row_limit: Some(1),
        ..Default::default()
    };

    import_from_path("tests/fixtures/customers.csv", &opts).unwrap();

    assert_eq!(a.successes.lock().unwrap().len(), 1);
    assert_eq!(b.successes.lock().unwrap()[0].rows, 1);
}
