#![cfg(feature = "excel")]

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::NaiveDate;
use rust_xlsxwriter::{Formula, Workbook};

use tabular_import::ingestion::{import_from_path, ColumnRule, FileFormat, ImportOptions};
use tabular_import::types::{RecordShape, Value};

fn tmp_file(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("tabular-import-{name}-{nanos}.xlsx"))
}

fn write_people_xlsx(path: &PathBuf) {
    let mut wb = Workbook::new();

    let ws = wb.add_worksheet();
    ws.set_name("People").unwrap();
    ws.write_string(0, 0, "id").unwrap();
    ws.write_string(0, 1, " name ").unwrap();
    ws.write_string(0, 2, "score").unwrap();
    ws.write_string(0, 3, "active").unwrap();
    ws.write_string(0, 4, "total").unwrap();

    ws.write_number(1, 0, 1).unwrap();
    ws.write_string(1, 1, "  Ada ").unwrap();
    ws.write_number(1, 2, 98.5).unwrap();
    ws.write_boolean(1, 3, true).unwrap();
    ws.write_formula(1, 4, Formula::new("=A2+2").set_result("3")).unwrap();

    ws.write_number(2, 0, 2).unwrap();
    ws.write_string(2, 1, "N/A").unwrap();
    // score left empty
    ws.write_boolean(2, 3, false).unwrap();
    ws.write_formula(2, 4, Formula::new("=A3+2").set_result("4")).unwrap();

    let second = wb.add_worksheet();
    second.set_name("Other").unwrap();
    second.write_string(0, 0, "joined").unwrap();
    let joined = NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let date_format = rust_xlsxwriter::Format::new().set_num_format("yyyy-mm-dd");
    second
        .write_datetime_with_format(1, 0, &joined, &date_format)
        .unwrap();

    wb.save(path).unwrap();
}

#[test]
fn import_workbook_first_sheet_keeps_native_types() {
    let path = tmp_file("people");
    write_people_xlsx(&path);

    let opts = ImportOptions {
        shape: RecordShape::Sequence,
        ..Default::default()
    };
    let ds = import_from_path(&path, &opts).unwrap();

    // Header cells are not trimmed; only values are.
    assert_eq!(ds.headers()[1], " name ");
    assert_eq!(ds.row_count(), 2);
    assert_eq!(ds.records[0].value_at(1), Some(&Value::from("Ada")));
    assert_eq!(ds.records[0].value_at(2), Some(&Value::Float(98.5)));
    assert_eq!(ds.records[0].value_at(3), Some(&Value::Bool(true)));
    assert_eq!(ds.records[1].value_at(1), Some(&Value::Null));
    assert_eq!(ds.records[1].value_at(2), Some(&Value::Null));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn formula_cells_yield_cached_results() {
    let path = tmp_file("formulas");
    write_people_xlsx(&path);

    let opts = ImportOptions::default()
        .with_rule("id", ColumnRule::Int)
        .with_rule("total", ColumnRule::Int);
    let ds = import_from_path(&path, &opts).unwrap();
    let totals: Vec<&Value> = ds.column_values("total").unwrap().collect();
    assert_eq!(totals, vec![&Value::Int(3), &Value::Int(4)]);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn import_named_sheet_reads_dates() {
    let path = tmp_file("named");
    write_people_xlsx(&path);

    let opts = ImportOptions {
        sheet: Some("Other".to_string()),
        format: Some(FileFormat::Workbook),
        ..Default::default()
    };
    let ds = import_from_path(&path, &opts).unwrap();
    let expected = NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    assert_eq!(
        ds.records[0].get(&ds.schema, "joined"),
        Some(&Value::DateTime(expected))
    );

    let _ = std::fs::remove_file(&path);
}

#[test]
fn missing_sheet_is_an_error() {
    let path = tmp_file("missing-sheet");
    write_people_xlsx(&path);

    let opts = ImportOptions {
        sheet: Some("Nope".to_string()),
        ..Default::default()
    };
    assert!(import_from_path(&path, &opts).is_err());

    let _ = std::fs::remove_file(&path);
}
