#![cfg(feature = "excel")]

//! Multi-sheet workbook writer.

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::error::ImportResult;
use crate::types::{DataSet, Record, Value};

use super::format_row;

/// Number format applied to date-time cells.
const DATETIME_NUM_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Largest integer magnitude a worksheet number cell holds exactly (2^53). Larger
/// integers are written as text.
const MAX_EXACT_INT: u64 = 1 << 53;

/// One worksheet to write. Unset fields fall back to the default dataset.
#[derive(Debug, Clone, Copy, Default)]
pub struct SheetConfig<'a> {
    /// Worksheet name. `None` keeps the writer's default (`Sheet1`, `Sheet2`, ...).
    pub title: Option<&'a str>,
    /// Rows to write instead of the dataset's records.
    pub rows: Option<&'a [Record]>,
    /// Header row to write instead of the dataset's headers.
    pub headers: Option<&'a [String]>,
}

impl<'a> SheetConfig<'a> {
    /// A sheet with the default name, rows and headers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Name the worksheet `title`.
    pub fn titled(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    /// Write `rows` instead of the dataset's records.
    pub fn with_rows(mut self, rows: &'a [Record]) -> Self {
        self.rows = Some(rows);
        self
    }

    /// Write `headers` as the first row instead of the dataset's headers.
    pub fn with_headers(mut self, headers: &'a [String]) -> Self {
        self.headers = Some(headers);
        self
    }
}

/// Write one worksheet per entry of `sheets`, in order, then save once to `path`.
///
/// With no sheet configs nothing is written and `Ok(None)` is returned. Otherwise every
/// sheet gets its header row followed by its data rows, and the saved path is returned.
pub fn write_workbook(
    path: impl AsRef<Path>,
    sheets: &[SheetConfig<'_>],
    default: &DataSet,
) -> ImportResult<Option<PathBuf>> {
    if sheets.is_empty() {
        return Ok(None);
    }
    let path = path.as_ref();

    let datetime_format = Format::new().set_num_format(DATETIME_NUM_FORMAT);
    let mut workbook = Workbook::new();
    for config in sheets {
        let worksheet = workbook.add_worksheet();
        if let Some(title) = config.title {
            worksheet.set_name(title)?;
        }
        let rows = config.rows.unwrap_or(&default.records);
        let headers = config.headers.unwrap_or(default.headers());
        write_sheet(worksheet, rows, headers, &datetime_format)?;
    }

    workbook.save(path)?;
    log::info!("wrote {} sheet(s) to {}", sheets.len(), path.display());
    Ok(Some(path.to_path_buf()))
}

fn write_sheet(
    worksheet: &mut Worksheet,
    rows: &[Record],
    headers: &[String],
    datetime_format: &Format,
) -> ImportResult<()> {
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string(0, col_num(col)?, header)?;
    }
    for (idx0, record) in rows.iter().enumerate() {
        let row = row_num(idx0 + 1)?;
        for (col, value) in format_row(idx0 + 2, record, headers.len())?.into_iter().enumerate() {
            write_cell(worksheet, row, col_num(col)?, value, datetime_format)?;
        }
    }
    Ok(())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &Value,
    datetime_format: &Format,
) -> Result<(), XlsxError> {
    match value {
        Value::Null => {}
        Value::Int(i) if i.unsigned_abs() > MAX_EXACT_INT => {
            worksheet.write_string(row, col, i.to_string())?;
        }
        Value::Int(i) => {
            worksheet.write_number(row, col, *i as f64)?;
        }
        Value::Float(f) => {
            worksheet.write_number(row, col, *f)?;
        }
        Value::Bool(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        Value::Text(s) => {
            worksheet.write_string(row, col, s)?;
        }
        Value::DateTime(dt) => {
            worksheet.write_datetime_with_format(row, col, dt, datetime_format)?;
        }
    }
    Ok(())
}

fn row_num(idx: usize) -> Result<u32, XlsxError> {
    u32::try_from(idx).map_err(|_| XlsxError::RowColumnLimitError)
}

fn col_num(idx: usize) -> Result<u16, XlsxError> {
    u16::try_from(idx).map_err(|_| XlsxError::RowColumnLimitError)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RecordShape, Schema};

    fn tmp_file(name: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("tabular-import-{name}-{nanos}.xlsx"))
    }

    #[test]
    fn empty_sheet_list_writes_nothing() {
        let ds = DataSet::new(Schema::from_iter(["a"]), RecordShape::Mapping, Vec::new());
        let path = tmp_file("empty");
        assert_eq!(write_workbook(&path, &[], &ds).unwrap(), None);
        assert!(!path.exists());
    }

    #[test]
    fn misaligned_mapping_aborts_before_save() {
        let schema = Schema::from_iter(["a", "b"]);
        let rows = vec![RecordShape::Mapping.build(&schema, vec![Value::Int(1), Value::Int(2)])];
        let headers = vec!["only".to_string()];
        let ds = DataSet::new(schema, RecordShape::Mapping, Vec::new());
        let path = tmp_file("misaligned");
        let sheets = [SheetConfig::new().with_rows(&rows).with_headers(&headers)];
        assert!(write_workbook(&path, &sheets, &ds).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn integers_beyond_exact_float_range_are_written_as_text() {
        use calamine::{open_workbook_auto, Data, Reader};

        let schema = Schema::from_iter(["n"]);
        let rows: Vec<Record> = [1 << 53, (1 << 53) + 1, i64::MIN]
            .into_iter()
            .map(|i| RecordShape::Sequence.build(&schema, vec![Value::Int(i)]))
            .collect();
        let ds = DataSet::new(schema, RecordShape::Sequence, rows);
        let path = tmp_file("big-ints");
        write_workbook(&path, &[SheetConfig::new()], &ds).unwrap();

        let mut wb = open_workbook_auto(&path).unwrap();
        let range = wb.worksheet_range_at(0).unwrap().unwrap();
        assert_eq!(range.get((1, 0)), Some(&Data::Float(9_007_199_254_740_992.0)));
        assert_eq!(range.get((2, 0)), Some(&Data::String("9007199254740993".to_string())));
        assert_eq!(range.get((3, 0)), Some(&Data::String(i64::MIN.to_string())));
        let _ = std::fs::remove_file(&path);
    }
}
