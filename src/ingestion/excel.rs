#![cfg(feature = "excel")]

//! Workbook row source (`.xlsx`, `.xls`, `.xlsm`, `.xlsb`).

use std::path::Path;

use calamine::{open_workbook_auto, Data, DataType, Range, Reader};

use crate::error::{ImportError, ImportResult};
use crate::types::Value;

/// Lazy, single-pass iterator over the rows of one worksheet.
///
/// Formula cells yield their cached results. Cells keep their native types; empty cells
/// become [`Value::Null`] and every row is padded to the sheet's used width.
pub struct WorkbookRows {
    sheet: String,
    range: Range<Data>,
    next_row: usize,
    height: usize,
    width: usize,
}

impl WorkbookRows {
    /// Open `path` and select `sheet`, or the first sheet in the workbook when `None`.
    pub fn from_path(path: impl AsRef<Path>, sheet: Option<&str>) -> ImportResult<Self> {
        let path = path.as_ref();
        let mut workbook = open_workbook_auto(path)?;

        let sheet = match sheet {
            Some(name) => name.to_string(),
            None => workbook
                .sheet_names()
                .first()
                .cloned()
                .ok_or_else(|| ImportError::EmptySource {
                    path: path.to_path_buf(),
                })?,
        };
        let range = workbook.worksheet_range(&sheet)?;
        let (height, width) = range.get_size();

        Ok(Self {
            sheet,
            range,
            next_row: 0,
            height,
            width,
        })
    }

    /// Name of the worksheet being read.
    pub fn sheet(&self) -> &str {
        &self.sheet
    }
}

impl Iterator for WorkbookRows {
    type Item = ImportResult<Vec<Value>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_row >= self.height {
            return None;
        }
        let row = self.next_row;
        self.next_row += 1;

        let cells = (0..self.width)
            .map(|col| self.range.get((row, col)).map_or(Value::Null, cell_value))
            .collect();
        Some(Ok(cells))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.height - self.next_row;
        (left, Some(left))
    }
}

fn cell_value(c: &Data) -> Value {
    match c {
        Data::Empty => Value::Null,
        Data::String(s) => Value::Text(s.clone()),
        Data::Int(i) => Value::Int(*i),
        Data::Float(f) => Value::Float(*f),
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(_) | Data::DateTimeIso(_) => c
            .as_datetime()
            .map(Value::DateTime)
            .unwrap_or_else(|| Value::Text(c.to_string())),
        Data::DurationIso(s) => Value::Text(s.clone()),
        Data::Error(e) => Value::Text(e.to_string()),
    }
}
