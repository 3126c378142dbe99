//! Core data model types.
//!
//! Imports produce an in-memory [`DataSet`]: a resolved [`Schema`] (the logical header
//! names), the [`RecordShape`] chosen at import time, and the [`Record`]s themselves.

use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::NaiveDateTime;
use indexmap::IndexMap;

use crate::error::{ImportError, ImportResult};

/// Text form used for date-time cells when they are rendered as strings.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single cell value.
///
/// Equality and hashing are structural so values can be used inside group keys. Floats
/// compare numerically, except that all NaNs are equal to each other.
#[derive(Debug, Clone)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit float.
    Float(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Text(String),
    /// Date and time without a timezone (workbook date cells).
    DateTime(NaiveDateTime),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short runtime type name, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Text(_) => "text",
            Value::DateTime(_) => "datetime",
        }
    }

    /// Borrow the string payload of a [`Value::Text`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Int(i) => i.hash(state),
            Value::Float(f) => {
                // Keep hashing consistent with `eq`: one bit pattern for 0.0/-0.0 and for NaN.
                let bits = if *f == 0.0 {
                    0.0f64.to_bits()
                } else if f.is_nan() {
                    f64::NAN.to_bits()
                } else {
                    f.to_bits()
                };
                bits.hash(state);
            }
            Value::Bool(b) => b.hash(state),
            Value::Text(s) => s.hash(state),
            Value::DateTime(dt) => dt.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Text(s) => f.write_str(s),
            Value::DateTime(dt) => write!(f, "{}", dt.format(DATETIME_FORMAT)),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(dt: NaiveDateTime) -> Self {
        Value::DateTime(dt)
    }
}

/// Ordered list of logical header names, fixed once at import time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    /// Column names, in source column order.
    pub columns: Vec<String>,
}

impl Schema {
    /// Create a new schema from column names.
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if the schema has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns the index of the column named `name`, if present.
    ///
    /// When a name repeats, the last column carrying it wins, the same column a
    /// header → value map built from the row would keep.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().rposition(|c| c == name)
    }

    /// Like [`Self::index_of`] but fails with [`ImportError::MissingColumn`].
    pub fn require(&self, name: &str) -> ImportResult<usize> {
        self.index_of(name).ok_or_else(|| ImportError::MissingColumn {
            column: name.to_string(),
            headers: self.columns.clone(),
        })
    }

    /// Fails with [`ImportError::DuplicateHeader`] on the first repeated column name.
    pub fn ensure_unique(&self) -> ImportResult<()> {
        for (second, name) in self.columns.iter().enumerate() {
            if let Some(first) = self.columns[..second].iter().position(|c| c == name) {
                return Err(ImportError::DuplicateHeader {
                    name: name.clone(),
                    first,
                    second,
                });
            }
        }
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<S> for Schema {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// How imported rows are materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordShape {
    /// Ordered, growable list of values in schema order.
    Sequence,
    /// Header → value mapping, iterating in schema order.
    #[default]
    Mapping,
    /// Fixed-length positional record.
    Tuple,
}

impl RecordShape {
    /// Assemble one row of coerced values into a [`Record`] of this shape.
    ///
    /// `values` must have one entry per schema column. For [`RecordShape::Mapping`] the
    /// schema must not repeat names (see [`Schema::ensure_unique`]); the map is filled in
    /// schema order so its iteration order always matches the header row.
    pub fn build(&self, schema: &Schema, values: Vec<Value>) -> Record {
        debug_assert_eq!(values.len(), schema.len());
        match self {
            RecordShape::Sequence => Record::Sequence(values),
            RecordShape::Tuple => Record::Tuple(values.into_boxed_slice()),
            RecordShape::Mapping => {
                Record::Mapping(schema.columns.iter().cloned().zip(values).collect())
            }
        }
    }
}

/// One materialized row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    /// Positional values.
    Sequence(Vec<Value>),
    /// Header → value pairs.
    Mapping(IndexMap<String, Value>),
    /// Immutable positional values.
    Tuple(Box<[Value]>),
}

impl Record {
    /// The shape of this record.
    pub fn shape(&self) -> RecordShape {
        match self {
            Record::Sequence(_) => RecordShape::Sequence,
            Record::Mapping(_) => RecordShape::Mapping,
            Record::Tuple(_) => RecordShape::Tuple,
        }
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        match self {
            Record::Sequence(v) => v.len(),
            Record::Mapping(m) => m.len(),
            Record::Tuple(v) => v.len(),
        }
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at a position. Mapping records are indexed in insertion order.
    pub fn value_at(&self, idx: usize) -> Option<&Value> {
        match self {
            Record::Sequence(v) => v.get(idx),
            Record::Tuple(v) => v.get(idx),
            Record::Mapping(m) => m.get_index(idx).map(|(_, v)| v),
        }
    }

    /// Value for a logical column name.
    ///
    /// Mapping records are looked up by key; positional records are projected through
    /// `schema`.
    pub fn get(&self, schema: &Schema, name: &str) -> Option<&Value> {
        match self {
            Record::Mapping(m) => m.get(name),
            _ => schema.index_of(name).and_then(|idx| self.value_at(idx)),
        }
    }

    /// Iterate values positionally (mapping records in their own iteration order).
    pub fn values(&self) -> impl Iterator<Item = &Value> + '_ {
        let (positional, mapping) = match self {
            Record::Sequence(v) => (Some(v.as_slice()), None),
            Record::Tuple(v) => (Some(&v[..]), None),
            Record::Mapping(m) => (None, Some(m)),
        };
        positional
            .into_iter()
            .flatten()
            .chain(mapping.into_iter().flat_map(|m| m.values()))
    }
}

impl From<Vec<Value>> for Record {
    fn from(values: Vec<Value>) -> Self {
        Record::Sequence(values)
    }
}

/// In-memory tabular dataset produced by an import.
///
/// Records are appended once during the load and never mutated afterwards; grouping and
/// export only borrow them.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    /// Resolved logical headers.
    pub schema: Schema,
    /// Shape shared by every record.
    pub shape: RecordShape,
    /// Records in source order.
    pub records: Vec<Record>,
}

impl DataSet {
    /// Create a dataset from parts.
    pub fn new(schema: Schema, shape: RecordShape, records: Vec<Record>) -> Self {
        Self {
            schema,
            shape,
            records,
        }
    }

    /// Number of records in the dataset.
    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    /// Resolved header names.
    pub fn headers(&self) -> &[String] {
        &self.schema.columns
    }

    /// The first `n` records (fewer if the dataset is shorter).
    pub fn head(&self, n: usize) -> &[Record] {
        &self.records[..n.min(self.records.len())]
    }

    /// Iterate one column's values across all records.
    pub fn column_values<'a>(
        &'a self,
        name: &str,
    ) -> ImportResult<impl Iterator<Item = &'a Value> + use<'a>> {
        let idx = self.schema.require(name)?;
        Ok(self.records.iter().filter_map(move |r| r.value_at(idx)))
    }
}
