//! Multi-key grouping for [`crate::types::DataSet`].

use indexmap::IndexMap;

use crate::error::{ImportError, ImportResult};
use crate::types::{DataSet, Record, Schema, Value};

/// An ordered, non-empty list of distinct column names forming one composite key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupSpec {
    columns: Vec<String>,
}

impl GroupSpec {
    /// Create a spec, rejecting empty lists and repeated names.
    pub fn new<I, S>(columns: I) -> ImportResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        if columns.is_empty() {
            return Err(ImportError::InvalidGroupSpec {
                message: "group spec has no columns".to_string(),
            });
        }
        for (i, c) in columns.iter().enumerate() {
            if columns[..i].contains(c) {
                return Err(ImportError::InvalidGroupSpec {
                    message: format!("column '{c}' appears more than once"),
                });
            }
        }
        Ok(Self { columns })
    }

    /// Column names in key order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of values in keys built from this spec.
    pub fn arity(&self) -> usize {
        self.columns.len()
    }
}

/// Values of one record under a [`GroupSpec`], in spec order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey(pub Vec<Value>);

impl GroupKey {
    /// Key values, one per spec column.
    pub fn values(&self) -> &[Value] {
        &self.0
    }

    /// Number of values in the key.
    pub fn arity(&self) -> usize {
        self.0.len()
    }
}

impl<V: Into<Value>> FromIterator<V> for GroupKey {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        GroupKey(iter.into_iter().map(Into::into).collect())
    }
}

/// Members of each key, keys in first-seen order, records in dataset order.
pub type Groups<'a> = IndexMap<GroupKey, Vec<&'a Record>>;

/// Result of [`group`]: one [`Groups`] per requested spec.
#[derive(Debug, Default)]
pub struct GroupIndex<'a> {
    groups: IndexMap<GroupSpec, Groups<'a>>,
}

impl<'a> GroupIndex<'a> {
    /// Groups for `spec`, if it was requested.
    pub fn get(&self, spec: &GroupSpec) -> Option<&Groups<'a>> {
        self.groups.get(spec)
    }

    /// Groups for the spec whose columns are exactly `columns`.
    pub fn by_columns(&self, columns: &[&str]) -> Option<&Groups<'a>> {
        self.groups
            .iter()
            .find(|(spec, _)| spec.columns.iter().map(String::as_str).eq(columns.iter().copied()))
            .map(|(_, groups)| groups)
    }

    /// Iterate specs and their groups in request order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, GroupSpec, Groups<'a>> {
        self.groups.iter()
    }

    /// Number of specs grouped.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` if no spec was requested.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<'i, 'a> IntoIterator for &'i GroupIndex<'a> {
    type Item = (&'i GroupSpec, &'i Groups<'a>);
    type IntoIter = indexmap::map::Iter<'i, GroupSpec, Groups<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Partition `dataset` once per spec.
///
/// Each spec is checked against the schema before any record is visited; an unknown
/// column fails the whole request with [`ImportError::MissingColumn`]. Records are
/// borrowed, not copied. Every record lands in exactly one key per spec.
pub fn group<'a>(dataset: &'a DataSet, specs: &[GroupSpec]) -> ImportResult<GroupIndex<'a>> {
    let mut groups = IndexMap::with_capacity(specs.len());
    for spec in specs {
        let members = group_one(dataset, spec)?;
        groups.insert(spec.clone(), members);
    }
    Ok(GroupIndex { groups })
}

fn group_one<'a>(dataset: &'a DataSet, spec: &GroupSpec) -> ImportResult<Groups<'a>> {
    let schema = &dataset.schema;
    let idxs = spec
        .columns
        .iter()
        .map(|c| schema.require(c))
        .collect::<ImportResult<Vec<usize>>>()?;

    let mut groups = Groups::new();
    for record in &dataset.records {
        let key = spec
            .columns
            .iter()
            .zip(&idxs)
            .map(|(column, &idx)| key_value(schema, record, column, idx).cloned())
            .collect::<ImportResult<Vec<Value>>>()?;
        groups.entry(GroupKey(key)).or_default().push(record);
    }
    Ok(groups)
}

fn key_value<'r>(
    schema: &Schema,
    record: &'r Record,
    column: &str,
    idx: usize,
) -> ImportResult<&'r Value> {
    let value = match record {
        Record::Mapping(m) => m.get(column),
        _ => record.value_at(idx),
    };
    value.ok_or_else(|| ImportError::MissingColumn {
        column: column.to_string(),
        headers: schema.columns.clone(),
    })
}

impl DataSet {
    /// Group this dataset's records. See [`group`].
    pub fn group_by(&self, specs: &[GroupSpec]) -> ImportResult<GroupIndex<'_>> {
        group(self, specs)
    }
}
