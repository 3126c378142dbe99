//! In-memory operations over an imported [`crate::types::DataSet`].
//!
//! - [`group()`]: partition records by one or more composite keys
//!
//! ## Example
//!
//! ```rust
//! use tabular_import::processing::{group, GroupKey, GroupSpec};
//! use tabular_import::types::{DataSet, RecordShape, Schema, Value};
//!
//! let schema = Schema::from_iter(["age", "isMarried"]);
//! let shape = RecordShape::Sequence;
//! let records = [(34, 1), (29, 0), (34, 1)]
//!     .into_iter()
//!     .map(|(age, married)| shape.build(&schema, vec![Value::Int(age), Value::Int(married)]))
//!     .collect();
//! let ds = DataSet::new(schema, shape, records);
//!
//! let by_age = GroupSpec::new(["age"]).unwrap();
//! let index = group(&ds, &[by_age.clone()]).unwrap();
//! let groups = index.get(&by_age).unwrap();
//! assert_eq!(groups[&GroupKey::from_iter([34i64])].len(), 2);
//! assert_eq!(groups[&GroupKey::from_iter([29i64])].len(), 1);
//! ```

pub mod group;

pub use group::{group, GroupIndex, GroupKey, GroupSpec, Groups};
