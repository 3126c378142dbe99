//! Per-cell normalization: whitespace trimming, null tokens, and column rules.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::types::Value;

/// Tokens that are treated as missing data after trimming and lower-casing.
pub const DEFAULT_NULL_TOKENS: &[&str] = &["", "n/a", "na", "none", "null", "nil", "-"];

/// Set of null-equivalent string tokens.
///
/// Tokens are stored lower-cased; matching is case-insensitive and ignores surrounding
/// whitespace in the cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NullTokens {
    tokens: HashSet<String>,
}

impl NullTokens {
    /// Build a token set from caller-supplied tokens (replacing the defaults).
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            tokens: tokens
                .into_iter()
                .map(|t| t.as_ref().trim().to_lowercase())
                .collect(),
        }
    }

    /// A token set that matches nothing.
    pub fn none() -> Self {
        Self {
            tokens: HashSet::new(),
        }
    }

    /// Add one more token.
    pub fn with(mut self, token: impl AsRef<str>) -> Self {
        self.tokens.insert(token.as_ref().trim().to_lowercase());
        self
    }

    /// Returns `true` if `trimmed` (already stripped) is a null token.
    pub fn matches(&self, trimmed: &str) -> bool {
        self.tokens.contains(&trimmed.to_lowercase())
    }
}

impl Default for NullTokens {
    fn default() -> Self {
        Self::new(DEFAULT_NULL_TOKENS)
    }
}

/// Signature of a caller-supplied conversion.
pub type ConvertFn = dyn Fn(Value) -> Result<Value, String> + Send + Sync;

/// Conversion applied to every non-null cleaned value of a column.
#[derive(Clone)]
pub enum ColumnRule {
    /// 64-bit integer.
    Int,
    /// 64-bit float.
    Float,
    /// Boolean (`true/t/1/yes/y`, `false/f/0/no/n`, numbers non-zero).
    Bool,
    /// Display text of the value.
    Text,
    /// Arbitrary conversion. An `Err` aborts the import.
    Custom(Arc<ConvertFn>),
}

impl ColumnRule {
    /// Wrap a closure as a [`ColumnRule::Custom`].
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(Value) -> Result<Value, String> + Send + Sync + 'static,
    {
        ColumnRule::Custom(Arc::new(f))
    }

    /// Apply the rule to a non-null value.
    pub fn apply(&self, value: Value) -> Result<Value, String> {
        match self {
            ColumnRule::Int => to_int(value).map(Value::Int),
            ColumnRule::Float => to_float(value).map(Value::Float),
            ColumnRule::Bool => to_bool(value).map(Value::Bool),
            ColumnRule::Text => Ok(match value {
                Value::Text(s) => Value::Text(s),
                other => Value::Text(other.to_string()),
            }),
            ColumnRule::Custom(f) => f(value),
        }
    }
}

impl fmt::Debug for ColumnRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRule::Int => f.write_str("Int"),
            ColumnRule::Float => f.write_str("Float"),
            ColumnRule::Bool => f.write_str("Bool"),
            ColumnRule::Text => f.write_str("Text"),
            ColumnRule::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Normalize one cell.
///
/// 1. `Null` is returned unchanged.
/// 2. Text is trimmed; a trimmed value matching `nulls` becomes `Null`.
/// 3. If `rule` is set it is applied to the cleaned value.
///
/// The error string is the rule's rejection message.
pub fn coerce(raw: Value, rule: Option<&ColumnRule>, nulls: &NullTokens) -> Result<Value, String> {
    let cleaned = match raw {
        Value::Null => return Ok(Value::Null),
        Value::Text(s) => {
            let trimmed = s.trim();
            if nulls.matches(trimmed) {
                return Ok(Value::Null);
            }
            if trimmed.len() == s.len() {
                Value::Text(s)
            } else {
                Value::Text(trimmed.to_string())
            }
        }
        other => other,
    };

    match rule {
        Some(rule) => rule.apply(cleaned),
        None => Ok(cleaned),
    }
}

fn to_int(value: Value) -> Result<i64, String> {
    match value {
        Value::Int(i) => Ok(i),
        Value::Float(f) if f.is_finite() => {
            float_to_int(f).ok_or_else(|| format!("integer out of range: {f}"))
        }
        Value::Bool(b) => Ok(i64::from(b)),
        Value::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|e| format!("invalid integer: {e}")),
        other => Err(format!("expected integer, got {}", other.type_name())),
    }
}

/// Truncate `f` toward zero, or `None` when the result does not fit in an `i64`.
pub(crate) fn float_to_int(f: f64) -> Option<i64> {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0; // 2^63
    let t = f.trunc();
    (t >= -LIMIT && t < LIMIT).then_some(t as i64)
}

fn to_float(value: Value) -> Result<f64, String> {
    match value {
        Value::Float(f) => Ok(f),
        Value::Int(i) => Ok(i as f64),
        Value::Bool(b) => Ok(if b { 1.0 } else { 0.0 }),
        Value::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid float: {e}")),
        other => Err(format!("expected number, got {}", other.type_name())),
    }
}

fn to_bool(value: Value) -> Result<bool, String> {
    match value {
        Value::Bool(b) => Ok(b),
        Value::Int(i) => Ok(i != 0),
        Value::Float(f) => Ok(f != 0.0),
        Value::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "t" | "1" | "yes" | "y" => Ok(true),
            "false" | "f" | "0" | "no" | "n" => Ok(false),
            _ => Err("expected bool (true/false/1/0/yes/no)".to_string()),
        },
        other => Err(format!("expected bool, got {}", other.type_name())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_passes_through_without_rule() {
        let nulls = NullTokens::default();
        assert_eq!(coerce(Value::Null, Some(&ColumnRule::Int), &nulls), Ok(Value::Null));
    }

    #[test]
    fn null_tokens_ignore_case_and_whitespace() {
        let nulls = NullTokens::new(["n/a"]);
        assert_eq!(coerce(Value::from("  N/A  "), None, &nulls), Ok(Value::Null));
        assert_eq!(
            coerce(Value::from(" none "), None, &nulls),
            Ok(Value::from("none"))
        );
    }

    #[test]
    fn caller_tokens_are_case_folded_on_insert() {
        let nulls = NullTokens::none().with("MISSING");
        assert!(nulls.matches("missing"));
        assert!(!nulls.matches(""));
    }

    #[test]
    fn text_is_trimmed_before_rule() {
        let nulls = NullTokens::default();
        assert_eq!(
            coerce(Value::from(" 34 "), Some(&ColumnRule::Int), &nulls),
            Ok(Value::Int(34))
        );
        assert_eq!(coerce(Value::from(" Ada "), None, &nulls), Ok(Value::from("Ada")));
    }

    #[test]
    fn rule_rejection_is_returned() {
        let nulls = NullTokens::default();
        let err = coerce(Value::from("abc"), Some(&ColumnRule::Int), &nulls).unwrap_err();
        assert!(err.contains("invalid integer"));
    }

    #[test]
    fn empty_cells_become_null_by_default() {
        let nulls = NullTokens::default();
        assert_eq!(coerce(Value::from("   "), Some(&ColumnRule::Float), &nulls), Ok(Value::Null));
    }

    #[test]
    fn built_in_rules_are_idempotent() {
        let nulls = NullTokens::default();
        let cases = [
            (Value::from("34"), ColumnRule::Int),
            (Value::Float(3.9), ColumnRule::Int),
            (Value::from("98.5"), ColumnRule::Float),
            (Value::from("yes"), ColumnRule::Bool),
            (Value::Int(12), ColumnRule::Text),
            (Value::from(" x "), ColumnRule::Text),
        ];
        for (raw, rule) in cases {
            let once = coerce(raw, Some(&rule), &nulls).unwrap();
            let twice = coerce(once.clone(), Some(&rule), &nulls).unwrap();
            assert_eq!(once, twice, "rule {rule:?}");
        }
    }

    #[test]
    fn custom_rule_sees_cleaned_value() {
        let nulls = NullTokens::default();
        let upper = ColumnRule::custom(|v| match v {
            Value::Text(s) => Ok(Value::Text(s.to_uppercase())),
            other => Err(format!("unexpected {}", other.type_name())),
        });
        assert_eq!(
            coerce(Value::from(" female "), Some(&upper), &nulls),
            Ok(Value::from("FEMALE"))
        );
    }

    #[test]
    fn numeric_conversions_between_native_types() {
        assert_eq!(ColumnRule::Int.apply(Value::Bool(true)), Ok(Value::Int(1)));
        assert_eq!(ColumnRule::Float.apply(Value::Int(2)), Ok(Value::Float(2.0)));
        assert_eq!(ColumnRule::Bool.apply(Value::Float(0.0)), Ok(Value::Bool(false)));
        assert!(ColumnRule::Int.apply(Value::Float(f64::NAN)).is_err());
        assert_eq!(ColumnRule::Int.apply(Value::Float(-7.9)), Ok(Value::Int(-7)));
    }

    #[test]
    fn out_of_range_float_is_rejected_by_int_rule() {
        let nulls = NullTokens::default();
        let err = coerce(Value::Float(1e20), Some(&ColumnRule::Int), &nulls).unwrap_err();
        assert!(err.contains("out of range"));
        assert!(ColumnRule::Int.apply(Value::Float(-1e19)).is_err());
        assert_eq!(float_to_int(-9_223_372_036_854_775_808.0), Some(i64::MIN));
        assert_eq!(float_to_int(9_223_372_036_854_775_808.0), None);
    }
}
