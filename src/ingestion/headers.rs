//! Header resolution: raw header tokens → logical column names.

use std::collections::HashMap;

use super::coerce::float_to_int;
use crate::types::Value;

/// Caller-supplied header renames, keyed by column position or by raw header text.
///
/// Positional overrides win over name overrides for the same column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderOverrides {
    by_position: HashMap<usize, String>,
    by_name: HashMap<String, String>,
}

impl HeaderOverrides {
    /// Empty override set: every header keeps its raw text.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rename the column at `idx` (0-based).
    pub fn by_position(mut self, idx: usize, name: impl Into<String>) -> Self {
        self.by_position.insert(idx, name.into());
        self
    }

    /// Rename any column whose raw header is exactly `raw`.
    pub fn by_name(mut self, raw: impl Into<String>, name: impl Into<String>) -> Self {
        self.by_name.insert(raw.into(), name.into());
        self
    }

    /// Returns `true` if no override is registered.
    pub fn is_empty(&self) -> bool {
        self.by_position.is_empty() && self.by_name.is_empty()
    }

    fn lookup(&self, idx: usize, raw: &str) -> Option<&str> {
        self.by_position
            .get(&idx)
            .or_else(|| self.by_name.get(raw))
            .map(String::as_str)
    }
}

/// Resolve one logical name per raw header.
///
/// Duplicate results are not rejected here; callers that need unique names check the
/// resulting schema.
pub fn resolve_headers(raw: &[String], overrides: Option<&HeaderOverrides>) -> Vec<String> {
    let Some(overrides) = overrides else {
        return raw.to_vec();
    };
    raw.iter()
        .enumerate()
        .map(|(idx, header)| overrides.lookup(idx, header).unwrap_or(header.as_str()).to_string())
        .collect()
}

/// Render a header cell as text.
///
/// Whole floats drop their fractional part so a numeric header `2024.0` reads `2024`.
/// Floats outside the `i64` range keep their float rendering.
pub(crate) fn header_text(cell: &Value) -> String {
    match cell {
        Value::Float(f) if f.fract() == 0.0 => match float_to_int(*f) {
            Some(i) => i.to_string(),
            None => f.to_string(),
        },
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_overrides_returns_raw_headers() {
        let headers = raw(&["Customer Key", "Age"]);
        assert_eq!(resolve_headers(&headers, None), headers);
    }

    #[test]
    fn position_override_wins_over_name_override() {
        let headers = raw(&["Customer Key", "Age"]);
        let overrides = HeaderOverrides::new()
            .by_position(0, "customerKey")
            .by_name("Customer Key", "key");
        assert_eq!(
            resolve_headers(&headers, Some(&overrides)),
            raw(&["customerKey", "Age"])
        );
    }

    #[test]
    fn name_override_applies_when_no_position_override() {
        let headers = raw(&["Customer Key", "Age"]);
        let overrides = HeaderOverrides::new().by_name("Age", "age");
        assert_eq!(
            resolve_headers(&headers, Some(&overrides)),
            raw(&["Customer Key", "age"])
        );
    }

    #[test]
    fn duplicate_resolved_names_are_passed_through() {
        let headers = raw(&["a", "b"]);
        let overrides = HeaderOverrides::new().by_name("b", "a");
        assert_eq!(resolve_headers(&headers, Some(&overrides)), raw(&["a", "a"]));
    }

    #[test]
    fn header_text_formats_whole_floats_as_integers() {
        assert_eq!(header_text(&Value::Float(2024.0)), "2024");
        assert_eq!(header_text(&Value::Float(1.5)), "1.5");
        assert_eq!(header_text(&Value::Null), "");
        assert_eq!(header_text(&Value::Float(1e20)), "100000000000000000000");
    }
}
