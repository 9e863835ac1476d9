//! Common types used throughout ticketwalk
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Query Parameters
// ============================================================================

/// A single query parameter value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum QueryValue {
    Bool(bool),
    Int(i64),
    Text(String),
    /// Sent as repeated `key=value` pairs
    List(Vec<String>),
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u64> for QueryValue {
    fn from(value: u64) -> Self {
        Self::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<&[&str]> for QueryValue {
    fn from(value: &[&str]) -> Self {
        Self::List(value.iter().map(|s| (*s).to_string()).collect())
    }
}

/// Ordered query parameters with unique keys.
///
/// Insertion order is kept so the outbound query and the query echoed in the
/// envelope read the same way the endpoint table declares them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    entries: Vec<(String, QueryValue)>,
}

impl Query {
    /// Create an empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Insert or replace a parameter, keeping the original position on replace
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Get a parameter value
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Iterate over the parameters in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flatten into wire pairs; list values expand into repeated keys
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.entries.len());
        for (key, value) in &self.entries {
            match value {
                QueryValue::Bool(b) => pairs.push((key.clone(), b.to_string())),
                QueryValue::Int(i) => pairs.push((key.clone(), i.to_string())),
                QueryValue::Text(s) => pairs.push((key.clone(), s.clone())),
                QueryValue::List(items) => {
                    pairs.extend(items.iter().map(|item| (key.clone(), item.clone())));
                }
            }
        }
        pairs
    }
}

impl Serialize for Query {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_empty(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_set_replaces_in_place() {
        let mut query = Query::new().with("startAt", 0u32).with("expand", "owner");
        query.set("startAt", 50u32);

        let keys: Vec<&str> = query.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["startAt", "expand"]);
        assert_eq!(query.get("startAt"), Some(&QueryValue::Int(50)));
        assert_eq!(query.len(), 2);
    }

    #[test]
    fn test_query_pairs_expand_lists() {
        let scopes: &[&str] = &["GLOBAL", "PROJECT"];
        let query = Query::new()
            .with("orderBy", "+id")
            .with("scope", scopes)
            .with("caseInsensitive", true);

        assert_eq!(
            query.to_pairs(),
            vec![
                ("orderBy".to_string(), "+id".to_string()),
                ("scope".to_string(), "GLOBAL".to_string()),
                ("scope".to_string(), "PROJECT".to_string()),
                ("caseInsensitive".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_query_serializes_in_insertion_order() {
        let query = Query::new()
            .with("query", "eng")
            .with("caseInsensitive", true)
            .with("limit", 1000u32);

        let text = serde_json::to_string(&query).unwrap();
        assert_eq!(text, r#"{"query":"eng","caseInsensitive":true,"limit":1000}"#);
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({"query": "eng", "caseInsensitive": true, "limit": 1000})
        );
    }

    #[test]
    fn test_option_string_none_if_empty() {
        assert_eq!(
            Some("test".to_string()).none_if_empty(),
            Some("test".to_string())
        );
        assert_eq!(Some(String::new()).none_if_empty(), None);
        assert_eq!(None::<String>.none_if_empty(), None);
        assert_eq!(String::new().none_if_empty(), None);
    }
}
