//! Secret redaction for request logging

use crate::auth::mask_secret;
use crate::types::{Query, QueryValue};
use std::collections::{BTreeMap, HashMap};

/// Name fragments that mark a header or query parameter as sensitive
const SENSITIVE_NAMES: &[&str] = &[
    "authorization",
    "token",
    "password",
    "secret",
    "apikey",
    "api_key",
    "api-key",
    "cookie",
];

/// Check whether a header or parameter name carries a secret
pub fn is_sensitive(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    SENSITIVE_NAMES.iter().any(|fragment| lower.contains(fragment))
}

/// Copy of the headers with sensitive values masked, sorted for stable logs
pub fn redact_headers(headers: &HashMap<String, String>) -> BTreeMap<String, String> {
    headers
        .iter()
        .map(|(name, value)| {
            let value = if is_sensitive(name) {
                mask_secret(value)
            } else {
                value.clone()
            };
            (name.clone(), value)
        })
        .collect()
}

/// Copy of the query with sensitive values masked
pub fn redact_query(query: &Query) -> Query {
    let mut redacted = Query::new();
    for (name, value) in query.iter() {
        let value = if is_sensitive(name) {
            match value {
                QueryValue::List(items) => {
                    QueryValue::List(items.iter().map(String::as_str).map(mask_secret).collect())
                }
                QueryValue::Text(text) => QueryValue::Text(mask_secret(text)),
                QueryValue::Bool(_) | QueryValue::Int(_) => QueryValue::Text("***".to_string()),
            }
        } else {
            value.clone()
        };
        redacted.set(name, value);
    }
    redacted
}
