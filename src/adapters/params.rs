//! Argument validation, URL building and query binding

use super::types::{Binding, ParamKind};
use crate::error::{Error, Result};
use crate::types::{Query, QueryValue};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// API root below the base URL
const API_ROOT: [&str; 3] = ["rest", "api", "3"];

/// Separator between repeated `key=value` pairs in a list argument
const LIST_SEP: char = '&';

/// Group ids look like `5e1c5ec7-a634-4cd9-887a-618166d49a25`
static UUID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\da-f]{8}-([\da-f]{4}-){3}[\da-f]{12}$").unwrap()
});

/// Check an argument against its kind and binding, returning it trimmed
pub(crate) fn validate(kind: ParamKind, binding: Binding, raw: &str) -> Result<&str> {
    let arg = raw.trim();
    if arg.is_empty() {
        return Err(Error::missing_argument(kind.label()));
    }
    // URL normalization would drop a dot segment and hit a different endpoint
    if binding == Binding::PathSegment && matches!(arg, "." | "..") {
        return Err(Error::invalid_argument(
            kind.label(),
            arg,
            "not a valid path segment",
        ));
    }
    match kind {
        ParamKind::Text(_) => Ok(arg),
        ParamKind::Numeric(label) => {
            if arg.parse::<i64>().is_ok() {
                Ok(arg)
            } else {
                Err(Error::invalid_argument(label, arg, "integer required"))
            }
        }
        ParamKind::IssueIdOrKey => {
            if arg.parse::<u64>().is_ok() || looks_like_issue_key(arg) {
                Ok(arg)
            } else {
                Err(Error::invalid_argument(
                    kind.label(),
                    arg,
                    "expected a numeric id or a key like ABC-123",
                ))
            }
        }
    }
}

/// Whether `key` splits at its first dash into an uppercase project code and
/// an all-digit serial
pub fn looks_like_issue_key(key: &str) -> bool {
    let Some((project, serial)) = key.split_once('-') else {
        return false;
    };
    !project.is_empty()
        && !serial.is_empty()
        && project.chars().all(char::is_uppercase)
        && serial.chars().all(|c| c.is_ascii_digit())
}

/// Whether a group argument is an id rather than a name (case-insensitive)
pub fn looks_like_uuid(value: &str) -> bool {
    UUID_REGEX.is_match(&value.to_lowercase())
}

/// Build `{base_url}/rest/api/3/{path}`, with `segment` percent-encoded into
/// the `{}` slot of the path template
pub fn api_url(base_url: &str, path: &str, segment: Option<&str>) -> Result<String> {
    let mut url = Url::parse(base_url)?;
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|()| Error::config(format!("base URL '{base_url}' cannot carry a path")))?;
        segments.pop_if_empty().extend(API_ROOT);
        for part in path.split('/') {
            match (part, segment) {
                ("{}", Some(value)) => segments.push(value),
                ("{}", None) => {
                    return Err(Error::config(format!(
                        "path '{path}' needs a parameter but none was given"
                    )))
                }
                (part, _) => segments.push(part),
            };
        }
    }
    Ok(url.to_string())
}

/// Place a validated argument into the query as the binding says
pub(crate) fn bind_query(binding: Binding, fixed: &Query, arg: &str) -> Query {
    match binding {
        Binding::PathSegment => fixed.clone(),
        Binding::QueryParam(key) => leading(key, arg, fixed),
        Binding::GroupIdOrName => {
            let key = if looks_like_uuid(arg) { "groupId" } else { "groupname" };
            leading(key, arg, fixed)
        }
        Binding::ListOrQueryString(key) => {
            let mut query = fixed.clone();
            let marker = format!("{key}=");
            if arg.contains(&marker) {
                let values: Vec<String> = arg
                    .split(LIST_SEP)
                    .map(|part| part.trim().replace(&marker, ""))
                    .filter(|part| !part.is_empty())
                    .collect();
                if !values.is_empty() {
                    query.set(key, values);
                }
            } else {
                query.set("queryString", arg);
            }
            query
        }
    }
}

/// Argument first, then the fixed parameters
fn leading(key: &str, arg: &str, fixed: &Query) -> Query {
    let mut query = Query::new().with(key, arg);
    for (k, v) in fixed.iter() {
        query.set(k, QueryValue::clone(v));
    }
    query
}
