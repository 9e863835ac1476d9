//! Adapter types

use super::params;
use crate::decode::ItemSelector;
use crate::envelope::{fetch_items, fetch_record, CapacitySource, Collector, SingleRequest};
use crate::error::{Error, Result};
use crate::http::Invoker;
use crate::pagination::{walk_pages, PagedRequest, WalkOptions};
use crate::types::Query;
use tracing::info;

/// What a single argument must look like
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Any non-empty text
    Text(&'static str),
    /// Must parse as an integer
    Numeric(&'static str),
    /// Numeric issue id, or a key like `ABC-123`
    IssueIdOrKey,
}

impl ParamKind {
    /// Human-readable name used in errors and usage lines
    pub fn label(&self) -> &'static str {
        match self {
            Self::Text(label) | Self::Numeric(label) => label,
            Self::IssueIdOrKey => "issue id or key",
        }
    }
}

/// Whether an operation takes an argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Argument {
    None,
    Required(ParamKind),
    Optional(ParamKind),
}

impl Argument {
    /// Usage hint, e.g. `<filter id>` or `[scope list or query]`
    pub fn usage(&self) -> Option<String> {
        match self {
            Self::None => None,
            Self::Required(kind) => Some(format!("<{}>", kind.label())),
            Self::Optional(kind) => Some(format!("[{}]", kind.label())),
        }
    }
}

/// Where a validated argument goes in the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// Replaces `{}` in the path template
    PathSegment,
    /// Sent as the named query parameter
    QueryParam(&'static str),
    /// `groupId` when the argument looks like a UUID, `groupname` otherwise
    GroupIdOrName,
    /// `key=a&key=b` replaces the named list parameter, anything else is
    /// sent as `queryString`
    ListOrQueryString(&'static str),
}

/// Envelope shape of an operation's answer
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Single call, entries selected from the payload
    Items {
        selector: ItemSelector,
        summary_field: Option<&'static str>,
        total_field: Option<&'static str>,
        capacity: Option<CapacitySource>,
    },
    /// Single call, payload object kept as a record
    Record,
    /// Offset-paged walk with entries under the named field
    Paged { item_field: &'static str },
}

impl Shape {
    /// Single call returning a top-level array
    pub const fn array() -> Self {
        Self::Items {
            selector: ItemSelector::TopLevelArray,
            summary_field: None,
            total_field: None,
            capacity: None,
        }
    }

    /// Paged walk over `values`
    pub const fn paged() -> Self {
        Self::Paged {
            item_field: "values",
        }
    }

    /// Short name for listings
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Items { .. } => "items",
            Self::Record => "record",
            Self::Paged { .. } => "paged",
        }
    }
}

/// One catalog row
#[derive(Debug, Clone)]
pub struct Adapter {
    /// Operation name as typed on the command line
    pub name: &'static str,
    /// One-line description
    pub about: &'static str,
    /// Path below `rest/api/3/`, `{}` marks the path parameter
    pub path: &'static str,
    pub argument: Argument,
    pub binding: Binding,
    pub shape: Shape,
    /// Query sent on every call
    pub query: Query,
}

/// A request resolved from an adapter and its argument
#[derive(Debug, Clone, PartialEq)]
pub struct Prepared {
    pub url: String,
    pub query: Query,
}

impl Adapter {
    /// Validate the argument and resolve the endpoint URL and query.
    ///
    /// Never touches the network; argument problems surface here.
    pub fn prepare(&self, base_url: &str, argument: Option<&str>) -> Result<Prepared> {
        let argument = argument.filter(|arg| !arg.trim().is_empty());
        let value = match (self.argument, argument) {
            (Argument::None, _) => None,
            (Argument::Required(kind), None) => return Err(Error::missing_argument(kind.label())),
            (Argument::Optional(_), None) => None,
            (Argument::Required(kind) | Argument::Optional(kind), Some(arg)) => {
                Some(params::validate(kind, self.binding, arg)?)
            }
        };

        let segment = match (self.binding, value) {
            (Binding::PathSegment, Some(arg)) => Some(arg),
            _ => None,
        };
        let url = params::api_url(base_url, self.path, segment)?;

        let query = match value {
            Some(arg) => params::bind_query(self.binding, &self.query, arg),
            None => self.query.clone(),
        };

        Ok(Prepared { url, query })
    }

    /// Run the operation and collect its envelope
    pub async fn run<I: Invoker + ?Sized>(
        &self,
        invoker: &I,
        base_url: &str,
        options: &WalkOptions,
        argument: Option<&str>,
    ) -> Result<Collector> {
        let Prepared { url, query } = self.prepare(base_url, argument)?;
        info!(operation = self.name, url = %url, shape = self.shape.kind(), "Running operation");

        match &self.shape {
            Shape::Paged { item_field } => {
                let request = PagedRequest::new(url, query).item_field(*item_field);
                walk_pages(invoker, &request, options).await
            }
            Shape::Record => fetch_record(invoker, &SingleRequest::new(url, query)).await,
            Shape::Items {
                selector,
                summary_field,
                total_field,
                capacity,
            } => {
                let request = SingleRequest {
                    url,
                    query,
                    selector: selector.clone(),
                    summary_field: *summary_field,
                    capacity: capacity.clone(),
                    total_field: *total_field,
                };
                fetch_items(invoker, &request).await
            }
        }
    }
}
