//! The uniform result envelope

use crate::decode::ErrorChannel;
use crate::types::{JsonObject, JsonValue, Query};
use serde::Serialize;

/// Result entries carried by a collector
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Payload {
    /// Ordered result entries
    Items(Vec<JsonValue>),
    /// Flat key/value record
    Record(JsonObject),
}

impl Payload {
    /// Number of entries (items) or keys (record)
    pub fn len(&self) -> usize {
        match self {
            Self::Items(items) => items.len(),
            Self::Record(record) => record.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Uniform result envelope of one operation
///
/// Created fresh per invocation and only ever grown: items are appended and
/// the round-trip count is incremented, never reset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Collector {
    /// Fully resolved endpoint URL
    pub endpoint: String,
    /// Fixed query the operation sent (without the moving offset)
    pub query: Query,
    /// Whether the API reported the end of the data
    pub is_complete: bool,
    /// Page size reported by the API, when known
    pub page_capacity: Option<u64>,
    /// Number of fetches performed
    pub roundtrip_count: u32,
    /// Offset of the first entry
    pub start_index: u64,
    /// Total number of entries
    pub total_count: u64,
    /// Display header, only for endpoints that return one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_display: Option<String>,
    /// Field-level upstream errors
    pub errors: Vec<JsonValue>,
    /// Upstream error messages
    pub error_messages: Vec<String>,
    #[serde(flatten)]
    pub payload: Payload,
}

impl Collector {
    /// Empty collector for an items-shaped result
    pub fn items(endpoint: impl Into<String>, query: Query) -> Self {
        Self::with_payload(endpoint, query, Payload::Items(Vec::new()))
    }

    /// Empty collector for a record-shaped result
    pub fn record(endpoint: impl Into<String>, query: Query) -> Self {
        Self::with_payload(endpoint, query, Payload::Record(JsonObject::new()))
    }

    fn with_payload(endpoint: impl Into<String>, query: Query, payload: Payload) -> Self {
        Self {
            endpoint: endpoint.into(),
            query,
            is_complete: false,
            page_capacity: None,
            roundtrip_count: 0,
            start_index: 0,
            total_count: 0,
            summary_display: None,
            errors: Vec::new(),
            error_messages: Vec::new(),
            payload,
        }
    }

    /// Append entries in order (no-op on a record collector)
    pub fn extend_items(&mut self, entries: impl IntoIterator<Item = JsonValue>) {
        if let Payload::Items(items) = &mut self.payload {
            items.extend(entries);
        }
    }

    /// Entries collected so far (empty for a record collector)
    pub fn item_slice(&self) -> &[JsonValue] {
        match &self.payload {
            Payload::Items(items) => items,
            Payload::Record(_) => &[],
        }
    }

    /// Copy an upstream error envelope into the error fields
    pub fn absorb(&mut self, channel: ErrorChannel) {
        self.errors.extend(channel.errors);
        self.error_messages.extend(channel.error_messages);
    }

    /// Whether the upstream reported any error
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty() || !self.error_messages.is_empty()
    }
}
