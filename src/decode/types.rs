//! Decoder types
//!
//! Defines where result entries live in a payload and the shape of the
//! upstream error channel.

use crate::types::JsonValue;
use serde::Serialize;

/// Where an endpoint keeps its result entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemSelector {
    /// Array under a named top-level field (`values`, `groups`, ...)
    Field(&'static str),
    /// The payload itself is the array
    TopLevelArray,
    /// The whole payload is one entry
    WholePayload,
}

impl ItemSelector {
    /// Selector for the conventional paged field
    pub fn values() -> Self {
        Self::Field("values")
    }
}

/// Error envelope carried by an upstream response
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ErrorChannel {
    /// Entries of `errors`, one object per field
    pub errors: Vec<JsonValue>,
    /// Entries of `errorMessages`
    pub error_messages: Vec<String>,
}

impl ErrorChannel {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.error_messages.is_empty()
    }
}
