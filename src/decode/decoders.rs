//! JSON decoder implementation

use super::types::{ErrorChannel, ItemSelector};
use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use serde_json::Value;

/// How much of an undecodable body to quote in the error
const BODY_PREVIEW_CHARS: usize = 200;

/// JSON decoder for ticket API responses
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl JsonDecoder {
    /// Create a new JSON decoder
    pub fn new() -> Self {
        Self
    }

    /// Parse a response body
    pub fn parse(&self, body: &str) -> Result<JsonValue> {
        serde_json::from_str(body).map_err(|e| {
            let preview: String = body.chars().take(BODY_PREVIEW_CHARS).collect();
            Error::decode(format!("Failed to parse JSON: {e} (body: {preview:?})"))
        })
    }

    /// Extract the upstream error envelope, if the payload carries a non-empty one
    pub fn error_channel(&self, payload: &JsonValue) -> Option<ErrorChannel> {
        let object = payload.as_object()?;
        let mut channel = ErrorChannel::default();

        if let Some(Value::Array(messages)) = object.get("errorMessages") {
            channel
                .error_messages
                .extend(messages.iter().map(message_text));
        }
        if let Some(Value::String(message)) = object.get("errorMessage") {
            channel.error_messages.push(message.clone());
        }

        match object.get("errors") {
            Some(Value::Object(errors)) => {
                channel.errors.extend(errors.iter().map(|(field, message)| {
                    let mut entry = JsonObject::new();
                    entry.insert(field.clone(), message.clone());
                    Value::Object(entry)
                }));
            }
            Some(Value::Array(errors)) => channel.errors.extend(errors.iter().cloned()),
            _ => {}
        }

        if channel.is_empty() {
            None
        } else {
            Some(channel)
        }
    }

    /// Select the result entries from a payload
    pub fn select_items(&self, payload: &JsonValue, selector: &ItemSelector) -> Result<Vec<JsonValue>> {
        match selector {
            ItemSelector::Field(field) => match payload.get(*field) {
                Some(Value::Array(items)) => Ok(items.clone()),
                Some(Value::Null) | None => Err(Error::missing_page_field(*field)),
                Some(other) => Err(Error::decode(format!(
                    "Expected an array under '{field}', found {}",
                    kind(other)
                ))),
            },
            ItemSelector::TopLevelArray => match payload {
                Value::Array(items) => Ok(items.clone()),
                other => Err(Error::decode(format!(
                    "Expected a top-level array, found {}",
                    kind(other)
                ))),
            },
            ItemSelector::WholePayload => Ok(vec![payload.clone()]),
        }
    }
}

fn message_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
