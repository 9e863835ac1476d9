//! Single-shot operations
//!
//! One call, no pagination: the whole answer lands in one collector with
//! `roundtrip_count == 1` and `is_complete == true`.

use super::collector::{Collector, Payload};
use crate::decode::{ItemSelector, JsonDecoder};
use crate::error::{Error, Result};
use crate::http::{Invoker, RequestConfig};
use crate::types::{JsonValue, Query};
use tracing::{debug, info};

/// Where a single-shot endpoint reports its page size
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapacitySource {
    /// Known up front (the `limit` the request sends)
    Fixed(u64),
    /// Read from a numeric payload field
    Field(&'static str),
}

/// A single-shot request
#[derive(Debug, Clone)]
pub struct SingleRequest {
    /// Fully resolved endpoint URL
    pub url: String,
    /// Query sent with the call
    pub query: Query,
    /// Where the entries live (ignored by [`fetch_record`])
    pub selector: ItemSelector,
    /// Payload field holding a display header
    pub summary_field: Option<&'static str>,
    /// Where the page size comes from
    pub capacity: Option<CapacitySource>,
    /// Payload field holding the total; entry count otherwise
    pub total_field: Option<&'static str>,
}

impl SingleRequest {
    pub fn new(url: impl Into<String>, query: Query) -> Self {
        Self {
            url: url.into(),
            query,
            selector: ItemSelector::WholePayload,
            summary_field: None,
            capacity: None,
            total_field: None,
        }
    }

    #[must_use]
    pub fn selector(mut self, selector: ItemSelector) -> Self {
        self.selector = selector;
        self
    }

    #[must_use]
    pub fn summary_field(mut self, field: &'static str) -> Self {
        self.summary_field = Some(field);
        self
    }

    #[must_use]
    pub fn capacity(mut self, capacity: CapacitySource) -> Self {
        self.capacity = Some(capacity);
        self
    }

    #[must_use]
    pub fn total_field(mut self, field: &'static str) -> Self {
        self.total_field = Some(field);
        self
    }
}

/// Call once and collect the selected entries
pub async fn fetch_items<I: Invoker + ?Sized>(
    invoker: &I,
    request: &SingleRequest,
) -> Result<Collector> {
    let mut collector = Collector::items(&request.url, request.query.clone());
    let Some(payload) = call_once(invoker, request, &mut collector).await? else {
        return Ok(collector);
    };

    let items = JsonDecoder::new().select_items(&payload, &request.selector)?;
    let received = items.len() as u64;
    collector.extend_items(items);

    collector.total_count = request
        .total_field
        .and_then(|field| payload.get(field))
        .and_then(JsonValue::as_u64)
        .unwrap_or(received);
    collector.page_capacity = match &request.capacity {
        Some(CapacitySource::Fixed(capacity)) => Some(*capacity),
        Some(CapacitySource::Field(field)) => payload.get(*field).and_then(JsonValue::as_u64),
        None => None,
    };
    if let Some(field) = request.summary_field {
        collector.summary_display = payload
            .get(field)
            .and_then(JsonValue::as_str)
            .map(str::to_string);
    }

    info!(
        endpoint = %collector.endpoint,
        items = received,
        total = collector.total_count,
        "Single-shot call complete"
    );
    Ok(collector)
}

/// Call once and keep the payload object as a flat record
pub async fn fetch_record<I: Invoker + ?Sized>(
    invoker: &I,
    request: &SingleRequest,
) -> Result<Collector> {
    let mut collector = Collector::record(&request.url, request.query.clone());
    let Some(payload) = call_once(invoker, request, &mut collector).await? else {
        return Ok(collector);
    };

    let JsonValue::Object(record) = payload else {
        return Err(Error::decode(format!(
            "Expected an object from {}, found {payload}",
            request.url
        )));
    };
    collector.total_count = record.len() as u64;
    collector.payload = Payload::Record(record);

    info!(
        endpoint = %collector.endpoint,
        keys = collector.total_count,
        "Single-shot call complete"
    );
    Ok(collector)
}

/// Issue the call and settle the shared envelope fields.
///
/// Returns `None` when the payload was an upstream error envelope, which has
/// already been copied into the collector.
async fn call_once<I: Invoker + ?Sized>(
    invoker: &I,
    request: &SingleRequest,
    collector: &mut Collector,
) -> Result<Option<JsonValue>> {
    let body = invoker
        .get(&request.url, &RequestConfig::with_query(request.query.clone()))
        .await?;
    collector.roundtrip_count = 1;
    collector.is_complete = true;

    let decoder = JsonDecoder::new();
    let payload = decoder.parse(&body)?;
    if let Some(channel) = decoder.error_channel(&payload) {
        debug!(
            endpoint = %collector.endpoint,
            messages = ?channel.error_messages,
            "Upstream returned an error envelope"
        );
        collector.absorb(channel);
        return Ok(None);
    }
    Ok(Some(payload))
}
