//! Pagination types

use crate::config::DEFAULT_MAX_ROUNDTRIPS;
use crate::error::{Error, Result};
use crate::types::{JsonValue, Query};
use serde::{Deserialize, Serialize};

/// Query parameter carrying the page offset
pub const OFFSET_PARAM: &str = "startAt";

// ============================================================================
// Walk Options
// ============================================================================

/// How the offset moves from one page to the next
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffsetAdvance {
    /// Advance by the page's `maxResults`
    #[default]
    PageCapacity,
    /// Advance by the number of entries the page actually held
    ReceivedCount,
}

/// Options for one walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkOptions {
    /// Offset of the first page
    pub start_at: u64,
    /// Fetch budget; the walk fails once it is spent without reaching the end
    pub max_roundtrips: u32,
    pub advance: OffsetAdvance,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            start_at: 0,
            max_roundtrips: DEFAULT_MAX_ROUNDTRIPS,
            advance: OffsetAdvance::default(),
        }
    }
}

impl WalkOptions {
    /// Offset of the page that follows `page`
    pub fn next_offset(&self, offset: u64, page: &Page) -> u64 {
        let step = match self.advance {
            OffsetAdvance::PageCapacity => page.max_results,
            OffsetAdvance::ReceivedCount => page.items.len() as u64,
        };
        offset.saturating_add(step)
    }
}

// ============================================================================
// Paged Request
// ============================================================================

/// A paged endpoint to walk
#[derive(Debug, Clone, PartialEq)]
pub struct PagedRequest {
    /// Fully resolved endpoint URL
    pub url: String,
    /// Query sent with every page; `startAt` is set on top of it
    pub fixed_query: Query,
    /// Field holding each page's entries
    pub item_field: &'static str,
}

impl PagedRequest {
    /// Paged request with entries under `values`
    pub fn new(url: impl Into<String>, fixed_query: Query) -> Self {
        Self {
            url: url.into(),
            fixed_query,
            item_field: "values",
        }
    }

    #[must_use]
    pub fn item_field(mut self, field: &'static str) -> Self {
        self.item_field = field;
        self
    }

    /// Query for the page starting at `offset`
    pub fn page_query(&self, offset: u64) -> Query {
        self.fixed_query.clone().with(OFFSET_PARAM, offset)
    }
}

// ============================================================================
// Page
// ============================================================================

/// One parsed page of an offset-paged response
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub total: u64,
    pub max_results: u64,
    pub is_last: bool,
    pub items: Vec<JsonValue>,
}

impl Page {
    /// Read the page metadata and entries; anything missing or mistyped is fatal
    pub fn from_value(payload: &JsonValue, item_field: &str) -> Result<Self> {
        let number = |field: &str| {
            payload
                .get(field)
                .and_then(JsonValue::as_u64)
                .ok_or_else(|| Error::missing_page_field(field))
        };

        let is_last = payload
            .get("isLast")
            .and_then(JsonValue::as_bool)
            .ok_or_else(|| Error::missing_page_field("isLast"))?;
        let items = payload
            .get(item_field)
            .and_then(JsonValue::as_array)
            .ok_or_else(|| Error::missing_page_field(item_field))?
            .clone();

        Ok(Self {
            total: number("total")?,
            max_results: number("maxResults")?,
            is_last,
            items,
        })
    }
}
