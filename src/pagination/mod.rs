//! Pagination module
//!
//! Walks an offset-paged endpoint (`startAt` / `maxResults` / `total` /
//! `isLast`) to completion and merges every page into one [`Collector`].
//!
//! # Overview
//!
//! The walker calls the invoker once per page, strictly in sequence. The first
//! page fixes the `total` and `maxResults` baselines; any later page that
//! disagrees aborts the walk. An upstream error envelope stops the walk early
//! and keeps whatever was collected before it.
//!
//! [`Collector`]: crate::envelope::Collector

mod types;
mod walker;

pub use types::{OffsetAdvance, Page, PagedRequest, WalkOptions};
pub use walker::walk_pages;
