//! Envelope builder module
//!
//! Every operation answers with the same [`Collector`] document, whether it
//! walked many pages or made a single call.
//!
//! # Overview
//!
//! - [`Collector`]: the uniform result envelope, with either `items` or `record`
//! - [`fetch_items`]: one call, entries selected from the payload
//! - [`fetch_record`]: one call, payload object kept as a flat record

mod collector;
mod single;

pub use collector::{Collector, Payload};
pub use single::{fetch_items, fetch_record, CapacitySource, SingleRequest};

#[cfg(test)]
mod tests;
