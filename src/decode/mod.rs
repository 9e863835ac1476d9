//! Response decoder module
//!
//! Turns raw body text into JSON, detects the upstream error envelope, and
//! selects the result entries an endpoint returns.
//!
//! # Overview
//!
//! Ticket APIs answer either with data or with an error envelope
//! `{"errorMessages": [...], "errors": {...}}`. The decoder checks for the
//! envelope first; only payloads without one are handed to item selection.

mod decoders;
mod types;

pub use decoders::JsonDecoder;
pub use types::{ErrorChannel, ItemSelector};

#[cfg(test)]
mod tests;
