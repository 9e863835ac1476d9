//! Endpoint adapters
//!
//! Every supported operation is one row of data in a static catalog: the path
//! template, what its argument looks like, the fixed query it sends, and the
//! envelope shape its answer takes. Running an adapter validates the argument
//! (before any request goes out), resolves the URL and query, then hands off
//! to the page walker or the single-shot envelope builder.
//!
//! # Example
//!
//! ```ignore
//! use ticketwalk::adapters;
//!
//! let adapter = adapters::find("get-issue")?;
//! let collector = adapter.run(&client, &base_url, &options, Some("ABC-123")).await?;
//! ```

mod catalog;
mod params;
mod types;

pub use catalog::{find, list, CatalogEntry, CATALOG};
pub use params::{api_url, looks_like_issue_key, looks_like_uuid};
pub use types::{Adapter, Argument, Binding, ParamKind, Prepared, Shape};
