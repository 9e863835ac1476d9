// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]

//! # ticketwalk
//!
//! Clients for a Jira-style ticket REST API. Each operation calls one
//! endpoint and normalizes the answer into a uniform envelope, walking
//! offset-paged endpoints to completion on the way.
//!
//! ## Features
//!
//! - **Offset pagination**: `startAt` walks with `total` / `maxResults` consistency checks
//! - **Uniform envelope**: every operation returns a [`Collector`]
//! - **Error channel**: upstream `errorMessages` / `errors` land in the envelope
//! - **Bounded walks**: a round-trip budget stops misbehaving servers
//! - **Redacted logging**: credentials never appear in log events
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ticketwalk::{adapters, Config, HttpClient, HttpClientConfig, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::from_env()?;
//!     let http = HttpClientConfig::builder().base_url(&config.base_url).build();
//!     let client = HttpClient::with_auth(http, config.credentials.clone())?;
//!
//!     let collector = adapters::find("search-for-filters")?
//!         .run(&client, &config.base_url, &config.walk_options(), None)
//!         .await?;
//!     println!("{} filters", collector.total_count);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │              Adapters (static operation catalog)         │
//! └──────────────────────────────────────────────────────────┘
//!                 │                           │
//! ┌───────────────┴──────────┐  ┌─────────────┴──────────────┐
//! │  Page Walker (paged)     │  │  Envelope Builder (single) │
//! └───────────────┬──────────┘  └─────────────┬──────────────┘
//!                 └────────────┬──────────────┘
//! ┌────────────────────────────┴─────────────────────────────┐
//! │   Decode (JSON, error channel)   │   HTTP Invoker (Basic) │
//! └──────────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// HTTP Basic credentials
pub mod auth;

/// Single-call HTTP invoker
pub mod http;

/// Response decoding and error-envelope detection
pub mod decode;

/// Offset page walker
pub mod pagination;

/// Uniform result envelope
pub mod envelope;

/// Static operation catalog
pub mod adapters;

/// Runtime configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use adapters::Adapter;
pub use config::Config;
pub use envelope::Collector;
pub use http::{HttpClient, HttpClientConfig, Invoker};
pub use pagination::{walk_pages, OffsetAdvance, PagedRequest, WalkOptions};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
