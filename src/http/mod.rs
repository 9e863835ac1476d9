//! HTTP client module
//!
//! Provides the single-call invoker the rest of the crate talks to.
//!
//! # Features
//!
//! - **One call per invocation**: no retries, no backoff
//! - **Basic authentication**: credentials applied to every request
//! - **Redacted logging**: one log event per call, secrets masked
//! - **Pluggable**: the `Invoker` trait lets walkers run against scripted responses

mod client;
mod redact;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, Invoker, RequestConfig};
pub use redact::{is_sensitive, redact_headers, redact_query};

#[cfg(test)]
mod scripted;
#[cfg(test)]
pub(crate) use scripted::ScriptedInvoker;
