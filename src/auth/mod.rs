//! Authentication module
//!
//! Supports: HTTP Basic (user identity + API token)
//!
//! `Credentials` are read once at start-up and handed by reference to the
//! HTTP client, which applies them to every request. The token is wrapped in
//! a `Secret` so it never shows up in `Debug` output or log events.

mod credentials;

pub use credentials::{mask_secret, Credentials, Secret};
