//! CLI module
//!
//! Command-line interface for running ticket API operations.
//!
//! # Commands
//!
//! - `call` - Run one operation and print its envelope
//! - `list` - List the available operations

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
