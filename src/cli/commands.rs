//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Ticket API client with offset pagination
#[derive(Parser, Debug)]
#[command(name = "ticketwalk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Upper bound on page fetches per walk
    #[arg(long, global = true)]
    pub max_roundtrips: Option<u32>,

    /// Advance the offset by the entries received instead of the page size
    #[arg(long, global = true)]
    pub advance_by_received: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one operation and print its envelope
    Call {
        /// Operation name (see `list`)
        operation: String,

        /// Identifier or filter the operation takes
        argument: Option<String>,
    },

    /// List available operations
    List,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Indented JSON (4 spaces)
    Pretty,
    /// Compact JSON on one line
    Json,
}
