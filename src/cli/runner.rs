//! CLI runner - executes commands

use crate::adapters;
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig};
use crate::pagination::OffsetAdvance;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Call {
                operation,
                argument,
            } => self.call(operation, argument.as_deref()).await,
            Commands::List => self.list_operations(),
        }
    }

    /// Resolve configuration with CLI flags on top
    fn load_config(&self) -> Result<Config> {
        let mut config = Config::load(self.cli.config.as_deref())?;
        if let Some(max) = self.cli.max_roundtrips {
            if max == 0 {
                return Err(Error::invalid_config("--max-roundtrips", "must be at least 1"));
            }
            config.max_roundtrips = max;
        }
        if self.cli.advance_by_received {
            config.offset_advance = OffsetAdvance::ReceivedCount;
        }
        debug!(
            base_url = %config.base_url,
            credentials = ?config.credentials,
            max_roundtrips = config.max_roundtrips,
            advance = ?config.offset_advance,
            "Configuration resolved"
        );
        Ok(config)
    }

    /// Run one operation
    async fn call(&self, operation: &str, argument: Option<&str>) -> Result<()> {
        // Unknown operations fail before configuration is even read
        let adapter = adapters::find(operation)?;
        let config = self.load_config()?;

        let http_config = HttpClientConfig::builder()
            .base_url(config.base_url.clone())
            .maybe_timeout(config.timeout)
            .build();
        let client = HttpClient::with_auth(http_config, config.credentials.clone())?;

        let collector = adapter
            .run(&client, &config.base_url, &config.walk_options(), argument)
            .await?;

        if collector.has_errors() {
            info!(
                operation,
                errors = collector.errors.len() + collector.error_messages.len(),
                "Operation returned upstream errors"
            );
        }

        println!("{}", self.render(&collector)?);
        Ok(())
    }

    /// List available operations
    fn list_operations(&self) -> Result<()> {
        println!("{}", self.render(&adapters::list())?);
        Ok(())
    }

    /// Render a value in the selected output format
    fn render<T: Serialize>(&self, value: &T) -> Result<String> {
        render(value, self.cli.format)
    }
}

/// Serialize `value` as compact or 4-space indented JSON
pub(crate) fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(value)?),
        OutputFormat::Pretty => {
            let mut buf = Vec::new();
            let formatter = PrettyFormatter::with_indent(b"    ");
            let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
            value.serialize(&mut serializer)?;
            String::from_utf8(buf).map_err(|e| Error::Other(e.to_string()))
        }
    }
}
