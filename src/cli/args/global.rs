//! Global CLI options shared across all commands

use log::warn;

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;

/// Global CLI options passed to all command handlers.
///
/// # Precedence
///
/// CLI flag > environment variable > config file > default. This struct
/// captures the CLI/env layer; the config layer is applied by
/// [`GlobalOptions::resolve_format`] and `CommandContext`.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format, when given on the command line or in the environment
    pub format: Option<OutputFormat>,

    /// Custom config file path (defaults to ~/.actctl/config.yaml)
    pub config: Option<String>,

    /// API base URL override
    pub api_url: Option<String>,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            api_url: cli.api_url.clone(),
        }
    }

    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    pub fn api_url_ref(&self) -> Option<&str> {
        self.api_url.as_deref()
    }

    /// Output format after falling back to the config preference
    pub fn resolve_format(&self, config: &Config) -> OutputFormat {
        if let Some(format) = self.format {
            return format;
        }

        match config.preferences.format.as_deref().map(str::parse) {
            Some(Ok(format)) => format,
            Some(Err(e)) => {
                warn!("Ignoring format preference in config: {}", e);
                OutputFormat::default()
            }
            None => OutputFormat::default(),
        }
    }
}
