//! CLI commands.

mod browse;
mod config;
mod films;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::client::ApiClient;
use crate::config::Config;
use crate::output::OutputFormat;

/// dvd - Browse and manage the DVD film catalog.
#[derive(Debug, Parser)]
#[command(name = "dvd")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format (table or json).
    #[arg(long, global = true, default_value = "table")]
    format: OutputFormat,

    /// Catalog API URL, overriding the saved config.
    #[arg(long, global = true, env = "DVD_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List, search, add and edit films.
    Films(films::FilmsCommand),

    /// Interactive catalog browser.
    Browse(browse::BrowseCommand),

    /// Show or change client configuration.
    Config(config::ConfigCommand),

    /// Show CLI version.
    Version,
}

impl Cli {
    /// Run the CLI command.
    pub async fn run(self) -> Result<()> {
        let mut config = Config::load()?;
        if let Some(api_url) = self.api_url {
            config.api_url = api_url;
        }

        let ctx = CommandContext {
            config,
            format: self.format,
        };

        match self.command {
            Commands::Films(cmd) => cmd.run(ctx).await,
            Commands::Browse(cmd) => cmd.run(ctx).await,
            Commands::Config(cmd) => cmd.run(ctx).await,
            Commands::Version => {
                println!("dvd {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

/// Shared command context.
pub struct CommandContext {
    pub config: Config,
    pub format: OutputFormat,
}

impl CommandContext {
    /// Get an API client for the configured endpoint.
    pub fn client(&self) -> Result<ApiClient> {
        ApiClient::new(&self.config)
    }
}
