//! Client configuration commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use reqwest::Url;
use serde::Serialize;
use tabled::Tabled;

use crate::config::Config;
use crate::output::{print_single, print_success};

use super::CommandContext;

/// Configuration commands.
#[derive(Debug, Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Debug, Subcommand)]
enum ConfigSubcommand {
    /// Show the effective configuration.
    Show,

    /// Save the catalog API URL.
    SetApiUrl(SetApiUrlArgs),
}

#[derive(Debug, Args)]
struct SetApiUrlArgs {
    /// API URL, e.g. http://localhost:8000.
    url: String,
}

#[derive(Debug, Serialize, Tabled)]
struct ConfigView {
    #[tabled(rename = "API URL")]
    api_url: String,

    #[tabled(rename = "Config file")]
    path: String,
}

impl ConfigCommand {
    pub async fn run(self, ctx: CommandContext) -> Result<()> {
        match self.command {
            ConfigSubcommand::Show => show(ctx),
            ConfigSubcommand::SetApiUrl(args) => set_api_url(args),
        }
    }
}

fn show(ctx: CommandContext) -> Result<()> {
    let view = ConfigView {
        api_url: ctx.config.api_url().to_string(),
        path: Config::path()?.display().to_string(),
    };

    print_single(&view, ctx.format);
    Ok(())
}

fn set_api_url(args: SetApiUrlArgs) -> Result<()> {
    let url = normalize_api_url(&args.url)?;

    // Saved on top of the file contents, not the --api-url override.
    let mut config = Config::load()?;
    config.api_url = url;
    config.save()?;

    print_success(&format!("API URL set to {}", config.api_url()));
    Ok(())
}

fn normalize_api_url(raw: &str) -> Result<String> {
    let url = Url::parse(raw.trim()).with_context(|| format!("Invalid API URL '{raw}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("API URL must use http or https, got '{}'", url.scheme());
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}
