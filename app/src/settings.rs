//! Command line and config file handling

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use swapdesk_core::AppConfig;

/// Serve the Swapdesk swap page and API
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// TOML config file; built-in Sepolia defaults apply when omitted
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Wallet provider JSON-RPC URL (empty disables the provider)
    #[arg(long)]
    pub wallet_url: Option<String>,

    /// API server port
    #[arg(long, short)]
    pub port: Option<u16>,
}

/// Read a config file. Missing keys take their defaults.
pub fn load_file(path: &Path) -> anyhow::Result<AppConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    parse(&contents).with_context(|| format!("Invalid config file {}", path.display()))
}

fn parse(contents: &str) -> anyhow::Result<AppConfig> {
    Ok(toml::from_str(contents)?)
}

/// Build the effective config: file (or defaults), then CLI overrides
pub fn resolve(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading config from {}", path.display());
            load_file(path)?
        }
        None => AppConfig::default(),
    };

    if let Some(url) = &cli.wallet_url {
        config.wallet.url = url.clone();
    }
    if let Some(port) = cli.port {
        config.api_port = port;
    }

    config.validate()?;
    Ok(config)
}
