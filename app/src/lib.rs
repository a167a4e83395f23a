//! Swapdesk application library

pub mod settings;

use anyhow::Context;
use swapdesk_api::{start_server, AppState};
use tracing_subscriber::EnvFilter;

use settings::Cli;

/// `RUST_LOG` plus debug output for every workspace crate that logs
fn log_filter() -> anyhow::Result<EnvFilter> {
    Ok(EnvFilter::from_default_env()
        .add_directive("swapdesk=debug".parse()?)
        .add_directive("swapdesk_api=debug".parse()?)
        .add_directive("evm_wallet_client=debug".parse()?)
        .add_directive("uniswap_v2=debug".parse()?)
        .add_directive("info".parse()?))
}

/// Run the Swapdesk server until it stops or Ctrl-C is pressed
pub fn run(cli: Cli) -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter(log_filter()?).init();

    tracing::info!("Starting Swapdesk");

    let config = settings::resolve(&cli)?;
    tracing::info!(
        network = %config.chain.network,
        wallet = %config.wallet.url,
        "Using router {}",
        config.chain.router
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(async move {
        let state = AppState::with_config(config);
        tokio::select! {
            result = start_server(state) => result.context("API server stopped"),
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutting down");
                Ok(())
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_covers_workspace_crates() {
        let filter = log_filter().unwrap().to_string().to_lowercase();
        for target in ["swapdesk", "swapdesk_api", "evm_wallet_client", "uniswap_v2"] {
            assert!(
                filter.contains(&format!("{}=debug", target)),
                "missing {} in {}",
                target,
                filter
            );
        }
    }
}
