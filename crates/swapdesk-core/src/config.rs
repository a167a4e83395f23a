//! Configuration types for Swapdesk

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::constants::sepolia;
use crate::{Error, Network};

/// Wallet provider connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletConfig {
    /// EIP-1193 JSON-RPC endpoint (e.g., Frame at "http://127.0.0.1:1248").
    /// Empty means no wallet provider is available.
    #[serde(default = "default_wallet_url")]
    pub url: String,

    /// Timeout for read-only calls, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Receipt polling interval while waiting for a confirmation, in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_wallet_url() -> String {
    "http://127.0.0.1:1248".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_poll_interval_ms() -> u64 {
    2_000
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            url: default_wallet_url(),
            request_timeout_secs: default_request_timeout_secs(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl WalletConfig {
    /// Whether a provider endpoint has been configured at all
    pub fn has_provider(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

/// Chain and contract deployment configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Network the contracts are deployed on
    pub network: Network,

    /// Uniswap V2 style router
    pub router: Address,

    /// Token sold in the swap
    pub input_token: Address,

    /// Token bought in the swap
    pub output_token: Address,

    /// Block explorer base URL (transaction links are `<url>/tx/<hash>`)
    pub explorer_url: String,
}

fn default_explorer_url() -> String {
    Network::Sepolia.explorer_url().to_string()
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            network: Network::Sepolia,
            router: sepolia::ROUTER,
            input_token: sepolia::WETH,
            output_token: sepolia::DAI,
            explorer_url: default_explorer_url(),
        }
    }
}

impl ChainConfig {
    /// Explorer link for a transaction hash
    pub fn tx_url(&self, hash: &impl std::fmt::Display) -> String {
        format!("{}/tx/{}", self.explorer_url.trim_end_matches('/'), hash)
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Wallet provider settings
    #[serde(default)]
    pub wallet: WalletConfig,

    /// Chain and contract settings
    #[serde(default)]
    pub chain: ChainConfig,

    /// Address the API server binds to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// API server port
    #[serde(default = "default_api_port")]
    pub api_port: u16,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_api_port() -> u16 {
    19054
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            wallet: WalletConfig::default(),
            chain: ChainConfig::default(),
            bind_address: default_bind_address(),
            api_port: default_api_port(),
        }
    }
}

impl AppConfig {
    /// Check settings that serde cannot enforce
    pub fn validate(&self) -> Result<(), Error> {
        if self.chain.input_token == self.chain.output_token {
            return Err(Error::Config(
                "input_token and output_token must differ".to_string(),
            ));
        }
        if self.chain.explorer_url.trim().is_empty() {
            return Err(Error::Config("explorer_url must not be empty".to_string()));
        }
        if self.wallet.poll_interval_ms == 0 {
            return Err(Error::Config(
                "poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.wallet.url, "http://127.0.0.1:1248");
        assert_eq!(config.chain.network, Network::Sepolia);
        assert_eq!(config.chain.router, sepolia::ROUTER);
        assert_eq!(config.api_port, 19054);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.wallet.url, config.wallet.url);
        assert_eq!(parsed.chain.input_token, config.chain.input_token);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: AppConfig = serde_json::from_str(r#"{"api_port": 8080}"#).unwrap();
        assert_eq!(parsed.api_port, 8080);
        assert_eq!(parsed.wallet.request_timeout_secs, 30);
        assert_eq!(parsed.chain.output_token, sepolia::DAI);
    }

    #[test]
    fn test_validate_rejects_same_tokens() {
        let mut config = AppConfig::default();
        config.chain.output_token = config.chain.input_token;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_tx_url() {
        let chain = ChainConfig {
            explorer_url: "https://sepolia.etherscan.io/".to_string(),
            ..ChainConfig::default()
        };
        assert_eq!(chain.tx_url(&"0xabc"), "https://sepolia.etherscan.io/tx/0xabc");
    }

    #[test]
    fn test_empty_wallet_url_means_no_provider() {
        let wallet = WalletConfig {
            url: "  ".to_string(),
            ..WalletConfig::default()
        };
        assert!(!wallet.has_provider());
        assert!(WalletConfig::default().has_provider());
    }
}
