//! Data Transfer Objects for API requests and responses

use serde::{Deserialize, Serialize};
use swapdesk_core::{TxHash, TxKind, TxState, WalletConfig};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Amount typed into the input field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteBody {
    #[serde(default)]
    pub amount: String,
}

/// Wallet provider and session status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletStatusResponse {
    pub provider: String,
    pub online: bool,
    pub chain_id: Option<u64>,
    pub expected_chain_id: u64,
    pub network: String,
    pub network_matches: bool,
    pub connected: bool,
    pub address: Option<String>,
}

/// Wallet provider configuration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletConfigRequest {
    pub url: String,
    pub request_timeout_secs: Option<u64>,
}

impl WalletConfigRequest {
    /// Apply onto the current config, keeping fields the request omits
    pub fn into_config(self, current: &WalletConfig) -> WalletConfig {
        WalletConfig {
            url: self.url,
            request_timeout_secs: self
                .request_timeout_secs
                .unwrap_or(current.request_timeout_secs),
            ..current.clone()
        }
    }
}

/// Pending transaction with its explorer link
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingTxResponse {
    pub kind: TxKind,
    pub hash: TxHash,
    pub state: TxState,
    pub elapsed_secs: u64,
    pub explorer_url: String,
}

/// Generic API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("bad_request", message)
    }
}
