//! Provider status detection
//!
//! Probes the wallet provider for reachability and the chain it is pointed at.

use serde::{Deserialize, Serialize};
use swapdesk_core::Network;

use crate::WalletClient;

/// Wallet provider status as seen by a probe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderStatus {
    /// Provider is reachable and answering
    pub is_online: bool,

    /// Chain the provider is currently on
    pub chain_id: Option<u64>,

    /// Chain the configured contracts live on
    pub expected_chain_id: u64,
}

impl ProviderStatus {
    /// Check if the provider is on the configured network
    pub fn network_matches(&self) -> bool {
        self.chain_id == Some(self.expected_chain_id)
    }
}

/// Detect provider status by asking for its chain ID
pub async fn detect_status(client: &WalletClient, network: Network) -> ProviderStatus {
    match client.chain_id().await {
        Ok(chain_id) => {
            if chain_id != network.chain_id() {
                tracing::warn!(
                    chain_id,
                    expected = network.chain_id(),
                    "Wallet provider is on a different chain than {}",
                    network
                );
            }
            ProviderStatus {
                is_online: true,
                chain_id: Some(chain_id),
                expected_chain_id: network.chain_id(),
            }
        }
        Err(e) => {
            tracing::debug!("Wallet provider probe failed: {}", e);
            ProviderStatus {
                is_online: false,
                chain_id: None,
                expected_chain_id: network.chain_id(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockProvider;
    use serde_json::json;
    use std::sync::Arc;
    use swapdesk_core::{WalletConfig, WalletError};

    fn client_for(chain: Result<&'static str, ()>) -> WalletClient {
        let provider = MockProvider::new(move |_, _| match chain {
            Ok(id) => Ok(json!(id)),
            Err(()) => Err(WalletError::Unreachable {
                url: "http://127.0.0.1:1248".into(),
            }),
        });
        WalletClient::new(Arc::new(provider), &WalletConfig::default())
    }

    #[tokio::test]
    async fn test_detect_matching_network() {
        let status = detect_status(&client_for(Ok("0xaa36a7")), Network::Sepolia).await;
        assert!(status.is_online);
        assert_eq!(status.chain_id, Some(11_155_111));
        assert!(status.network_matches());
    }

    #[tokio::test]
    async fn test_detect_wrong_network() {
        let status = detect_status(&client_for(Ok("0x1")), Network::Sepolia).await;
        assert!(status.is_online);
        assert!(!status.network_matches());
    }

    #[tokio::test]
    async fn test_detect_offline() {
        let status = detect_status(&client_for(Err(())), Network::Sepolia).await;
        assert!(!status.is_online);
        assert_eq!(status.chain_id, None);
        assert!(!status.network_matches());
    }
}
