//! evm-wallet-client: Typed client over an EIP-1193 wallet provider
//!
//! This crate provides a high-level client for talking to a user's wallet:
//! account access, read-only contract calls, transaction submission, and
//! waiting for on-chain confirmation.

pub mod capabilities;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod provider;

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::{Address, TxHash};
use serde_json::{json, Value};
use swapdesk_core::{WalletConfig, WalletError};

pub use capabilities::{detect_status, ProviderStatus};
pub use provider::{HttpProvider, WalletProvider};

/// Result type for wallet client operations
pub type Result<T> = std::result::Result<T, WalletError>;

/// A transaction for the wallet to sign and broadcast.
///
/// Gas, nonce, and fee fields are left to the wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
    pub from: Address,
    pub to: Address,
    pub data: Vec<u8>,
}

impl TransactionRequest {
    fn to_json(&self) -> Value {
        json!({
            "from": self.from.to_string(),
            "to": self.to.to_string(),
            "data": encode_hex(&self.data),
        })
    }
}

/// Subset of a transaction receipt the swap flow needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionReceipt {
    pub transaction_hash: TxHash,
    /// Block the transaction was included in; `None` while pending
    pub block_number: Option<u64>,
    /// Execution status (`status == 0x1`)
    pub success: bool,
}

impl TransactionReceipt {
    fn from_json(value: &Value) -> Result<Self> {
        let transaction_hash = parse_hash(&value["transactionHash"])?;
        let block_number = value["blockNumber"].as_str().and_then(parse_quantity);
        // Pre-Byzantium receipts have no status field; treat them as successful
        let success = match value["status"].as_str() {
            Some(status) => parse_quantity(status)
                .ok_or_else(|| WalletError::ParseError(format!("Invalid status: {}", status)))?
                == 1,
            None => true,
        };

        Ok(Self {
            transaction_hash,
            block_number,
            success,
        })
    }
}

/// High-level wallet client
#[derive(Clone)]
pub struct WalletClient {
    provider: Arc<dyn WalletProvider>,
    request_timeout: Option<Duration>,
    poll_interval: Duration,
}

impl WalletClient {
    /// Create a client over any provider
    pub fn new(provider: Arc<dyn WalletProvider>, config: &WalletConfig) -> Self {
        let request_timeout = match config.request_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        Self {
            provider,
            request_timeout,
            poll_interval: Duration::from_millis(config.poll_interval_ms.max(1)),
        }
    }

    /// Create a JSON-RPC client for the configured provider URL.
    ///
    /// Returns `WalletError::ProviderMissing` if no URL is configured.
    pub fn from_config(config: &WalletConfig) -> Result<Self> {
        if !config.has_provider() {
            return Err(WalletError::ProviderMissing);
        }
        let provider = HttpProvider::new(config.url.trim());
        Ok(Self::new(Arc::new(provider), config))
    }

    /// Get the underlying provider (for advanced usage)
    pub fn provider(&self) -> &Arc<dyn WalletProvider> {
        &self.provider
    }

    /// Ask the wallet for account access (`eth_requestAccounts`).
    ///
    /// Not time-bounded: the wallet may be waiting on the user.
    pub async fn request_accounts(&self) -> Result<Vec<Address>> {
        let value = self
            .provider
            .request("eth_requestAccounts", json!([]))
            .await?;

        let accounts = value
            .as_array()
            .ok_or_else(|| WalletError::ParseError("Accounts response is not an array".into()))?;

        accounts.iter().map(parse_address).collect()
    }

    /// Request account access and return the active (first) account
    pub async fn primary_account(&self) -> Result<Address> {
        self.request_accounts()
            .await?
            .into_iter()
            .next()
            .ok_or(WalletError::NoAccounts)
    }

    /// Get the provider's current chain ID
    pub async fn chain_id(&self) -> Result<u64> {
        let value = self
            .timed_request(self.provider.request("eth_chainId", json!([])))
            .await?;
        value
            .as_str()
            .and_then(parse_quantity)
            .ok_or_else(|| WalletError::ParseError(format!("Invalid chain id: {}", value)))
    }

    /// Execute a read-only contract call against the latest block
    pub async fn call(&self, to: Address, data: Vec<u8>) -> Result<Vec<u8>> {
        let params = json!([
            { "to": to.to_string(), "data": encode_hex(&data) },
            "latest"
        ]);
        let value = self
            .timed_request(self.provider.request("eth_call", params))
            .await?;
        let hex_str = value
            .as_str()
            .ok_or_else(|| WalletError::ParseError(format!("Invalid call result: {}", value)))?;
        decode_hex(hex_str)
    }

    /// Ask the wallet to sign and broadcast a transaction.
    ///
    /// Not time-bounded: the wallet may be waiting on the user.
    pub async fn send_transaction(&self, tx: &TransactionRequest) -> Result<TxHash> {
        let value = self
            .provider
            .request("eth_sendTransaction", json!([tx.to_json()]))
            .await?;
        let hash = parse_hash(&value)?;
        tracing::info!(%hash, to = %tx.to, "Transaction submitted");
        Ok(hash)
    }

    /// Get a transaction receipt, `None` if the transaction is not mined yet
    pub async fn transaction_receipt(&self, hash: TxHash) -> Result<Option<TransactionReceipt>> {
        let value = self
            .timed_request(
                self.provider
                    .request("eth_getTransactionReceipt", json!([hash.to_string()])),
            )
            .await?;

        if value.is_null() {
            return Ok(None);
        }
        TransactionReceipt::from_json(&value).map(Some)
    }

    /// Poll until the transaction has one confirmation.
    ///
    /// There is no overall deadline; each poll is bounded by the request
    /// timeout. A mined receipt with a failed status is `WalletError::Reverted`.
    pub async fn wait_for_confirmation(&self, hash: TxHash) -> Result<TransactionReceipt> {
        loop {
            if let Some(receipt) = self.transaction_receipt(hash).await? {
                if receipt.block_number.is_some() {
                    if !receipt.success {
                        tracing::warn!(%hash, "Transaction reverted");
                        return Err(WalletError::Reverted { hash });
                    }
                    tracing::info!(%hash, block = ?receipt.block_number, "Transaction confirmed");
                    return Ok(receipt);
                }
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Wrap a provider call with the configured timeout
    async fn timed_request(
        &self,
        fut: impl std::future::Future<Output = Result<Value>>,
    ) -> Result<Value> {
        match self.request_timeout {
            Some(limit) => tokio::time::timeout(limit, fut)
                .await
                .map_err(|_| WalletError::Timeout {
                    secs: limit.as_secs(),
                })?,
            None => fut.await,
        }
    }
}

/// Encode bytes as a 0x-prefixed hex string
pub fn encode_hex(data: &[u8]) -> String {
    format!("0x{}", hex::encode(data))
}

/// Decode a 0x-prefixed (or bare) hex string
pub fn decode_hex(s: &str) -> Result<Vec<u8>> {
    let stripped = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(stripped).map_err(|e| WalletError::ParseError(format!("Invalid hex data: {}", e)))
}

/// Parse a JSON-RPC quantity ("0x1a") into a u64
fn parse_quantity(s: &str) -> Option<u64> {
    let stripped = s.strip_prefix("0x")?;
    if stripped.is_empty() {
        return None;
    }
    u64::from_str_radix(stripped, 16).ok()
}

fn parse_address(value: &Value) -> Result<Address> {
    let s = value
        .as_str()
        .ok_or_else(|| WalletError::ParseError(format!("Invalid address: {}", value)))?;
    Address::from_str(s).map_err(|e| WalletError::ParseError(format!("Invalid address {}: {}", s, e)))
}

fn parse_hash(value: &Value) -> Result<TxHash> {
    let s = value
        .as_str()
        .ok_or_else(|| WalletError::ParseError(format!("Invalid transaction hash: {}", value)))?;
    TxHash::from_str(s)
        .map_err(|e| WalletError::ParseError(format!("Invalid transaction hash {}: {}", s, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockProvider;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const ACCOUNT: &str = "0x1111111111111111111111111111111111111111";

    fn client(provider: MockProvider) -> (WalletClient, Arc<MockProvider>) {
        let provider = Arc::new(provider);
        let client = WalletClient::new(provider.clone(), &WalletConfig::default());
        (client, provider)
    }

    fn hash(byte: u8) -> TxHash {
        TxHash::with_last_byte(byte)
    }

    #[test]
    fn test_from_config_without_url() {
        let config = WalletConfig {
            url: String::new(),
            ..WalletConfig::default()
        };
        assert!(matches!(
            WalletClient::from_config(&config),
            Err(WalletError::ProviderMissing)
        ));
        assert!(WalletClient::from_config(&WalletConfig::default()).is_ok());
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("0x1"), Some(1));
        assert_eq!(parse_quantity("0xaa36a7"), Some(11_155_111));
        assert_eq!(parse_quantity("0x"), None);
        assert_eq!(parse_quantity("12"), None);
    }

    #[test]
    fn test_hex_helpers() {
        assert_eq!(encode_hex(&[0xde, 0xad]), "0xdead");
        assert_eq!(decode_hex("0xdead").unwrap(), vec![0xde, 0xad]);
        assert_eq!(decode_hex("0x").unwrap(), Vec::<u8>::new());
        assert!(decode_hex("0xzz").is_err());
    }

    #[test]
    fn test_receipt_parsing() {
        let receipt = TransactionReceipt::from_json(&json!({
            "transactionHash": hash(5).to_string(),
            "blockNumber": "0x10",
            "status": "0x0"
        }))
        .unwrap();
        assert_eq!(receipt.transaction_hash, hash(5));
        assert_eq!(receipt.block_number, Some(16));
        assert!(!receipt.success);
    }

    #[tokio::test]
    async fn test_primary_account() {
        let (client, provider) = client(MockProvider::new(|method, _| match method {
            "eth_requestAccounts" => Ok(json!([ACCOUNT])),
            _ => Err(WalletError::Rpc {
                code: -32601,
                message: "method not found".into(),
            }),
        }));

        let account = client.primary_account().await.unwrap();
        assert_eq!(account, Address::from_str(ACCOUNT).unwrap());
        assert_eq!(provider.count("eth_requestAccounts"), 1);
    }

    #[tokio::test]
    async fn test_primary_account_empty() {
        let (client, _) = client(MockProvider::new(|_, _| Ok(json!([]))));
        assert!(matches!(
            client.primary_account().await,
            Err(WalletError::NoAccounts)
        ));
    }

    #[tokio::test]
    async fn test_call_encodes_request() {
        let (client, provider) = client(MockProvider::new(|_, _| Ok(json!("0x0102"))));
        let to = Address::from_str(ACCOUNT).unwrap();

        let result = client.call(to, vec![0xab, 0xcd]).await.unwrap();
        assert_eq!(result, vec![1, 2]);

        let requests = provider.requests();
        assert_eq!(requests[0].method, "eth_call");
        assert_eq!(requests[0].params[0]["data"], "0xabcd");
        assert_eq!(requests[0].params[1], "latest");
    }

    #[tokio::test]
    async fn test_send_transaction() {
        let (client, provider) =
            client(MockProvider::new(|_, _| Ok(json!(hash(9).to_string()))));
        let from = Address::from_str(ACCOUNT).unwrap();
        let tx = TransactionRequest {
            from,
            to: Address::ZERO,
            data: vec![1],
        };

        assert_eq!(client.send_transaction(&tx).await.unwrap(), hash(9));
        let params = &provider.requests()[0].params;
        assert_eq!(params[0]["data"], "0x01");
        assert_eq!(
            params[0]["from"].as_str().unwrap().to_lowercase(),
            ACCOUNT
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_for_confirmation_polls_until_mined() {
        let polls = Arc::new(AtomicUsize::new(0));
        let counter = polls.clone();
        let (client, _) = client(MockProvider::new(move |_, _| {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            Ok(match n {
                0 => Value::Null,
                1 => json!({ "transactionHash": hash(3).to_string(), "blockNumber": null }),
                _ => json!({
                    "transactionHash": hash(3).to_string(),
                    "blockNumber": "0x2a",
                    "status": "0x1"
                }),
            })
        }));

        let receipt = client.wait_for_confirmation(hash(3)).await.unwrap();
        assert_eq!(receipt.block_number, Some(42));
        assert_eq!(polls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_wait_for_confirmation_reverted() {
        let (client, _) = client(MockProvider::new(|_, _| {
            Ok(json!({
                "transactionHash": hash(4).to_string(),
                "blockNumber": "0x1",
                "status": "0x0"
            }))
        }));

        match client.wait_for_confirmation(hash(4)).await {
            Err(WalletError::Reverted { hash: h }) => assert_eq!(h, hash(4)),
            other => panic!("expected revert, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_read_calls_time_out() {
        struct Hung;

        #[async_trait::async_trait]
        impl WalletProvider for Hung {
            async fn request(&self, _: &str, _: Value) -> Result<Value> {
                std::future::pending().await
            }
        }

        let client = WalletClient::new(Arc::new(Hung), &WalletConfig::default());
        assert!(matches!(
            client.chain_id().await,
            Err(WalletError::Timeout { secs: 30 })
        ));
    }
}
