//! Wallet provider transport
//!
//! `WalletProvider` is the EIP-1193 `request(method, params)` boundary. The
//! shipped implementation speaks JSON-RPC 2.0 over HTTP, which is what Frame
//! and development nodes with unlocked accounts expose.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use swapdesk_core::WalletError;

/// EIP-1193 style request interface
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Send a single request and return its `result` value
    async fn request(&self, method: &str, params: Value) -> Result<Value, WalletError>;

    /// Short human-readable description for logs
    fn describe(&self) -> String {
        "wallet provider".to_string()
    }
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// JSON-RPC 2.0 over HTTP provider
pub struct HttpProvider {
    client: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl HttpProvider {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn map_transport_error(&self, e: reqwest::Error) -> WalletError {
        if e.is_connect() {
            WalletError::Unreachable {
                url: self.url.clone(),
            }
        } else {
            WalletError::Transport(e.to_string())
        }
    }
}

#[async_trait]
impl WalletProvider for HttpProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, WalletError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = RpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };

        tracing::debug!(method, id, url = %self.url, "wallet request");

        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| WalletError::Transport(e.to_string()))?;

        let parsed: RpcResponse = serde_json::from_str(&text).map_err(|e| {
            WalletError::ParseError(format!("HTTP {}: {} ({})", status, e, truncate(&text)))
        })?;

        decode_response(parsed)
    }

    fn describe(&self) -> String {
        format!("JSON-RPC provider at {}", self.url)
    }
}

fn decode_response(response: RpcResponse) -> Result<Value, WalletError> {
    if let Some(error) = response.error {
        return Err(WalletError::from_rpc(error.code, error.message));
    }
    // A null result is legitimate (e.g. a receipt that is not mined yet)
    Ok(response.result.unwrap_or(Value::Null))
}

fn truncate(text: &str) -> &str {
    match text.char_indices().nth(120) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Value, WalletError> {
        decode_response(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn test_decode_result() {
        let value = parse(r#"{"jsonrpc":"2.0","id":1,"result":"0xaa36a7"}"#).unwrap();
        assert_eq!(value, Value::String("0xaa36a7".into()));
    }

    #[test]
    fn test_decode_null_result() {
        let value = parse(r#"{"jsonrpc":"2.0","id":1,"result":null}"#).unwrap();
        assert!(value.is_null());
    }

    #[test]
    fn test_decode_user_rejection() {
        let err = parse(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":4001,"message":"User rejected"}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, WalletError::UserRejected));
    }

    #[test]
    fn test_decode_rpc_error() {
        let err = parse(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":3,"message":"execution reverted"}}"#,
        )
        .unwrap_err();
        match err {
            WalletError::Rpc { code, message } => {
                assert_eq!(code, 3);
                assert_eq!(message, "execution reverted");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_request_serialization() {
        let req = RpcRequest {
            jsonrpc: "2.0",
            id: 7,
            method: "eth_chainId",
            params: serde_json::json!([]),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["method"], "eth_chainId");
        assert_eq!(json["id"], 7);
        assert!(json["params"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short"), "short");
        assert_eq!(truncate(&"x".repeat(500)).len(), 120);
    }
}
