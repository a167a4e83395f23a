//! In-memory wallet provider for tests
//!
//! Answers requests through a caller-supplied handler and records every
//! request so tests can assert on what was (or was not) sent.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use swapdesk_core::WalletError;

use crate::WalletProvider;

type Handler = dyn Fn(&str, &Value) -> Result<Value, WalletError> + Send + Sync;

/// A request seen by the mock provider
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub params: Value,
}

/// Scripted provider backed by a closure
pub struct MockProvider {
    handler: Box<Handler>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockProvider {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&str, &Value) -> Result<Value, WalletError> + Send + Sync + 'static,
    {
        Self {
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// All requests received so far, in order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Number of requests received for a method
    pub fn count(&self, method: &str) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|r| r.method == method)
            .count()
    }
}

#[async_trait]
impl WalletProvider for MockProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, WalletError> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(RecordedRequest {
                method: method.to_string(),
                params: params.clone(),
            });
        (self.handler)(method, &params)
    }

    fn describe(&self) -> String {
        "mock provider".to_string()
    }
}
