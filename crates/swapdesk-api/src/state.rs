//! Application state shared across API handlers

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use evm_wallet_client::WalletClient;
use swapdesk_core::{AppConfig, Session, WalletConfig, WalletError};
use tokio::sync::{Mutex, RwLock};
use uniswap_v2::Deployment;

use crate::ledger::TxLedger;
use crate::view::SwapView;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: RwLock<AppConfig>,
    wallet_client: RwLock<Option<WalletClient>>,
    session: RwLock<Option<Session>>,
    view: RwLock<SwapView>,
    ledger: Mutex<TxLedger>,
    quote_seq: AtomicU64,
    swap_in_flight: AtomicBool,
}

/// Marks a swap as running; the slot is released on drop
pub(crate) struct SwapGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for SwapGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

impl AppState {
    /// Create a new application state with default config
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create with a specific config
    pub fn with_config(config: AppConfig) -> Self {
        Self::build(config, None)
    }

    /// Create with a ready wallet client instead of one built from config
    pub fn with_wallet_client(config: AppConfig, client: WalletClient) -> Self {
        Self::build(config, Some(client))
    }

    fn build(config: AppConfig, client: Option<WalletClient>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config: RwLock::new(config),
                wallet_client: RwLock::new(client),
                session: RwLock::new(None),
                view: RwLock::new(SwapView::default()),
                ledger: Mutex::new(TxLedger::new()),
                quote_seq: AtomicU64::new(0),
                swap_in_flight: AtomicBool::new(false),
            }),
        }
    }

    /// Get current config
    pub async fn config(&self) -> AppConfig {
        self.inner.config.read().await.clone()
    }

    /// Router deployment from the current chain config
    pub async fn deployment(&self) -> Deployment {
        Deployment::from_config(&self.inner.config.read().await.chain)
    }

    /// Update wallet provider configuration
    pub async fn set_wallet_config(&self, wallet_config: WalletConfig) {
        // Client lock first, same order as `wallet_client`
        let mut client = self.inner.wallet_client.write().await;
        self.inner.config.write().await.wallet = wallet_config;
        *client = None;
    }

    /// Get or create the wallet client.
    ///
    /// Returns `WalletError::ProviderMissing` if no provider URL is configured.
    pub async fn wallet_client(&self) -> Result<WalletClient, WalletError> {
        {
            let client = self.inner.wallet_client.read().await;
            if let Some(client) = client.as_ref() {
                return Ok(client.clone());
            }
        }

        let mut cached = self.inner.wallet_client.write().await;
        if let Some(client) = cached.as_ref() {
            return Ok(client.clone());
        }

        let config = self.inner.config.read().await;
        let client = WalletClient::from_config(&config.wallet)?;
        tracing::info!("Created wallet client for {}", client.provider().describe());
        *cached = Some(client.clone());
        Ok(client)
    }

    /// Get current session
    pub async fn session(&self) -> Option<Session> {
        self.inner.session.read().await.clone()
    }

    pub async fn is_connected(&self) -> bool {
        self.inner.session.read().await.is_some()
    }

    pub(crate) async fn set_session(&self, session: Session) {
        let mut current = self.inner.session.write().await;
        *current = Some(session);
    }

    pub(crate) async fn clear_session(&self) {
        let mut current = self.inner.session.write().await;
        *current = None;
    }

    /// Snapshot of the current view
    pub async fn view(&self) -> SwapView {
        self.inner.view.read().await.clone()
    }

    /// Apply a change to the view and return the result
    pub(crate) async fn update_view(&self, apply: impl FnOnce(&mut SwapView)) -> SwapView {
        let mut view = self.inner.view.write().await;
        apply(&mut view);
        view.clone()
    }

    pub(crate) fn ledger(&self) -> &Mutex<TxLedger> {
        &self.inner.ledger
    }

    /// Issue a sequence number for a new quote request
    pub(crate) fn next_quote_seq(&self) -> u64 {
        self.inner.quote_seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether `seq` is still the most recently issued quote request
    pub(crate) fn is_latest_quote(&self, seq: u64) -> bool {
        self.inner.quote_seq.load(Ordering::SeqCst) == seq
    }

    /// Claim the single swap slot, or `None` while another swap is running
    pub(crate) fn try_begin_swap(&self) -> Option<SwapGuard<'_>> {
        let flag = &self.inner.swap_in_flight;
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| SwapGuard { flag })
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_wallet_client_without_url() {
        let mut config = AppConfig::default();
        config.wallet.url = String::new();
        let state = AppState::with_config(config);
        assert!(matches!(
            state.wallet_client().await,
            Err(WalletError::ProviderMissing)
        ));
    }

    #[tokio::test]
    async fn test_set_wallet_config_resets_client() {
        let state = AppState::new();
        assert!(state.wallet_client().await.is_ok());

        state
            .set_wallet_config(WalletConfig {
                url: String::new(),
                ..WalletConfig::default()
            })
            .await;
        assert!(state.wallet_client().await.is_err());
    }

    #[test]
    fn test_quote_sequence() {
        let state = AppState::new();
        let first = state.next_quote_seq();
        assert!(state.is_latest_quote(first));
        let second = state.next_quote_seq();
        assert!(!state.is_latest_quote(first));
        assert!(state.is_latest_quote(second));
    }

    #[test]
    fn test_swap_slot_is_exclusive() {
        let state = AppState::new();
        let guard = state.try_begin_swap();
        assert!(guard.is_some());
        assert!(state.try_begin_swap().is_none());

        drop(guard);
        assert!(state.try_begin_swap().is_some());
    }
}
