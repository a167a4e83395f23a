//! Swap controller
//!
//! One operation per user event. Every operation catches its own failures,
//! writes them to the view, and returns the resulting view.

use async_trait::async_trait;
use swapdesk_core::{Session, SwapError, TxHash, TxKind, TxState, WalletConfig};
use uniswap_v2::{
    fetch_quote, messages, QuoteOutcome, QuoteRequest, SwapExecutor, SwapProgress, SwapStage,
};

use crate::state::AppState;
use crate::view::{Severity, StatusLine, StatusLink, SwapView, CONNECT_LABEL};

/// User events the page can raise
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    ConnectClicked,
    DisconnectClicked,
    AmountInput(String),
    SwapClicked,
}

/// Route an event to its operation
pub async fn dispatch(state: &AppState, event: UiEvent) -> SwapView {
    match event {
        UiEvent::ConnectClicked => connect(state).await,
        UiEvent::DisconnectClicked => disconnect(state).await,
        UiEvent::AmountInput(text) => quote(state, text).await,
        UiEvent::SwapClicked => swap(state).await,
    }
}

/// Request account access and start a session
pub async fn connect(state: &AppState) -> SwapView {
    let client = match state.wallet_client().await {
        Ok(client) => client,
        Err(e) => {
            tracing::warn!("No wallet provider: {}", e);
            return state
                .update_view(|v| v.status = StatusLine::error(messages::PROVIDER_MISSING))
                .await;
        }
    };

    match client.primary_account().await {
        Ok(address) => {
            let session = Session::new(address);
            let label = session.short_address();
            state.set_session(session).await;
            tracing::info!(%address, "Wallet connected");

            state
                .update_view(|v| {
                    v.connect_label = label;
                    v.swap_enabled = true;
                    v.status = StatusLine::info(messages::CONNECTED);
                })
                .await
        }
        Err(e) if e.is_provider_missing() => {
            tracing::warn!("Wallet provider unavailable: {}", e);
            state
                .update_view(|v| v.status = StatusLine::error(messages::PROVIDER_MISSING))
                .await
        }
        Err(e) => {
            tracing::warn!("Failed to connect wallet: {}", e);
            state
                .update_view(|v| v.status = StatusLine::error(messages::CONNECT_FAILED))
                .await
        }
    }
}

/// End the session and return the page to its startup state
pub async fn disconnect(state: &AppState) -> SwapView {
    state.clear_session().await;
    tracing::info!("Wallet disconnected");

    state
        .update_view(|v| {
            v.connect_label = CONNECT_LABEL.to_string();
            v.swap_enabled = false;
            v.status = StatusLine::info(messages::DISCONNECTED);
        })
        .await
}

/// Point the app at a different wallet provider. Ends any session.
pub async fn configure_wallet(state: &AppState, wallet: WalletConfig) -> SwapView {
    tracing::info!("Wallet provider set to {:?}", wallet.url);
    state.set_wallet_config(wallet).await;
    disconnect(state).await
}

/// Quote the output for the typed amount.
///
/// Only the most recently issued quote may write `to_amount`; results that
/// resolve after a newer request was issued are dropped.
pub async fn quote(state: &AppState, amount_text: String) -> SwapView {
    // Sequence and view are updated under one lock so the two always agree
    let mut seq = 0;
    state
        .update_view(|v| {
            seq = state.next_quote_seq();
            v.from_amount = amount_text.clone();
        })
        .await;

    let outcome = match QuoteRequest::parse(&amount_text) {
        Ok(request) => match state.wallet_client().await {
            Ok(client) => {
                let deployment = state.deployment().await;
                fetch_quote(&client, &deployment, &request).await
            }
            Err(e) => {
                tracing::warn!("Failed to get price: {}", e);
                QuoteOutcome::Failed
            }
        },
        Err(e) => {
            tracing::debug!("Quote input rejected: {}", e);
            QuoteOutcome::Cleared
        }
    };

    state
        .update_view(|v| {
            if state.is_latest_quote(seq) {
                v.to_amount = outcome.display().to_string();
            } else {
                tracing::debug!(seq, "Dropping stale quote result");
            }
        })
        .await
}

/// Writes swap progress into the view and the ledger
struct ViewProgress<'a> {
    state: &'a AppState,
}

#[async_trait]
impl SwapProgress for ViewProgress<'_> {
    async fn stage(&self, stage: SwapStage) {
        self.state
            .update_view(|v| v.status = StatusLine::info(stage.message()))
            .await;
    }

    async fn tx_submitted(&self, kind: TxKind, hash: TxHash) {
        self.state.ledger().lock().await.track(kind, hash);
    }

    async fn tx_settled(&self, hash: TxHash, tx_state: TxState) {
        self.state.ledger().lock().await.settle(hash, tx_state);
    }
}

/// Approve if needed, then swap the typed amount
pub async fn swap(state: &AppState) -> SwapView {
    let Some(session) = state.session().await else {
        return state
            .update_view(|v| v.status = StatusLine::error(messages::NOT_CONNECTED))
            .await;
    };

    let Some(_slot) = state.try_begin_swap() else {
        tracing::warn!("Swap requested while another swap is running");
        return state
            .update_view(|v| v.status = StatusLine::error(messages::SWAP_IN_PROGRESS))
            .await;
    };

    let view = state
        .update_view(|v| {
            v.swap_enabled = false;
            v.status = StatusLine::info(messages::PREPARING);
        })
        .await;

    let result = match state.wallet_client().await {
        Ok(client) => {
            let deployment = state.deployment().await;
            let progress = ViewProgress { state };
            SwapExecutor::new(&client, &deployment, &progress)
                .run(session.address, &view.from_amount)
                .await
        }
        Err(e) => Err(SwapError::Wallet(e)),
    };

    let status = match result {
        Ok(confirmed) => {
            let config = state.config().await;
            StatusLine::success(
                messages::SWAP_SUCCESS,
                Some(StatusLink {
                    href: config.chain.tx_url(&confirmed.hash),
                    label: messages::EXPLORER_LINK_LABEL.to_string(),
                }),
            )
        }
        Err(e) => {
            tracing::error!(code = e.error_code(), "Swap failed: {}", e);
            StatusLine::error(format!("Swap failed: {}", e))
        }
    };

    let connected = state.is_connected().await;
    state
        .update_view(|v| {
            if status.severity == Severity::Success {
                // Invalidate any quote still in flight for the old amount
                state.next_quote_seq();
                v.from_amount.clear();
                v.to_amount.clear();
            }
            v.status = status;
            v.swap_enabled = connected;
        })
        .await
}
