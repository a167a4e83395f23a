//! Quote and swap endpoints

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::controller;
use crate::dto::{PendingTxResponse, QuoteBody};
use crate::view::SwapView;
use crate::AppState;

/// Create quote/swap routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/view", get(get_view))
        .route("/quote", post(quote))
        .route("/swap", post(swap))
        .route("/transactions", get(transactions))
}

/// GET /view - Current view
pub async fn get_view(State(state): State<AppState>) -> Json<SwapView> {
    Json(state.view().await)
}

/// POST /quote - Quote the typed amount
pub async fn quote(State(state): State<AppState>, Json(body): Json<QuoteBody>) -> Json<SwapView> {
    Json(controller::quote(&state, body.amount).await)
}

/// POST /swap - Approve if needed and swap
///
/// Resolves once the swap is confirmed or has failed; poll `/view` for
/// progress in the meantime.
pub async fn swap(State(state): State<AppState>) -> Json<SwapView> {
    Json(controller::swap(&state).await)
}

/// GET /transactions - Pending approval and swap transactions
pub async fn transactions(State(state): State<AppState>) -> Json<Vec<PendingTxResponse>> {
    let config = state.config().await;
    let pending = state.ledger().lock().await.pending();

    Json(
        pending
            .into_iter()
            .map(|tx| PendingTxResponse {
                kind: tx.kind,
                hash: tx.hash,
                state: tx.state,
                elapsed_secs: tx.elapsed_secs,
                explorer_url: config.chain.tx_url(&tx.hash),
            })
            .collect(),
    )
}
