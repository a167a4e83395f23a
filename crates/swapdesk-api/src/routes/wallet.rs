//! Wallet connection endpoints

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use evm_wallet_client::detect_status;

use crate::controller;
use crate::dto::{ApiError, WalletConfigRequest, WalletStatusResponse};
use crate::view::SwapView;
use crate::AppState;

/// Create wallet routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/connect", post(connect))
        .route("/disconnect", post(disconnect))
        .route("/status", get(get_status))
        .route("/configure", post(configure))
}

/// POST /wallet/connect - Request account access
pub async fn connect(State(state): State<AppState>) -> Json<SwapView> {
    Json(controller::connect(&state).await)
}

/// POST /wallet/disconnect - End the session
pub async fn disconnect(State(state): State<AppState>) -> Json<SwapView> {
    Json(controller::disconnect(&state).await)
}

/// GET /wallet/status - Probe the provider and report the session
pub async fn get_status(State(state): State<AppState>) -> Json<WalletStatusResponse> {
    let config = state.config().await;
    let network = config.chain.network;
    let session = state.session().await;

    let (provider, status) = match state.wallet_client().await {
        Ok(client) => (
            client.provider().describe(),
            Some(detect_status(&client, network).await),
        ),
        Err(e) => (e.to_string(), None),
    };

    Json(WalletStatusResponse {
        provider,
        online: status.as_ref().is_some_and(|s| s.is_online),
        chain_id: status.as_ref().and_then(|s| s.chain_id),
        expected_chain_id: network.chain_id(),
        network: network.as_str().to_string(),
        network_matches: status.as_ref().is_some_and(|s| s.network_matches()),
        connected: session.is_some(),
        address: session.map(|s| s.address.to_checksum(None)),
    })
}

/// POST /wallet/configure - Switch wallet provider
pub async fn configure(
    State(state): State<AppState>,
    Json(request): Json<WalletConfigRequest>,
) -> Result<Json<SwapView>, (StatusCode, Json<ApiError>)> {
    if request.url.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError::bad_request("Wallet provider URL must not be empty")),
        ));
    }

    let current = state.config().await.wallet;
    let wallet = request.into_config(&current);
    Ok(Json(controller::configure_wallet(&state, wallet).await))
}
