//! API route handlers

pub mod health;
pub mod swap;
pub mod wallet;

use axum::{extract::State, response::Html, routing::get, Router};

use crate::page::render_page;
use crate::AppState;

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health::health_check))
        .nest("/wallet", wallet::router())
        .merge(swap::router())
        .with_state(state)
}

/// GET / - Swap page
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_page(&state.config().await))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use swapdesk_core::AppConfig;
    use tower::ServiceExt;
    use uniswap_v2::testing::ScriptedChain;

    fn app(chain: ScriptedChain) -> Router {
        let wallet = chain.build();
        create_router(AppState::with_wallet_client(
            AppConfig::default(),
            wallet.client,
        ))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_health() {
        let app = app(ScriptedChain::new());
        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_index_serves_page() {
        let app = app(ScriptedChain::new());
        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("Swapdesk"));
    }

    #[tokio::test]
    async fn test_startup_view() {
        let app = app(ScriptedChain::new());
        let (status, view) = send(&app, "GET", "/view", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["connect_label"], "Connect Wallet");
        assert_eq!(view["swap_enabled"], false);
    }

    #[tokio::test]
    async fn test_connect_quote_swap_flow() {
        let app = app(ScriptedChain::new());

        let (_, view) = send(&app, "POST", "/wallet/connect", None).await;
        assert_eq!(view["swap_enabled"], true);

        let (_, view) = send(&app, "POST", "/quote", Some(json!({ "amount": "1" }))).await;
        assert_eq!(view["to_amount"], "2500.0");

        let (_, view) = send(&app, "POST", "/swap", None).await;
        assert_eq!(view["status"]["text"], "Swap successful! ✅");
        assert_eq!(view["status"]["severity"], "success");
        assert_eq!(view["status"]["link"]["label"], "View on Etherscan");

        let (_, pending) = send(&app, "GET", "/transactions", None).await;
        assert_eq!(pending, json!([]));
    }

    #[tokio::test]
    async fn test_swap_before_connect() {
        let app = app(ScriptedChain::new());
        let (status, view) = send(&app, "POST", "/swap", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["status"]["text"], "Please connect your wallet first.");
    }

    #[tokio::test]
    async fn test_quote_rejects_malformed_body() {
        let app = app(ScriptedChain::new());
        let (status, _) = send(&app, "POST", "/quote", Some(json!({ "amount": 5 }))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_wallet_status() {
        let app = app(ScriptedChain::new());
        let (_, status) = send(&app, "GET", "/wallet/status", None).await;
        assert_eq!(status["online"], true);
        assert_eq!(status["network_matches"], true);
        assert_eq!(status["connected"], false);

        send(&app, "POST", "/wallet/connect", None).await;
        let (_, status) = send(&app, "GET", "/wallet/status", None).await;
        assert_eq!(status["connected"], true);
        assert_eq!(
            status["address"],
            "0x1111111111111111111111111111111111111111"
        );
    }

    #[tokio::test]
    async fn test_configure_rejects_empty_url() {
        let app = app(ScriptedChain::new());
        let (status, body) = send(
            &app,
            "POST",
            "/wallet/configure",
            Some(json!({ "url": " " })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "bad_request");
    }

    #[tokio::test]
    async fn test_configure_ends_session() {
        let app = app(ScriptedChain::new());
        send(&app, "POST", "/wallet/connect", None).await;

        let (status, view) = send(
            &app,
            "POST",
            "/wallet/configure",
            Some(json!({ "url": "http://127.0.0.1:8545" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["swap_enabled"], false);
        assert_eq!(view["connect_label"], "Connect Wallet");
    }
}
