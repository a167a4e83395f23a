//! HTTP server setup and configuration

use std::net::{IpAddr, SocketAddr};

use axum::Router;
use thiserror::Error;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::routes::create_router;
use crate::AppState;

/// Errors that can occur while starting or running the server
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid bind address '{0}'")]
    InvalidBindAddress(String),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Create the full application router with middleware
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Resolve the configured bind address and port
pub fn bind_addr(bind_address: &str, port: u16) -> Result<SocketAddr, ServerError> {
    let ip: IpAddr = bind_address
        .trim()
        .parse()
        .map_err(|_| ServerError::InvalidBindAddress(bind_address.to_string()))?;
    Ok(SocketAddr::new(ip, port))
}

/// Start the HTTP server on the configured address
pub async fn start_server(state: AppState) -> Result<(), ServerError> {
    let config = state.config().await;
    let addr = bind_addr(&config.bind_address, config.api_port)?;
    let app = create_app(state);

    tracing::info!("Starting API server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_addr() {
        let addr = bind_addr("127.0.0.1", 19054).unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:19054");
        assert!(matches!(
            bind_addr("localhost", 1),
            Err(ServerError::InvalidBindAddress(_))
        ));
    }
}
