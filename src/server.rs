use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, str::FromStr, sync::Arc};

use crate::{api, error, types::SharedAuthState, vk::VkClient};

pub fn auth_router(state: SharedAuthState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(state)))
}

pub fn proxy_router(client: Arc<VkClient>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/vk", get(api::vk_tracks).layer(Extension(client)))
}

pub async fn start_auth_server(state: SharedAuthState) {
    serve(&crate::config::server_addr(), auth_router(state)).await;
}

pub async fn start_proxy_server(client: Arc<VkClient>) {
    serve(&crate::config::proxy_addr(), proxy_router(client)).await;
}

async fn serve(addr: &str, app: Router) {
    let addr = match SocketAddr::from_str(addr) {
        Ok(addr) => addr,
        Err(e) => error!("Failed to parse server address: {}", e),
    };

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => error!("Cannot bind {}: {}", addr, e),
    };

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server stopped: {}", e);
    }
}
