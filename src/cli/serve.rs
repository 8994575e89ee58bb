use std::sync::Arc;

use reqwest::Client;

use crate::{config, error, error::VkError, info, server::start_proxy_server, vk::VkClient};

/// Runs the VK proxy until interrupted.
pub async fn serve() {
    let Some(token) = config::vk_token() else {
        error!("{}. Set VK_TOKEN to run it.", VkError::MissingToken);
    };

    let http = match Client::builder().timeout(config::request_timeout()).build() {
        Ok(http) => http,
        Err(e) => error!("Cannot create HTTP client: {}", e),
    };

    let client = VkClient::new(
        http,
        token,
        config::vk_api_version(),
        config::vk_access_key(),
    );

    info!("VK proxy listening on {}", config::proxy_addr());
    start_proxy_server(Arc::new(client)).await;
}
