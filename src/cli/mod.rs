mod auth;
mod import;
mod matcher;
mod serve;

pub use auth::auth;
pub use import::import;
pub use matcher::match_entry;
pub use serve::serve;

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{config, error, management::TokenManager, spotify::SpotifyClient};

/// Spotify client backed by the cached token. Exits when no token is cached.
async fn spotify_client() -> SpotifyClient {
    let token_mgr = match TokenManager::load().await {
        Ok(manager) => manager,
        Err(e) => {
            error!(
                "Failed to load token. Please run trackport auth\n Error: {}",
                e
            );
        }
    };

    match SpotifyClient::new(
        Arc::new(Mutex::new(token_mgr)),
        config::spotify_apiurl(),
        config::request_timeout(),
    ) {
        Ok(client) => client,
        Err(e) => error!("Cannot create Spotify client: {}", e),
    }
}
