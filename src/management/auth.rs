use std::path::PathBuf;

use chrono::Utc;
use reqwest::Client;

use crate::{config, spotify, types::Token, warning};

/// Seconds before expiry at which the token is refreshed.
const REFRESH_MARGIN_SECS: u64 = 240;

/// Owns the Spotify token and keeps it fresh.
///
/// Loaded from the local cache by the CLI and handed to
/// [`crate::spotify::SpotifyClient`], which asks for a valid token before every
/// request.
pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager { token }
    }

    pub async fn load() -> Result<Self, String> {
        let path = Self::token_path();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| e.to_string())?;
        let token: Token = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self { token })
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(path, json).await.map_err(|e| e.to_string())
    }

    /// Returns an access token, refreshing and persisting it first when it is
    /// about to expire. The refresh goes through `http` and inherits its
    /// timeout.
    ///
    /// A failed or timed out refresh keeps the old token; the API will reject
    /// it and the caller sees an authorization error.
    pub async fn get_valid_token(&mut self, http: &Client) -> String {
        if self.is_expired() {
            match spotify::auth::refresh_token(http, &self.token.refresh_token).await {
                Ok(new_token) => {
                    self.token = new_token;
                    if let Err(e) = self.persist().await {
                        warning!("Cannot cache refreshed token: {}", e);
                    }
                }
                Err(e) => warning!("Token refresh failed: {}", e),
            }
        }

        self.token.access_token.clone()
    }

    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now + REFRESH_MARGIN_SECS >= self.token.obtained_at + self.token.expires_in
    }

    fn token_path() -> PathBuf {
        config::data_dir().join("cache/token.json")
    }
}
