//! Configuration management for trackport.
//!
//! Values come from environment variables, seeded from a `.env` file in the
//! local data directory. Required settings (Spotify endpoints and client id,
//! server addresses) panic with a descriptive message when missing. Tunables for
//! matching and importing fall back to defaults when unset or unparsable.
//!
//! Precedence:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (tunables only)

use std::{env, path::PathBuf, str::FromStr, time::Duration};

use crate::matching::DEFAULT_EXACT_THRESHOLD;

/// Loads environment variables from `<data_local_dir>/trackport/.env`.
///
/// Creates the directory when missing. A missing `.env` file is not an error,
/// since every value may also come from the process environment.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/trackport/.env`
/// - macOS: `~/Library/Application Support/trackport/.env`
/// - Windows: `%LOCALAPPDATA%/trackport/.env`
///
/// # Errors
///
/// Returns an error if the directory cannot be created or an existing `.env`
/// file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }

    Ok(())
}

/// Base directory for trackport's local files (`.env`, token cache).
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("trackport");
    path
}

fn parsed_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

/// Address the temporary OAuth callback server binds to, e.g. `127.0.0.1:8888`.
///
/// # Panics
///
/// Panics if `SERVER_ADDRESS` is not set.
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").expect("SERVER_ADDRESS must be set")
}

/// Address the VK proxy binds to when running `trackport serve`.
pub fn proxy_addr() -> String {
    env::var("PROXY_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8787".to_string())
}

/// Base URL clients use to reach the VK proxy.
pub fn vk_proxy_url() -> String {
    env::var("VK_PROXY_URL").unwrap_or_else(|_| format!("http://{}", proxy_addr()))
}

/// Spotify application client id.
///
/// # Panics
///
/// Panics if `SPOTIFY_API_AUTH_CLIENT_ID` is not set.
pub fn spotify_client_id() -> String {
    env::var("SPOTIFY_API_AUTH_CLIENT_ID").expect("SPOTIFY_API_AUTH_CLIENT_ID must be set")
}

/// Redirect URI registered for the Spotify application.
///
/// # Panics
///
/// Panics if `SPOTIFY_API_REDIRECT_URI` is not set.
pub fn spotify_redirect_uri() -> String {
    env::var("SPOTIFY_API_REDIRECT_URI").expect("SPOTIFY_API_REDIRECT_URI must be set")
}

/// Scopes requested during authorization, e.g. `playlist-modify-private`.
///
/// # Panics
///
/// Panics if `SPOTIFY_API_AUTH_SCOPE` is not set.
pub fn spotify_scope() -> String {
    env::var("SPOTIFY_API_AUTH_SCOPE").expect("SPOTIFY_API_AUTH_SCOPE must be set")
}

/// Spotify authorization endpoint.
///
/// # Panics
///
/// Panics if `SPOTIFY_API_AUTH_URL` is not set.
pub fn spotify_apiauth_url() -> String {
    env::var("SPOTIFY_API_AUTH_URL").expect("SPOTIFY_API_AUTH_URL must be set")
}

/// Spotify Web API base URL, e.g. `https://api.spotify.com/v1`.
///
/// # Panics
///
/// Panics if `SPOTIFY_API_URL` is not set.
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").expect("SPOTIFY_API_URL must be set")
}

/// Spotify token endpoint used for code exchange and refresh.
///
/// # Panics
///
/// Panics if `SPOTIFY_API_TOKEN_URL` is not set.
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL").expect("SPOTIFY_API_TOKEN_URL must be set")
}

/// VK service token held by the proxy. `None` when the proxy is not configured.
pub fn vk_token() -> Option<String> {
    env::var("VK_TOKEN").ok().filter(|t| !t.trim().is_empty())
}

/// Fallback access key for private VK playlists.
pub fn vk_access_key() -> Option<String> {
    env::var("VK_ACCESS_KEY").ok().filter(|k| !k.trim().is_empty())
}

pub fn vk_api_version() -> String {
    env::var("VK_API_VERSION").unwrap_or_else(|_| "5.199".to_string())
}

/// Highest score a candidate may have and still count as an exact match.
pub fn exact_threshold() -> i64 {
    parsed_or("TRACKPORT_EXACT_THRESHOLD", DEFAULT_EXACT_THRESHOLD)
}

/// Pause between resolution windows.
pub fn entry_delay() -> Duration {
    Duration::from_millis(parsed_or("IMPORT_ENTRY_DELAY_MS", 100))
}

/// Number of entries resolved at once. Clamped to 1..=4 by the importer.
pub fn import_concurrency() -> usize {
    parsed_or("IMPORT_CONCURRENCY", 1)
}

/// Timeout applied to every outgoing HTTP request.
pub fn request_timeout() -> Duration {
    Duration::from_secs(parsed_or("REQUEST_TIMEOUT_SECS", 10))
}
