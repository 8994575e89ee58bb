//! # Spotify Integration Module
//!
//! HTTP layer between trackport and the Spotify Web API.
//!
//! ```text
//! matching / import (CatalogSearch, PlaylistWrite)
//!          ↓
//! SpotifyClient ── TokenManager (refresh before expiry)
//!          ↓
//! reqwest (timeout, 429/502 retry)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Modules
//!
//! - [`auth`]: OAuth 2.0 authorization code flow with PKCE. The local callback
//!   server hands the token back through a oneshot channel guarded by the
//!   `state` parameter, and the flow gives up after [`auth::AUTH_TIMEOUT`].
//! - `client`: [`SpotifyClient`], the authenticated request helper shared by
//!   the endpoint implementations.
//! - `search`: [`crate::catalog::CatalogSearch`] over `GET /search`.
//! - `playlist`: [`crate::catalog::PlaylistWrite`] over `GET /me`,
//!   `POST /users/{id}/playlists` and `POST /playlists/{id}/tracks`.
//!
//! ## Error Handling
//!
//! - **Rate limiting**: 429 responses wait for `Retry-After` (up to two
//!   minutes) and retry, at most three attempts per request.
//! - **Bad gateway**: 502 responses are retried after a short pause.
//! - **Timeouts**: every request carries the client-wide timeout from
//!   `REQUEST_TIMEOUT_SECS`.
//! - Everything else surfaces as [`crate::catalog::CatalogError`]; the
//!   resolver turns those into "no match" for the entry at hand.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let tokens = Arc::new(Mutex::new(TokenManager::load().await?));
//! let client = SpotifyClient::new(tokens, config::spotify_apiurl(), config::request_timeout())?;
//! let hits = client.search("artist:\"Queen\" track:\"Bohemian Rhapsody\"", 10).await?;
//! ```

pub mod auth;
mod client;
mod playlist;
mod search;

pub use client::SpotifyClient;
