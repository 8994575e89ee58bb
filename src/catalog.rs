//! Seams between the matching/import core and the remote music catalog.
//!
//! The core only talks to these traits. [`crate::spotify::SpotifyClient`]
//! implements both against the Spotify Web API; tests use in-memory fakes.

use async_trait::async_trait;

use crate::types::CandidateTrack;

/// Maximum number of track URIs a single append call may carry.
pub const APPEND_BATCH_LIMIT: usize = 100;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("catalog responded with {status}: {body}")]
    Status { status: u16, body: String },
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),
    #[error("authorization failed: {0}")]
    Auth(String),
}

/// Playlist created for an import session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistRef {
    pub id: String,
    pub url: Option<String>,
}

#[async_trait]
pub trait CatalogSearch: Send + Sync {
    /// Runs a track search and returns up to `limit` candidates in the
    /// catalog's own relevance order.
    ///
    /// `query` may embed field filters such as `artist:"…" track:"…"`.
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<CandidateTrack>, CatalogError>;
}

#[async_trait]
pub trait PlaylistWrite: Send + Sync {
    async fn create_playlist(
        &self,
        name: &str,
        description: &str,
        public: bool,
    ) -> Result<PlaylistRef, CatalogError>;

    /// Appends `uris` (at most [`APPEND_BATCH_LIMIT`]) to the end of the playlist.
    async fn append_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), CatalogError>;
}
