use thiserror::Error;

use crate::catalog::CatalogError;

/// Session-level import failures.
///
/// Per-entry problems never show up here; they end in the entry's record.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to create playlist: {0}")]
    PlaylistCreationFailed(#[source] CatalogError),
    #[error("failed to append batch {batch} to playlist: {source}")]
    PlaylistWriteFailed {
        batch: usize,
        #[source]
        source: CatalogError,
    },
}

#[derive(Debug, Error)]
pub enum VkError {
    #[error("bad VK link")]
    BadLink,
    #[error("playlist is empty or not accessible")]
    Empty,
    #[error("VK {code}: {message}")]
    Api { code: i64, message: String },
    #[error("VK proxy is not configured with an access token")]
    MissingToken,
    #[error("VK request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{0}")]
    Proxy(String),
}
