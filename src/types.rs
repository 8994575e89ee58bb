use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tabled::Tabled;
use tokio::sync::{Mutex, oneshot};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// Authorization attempt waiting for its callback.
///
/// The callback handler checks `state`, exchanges the code with
/// `code_verifier` and hands the token to whoever holds the receiving end of
/// `sender`.
#[derive(Debug)]
pub struct PendingAuth {
    pub code_verifier: String,
    pub state: String,
    pub sender: Option<oneshot::Sender<Token>>,
}

/// Pending authorization shared between the flow and the callback handler.
pub type SharedAuthState = Arc<Mutex<Option<PendingAuth>>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackArtist {
    pub name: String,
}

/// A track as returned by catalog search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateTrack {
    pub id: String,
    pub name: String,
    pub artists: Vec<TrackArtist>,
    pub uri: String,
}

impl CandidateTrack {
    pub fn primary_artist(&self) -> &str {
        self.artists.first().map(|a| a.name.as_str()).unwrap_or("")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub tracks: TrackPage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackPage {
    #[serde(default)]
    pub items: Vec<Option<CandidateTrack>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
    pub external_urls: Option<ExternalUrls>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    pub snapshot_id: String,
}

/// Envelope every VK API method answers with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VkEnvelope<T> {
    pub response: Option<T>,
    pub error: Option<VkApiError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VkApiError {
    pub error_code: i64,
    pub error_msg: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VkAudioList {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub items: Vec<VkAudio>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VkAudio {
    pub artist: String,
    pub title: String,
    #[serde(default)]
    pub duration: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VkTracksResponse {
    pub tracks: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyErrorResponse {
    pub error: String,
}

#[derive(Tabled)]
pub struct ImportTableRow {
    #[tabled(rename = "#")]
    pub position: usize,
    pub entry: String,
    pub status: String,
    pub details: String,
}
