//! VK audio ingestion.
//!
//! [`VkClient`] talks to the VK API with a private service token and only runs
//! inside the proxy (`trackport serve`). Importers use [`VkProxyClient`], which
//! asks the proxy for the already-flattened `"Artist - Title"` list, so the
//! token never reaches them.

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{
    error::VkError,
    types::{ProxyErrorResponse, VkAudio, VkAudioList, VkEnvelope, VkTracksResponse},
};

const VK_API_URL: &str = "https://api.vk.com/method";
const OWNER_AUDIO_LIMIT: u32 = 6000;
const PLAYLIST_AUDIO_LIMIT: u32 = 3000;

static VK_HOST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://(?:www\.|m\.)?vk\.com").unwrap());
static OWNER_AUDIOS: Lazy<Regex> = Lazy::new(|| Regex::new(r"/audios(-?\d+)").unwrap());
static PLAYLIST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"playlist/(-?\d+)_(\d+)(?:_([\w-]+))?").unwrap());

/// What a VK link points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VkLink {
    pub owner_id: String,
    /// `None` for an owner's whole audio list.
    pub playlist_id: Option<String>,
    pub access_key: Option<String>,
}

/// Parses `…/audios<owner>` and `…/playlist/<owner>_<playlist>[_<key>]` links.
pub fn parse_vk_link(link: &str) -> Result<VkLink, VkError> {
    let trimmed = link.trim();
    let path = VK_HOST.replace(trimmed, "");

    if let Some(caps) = OWNER_AUDIOS.captures(&path) {
        return Ok(VkLink {
            owner_id: caps[1].to_string(),
            playlist_id: None,
            access_key: None,
        });
    }

    if let Some(caps) = PLAYLIST.captures(&path) {
        return Ok(VkLink {
            owner_id: caps[1].to_string(),
            playlist_id: Some(caps[2].to_string()),
            access_key: caps.get(3).map(|m| m.as_str().to_string()),
        });
    }

    Err(VkError::BadLink)
}

/// Flattens VK audio items to `"Artist - Title"` entries, skipping blanks.
pub fn tracks_from_audio(items: &[VkAudio]) -> Vec<String> {
    items
        .iter()
        .filter(|a| !(a.artist.trim().is_empty() && a.title.trim().is_empty()))
        .map(|a| format!("{} - {}", a.artist.trim(), a.title.trim()))
        .collect()
}

/// Direct VK API client. Holds the service token; keep it server-side.
pub struct VkClient {
    http: Client,
    token: String,
    version: String,
    default_access_key: Option<String>,
}

impl VkClient {
    pub fn new(
        http: Client,
        token: String,
        version: String,
        default_access_key: Option<String>,
    ) -> Self {
        Self {
            http,
            token,
            version,
            default_access_key,
        }
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &[(&str, String)],
    ) -> Result<T, VkError> {
        let response = self
            .http
            .get(format!("{}/{}", VK_API_URL, method))
            .query(&[("access_token", self.token.as_str()), ("v", self.version.as_str())])
            .query(params)
            .send()
            .await?;

        let envelope = response.json::<VkEnvelope<T>>().await?;

        if let Some(err) = envelope.error {
            return Err(VkError::Api {
                code: err.error_code,
                message: err.error_msg,
            });
        }

        envelope.response.ok_or(VkError::Empty)
    }

    /// Resolves `link` to its `"Artist - Title"` entries.
    ///
    /// # Errors
    ///
    /// [`VkError::BadLink`] for unrecognized links, [`VkError::Empty`] when the
    /// list is empty or hidden, [`VkError::Api`] for VK-side failures.
    pub async fn fetch_tracks(&self, link: &str) -> Result<Vec<String>, VkError> {
        let link = parse_vk_link(link)?;

        let mut params = vec![("owner_id", link.owner_id.clone())];
        match &link.playlist_id {
            Some(playlist_id) => {
                params.push(("album_id", playlist_id.clone()));
                params.push(("count", PLAYLIST_AUDIO_LIMIT.to_string()));
                let access_key = link
                    .access_key
                    .clone()
                    .or_else(|| self.default_access_key.clone());
                if let Some(key) = access_key {
                    params.push(("access_key", key));
                }
            }
            None => params.push(("count", OWNER_AUDIO_LIMIT.to_string())),
        }

        let list: VkAudioList = self.call("audio.get", &params).await?;
        let tracks = tracks_from_audio(&list.items);

        if tracks.is_empty() {
            return Err(VkError::Empty);
        }

        Ok(tracks)
    }
}

/// Client side of the VK proxy.
pub struct VkProxyClient {
    http: Client,
    base_url: String,
}

impl VkProxyClient {
    pub fn new(http: Client, base_url: String) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `GET {proxy}/vk?link=…`.
    pub async fn fetch(&self, link: &str) -> Result<Vec<String>, VkError> {
        let response = self
            .http
            .get(format!("{}/vk", self.base_url))
            .query(&[("link", link)])
            .send()
            .await?;

        if response.status().is_success() {
            let body = response.json::<VkTracksResponse>().await?;
            return Ok(body.tracks);
        }

        let status = response.status();
        match response.json::<ProxyErrorResponse>().await {
            Ok(body) => Err(VkError::Proxy(body.error)),
            Err(_) => Err(VkError::Proxy(format!("VK proxy responded with {}", status))),
        }
    }
}
