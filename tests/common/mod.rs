#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use async_trait::async_trait;
use trackport::{
    catalog::{CatalogError, CatalogSearch, PlaylistRef, PlaylistWrite},
    types::{CandidateTrack, TrackArtist},
};

pub fn track(id: &str, artist: &str, name: &str) -> CandidateTrack {
    CandidateTrack {
        id: id.to_string(),
        name: name.to_string(),
        artists: vec![TrackArtist {
            name: artist.to_string(),
        }],
        uri: format!("spotify:track:{}", id),
    }
}

pub fn entries(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|l| l.to_string()).collect()
}

/// In-memory catalog keyed by the exact query string.
#[derive(Default)]
pub struct MockCatalog {
    results: HashMap<String, Vec<CandidateTrack>>,
    failing: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, query: &str, tracks: Vec<CandidateTrack>) -> Self {
        self.results.insert(query.to_string(), tracks);
        self
    }

    pub fn failing_on(mut self, query: &str) -> Self {
        self.failing.insert(query.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogSearch for MockCatalog {
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<CandidateTrack>, CatalogError> {
        self.calls.lock().unwrap().push(query.to_string());

        if self.failing.contains(query) {
            return Err(CatalogError::Status {
                status: 500,
                body: "search unavailable".to_string(),
            });
        }

        Ok(self
            .results
            .get(query)
            .map(|tracks| tracks.iter().take(limit as usize).cloned().collect())
            .unwrap_or_default())
    }
}

/// In-memory playlist store recording every append batch.
#[derive(Default)]
pub struct MockPlaylists {
    fail_create: bool,
    failing_batches: HashSet<usize>,
    created: Mutex<Vec<(String, String, bool)>>,
    batches: Mutex<Vec<Vec<String>>>,
}

impl MockPlaylists {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_create() -> Self {
        Self {
            fail_create: true,
            ..Self::default()
        }
    }

    pub fn failing_batch(mut self, batch: usize) -> Self {
        self.failing_batches.insert(batch);
        self
    }

    pub fn created(&self) -> Vec<(String, String, bool)> {
        self.created.lock().unwrap().clone()
    }

    /// Every append attempt in call order, failed ones included.
    pub fn batches(&self) -> Vec<Vec<String>> {
        self.batches.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlaylistWrite for MockPlaylists {
    async fn create_playlist(
        &self,
        name: &str,
        description: &str,
        public: bool,
    ) -> Result<PlaylistRef, CatalogError> {
        if self.fail_create {
            return Err(CatalogError::Auth("token revoked".to_string()));
        }

        self.created
            .lock()
            .unwrap()
            .push((name.to_string(), description.to_string(), public));

        Ok(PlaylistRef {
            id: "pl1".to_string(),
            url: Some("https://open.spotify.com/playlist/pl1".to_string()),
        })
    }

    async fn append_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), CatalogError> {
        assert_eq!(playlist_id, "pl1");

        let mut batches = self.batches.lock().unwrap();
        let index = batches.len();
        batches.push(uris.to_vec());

        if self.failing_batches.contains(&index) {
            return Err(CatalogError::Status {
                status: 502,
                body: "bad gateway".to_string(),
            });
        }

        Ok(())
    }
}
