use async_trait::async_trait;

use super::SpotifyClient;
use crate::{
    catalog::{CatalogError, CatalogSearch},
    types::{CandidateTrack, SearchResponse},
};

#[async_trait]
impl CatalogSearch for SpotifyClient {
    /// `GET /search?type=track&market=from_token`.
    ///
    /// `query` is passed through untouched, so Spotify field filters
    /// (`artist:"…"`, `track:"…"`) work as-is.
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<CandidateTrack>, CatalogError> {
        let url = self.url("/search");
        let limit = limit.to_string();

        let response = self
            .send(|http| {
                http.get(&url).query(&[
                    ("q", query),
                    ("type", "track"),
                    ("limit", limit.as_str()),
                    ("market", "from_token"),
                ])
            })
            .await?;

        let json = response.json::<SearchResponse>().await?;

        Ok(json.tracks.items.into_iter().flatten().collect())
    }
}
