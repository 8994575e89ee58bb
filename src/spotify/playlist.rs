use async_trait::async_trait;

use super::SpotifyClient;
use crate::{
    catalog::{APPEND_BATCH_LIMIT, CatalogError, PlaylistRef, PlaylistWrite},
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest,
        CreatePlaylistResponse, CurrentUser,
    },
};

impl SpotifyClient {
    /// `GET /me`, the owner of new playlists.
    pub async fn current_user(&self) -> Result<CurrentUser, CatalogError> {
        let url = self.url("/me");
        let response = self.send(|http| http.get(&url)).await?;
        Ok(response.json::<CurrentUser>().await?)
    }
}

#[async_trait]
impl PlaylistWrite for SpotifyClient {
    async fn create_playlist(
        &self,
        name: &str,
        description: &str,
        public: bool,
    ) -> Result<PlaylistRef, CatalogError> {
        let user = self.current_user().await?;
        let url = self.url(&format!("/users/{}/playlists", user.id));

        let body = CreatePlaylistRequest {
            name: name.to_string(),
            description: description.to_string(),
            public,
            collaborative: false,
        };

        let response = self.send(|http| http.post(&url).json(&body)).await?;
        let created = response.json::<CreatePlaylistResponse>().await?;

        let url = created
            .external_urls
            .and_then(|u| u.spotify)
            .unwrap_or_else(|| format!("https://open.spotify.com/playlist/{}", created.id));

        Ok(PlaylistRef {
            id: created.id,
            url: Some(url),
        })
    }

    /// `POST /playlists/{id}/tracks`, split into requests of at most
    /// [`APPEND_BATCH_LIMIT`] URIs.
    async fn append_tracks(&self, playlist_id: &str, uris: &[String]) -> Result<(), CatalogError> {
        let url = self.url(&format!("/playlists/{}/tracks", playlist_id));

        for chunk in uris.chunks(APPEND_BATCH_LIMIT) {
            let body = AddTrackToPlaylistRequest {
                uris: chunk.to_vec(),
            };
            let response = self.send(|http| http.post(&url).json(&body)).await?;
            response.json::<AddTrackToPlaylistResponse>().await?;
        }

        Ok(())
    }
}
