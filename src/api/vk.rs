use std::sync::Arc;

use axum::{Extension, extract::Query, http::StatusCode, response::Json};
use serde::Deserialize;

use crate::{
    types::{ProxyErrorResponse, VkTracksResponse},
    vk::VkClient,
    warning,
};

#[derive(Debug, Deserialize)]
pub struct VkQuery {
    #[serde(default)]
    pub link: String,
}

/// `GET /vk?link=…`: resolves a VK link with the proxy's own token.
///
/// Answers `{ "tracks": [...] }`, or `400 { "error": "..." }` for bad links,
/// empty lists and VK failures.
pub async fn vk_tracks(
    Query(query): Query<VkQuery>,
    Extension(client): Extension<Arc<VkClient>>,
) -> Result<Json<VkTracksResponse>, (StatusCode, Json<ProxyErrorResponse>)> {
    match client.fetch_tracks(&query.link).await {
        Ok(tracks) => Ok(Json(VkTracksResponse { tracks })),
        Err(e) => {
            warning!("VK lookup for {} failed: {}", query.link, e);
            Err((
                StatusCode::BAD_REQUEST,
                Json(ProxyErrorResponse {
                    error: e.to_string(),
                }),
            ))
        }
    }
}
