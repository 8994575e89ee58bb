use std::{sync::Arc, time::Duration};

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tokio::{sync::Mutex, time::sleep};

use crate::{catalog::CatalogError, management::TokenManager};

const MAX_ATTEMPTS: u32 = 3;
const MAX_RETRY_AFTER_SECS: u64 = 120;
const BAD_GATEWAY_DELAY: Duration = Duration::from_secs(5);

/// Authenticated Spotify Web API client.
///
/// Holds the injected [`TokenManager`] and asks it for a valid access token
/// before every request, so long imports survive token expiry.
#[derive(Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    tokens: Arc<Mutex<TokenManager>>,
}

impl SpotifyClient {
    /// Builds a client whose requests all time out after `timeout`.
    pub fn new(
        tokens: Arc<Mutex<TokenManager>>,
        api_url: String,
        timeout: Duration,
    ) -> Result<Self, CatalogError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    async fn access_token(&self) -> String {
        self.tokens.lock().await.get_valid_token(&self.http).await
    }

    /// Sends the request produced by `build`, retrying rate-limited (429) and
    /// bad-gateway (502) responses a bounded number of times.
    ///
    /// Any other non-success status becomes a [`CatalogError`].
    pub(crate) async fn send<F>(&self, build: F) -> Result<Response, CatalogError>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        let mut attempt = 0;

        loop {
            attempt += 1;
            let token = self.access_token().await;
            let response = build(&self.http).bearer_auth(token).send().await?;
            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(1);

                // Reported through the error; the caller owns the terminal.
                if retry_after > MAX_RETRY_AFTER_SECS || attempt >= MAX_ATTEMPTS {
                    return Err(CatalogError::RateLimited(retry_after));
                }

                sleep(Duration::from_secs(retry_after)).await;
                continue;
            }

            if status == StatusCode::BAD_GATEWAY && attempt < MAX_ATTEMPTS {
                sleep(BAD_GATEWAY_DELAY).await;
                continue;
            }

            if status == StatusCode::UNAUTHORIZED {
                return Err(CatalogError::Auth(
                    "access token rejected, run trackport auth".to_string(),
                ));
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(CatalogError::Status {
                    status: status.as_u16(),
                    body,
                });
            }

            return Ok(response);
        }
    }
}
