use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::{Client, Url};
use serde::Deserialize;
use tokio::{sync::oneshot, time::timeout};

use crate::{
    config, error,
    management::TokenManager,
    server::start_auth_server,
    success,
    types::{PendingAuth, SharedAuthState, Token},
    utils, warning,
};

/// How long the flow waits for the user to finish in the browser.
pub const AUTH_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    scope: Option<String>,
    expires_in: Option<u64>,
}

impl TokenResponse {
    fn into_token(self, previous_refresh_token: &str) -> Token {
        Token {
            access_token: self.access_token,
            refresh_token: self
                .refresh_token
                .unwrap_or_else(|| previous_refresh_token.to_string()),
            scope: self.scope.unwrap_or_default(),
            expires_in: self.expires_in.unwrap_or(3600),
            obtained_at: Utc::now().timestamp() as u64,
        }
    }
}

/// Runs the OAuth 2.0 authorization-code flow with PKCE and stores the token.
///
/// 1. Generates the code verifier, its S256 challenge and a random `state`.
/// 2. Registers the pending attempt in `shared_state` and starts the local
///    callback server.
/// 3. Opens the consent page in the browser (or prints the URL).
/// 4. Waits up to [`AUTH_TIMEOUT`] for the callback to deliver a token.
/// 5. Persists the token for later imports.
///
/// The callback only accepts a response carrying the same `state`, so a
/// stray or forged redirect cannot complete the flow.
pub async fn auth(shared_state: SharedAuthState) {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);
    let state = utils::generate_state();
    let (sender, receiver) = oneshot::channel();

    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PendingAuth {
            code_verifier,
            state: state.clone(),
            sender: Some(sender),
        });
    }

    let server_state = Arc::clone(&shared_state);
    let server = tokio::spawn(async move {
        start_auth_server(server_state).await;
    });

    let auth_url = match authorize_url(&code_challenge, &state) {
        Ok(url) => url,
        Err(e) => error!("Cannot build authorization URL: {}", e),
    };

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let token = wait_for_token(receiver, AUTH_TIMEOUT).await;
    server.abort();

    match token {
        Some(t) => {
            let token_manager = TokenManager::new(t);
            if let Err(e) = token_manager.persist().await {
                error!("Failed to save token to cache: {}", e);
            }

            success!("Authentication successful!");
        }
        None => {
            error!("Authentication failed or timed out.");
        }
    }
}

/// Builds the consent URL with all query parameters properly encoded.
pub fn authorize_url(code_challenge: &str, state: &str) -> Result<String, String> {
    let url = Url::parse_with_params(
        &config::spotify_apiauth_url(),
        &[
            ("client_id", config::spotify_client_id()),
            ("response_type", "code".to_string()),
            ("redirect_uri", config::spotify_redirect_uri()),
            ("code_challenge", code_challenge.to_string()),
            ("code_challenge_method", "S256".to_string()),
            ("state", state.to_string()),
            ("scope", config::spotify_scope()),
        ],
    )
    .map_err(|e| e.to_string())?;

    Ok(url.to_string())
}

/// Waits for the callback to deliver a token.
///
/// Returns `None` when `max_wait` elapses first or the sending side is
/// dropped without a token.
pub async fn wait_for_token(
    receiver: oneshot::Receiver<Token>,
    max_wait: Duration,
) -> Option<Token> {
    match timeout(max_wait, receiver).await {
        Ok(Ok(token)) => Some(token),
        _ => None,
    }
}

/// Trades a refresh token for a fresh access token.
///
/// Runs on `http`, so the refresh obeys the same request timeout as the API
/// calls waiting on it. Spotify may or may not rotate the refresh token; when
/// it doesn't, the old one is kept.
pub async fn refresh_token(http: &Client, refresh_token: &str) -> Result<Token, String> {
    let client_id = config::spotify_client_id();

    let res = http
        .post(config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", client_id.as_str()),
        ])
        .send()
        .await
        .map_err(|e| e.to_string())?
        .error_for_status()
        .map_err(|e| e.to_string())?;

    let json: TokenResponse = res.json().await.map_err(|e| e.to_string())?;

    Ok(json.into_token(refresh_token))
}

/// Exchanges the authorization code from the callback for a token.
///
/// `verifier` must be the code verifier whose challenge was sent with the
/// authorization request.
pub async fn exchange_code_pkce(code: &str, verifier: &str) -> Result<Token, reqwest::Error> {
    let client_id = config::spotify_client_id();
    let redirect_uri = config::spotify_redirect_uri();

    let client = Client::builder()
        .timeout(config::request_timeout())
        .build()?;
    let res = client
        .post(config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", redirect_uri.as_str()),
        ])
        .send()
        .await?
        .error_for_status()?;

    let json: TokenResponse = res.json().await?;

    Ok(json.into_token(""))
}
