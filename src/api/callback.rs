use std::collections::HashMap;

use axum::{Extension, extract::Query, response::Html};

use crate::{spotify::auth::exchange_code_pkce, types::SharedAuthState, warning};

/// OAuth redirect target.
///
/// Rejects responses whose `state` does not match the pending attempt,
/// exchanges the code and completes the waiting auth flow.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<SharedAuthState>,
) -> Html<&'static str> {
    if let Some(reason) = params.get("error") {
        warning!("Authorization was not granted: {}", reason);
        return Html("<h4>Authorization denied.</h4>");
    }

    let Some(code) = params.get("code") else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    let mut state = shared_state.lock().await;
    let Some(pending) = state.as_mut() else {
        return Html("<h4>No authorization in progress.</h4>");
    };

    if params.get("state") != Some(&pending.state) {
        warning!("Ignoring callback with mismatched state.");
        return Html("<h4>State mismatch.</h4>");
    }

    match exchange_code_pkce(code, &pending.code_verifier).await {
        Ok(token) => match pending.sender.take().map(|sender| sender.send(token)) {
            Some(Ok(())) => {
                Html("<h2>Authentication successful.</h2><p>Close browser window.</p>")
            }
            _ => Html("<h4>Authorization already completed.</h4>"),
        },
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            Html("<h4>Login failed.</h4>")
        }
    }
}
