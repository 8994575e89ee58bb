use crate::{spotify, types::SharedAuthState};

pub async fn auth(shared_state: SharedAuthState) {
    spotify::auth::auth(shared_state).await;
}
