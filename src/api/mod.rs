//! # API Module
//!
//! HTTP endpoints served by trackport's two local servers.
//!
//! ## Auth callback server (`trackport auth`)
//!
//! - [`callback`]: OAuth 2.0 PKCE redirect target. Checks the `state`
//!   parameter against the pending attempt, exchanges the code and hands the
//!   token to the waiting flow.
//! - [`health`]: status and version.
//!
//! ## VK proxy (`trackport serve`)
//!
//! - [`vk_tracks`]: `GET /vk?link=…` resolves a VK audio or playlist link to
//!   `"Artist - Title"` entries using the proxy's private token.
//! - [`health`]: status and version.
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use trackport::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;
mod vk;

pub use callback::callback;
pub use health::health;
pub use vk::{VkQuery, vk_tracks};
