//! trackport library
//!
//! Imports free-text track lists ("Artist - Title" lines from a text file or a
//! VK link) into a Spotify playlist, matching every entry to a Spotify track by
//! fuzzy search.
//!
//! # Modules
//!
//! - `matching` - Normalization, artist/title parsing, scoring and the tiered resolver
//! - `import` - Import sessions: playlist creation, per-entry resolution, batched appends
//! - `catalog` - Traits the core uses to search and write playlists
//! - `spotify` - Spotify Web API client and the PKCE authorization flow
//! - `vk` - VK link parsing, VK API client and the proxy client
//! - `sources` - Loading entries from text files and VK links
//! - `api` - HTTP endpoints for the auth callback and the VK proxy
//! - `server` - Local HTTP servers
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration from environment variables and `.env`
//! - `management` - Token storage and refresh
//! - `error` - Typed errors for imports and VK ingestion
//! - `types` - Wire and shared data types
//! - `utils` - PKCE helpers and output formatting
//!
//! # Example
//!
//! ```ignore
//! use trackport::{import::{Importer, ImportOptions, StopSignal}, spotify::SpotifyClient};
//!
//! let importer = Importer::new(&client, &client, ImportOptions::default());
//! let session = importer
//!     .run(entries, "My import", &StopSignal::new(), |_| {})
//!     .await?;
//! println!("{:?}", session.summary());
//! ```

pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod import;
pub mod management;
pub mod matching;
pub mod server;
pub mod sources;
pub mod spotify;
pub mod types;
pub mod utils;
pub mod vk;

/// A convenient Result type alias for glue code that may fail in many ways.
///
/// Boxed dynamic error with Send + Sync bounds for async contexts. The core
/// modules use the typed errors in [`error`] and [`catalog::CatalogError`].
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Loaded {} tracks", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Authentication completed successfully");
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for fatal errors; code after the macro does not run.
///
/// # Example
///
/// ```
/// error!("Failed to load configuration");
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// For recoverable problems the user should notice.
///
/// # Example
///
/// ```
/// warning!("Rate limit approaching: {} requests remaining", remaining);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
