use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use super::spotify_client;
use crate::{
    config, error, info,
    matching::{MatchOptions, PreparedQuery, Resolver},
    success, warning,
};

/// Resolves a single entry and prints what an import would pick.
pub async fn match_entry(entry: String, exact_only: bool) {
    let prepared = PreparedQuery::from_raw(&entry);
    info!(
        "Query: \"{}\" (artist: \"{}\", title: \"{}\")",
        prepared.query, prepared.parsed.artist, prepared.parsed.title
    );

    let client = spotify_client().await;
    let resolver = Resolver::new(
        &client,
        MatchOptions {
            find_similar: !exact_only,
            exact_threshold: config::exact_threshold(),
            ..MatchOptions::default()
        },
    );

    let pb = ProgressBar::new_spinner();
    pb.set_message("Searching Spotify...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let outcome = resolver.try_resolve(&entry).await;
    pb.finish_and_clear();

    match outcome {
        Ok(Some(found)) if found.is_exact => {
            success!("Exact match: {} ({})", found.display_name(), found.uri)
        }
        Ok(Some(found)) => warning!("Similar match: {} ({})", found.display_name(), found.uri),
        Ok(None) => warning!("No match found."),
        Err(e) => error!("Search failed: {}", e),
    }
}
