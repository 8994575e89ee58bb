use std::time::Duration;

use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use super::spotify_client;
use crate::{
    config, error,
    import::{ImportOptions, Importer, ProgressEvent, SessionState, StopSignal},
    info,
    matching::MatchOptions,
    sources::Source,
    success, utils, warning,
};

pub async fn import(source: Source, name: Option<String>, exact_only: bool, public: bool) {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message("Loading tracks...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let entries = match source.load().await {
        Ok(entries) => entries,
        Err(e) => {
            spinner.finish_and_clear();
            error!("Cannot load tracks from {}: {}", source.label(), e);
        }
    };
    spinner.finish_and_clear();

    if entries.is_empty() {
        error!("No tracks found in {} source.", source.label());
    }
    info!("Loaded {} tracks from {}", entries.len(), source.label());

    let playlist_name = name
        .unwrap_or_else(|| utils::default_playlist_name(source.label(), Local::now().date_naive()));

    let client = spotify_client().await;
    match client.current_user().await {
        Ok(user) => info!("Import into account: {}", utils::account_label(&user)),
        Err(e) => error!("Cannot load Spotify account: {}", e),
    }

    let options = ImportOptions {
        matching: MatchOptions {
            find_similar: !exact_only,
            exact_threshold: config::exact_threshold(),
            ..MatchOptions::default()
        },
        concurrency: config::import_concurrency(),
        entry_delay: config::entry_delay(),
        public,
        ..ImportOptions::default()
    };
    let importer = Importer::new(&client, &client, options);

    let stop = StopSignal::new();
    let ctrl_c_stop = stop.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_stop.stop();
        }
    });

    let pb = ProgressBar::new(entries.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=> "),
    );

    let result = importer
        .run(entries, &playlist_name, &stop, |event| match event {
            ProgressEvent::Processing { entry, .. } => pb.set_message(entry.clone()),
            ProgressEvent::Resolved { .. } => pb.inc(1),
            ProgressEvent::Appended { batch, size } => {
                pb.set_message(format!("added batch {} ({} tracks)", batch + 1, size))
            }
            ProgressEvent::AppendFailed { error, .. } => pb.suspend(|| warning!("{}", error)),
            ProgressEvent::Started { .. } | ProgressEvent::Finished { .. } => {}
        })
        .await;
    pb.finish_and_clear();

    let session = match result {
        Ok(session) => session,
        Err(e) => error!("Import failed: {}", e),
    };

    println!("{}", Table::new(utils::build_result_rows(&session)));

    let summary = session.summary();
    info!(
        "Exact: {} | Similar: {} | Not found: {} | Not attempted: {} | Total: {}",
        summary.exact, summary.similar, summary.errors, summary.not_attempted, summary.total
    );

    if session.state == SessionState::Cancelled {
        warning!(
            "Import stopped at {}%. {} tracks were not attempted.",
            utils::progress_percent(session.progress),
            summary.not_attempted
        );
    }

    let url = session
        .playlist
        .as_ref()
        .and_then(|p| p.url.clone())
        .unwrap_or_default();
    success!(
        "Playlist \"{}\" ready with {} tracks: {}",
        playlist_name,
        summary.added,
        url
    );
}
