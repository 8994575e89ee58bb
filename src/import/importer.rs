use std::time::Duration;

use futures::future::join_all;
use tokio::time::sleep;

use super::session::{BatchOutcome, ImportSession, ProgressEvent, SessionState, StopSignal};
use crate::{
    catalog::{APPEND_BATCH_LIMIT, CatalogSearch, PlaylistWrite},
    error::ImportError,
    matching::{MatchOptions, Resolver},
};

/// Upper bound on entries resolved at the same time.
pub const MAX_CONCURRENCY: usize = 4;

pub const DEFAULT_DESCRIPTION: &str = "Created with trackport";

#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub matching: MatchOptions,
    /// Entries resolved at once, clamped to `1..=MAX_CONCURRENCY`.
    pub concurrency: usize,
    /// Pause between resolution windows.
    pub entry_delay: Duration,
    pub description: String,
    pub public: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            matching: MatchOptions::default(),
            concurrency: 1,
            entry_delay: Duration::from_millis(100),
            description: DEFAULT_DESCRIPTION.to_string(),
            public: false,
        }
    }
}

/// Drives an import: creates the playlist, resolves every entry and appends
/// the matches in batches.
pub struct Importer<'a> {
    catalog: &'a dyn CatalogSearch,
    playlists: &'a dyn PlaylistWrite,
    options: ImportOptions,
}

impl<'a> Importer<'a> {
    pub fn new(
        catalog: &'a dyn CatalogSearch,
        playlists: &'a dyn PlaylistWrite,
        options: ImportOptions,
    ) -> Self {
        Self {
            catalog,
            playlists,
            options,
        }
    }

    /// Validates the input and creates the destination playlist.
    ///
    /// # Errors
    ///
    /// - [`ImportError::InvalidInput`] for a blank playlist name or no entries,
    ///   before any remote call is made.
    /// - [`ImportError::PlaylistCreationFailed`] if the playlist cannot be created.
    pub async fn start(
        &self,
        entries: Vec<String>,
        playlist_name: &str,
    ) -> Result<ImportSession, ImportError> {
        let playlist_name = playlist_name.trim();
        if playlist_name.is_empty() {
            return Err(ImportError::InvalidInput(
                "playlist name must not be empty".to_string(),
            ));
        }
        if entries.is_empty() {
            return Err(ImportError::InvalidInput(
                "there are no tracks to import".to_string(),
            ));
        }

        let mut session = ImportSession::new(entries);

        let playlist = self
            .playlists
            .create_playlist(playlist_name, &self.options.description, self.options.public)
            .await
            .map_err(ImportError::PlaylistCreationFailed)?;

        session.playlist = Some(playlist);
        session.state = SessionState::Running;
        Ok(session)
    }

    /// Resolves the pending entries of a running session and fills its playlist.
    ///
    /// Entries are handled in input order. `stop` is checked before each window
    /// of entries; once set, the remaining records stay pending while tracks
    /// already resolved are still appended. Per-entry and per-batch failures
    /// are recorded in the session and never abort the run.
    pub async fn process<F>(
        &self,
        session: &mut ImportSession,
        stop: &StopSignal,
        mut on_progress: F,
    ) -> Result<(), ImportError>
    where
        F: FnMut(&ProgressEvent),
    {
        let playlist_id = match (&session.state, &session.playlist) {
            (SessionState::Running, Some(playlist)) => playlist.id.clone(),
            _ => {
                return Err(ImportError::InvalidInput(
                    "import session is not running".to_string(),
                ));
            }
        };

        let resolver = Resolver::new(self.catalog, self.options.matching);
        let total = session.records.len();
        let window = self.options.concurrency.clamp(1, MAX_CONCURRENCY);

        on_progress(&ProgressEvent::Started { total });

        let mut stopped = false;
        let mut processed = 0;
        let mut index = 0;

        while index < total {
            if stop.is_stopped() {
                stopped = true;
                break;
            }

            let end = (index + window).min(total);
            let entries: Vec<String> = session.records[index..end]
                .iter()
                .map(|r| r.entry.clone())
                .collect();

            for (offset, entry) in entries.iter().enumerate() {
                on_progress(&ProgressEvent::Processing {
                    index: index + offset,
                    entry: entry.clone(),
                });
            }

            let outcomes = join_all(entries.iter().map(|entry| resolver.try_resolve(entry))).await;

            for (offset, outcome) in outcomes.into_iter().enumerate() {
                let record = &mut session.records[index + offset];
                record.settle(outcome);
                let status = record.status;

                processed += 1;
                session.progress = processed as f64 / total as f64;
                on_progress(&ProgressEvent::Resolved {
                    index: index + offset,
                    status,
                    progress: session.progress,
                });
            }

            index = end;
            if index < total && !self.options.entry_delay.is_zero() {
                sleep(self.options.entry_delay).await;
            }
        }

        self.append_resolved(&playlist_id, session, &mut on_progress).await;

        session.state = if stopped {
            SessionState::Cancelled
        } else {
            SessionState::Completed
        };
        on_progress(&ProgressEvent::Finished {
            state: session.state,
        });

        Ok(())
    }

    /// [`Importer::start`] followed by [`Importer::process`].
    pub async fn run<F>(
        &self,
        entries: Vec<String>,
        playlist_name: &str,
        stop: &StopSignal,
        on_progress: F,
    ) -> Result<ImportSession, ImportError>
    where
        F: FnMut(&ProgressEvent),
    {
        let mut session = self.start(entries, playlist_name).await?;
        self.process(&mut session, stop, on_progress).await?;
        Ok(session)
    }

    async fn append_resolved<F>(
        &self,
        playlist_id: &str,
        session: &mut ImportSession,
        on_progress: &mut F,
    ) where
        F: FnMut(&ProgressEvent),
    {
        let resolved = session.resolved_uris();

        for (batch, chunk) in resolved.chunks(APPEND_BATCH_LIMIT).enumerate() {
            let uris: Vec<String> = chunk.iter().map(|(_, uri)| uri.clone()).collect();

            match self.playlists.append_tracks(playlist_id, &uris).await {
                Ok(()) => {
                    for (record_index, _) in chunk {
                        session.records[*record_index].added = true;
                    }
                    session.batches.push(BatchOutcome {
                        index: batch,
                        size: chunk.len(),
                        error: None,
                    });
                    on_progress(&ProgressEvent::Appended {
                        batch,
                        size: chunk.len(),
                    });
                }
                Err(source) => {
                    let error = ImportError::PlaylistWriteFailed { batch, source }.to_string();
                    session.batches.push(BatchOutcome {
                        index: batch,
                        size: chunk.len(),
                        error: Some(error.clone()),
                    });
                    on_progress(&ProgressEvent::AppendFailed { batch, error });
                }
            }
        }
    }
}
