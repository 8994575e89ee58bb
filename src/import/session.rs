use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crate::{
    catalog::{CatalogError, PlaylistRef},
    matching::MatchResult,
};

pub const NOT_FOUND_REASON: &str = "track not found";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStatus {
    Pending,
    Success,
    Similar,
    Error,
}

impl ImportStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ImportStatus::Pending)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ImportStatus::Pending => "not attempted",
            ImportStatus::Success => "exact",
            ImportStatus::Similar => "similar",
            ImportStatus::Error => "error",
        }
    }
}

/// Outcome for one input entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRecord {
    pub entry: String,
    pub status: ImportStatus,
    pub track_id: Option<String>,
    pub track_uri: Option<String>,
    /// What was imported instead, for similar matches.
    pub found_instead: Option<String>,
    pub error_reason: Option<String>,
    /// Whether the track's append batch went through.
    pub added: bool,
}

impl ImportRecord {
    pub fn pending(entry: String) -> Self {
        Self {
            entry,
            status: ImportStatus::Pending,
            track_id: None,
            track_uri: None,
            found_instead: None,
            error_reason: None,
            added: false,
        }
    }

    /// Moves a pending record to its terminal status. Terminal records are left alone.
    pub fn settle(&mut self, outcome: Result<Option<MatchResult>, CatalogError>) {
        if self.status.is_terminal() {
            return;
        }

        match outcome {
            Ok(Some(found)) => {
                self.status = if found.is_exact {
                    ImportStatus::Success
                } else {
                    ImportStatus::Similar
                };
                if !found.is_exact {
                    self.found_instead = Some(found.display_name());
                }
                self.track_id = Some(found.id);
                self.track_uri = Some(found.uri);
            }
            Ok(None) => {
                self.status = ImportStatus::Error;
                self.error_reason = Some(NOT_FOUND_REASON.to_string());
            }
            Err(e) => {
                self.status = ImportStatus::Error;
                self.error_reason = Some(format!("search failed: {}", e));
            }
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.status, ImportStatus::Success | ImportStatus::Similar)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Running,
    Completed,
    Cancelled,
}

/// Result of one append call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub index: usize,
    pub size: usize,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub exact: usize,
    pub similar: usize,
    pub errors: usize,
    pub not_attempted: usize,
    pub added: usize,
    pub total: usize,
}

#[derive(Debug, Clone)]
pub struct ImportSession {
    pub playlist: Option<PlaylistRef>,
    pub records: Vec<ImportRecord>,
    pub progress: f64,
    pub state: SessionState,
    pub batches: Vec<BatchOutcome>,
}

impl ImportSession {
    pub fn new(entries: Vec<String>) -> Self {
        Self {
            playlist: None,
            records: entries.into_iter().map(ImportRecord::pending).collect(),
            progress: 0.0,
            state: SessionState::Idle,
            batches: Vec::new(),
        }
    }

    pub fn summary(&self) -> ImportSummary {
        let mut summary = ImportSummary {
            total: self.records.len(),
            ..Default::default()
        };

        for record in &self.records {
            match record.status {
                ImportStatus::Success => summary.exact += 1,
                ImportStatus::Similar => summary.similar += 1,
                ImportStatus::Error => summary.errors += 1,
                ImportStatus::Pending => summary.not_attempted += 1,
            }
            if record.added {
                summary.added += 1;
            }
        }

        summary
    }

    /// URIs of resolved records, in input order, paired with the record index.
    pub fn resolved_uris(&self) -> Vec<(usize, String)> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_resolved())
            .filter_map(|(i, r)| r.track_uri.clone().map(|uri| (i, uri)))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    Started { total: usize },
    Processing { index: usize, entry: String },
    Resolved {
        index: usize,
        status: ImportStatus,
        progress: f64,
    },
    Appended { batch: usize, size: usize },
    AppendFailed { batch: usize, error: String },
    Finished { state: SessionState },
}

/// Cooperative stop flag, checked between entries.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
