use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::NaiveDate;
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::{
    import::{ImportSession, ImportStatus},
    types::{CurrentUser, ImportTableRow},
};

fn random_alphanumeric(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

pub fn generate_code_verifier() -> String {
    random_alphanumeric(128)
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Opaque value echoed back by the authorization server.
pub fn generate_state() -> String {
    random_alphanumeric(32)
}

pub fn default_playlist_name(source_label: &str, date: NaiveDate) -> String {
    format!("Import from {} - {}", source_label, date.format("%Y-%m-%d"))
}

/// Name shown for the account a playlist is created in; the user id when no
/// display name is set.
pub fn account_label(user: &CurrentUser) -> &str {
    user.display_name
        .as_deref()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(&user.id)
}

pub fn progress_percent(progress: f64) -> u32 {
    (progress.clamp(0.0, 1.0) * 100.0).round() as u32
}

/// One table row per record, in input order.
pub fn build_result_rows(session: &ImportSession) -> Vec<ImportTableRow> {
    session
        .records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let details = match record.status {
                ImportStatus::Similar => {
                    format!("found: {}", record.found_instead.clone().unwrap_or_default())
                }
                ImportStatus::Error => record.error_reason.clone().unwrap_or_default(),
                ImportStatus::Success | ImportStatus::Pending => String::new(),
            };
            let details = if record.is_resolved() && !record.added {
                format!("{} (not added)", details).trim().to_string()
            } else {
                details
            };

            ImportTableRow {
                position: i + 1,
                entry: record.entry.clone(),
                status: record.status.label().to_string(),
                details,
            }
        })
        .collect()
}
