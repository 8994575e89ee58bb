use strsim::levenshtein;

use super::normalize::{clean_title, normalize};
use crate::types::CandidateTrack;

/// Highest score that still counts as an exact match.
pub const DEFAULT_EXACT_THRESHOLD: i64 = 4;

/// Distance charged for a side of the query that is missing, so title-only
/// queries never look like close matches on the artist.
pub const MISSING_FIELD_PENALTY: i64 = 99;

const EQUALITY_BONUS: i64 = -1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredCandidate {
    pub candidate: CandidateTrack,
    pub score: i64,
}

impl ScoredCandidate {
    pub fn is_exact(&self, threshold: i64) -> bool {
        self.score <= threshold
    }
}

fn distance(target: &str, candidate: &str) -> i64 {
    if target.is_empty() {
        return MISSING_FIELD_PENALTY;
    }
    levenshtein(&normalize(target), &normalize(&clean_title(candidate))) as i64
}

/// Scores `candidate` against the parsed query. Lower is better.
///
/// Sum of the artist and title edit distances, minus one for each field whose
/// normalized form matches exactly.
pub fn score(candidate: &CandidateTrack, artist: &str, title: &str) -> i64 {
    let candidate_artist = candidate.primary_artist();

    let mut total = distance(artist, candidate_artist) + distance(title, &candidate.name);

    if !artist.is_empty() && normalize(candidate_artist) == normalize(artist) {
        total += EQUALITY_BONUS;
    }
    if !title.is_empty() && normalize(&candidate.name) == normalize(title) {
        total += EQUALITY_BONUS;
    }

    total
}

/// Returns the lowest-scoring candidate; ties go to the earlier search result.
pub fn pick_best(
    candidates: &[CandidateTrack],
    artist: &str,
    title: &str,
) -> Option<ScoredCandidate> {
    let mut best: Option<ScoredCandidate> = None;

    for candidate in candidates {
        let candidate_score = score(candidate, artist, title);
        match &best {
            Some(current) if current.score <= candidate_score => {}
            _ => {
                best = Some(ScoredCandidate {
                    candidate: candidate.clone(),
                    score: candidate_score,
                })
            }
        }
    }

    best
}
