//! # Track Matching
//!
//! Turns free-text entries such as `"Imagine Dragons - Believer"` into catalog
//! tracks.
//!
//! ```text
//! raw entry
//!    ↓  normalize::clean_query
//! search text
//!    ↓  parser::split_artist_track
//! artist / title
//!    ↓  resolver::Resolver (tiers: Structured → FullQuery → BroadTitle → BroadArtist)
//! candidates ── scorer::pick_best ──→ MatchResult { is_exact }
//! ```
//!
//! Scores are edit distances over [`normalize::normalize`]d strings, so lower
//! is better. A candidate is exact when its score does not exceed the
//! configured threshold ([`DEFAULT_EXACT_THRESHOLD`] unless overridden).

pub mod normalize;
pub mod parser;
pub mod resolver;
pub mod scorer;

pub use normalize::{clean_query, clean_title, normalize, normalize_dash};
pub use parser::{ParsedQuery, split_artist_track};
pub use resolver::{MatchOptions, MatchResult, PreparedQuery, Resolver, Step, Tier};
pub use scorer::{DEFAULT_EXACT_THRESHOLD, MISSING_FIELD_PENALTY, ScoredCandidate, pick_best, score};
