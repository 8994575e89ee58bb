use super::{
    normalize::clean_query,
    parser::{ParsedQuery, split_artist_track},
    scorer::{DEFAULT_EXACT_THRESHOLD, pick_best},
};
use crate::{
    catalog::{CatalogError, CatalogSearch},
    types::{CandidateTrack, TrackArtist},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    /// Accept best-effort matches when no exact one exists.
    pub find_similar: bool,
    /// Highest score that still counts as exact.
    pub exact_threshold: i64,
    /// Candidates requested per search call.
    pub search_limit: u32,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            find_similar: true,
            exact_threshold: DEFAULT_EXACT_THRESHOLD,
            search_limit: 10,
        }
    }
}

/// Catalog track chosen for an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub id: String,
    pub name: String,
    pub artists: Vec<TrackArtist>,
    pub uri: String,
    pub is_exact: bool,
}

impl MatchResult {
    fn from_candidate(candidate: CandidateTrack, is_exact: bool) -> Self {
        Self {
            id: candidate.id,
            name: candidate.name,
            artists: candidate.artists,
            uri: candidate.uri,
            is_exact,
        }
    }

    /// `"<primary artist> - <title>"`, as shown for similar matches.
    pub fn display_name(&self) -> String {
        let artist = self.artists.first().map(|a| a.name.as_str()).unwrap_or("");
        format!("{} - {}", artist, self.name)
    }
}

/// Search tiers, tried in order until one yields a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// `artist:"…" track:"…"`, accepted only when exact.
    Structured,
    /// The whole cleaned query.
    FullQuery,
    /// Title alone; first hit, never exact.
    BroadTitle,
    /// `artist:"…"` alone; first hit, never exact.
    BroadArtist,
}

/// Outcome of running a single tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Found(MatchResult),
    /// Move on to the given tier, or give up on `None`.
    Next(Option<Tier>),
}

/// A raw entry prepared for searching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedQuery {
    pub query: String,
    pub parsed: ParsedQuery,
}

impl PreparedQuery {
    pub fn from_raw(raw: &str) -> Self {
        let query = clean_query(raw);
        let parsed = split_artist_track(&query);
        Self { query, parsed }
    }

    fn has_artist(&self) -> bool {
        !self.parsed.artist.is_empty()
    }

    fn has_title(&self) -> bool {
        !self.parsed.title.is_empty()
    }
}

/// Resolves free-text entries to catalog tracks.
pub struct Resolver<'a> {
    catalog: &'a dyn CatalogSearch,
    options: MatchOptions,
}

impl<'a> Resolver<'a> {
    pub fn new(catalog: &'a dyn CatalogSearch, options: MatchOptions) -> Self {
        Self { catalog, options }
    }

    /// Resolves `raw`, treating any catalog failure as "no match".
    pub async fn resolve(&self, raw: &str) -> Option<MatchResult> {
        self.try_resolve(raw).await.ok().flatten()
    }

    /// Resolves `raw`, reporting catalog failures to the caller.
    ///
    /// A failure in any tier ends resolution of this entry.
    pub async fn try_resolve(&self, raw: &str) -> Result<Option<MatchResult>, CatalogError> {
        let prepared = PreparedQuery::from_raw(raw);
        let mut tier = self.first_tier(&prepared);

        while let Some(current) = tier {
            match self.step(current, &prepared).await? {
                Step::Found(result) => return Ok(Some(result)),
                Step::Next(next) => tier = next,
            }
        }

        Ok(None)
    }

    pub fn first_tier(&self, prepared: &PreparedQuery) -> Option<Tier> {
        if prepared.query.is_empty() {
            None
        } else if prepared.has_artist() && prepared.has_title() {
            Some(Tier::Structured)
        } else {
            Some(Tier::FullQuery)
        }
    }

    fn first_broad_tier(&self, prepared: &PreparedQuery) -> Option<Tier> {
        if !self.options.find_similar {
            None
        } else if prepared.has_title() {
            Some(Tier::BroadTitle)
        } else if prepared.has_artist() {
            Some(Tier::BroadArtist)
        } else {
            None
        }
    }

    /// Runs one tier against the catalog.
    pub async fn step(&self, tier: Tier, prepared: &PreparedQuery) -> Result<Step, CatalogError> {
        let ParsedQuery { artist, title } = &prepared.parsed;
        let limit = self.options.search_limit;
        let threshold = self.options.exact_threshold;

        let step = match tier {
            Tier::Structured => {
                let query = format!("artist:\"{}\" track:\"{}\"", artist, title);
                let candidates = self.catalog.search(&query, limit).await?;
                match pick_best(&candidates, artist, title) {
                    Some(best) if best.is_exact(threshold) => {
                        Step::Found(MatchResult::from_candidate(best.candidate, true))
                    }
                    _ => Step::Next(Some(Tier::FullQuery)),
                }
            }
            Tier::FullQuery => {
                let candidates = self.catalog.search(&prepared.query, limit).await?;
                match pick_best(&candidates, artist, title) {
                    Some(best) if best.is_exact(threshold) => {
                        Step::Found(MatchResult::from_candidate(best.candidate, true))
                    }
                    Some(best) if self.options.find_similar => {
                        Step::Found(MatchResult::from_candidate(best.candidate, false))
                    }
                    _ => Step::Next(self.first_broad_tier(prepared)),
                }
            }
            Tier::BroadTitle => {
                let candidates = self.catalog.search(title, limit).await?;
                match candidates.into_iter().next() {
                    Some(first) => Step::Found(MatchResult::from_candidate(first, false)),
                    None if prepared.has_artist() => Step::Next(Some(Tier::BroadArtist)),
                    None => Step::Next(None),
                }
            }
            Tier::BroadArtist => {
                let query = format!("artist:\"{}\"", artist);
                let candidates = self.catalog.search(&query, limit).await?;
                match candidates.into_iter().next() {
                    Some(first) => Step::Found(MatchResult::from_candidate(first, false)),
                    None => Step::Next(None),
                }
            }
        };

        Ok(step)
    }
}
