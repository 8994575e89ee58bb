use once_cell::sync::Lazy;
use regex::Regex;

static ARTIST_DELIMITER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+-\s+").unwrap());

/// Artist/title pair parsed out of a cleaned query.
///
/// An empty `artist` means the whole query is treated as a title.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedQuery {
    pub artist: String,
    pub title: String,
}

/// Splits `"Artist - Title"` on the first spaced hyphen.
///
/// Later delimiters stay in the title, so `"A - B - C"` parses as artist `A`,
/// title `B - C`. Without a delimiter the whole input becomes the title.
pub fn split_artist_track(query: &str) -> ParsedQuery {
    let parts: Vec<&str> = ARTIST_DELIMITER.split(query).collect();
    if parts.len() >= 2 {
        return ParsedQuery {
            artist: parts[0].trim().to_string(),
            title: parts[1..].join(" - ").trim().to_string(),
        };
    }

    ParsedQuery {
        artist: String::new(),
        title: query.to_string(),
    }
}
