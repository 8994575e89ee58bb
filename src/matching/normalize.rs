use once_cell::sync::Lazy;
use regex::Regex;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zа-яё0-9]").unwrap());
static DASHES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\-|[\x{2010}-\x{2015}\x{2212}]").unwrap());
static PARENTHESIZED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^)]*\)").unwrap());
static QUERY_NOISE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(feat|ft|live|version)\b").unwrap());
static TITLE_TAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(feat|ft|version|edit|remix|piano)\b.*$").unwrap());
static MULTI_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").unwrap());

/// Comparison key: lowercase, Latin/Cyrillic letters and digits only.
///
/// Never shown to the user.
pub fn normalize(s: &str) -> String {
    NON_WORD
        .replace_all(&s.to_lowercase(), "")
        .trim()
        .to_string()
}

/// Maps typographic dash variants (and an escaped `\-`) to an ASCII hyphen.
pub fn normalize_dash(s: &str) -> String {
    DASHES.replace_all(s, "-").into_owned()
}

/// Builds the text sent to remote search from a raw entry.
pub fn clean_query(s: &str) -> String {
    let dashed = normalize_dash(s);
    let without_parens = PARENTHESIZED.replace_all(&dashed, "");
    let without_noise = QUERY_NOISE.replace_all(&without_parens, "");
    MULTI_SPACE
        .replace_all(&without_noise, " ")
        .trim()
        .to_string()
}

/// Drops parenthesized parts and everything from a feat/version/edit/remix/piano
/// marker onward, so variants of the same title score close to each other.
pub fn clean_title(s: &str) -> String {
    let without_parens = PARENTHESIZED.replace_all(s, "");
    TITLE_TAIL
        .replace(&without_parens, "")
        .trim()
        .to_string()
}
