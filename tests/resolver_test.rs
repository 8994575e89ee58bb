mod common;

use common::{MockCatalog, track};
use trackport::matching::{MatchOptions, PreparedQuery, Resolver, Step, Tier};

const ENTRY: &str = "Imagine Dragons - Believer";
const STRUCTURED: &str = "artist:\"Imagine Dragons\" track:\"Believer\"";
const BROAD_ARTIST: &str = "artist:\"Imagine Dragons\"";

fn exact_only() -> MatchOptions {
    MatchOptions {
        find_similar: false,
        ..MatchOptions::default()
    }
}

#[tokio::test]
async fn test_structured_tier_exact_match() {
    let catalog = MockCatalog::new().with(STRUCTURED, vec![
        track("other", "Imagine Dragons", "Thunder"),
        track("hit", "Imagine Dragons", "Believer (Remastered 2020)"),
    ]);
    let resolver = Resolver::new(&catalog, MatchOptions::default());

    let found = resolver.resolve(ENTRY).await.unwrap();
    assert_eq!(found.id, "hit");
    assert_eq!(found.uri, "spotify:track:hit");
    assert!(found.is_exact);
    assert_eq!(catalog.calls(), vec![STRUCTURED]);
}

#[tokio::test]
async fn test_typographic_dash_entry_uses_structured_query() {
    let catalog =
        MockCatalog::new().with(STRUCTURED, vec![track("hit", "Imagine Dragons", "Believer")]);
    let resolver = Resolver::new(&catalog, MatchOptions::default());

    let found = resolver.resolve("Imagine Dragons — Believer").await.unwrap();
    assert_eq!(found.id, "hit");
    assert_eq!(catalog.calls(), vec![STRUCTURED]);
}

#[tokio::test]
async fn test_full_query_tier_after_inexact_structured() {
    let catalog = MockCatalog::new()
        .with(STRUCTURED, vec![track("cover", "Some Cover Band", "Believer")])
        .with(ENTRY, vec![track("hit", "Imagine Dragons", "Believer")]);
    let resolver = Resolver::new(&catalog, MatchOptions::default());

    let found = resolver.resolve(ENTRY).await.unwrap();
    assert_eq!(found.id, "hit");
    assert!(found.is_exact);
    assert_eq!(catalog.calls(), vec![STRUCTURED, ENTRY]);
}

#[tokio::test]
async fn test_full_query_tier_returns_similar() {
    let catalog =
        MockCatalog::new().with(ENTRY, vec![track("thunder", "Imagine Dragons", "Thunder")]);
    let resolver = Resolver::new(&catalog, MatchOptions::default());

    let found = resolver.resolve(ENTRY).await.unwrap();
    assert_eq!(found.id, "thunder");
    assert!(!found.is_exact);
    assert_eq!(found.display_name(), "Imagine Dragons - Thunder");
    assert_eq!(catalog.calls(), vec![STRUCTURED, ENTRY]);
}

#[tokio::test]
async fn test_exact_only_never_returns_similar() {
    let catalog = MockCatalog::new()
        .with(ENTRY, vec![track("thunder", "Imagine Dragons", "Thunder")])
        .with("Believer", vec![track("any", "Somebody", "Believer")])
        .with(BROAD_ARTIST, vec![track("radioactive", "Imagine Dragons", "Radioactive")]);
    let resolver = Resolver::new(&catalog, exact_only());

    assert!(resolver.resolve(ENTRY).await.is_none());

    // Broad tiers are skipped entirely.
    assert_eq!(catalog.calls(), vec![STRUCTURED, ENTRY]);
}

#[tokio::test]
async fn test_broad_title_tier() {
    let catalog = MockCatalog::new().with("Believer", vec![
        track("first", "Somebody", "Believer"),
        track("second", "Imagine Dragons", "Believer"),
    ]);
    let resolver = Resolver::new(&catalog, MatchOptions::default());

    let found = resolver.resolve(ENTRY).await.unwrap();
    assert_eq!(found.id, "first");
    assert!(!found.is_exact);
    assert_eq!(catalog.calls(), vec![STRUCTURED, ENTRY, "Believer"]);
}

#[tokio::test]
async fn test_broad_artist_tier() {
    let catalog = MockCatalog::new().with(BROAD_ARTIST, vec![track(
        "radioactive",
        "Imagine Dragons",
        "Radioactive",
    )]);
    let resolver = Resolver::new(&catalog, MatchOptions::default());

    let found = resolver.resolve(ENTRY).await.unwrap();
    assert_eq!(found.id, "radioactive");
    assert!(!found.is_exact);
    assert_eq!(catalog.calls(), vec![
        STRUCTURED,
        ENTRY,
        "Believer",
        BROAD_ARTIST
    ]);
}

#[tokio::test]
async fn test_title_only_entry_is_never_exact() {
    let catalog =
        MockCatalog::new().with("Believer", vec![track("hit", "Imagine Dragons", "Believer")]);
    let resolver = Resolver::new(&catalog, MatchOptions::default());

    let found = resolver.resolve("Believer").await.unwrap();
    assert_eq!(found.id, "hit");
    assert!(!found.is_exact);

    // No artist: the structured tier is skipped.
    assert_eq!(catalog.calls(), vec!["Believer"]);
}

#[tokio::test]
async fn test_nothing_found() {
    let catalog = MockCatalog::new();
    let resolver = Resolver::new(&catalog, MatchOptions::default());

    assert!(resolver.resolve(ENTRY).await.is_none());
    assert_eq!(catalog.calls().len(), 4);
}

#[tokio::test]
async fn test_blank_entry_makes_no_calls() {
    let catalog = MockCatalog::new();
    let resolver = Resolver::new(&catalog, MatchOptions::default());

    assert!(resolver.resolve("   ").await.is_none());
    assert!(resolver.resolve("(Live)").await.is_none());
    assert!(catalog.calls().is_empty());
}

#[tokio::test]
async fn test_transport_failure() {
    let catalog = MockCatalog::new()
        .failing_on(STRUCTURED)
        .with(ENTRY, vec![track("hit", "Imagine Dragons", "Believer")]);
    let resolver = Resolver::new(&catalog, MatchOptions::default());

    assert!(resolver.resolve(ENTRY).await.is_none());
    assert!(resolver.try_resolve(ENTRY).await.is_err());

    // A failing tier ends resolution of the entry.
    assert_eq!(catalog.calls(), vec![STRUCTURED, STRUCTURED]);
}

#[tokio::test]
async fn test_resolve_is_repeatable() {
    let catalog = MockCatalog::new().with(ENTRY, vec![
        track("thunder", "Imagine Dragons", "Thunder"),
        track("demons", "Imagine Dragons", "Demons"),
    ]);
    let resolver = Resolver::new(&catalog, MatchOptions::default());

    let first = resolver.resolve(ENTRY).await;
    let second = resolver.resolve(ENTRY).await;
    assert!(first.is_some());
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_tier_transitions() {
    let catalog = MockCatalog::new();
    let resolver = Resolver::new(&catalog, MatchOptions::default());

    let full = PreparedQuery::from_raw(ENTRY);
    assert_eq!(full.parsed.artist, "Imagine Dragons");
    assert_eq!(resolver.first_tier(&full), Some(Tier::Structured));
    assert_eq!(
        resolver.step(Tier::Structured, &full).await.unwrap(),
        Step::Next(Some(Tier::FullQuery))
    );
    assert_eq!(
        resolver.step(Tier::FullQuery, &full).await.unwrap(),
        Step::Next(Some(Tier::BroadTitle))
    );
    assert_eq!(
        resolver.step(Tier::BroadTitle, &full).await.unwrap(),
        Step::Next(Some(Tier::BroadArtist))
    );
    assert_eq!(
        resolver.step(Tier::BroadArtist, &full).await.unwrap(),
        Step::Next(None)
    );

    let title_only = PreparedQuery::from_raw("Believer");
    assert_eq!(resolver.first_tier(&title_only), Some(Tier::FullQuery));
    assert_eq!(
        resolver.step(Tier::BroadTitle, &title_only).await.unwrap(),
        Step::Next(None)
    );

    let blank = PreparedQuery::from_raw("  ");
    assert_eq!(resolver.first_tier(&blank), None);
}
