mod common;

use std::time::Duration;

use common::{MockCatalog, MockPlaylists, entries, track};
use trackport::{
    error::ImportError,
    import::{
        DEFAULT_DESCRIPTION, ImportOptions, ImportSession, ImportStatus, Importer,
        NOT_FOUND_REASON, ProgressEvent, SessionState, StopSignal,
    },
    matching::MatchOptions,
};

fn structured(artist: &str, title: &str) -> String {
    format!("artist:\"{}\" track:\"{}\"", artist, title)
}

fn options() -> ImportOptions {
    ImportOptions {
        entry_delay: Duration::ZERO,
        ..ImportOptions::default()
    }
}

/// Catalog knowing `"Artist {i} - Song {i}"` for every `i` in `range`.
fn numbered_catalog(range: std::ops::Range<usize>) -> MockCatalog {
    range.fold(MockCatalog::new(), |catalog, i| {
        catalog.with(
            &structured(&format!("Artist {}", i), &format!("Song {}", i)),
            vec![track(
                &format!("t{}", i),
                &format!("Artist {}", i),
                &format!("Song {}", i),
            )],
        )
    })
}

fn numbered_entries(range: std::ops::Range<usize>) -> Vec<String> {
    range.map(|i| format!("Artist {} - Song {}", i, i)).collect()
}

#[tokio::test]
async fn test_import_preserves_order_and_count() {
    let catalog = MockCatalog::new()
        .with(&structured("A1", "T1"), vec![track("1", "A1", "T1")])
        .with(&structured("A3", "T3"), vec![track("3", "A3", "T3")]);
    let playlists = MockPlaylists::new();
    let importer = Importer::new(&catalog, &playlists, options());

    let session = importer
        .run(
            entries(&["A1 - T1", "A2 - T2", "A3 - T3"]),
            "My import",
            &StopSignal::new(),
            |_| {},
        )
        .await
        .unwrap();

    assert_eq!(session.state, SessionState::Completed);
    assert_eq!(session.progress, 1.0);

    let statuses: Vec<ImportStatus> = session.records.iter().map(|r| r.status).collect();
    assert_eq!(statuses, vec![
        ImportStatus::Success,
        ImportStatus::Error,
        ImportStatus::Success
    ]);
    assert_eq!(session.records[1].entry, "A2 - T2");
    assert_eq!(
        session.records[1].error_reason.as_deref(),
        Some(NOT_FOUND_REASON)
    );

    assert_eq!(playlists.created(), vec![(
        "My import".to_string(),
        DEFAULT_DESCRIPTION.to_string(),
        false
    )]);
    assert_eq!(playlists.batches(), vec![vec![
        "spotify:track:1".to_string(),
        "spotify:track:3".to_string()
    ]]);

    let added: Vec<bool> = session.records.iter().map(|r| r.added).collect();
    assert_eq!(added, vec![true, false, true]);

    let summary = session.summary();
    assert_eq!(summary.exact, 2);
    assert_eq!(summary.errors, 1);
    assert_eq!(summary.added, 2);
    assert_eq!(summary.total, 3);
}

#[tokio::test]
async fn test_import_appends_in_batches_of_100() {
    let catalog = numbered_catalog(0..250);
    let playlists = MockPlaylists::new();
    let importer = Importer::new(&catalog, &playlists, ImportOptions {
        concurrency: 4,
        ..options()
    });

    let session = importer
        .run(numbered_entries(0..250), "Big", &StopSignal::new(), |_| {})
        .await
        .unwrap();

    let batches = playlists.batches();
    let sizes: Vec<usize> = batches.iter().map(|b| b.len()).collect();
    assert_eq!(sizes, vec![100, 100, 50]);

    let appended: Vec<String> = batches.into_iter().flatten().collect();
    let expected: Vec<String> = (0..250).map(|i| format!("spotify:track:t{}", i)).collect();
    assert_eq!(appended, expected);

    assert_eq!(session.batches.len(), 3);
    assert!(session.batches.iter().all(|b| b.error.is_none()));
    assert_eq!(session.summary().added, 250);
}

#[tokio::test]
async fn test_concurrency_is_clamped() {
    let catalog = numbered_catalog(0..10);
    let playlists = MockPlaylists::new();

    for concurrency in [0, 64] {
        let importer = Importer::new(&catalog, &playlists, ImportOptions {
            concurrency,
            ..options()
        });
        let session = importer
            .run(numbered_entries(0..10), "Clamp", &StopSignal::new(), |_| {})
            .await
            .unwrap();
        assert_eq!(session.summary().exact, 10);
    }
}

#[tokio::test]
async fn test_blank_name_is_rejected_without_remote_calls() {
    let catalog = MockCatalog::new();
    let playlists = MockPlaylists::new();
    let importer = Importer::new(&catalog, &playlists, options());

    let result = importer
        .run(entries(&["A - B"]), "   ", &StopSignal::new(), |_| {})
        .await;

    assert!(matches!(result, Err(ImportError::InvalidInput(_))));
    assert!(playlists.created().is_empty());
    assert!(catalog.calls().is_empty());
}

#[tokio::test]
async fn test_empty_entries_are_rejected() {
    let catalog = MockCatalog::new();
    let playlists = MockPlaylists::new();
    let importer = Importer::new(&catalog, &playlists, options());

    let result = importer.start(Vec::new(), "Empty").await;

    assert!(matches!(result, Err(ImportError::InvalidInput(_))));
    assert!(playlists.created().is_empty());
}

#[tokio::test]
async fn test_playlist_creation_failure_is_fatal() {
    let catalog = MockCatalog::new().with(&structured("A", "B"), vec![track("1", "A", "B")]);
    let playlists = MockPlaylists::failing_create();
    let importer = Importer::new(&catalog, &playlists, options());

    let result = importer
        .run(entries(&["A - B"]), "Doomed", &StopSignal::new(), |_| {})
        .await;

    assert!(matches!(
        result,
        Err(ImportError::PlaylistCreationFailed(_))
    ));
    assert!(catalog.calls().is_empty());
    assert!(playlists.batches().is_empty());
}

#[tokio::test]
async fn test_failed_batch_leaves_others_applied() {
    let catalog = numbered_catalog(0..150);
    let playlists = MockPlaylists::new().failing_batch(0);
    let importer = Importer::new(&catalog, &playlists, options());

    let session = importer
        .run(numbered_entries(0..150), "Partial", &StopSignal::new(), |_| {})
        .await
        .unwrap();

    assert_eq!(session.state, SessionState::Completed);
    assert_eq!(session.batches.len(), 2);
    assert!(session.batches[0].error.is_some());
    assert!(session.batches[1].error.is_none());
    assert_eq!(session.batches[1].size, 50);

    assert!(!session.records[0].added);
    assert!(session.records[149].added);

    // Resolution results are untouched by the write failure.
    let summary = session.summary();
    assert_eq!(summary.exact, 150);
    assert_eq!(summary.added, 50);
}

#[tokio::test]
async fn test_search_failure_only_affects_its_entry() {
    let catalog = MockCatalog::new()
        .failing_on(&structured("A1", "T1"))
        .with(&structured("A2", "T2"), vec![track("2", "A2", "T2")]);
    let playlists = MockPlaylists::new();
    let importer = Importer::new(&catalog, &playlists, options());

    let session = importer
        .run(
            entries(&["A1 - T1", "A2 - T2"]),
            "Flaky",
            &StopSignal::new(),
            |_| {},
        )
        .await
        .unwrap();

    let failed = &session.records[0];
    assert_eq!(failed.status, ImportStatus::Error);
    assert!(
        failed
            .error_reason
            .as_deref()
            .unwrap()
            .starts_with("search failed")
    );
    assert_eq!(session.records[1].status, ImportStatus::Success);
    assert_eq!(playlists.batches(), vec![vec!["spotify:track:2".to_string()]]);
}

#[tokio::test]
async fn test_similar_and_exact_only() {
    let catalog = MockCatalog::new().with("Imagine Dragons - Believer", vec![track(
        "thunder",
        "Imagine Dragons",
        "Thunder",
    )]);
    let playlists = MockPlaylists::new();

    let importer = Importer::new(&catalog, &playlists, options());
    let session = importer
        .run(
            entries(&["Imagine Dragons - Believer"]),
            "Similar",
            &StopSignal::new(),
            |_| {},
        )
        .await
        .unwrap();
    let record = &session.records[0];
    assert_eq!(record.status, ImportStatus::Similar);
    assert_eq!(
        record.found_instead.as_deref(),
        Some("Imagine Dragons - Thunder")
    );
    assert!(record.added);

    let importer = Importer::new(&catalog, &playlists, ImportOptions {
        matching: MatchOptions {
            find_similar: false,
            ..MatchOptions::default()
        },
        ..options()
    });
    let session = importer
        .run(
            entries(&["Imagine Dragons - Believer"]),
            "Exact only",
            &StopSignal::new(),
            |_| {},
        )
        .await
        .unwrap();
    assert_eq!(session.records[0].status, ImportStatus::Error);
    assert!(!session.records[0].added);
    assert!(session.batches.is_empty());
}

#[tokio::test]
async fn test_cancellation_keeps_resolved_tracks() {
    let catalog = numbered_catalog(0..5);
    let playlists = MockPlaylists::new();
    let importer = Importer::new(&catalog, &playlists, options());
    let stop = StopSignal::new();

    let session = importer
        .run(numbered_entries(0..5), "Stopped", &stop, |event| {
            if let ProgressEvent::Resolved { index: 1, .. } = event {
                stop.stop();
            }
        })
        .await
        .unwrap();

    assert_eq!(session.state, SessionState::Cancelled);
    assert_eq!(session.progress, 0.4);

    let summary = session.summary();
    assert_eq!(summary.exact, 2);
    assert_eq!(summary.not_attempted, 3);
    assert_eq!(summary.added, 2);
    assert!(
        session.records[2..]
            .iter()
            .all(|r| r.status == ImportStatus::Pending)
    );

    assert_eq!(playlists.batches(), vec![vec![
        "spotify:track:t0".to_string(),
        "spotify:track:t1".to_string()
    ]]);
}

#[tokio::test]
async fn test_stop_before_processing() {
    let catalog = numbered_catalog(0..3);
    let playlists = MockPlaylists::new();
    let importer = Importer::new(&catalog, &playlists, options());
    let stop = StopSignal::new();
    stop.stop();

    let session = importer
        .run(numbered_entries(0..3), "Never", &stop, |_| {})
        .await
        .unwrap();

    assert_eq!(session.state, SessionState::Cancelled);
    assert_eq!(session.summary().not_attempted, 3);
    assert!(catalog.calls().is_empty());
    assert!(playlists.batches().is_empty());
}

#[tokio::test]
async fn test_nothing_resolved_still_completes() {
    let catalog = MockCatalog::new();
    let playlists = MockPlaylists::new();
    let importer = Importer::new(&catalog, &playlists, options());

    let session = importer
        .run(
            entries(&["Nobody - Nothing", "Noone - Never"]),
            "Empty result",
            &StopSignal::new(),
            |_| {},
        )
        .await
        .unwrap();

    assert_eq!(session.state, SessionState::Completed);
    assert_eq!(session.summary().errors, 2);
    assert!(session.batches.is_empty());
    assert!(playlists.batches().is_empty());
    assert_eq!(playlists.created().len(), 1);
}

#[tokio::test]
async fn test_progress_events() {
    let catalog = numbered_catalog(0..2);
    let playlists = MockPlaylists::new();
    let importer = Importer::new(&catalog, &playlists, options());
    let mut events = Vec::new();

    importer
        .run(numbered_entries(0..2), "Events", &StopSignal::new(), |event| {
            events.push(event.clone())
        })
        .await
        .unwrap();

    assert_eq!(events, vec![
        ProgressEvent::Started { total: 2 },
        ProgressEvent::Processing {
            index: 0,
            entry: "Artist 0 - Song 0".to_string(),
        },
        ProgressEvent::Resolved {
            index: 0,
            status: ImportStatus::Success,
            progress: 0.5,
        },
        ProgressEvent::Processing {
            index: 1,
            entry: "Artist 1 - Song 1".to_string(),
        },
        ProgressEvent::Resolved {
            index: 1,
            status: ImportStatus::Success,
            progress: 1.0,
        },
        ProgressEvent::Appended { batch: 0, size: 2 },
        ProgressEvent::Finished {
            state: SessionState::Completed,
        },
    ]);
}

#[tokio::test]
async fn test_process_requires_running_session() {
    let catalog = MockCatalog::new();
    let playlists = MockPlaylists::new();
    let importer = Importer::new(&catalog, &playlists, options());
    let mut session = ImportSession::new(entries(&["A - B"]));

    let result = importer
        .process(&mut session, &StopSignal::new(), |_| {})
        .await;

    assert!(matches!(result, Err(ImportError::InvalidInput(_))));
    assert_eq!(session.state, SessionState::Idle);
    assert!(catalog.calls().is_empty());
}
