mod scenarii;

use wall_planner::editor::SubmitOutcome;
use wall_planner::event::{Event, Title};
use wall_planner::localization::Language;
use wall_planner::store::{EventStore, StoreError};
use wall_planner::{AdminEditor, MemoryStore, TimelinePresenter};

/// Create an event through the form, reload it for editing, submit it
/// unchanged: the stored record must come back identical, field for
/// field.
#[tokio::test]
async fn round_trip_edit_loses_no_field() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut original = scenarii::plain_record("2025-10-01", "10:00", "11:30", "Opening");
    original.moderator = "Ada Lovelace".to_string();
    original.speakers = "Grace Hopper, Edsger Dijkstra".to_string();
    original.published = false;

    let mut editor = AdminEditor::new(MemoryStore::new());
    editor.open_for_create();
    *editor.draft_mut().unwrap() = wall_planner::editor::EventDraft::from_record(&original);
    let id = match editor.submit().await.unwrap() {
        SubmitOutcome::Created { id, .. } => id,
        other => panic!("Expected Created, got {:?}", other),
    };

    // Load for edit, submit unchanged
    let collection = scenarii::stored_collection(editor.store()).await;
    let event = Event::new(id.clone(), collection.get(&id).unwrap().clone());
    editor.open_for_edit(&event);
    assert_eq!(editor.submit().await.unwrap(), SubmitOutcome::Updated);

    let collection = scenarii::stored_collection(editor.store()).await;
    assert_eq!(collection.get(&id).unwrap(), &original);
}

/// The same round trip with a multilingual title: the localized shape
/// must survive both writes without being coerced to a plain string.
#[tokio::test]
async fn round_trip_edit_keeps_the_localized_title_shape() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut original = scenarii::plain_record("2025-10-02", "14:00", "15:00", "");
    original.title = scenarii::localized_title("Opening", "Ouverture", "Abertura");

    let store = MemoryStore::new();
    let id = store.create(original.clone()).await.unwrap();

    let mut editor = AdminEditor::new(store);
    let collection = scenarii::stored_collection(editor.store()).await;
    editor.open_for_edit(&Event::new(id.clone(), collection.get(&id).unwrap().clone()));
    assert_eq!(editor.submit().await.unwrap(), SubmitOutcome::Updated);

    let collection = scenarii::stored_collection(editor.store()).await;
    assert_eq!(collection.get(&id).unwrap(), &original);
}

/// Duplicating keeps every field except the title markers, the forced
/// draft status and the id.
#[tokio::test]
async fn duplicating_an_event_follows_the_copy_rules() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut source = scenarii::plain_record("2025-10-01", "09:00", "10:00", "");
    source.title = scenarii::localized_title("Keynote", "Discours", "Discurso");
    source.moderator = "Ada".to_string();
    source.speakers = "Grace".to_string();

    let source_id: wall_planner::EventId = "source".into();
    let store = scenarii::seeded_store(vec![("source", source.clone())]);
    let mut editor = AdminEditor::new(store);

    let collection = scenarii::stored_collection(editor.store()).await;
    let event = Event::new(source_id.clone(), collection.get(&source_id).unwrap().clone());
    editor.duplicate(&event);
    let copy_id = match editor.submit().await.unwrap() {
        SubmitOutcome::Created { id, published } => {
            assert!(!published);
            id
        }
        other => panic!("Expected Created, got {:?}", other),
    };
    assert_ne!(copy_id, source_id);

    let collection = scenarii::stored_collection(editor.store()).await;
    // The source is untouched
    assert_eq!(collection.get(&source_id).unwrap(), &source);

    let copy = collection.get(&copy_id).unwrap();
    assert_eq!(
        copy.title,
        scenarii::localized_title("Keynote (copy)", "Discours (copie)", "Discurso (cópia)")
    );
    assert_eq!(copy.published, false);
    assert_eq!(copy.date, source.date);
    assert_eq!(copy.start_time, source.start_time);
    assert_eq!(copy.end_time, source.end_time);
    assert_eq!(copy.moderator, source.moderator);
    assert_eq!(copy.speakers, source.speakers);
    assert_eq!(copy.kind, source.kind);
}

/// The admin listing and the public timeline observe the same store
/// concurrently: the admin sees drafts, the public does not, and both
/// follow publish toggles live.
#[tokio::test]
async fn admin_and_public_views_watch_the_same_collection() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut rehearsal = scenarii::plain_record("2025-10-01", "08:00", "08:30", "Rehearsal");
    rehearsal.published = false;
    let store = scenarii::seeded_store(vec![
        ("opening", scenarii::plain_record("2025-10-01", "09:00", "10:00", "Opening")),
        ("rehearsal", rehearsal),
    ]);

    let mut presenter = TimelinePresenter::open(&store, Language::En).await.unwrap();
    let editor = AdminEditor::new(store);

    let collection = scenarii::stored_collection(editor.store()).await;
    assert_eq!(editor.list(&collection).len(), 2);

    let rendered = presenter.render();
    assert!(rendered.contains("Opening"));
    assert!(!rendered.contains("Rehearsal"));

    // Publishing the rehearsal reaches the public view with the next
    // snapshot
    editor
        .toggle_published(&"rehearsal".into(), false)
        .await
        .unwrap();
    let rendered = presenter.refreshed().await.unwrap();
    assert!(rendered.contains("Rehearsal"));

    // And hiding the opening removes it
    editor
        .toggle_published(&"opening".into(), true)
        .await
        .unwrap();
    let rendered = presenter.refreshed().await.unwrap();
    assert!(!rendered.contains("Opening"));
}

/// An event deleted while its form is open: the submit reports the
/// vanished target, nothing is resurrected, and the next snapshot agrees.
#[tokio::test]
async fn a_concurrent_deletion_does_not_resurrect_the_event() {
    let _ = env_logger::builder().is_test(true).try_init();

    let doomed_id: wall_planner::EventId = "doomed".into();
    let store = scenarii::seeded_store(vec![(
        "doomed",
        scenarii::plain_record("2025-10-01", "09:00", "10:00", "Doomed"),
    )]);
    let mut editor = AdminEditor::new(store);

    let collection = scenarii::stored_collection(editor.store()).await;
    let event = Event::new(doomed_id.clone(), collection.get(&doomed_id).unwrap().clone());
    editor.open_for_edit(&event);
    editor.draft_mut().unwrap().title = Title::Plain("Renamed".to_string());

    // Another admin deletes it first
    editor.store().delete(&doomed_id).await.unwrap();

    assert_eq!(
        editor.submit().await.unwrap(),
        SubmitOutcome::TargetVanished
    );
    assert!(scenarii::stored_collection(editor.store()).await.is_empty());

    // Deleting again is still fine, deletion is idempotent
    editor.delete(&doomed_id).await.unwrap();
}

/// Dropping the store tears the subscription down: the presenter's next
/// wait reports the store as unavailable instead of hanging.
#[tokio::test]
async fn a_torn_down_store_surfaces_as_unavailable() {
    let _ = env_logger::builder().is_test(true).try_init();

    let store = MemoryStore::new();
    let mut subscription = store.subscribe().await.unwrap();

    drop(store);

    match subscription.changed().await {
        Err(StoreError::Unavailable(_)) => (),
        other => panic!("Expected Unavailable, got {:?}", other),
    }
}

/// Dropping a view releases its subscription without disturbing the
/// store or the other subscribers.
#[tokio::test]
async fn dropping_a_view_releases_its_subscription() {
    let _ = env_logger::builder().is_test(true).try_init();

    let store = MemoryStore::new();
    let presenter = TimelinePresenter::open(&store, Language::Fr).await.unwrap();
    let mut remaining = store.subscribe().await.unwrap();

    drop(presenter);

    let id = store
        .create(scenarii::plain_record("2025-10-01", "09:00", "10:00", "Opening"))
        .await
        .unwrap();
    let snapshot = remaining.changed().await.unwrap();
    assert!(snapshot.contains_key(&id));
}

/// Legacy wire records (missing `published`, string `"false"`, plain
/// titles) flow through the same pipeline unharmed.
#[tokio::test]
async fn legacy_wire_records_are_projected_faithfully() {
    let _ = env_logger::builder().is_test(true).try_init();

    let wire = serde_json::json!({
        "legacy": {
            "date": "2025-10-01", "startTime": "09:00", "endTime": "10:00",
            "title": "Ancienne session",
        },
        "odd": {
            "date": "2025-10-01", "startTime": "11:00", "endTime": "12:00",
            "title": {"en": "Panel", "fr": "Table ronde", "pt": "Painel"},
            "published": "false",
        },
        "draft": {
            "date": "2025-10-01", "startTime": "14:00", "endTime": "15:00",
            "title": "Brouillon", "published": false,
        },
    });
    let events = serde_json::from_value(wire).unwrap();
    let store = MemoryStore::with_initial(events);

    let presenter = TimelinePresenter::open(&store, Language::Fr).await.unwrap();
    let rendered = presenter.render();

    // Absent and string-typed `published` both count as published; only
    // the literal boolean false is a draft
    assert!(rendered.contains("Ancienne session"));
    assert!(rendered.contains("Table ronde"));
    assert!(!rendered.contains("Brouillon"));
}

#[cfg(feature = "memory_store_mocks_remote_store")]
mod store_failures {
    use super::*;
    use std::sync::{Arc, Mutex};
    use wall_planner::editor::EditorState;
    use wall_planner::mock_behaviour::MockBehaviour;

    /// A failed create abandons nothing: the draft stays open and the
    /// resubmission goes through once the store recovers.
    #[tokio::test]
    async fn a_failed_write_keeps_the_draft_for_resubmission() {
        let _ = env_logger::builder().is_test(true).try_init();

        let mut store = MemoryStore::new();
        let behaviour = Arc::new(Mutex::new(MockBehaviour {
            create_behaviour: (0, 1),
            ..MockBehaviour::default()
        }));
        store.set_mock_behaviour(Some(behaviour));

        let mut editor = AdminEditor::new(store);
        editor.open_for_create();
        editor.draft_mut().unwrap().title = Title::Plain("Opening".to_string());

        match editor.submit().await {
            Err(wall_planner::editor::EditorError::Store(StoreError::WriteFailed(_))) => (),
            other => panic!("Expected a write failure, got {:?}", other),
        }
        assert!(matches!(editor.state(), EditorState::Editing { .. }));

        // The store is back, the kept draft submits fine
        match editor.submit().await.unwrap() {
            SubmitOutcome::Created { .. } => (),
            other => panic!("Expected Created, got {:?}", other),
        }
    }

    /// A subscription that cannot establish surfaces as Unavailable, and
    /// the public presenter reports it instead of rendering.
    #[tokio::test]
    async fn an_unreachable_store_blocks_the_public_view() {
        let _ = env_logger::builder().is_test(true).try_init();

        let mut store = MemoryStore::new();
        store.set_mock_behaviour(Some(Arc::new(Mutex::new(MockBehaviour::fail_now(1)))));

        match TimelinePresenter::open(&store, Language::En).await {
            Err(StoreError::Unavailable(_)) => (),
            Ok(_) => panic!("Expected the subscription to fail"),
            Err(other) => panic!("Expected Unavailable, got {:?}", other),
        }

        // The embedder keeps showing the loading state and may retry later
        assert_eq!(
            TimelinePresenter::loading_message(Language::En),
            "Loading timeline..."
        );
        assert!(TimelinePresenter::open(&store, Language::En).await.is_ok());
    }
}
