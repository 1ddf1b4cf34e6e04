//! End-to-end walk through the public API against a file-backed store.

use encargado::{
    query, report, validate, DocumentStore, LogType, Outcome, SequenceEnvironment, Storage,
    Tracker,
};

fn open(path: &std::path::Path, env: SequenceEnvironment) -> Tracker<SequenceEnvironment> {
    let store = DocumentStore::new(Storage::open(path).unwrap(), "encargado_app_data");
    Tracker::with_environment(store, env).unwrap()
}

#[test]
fn test_warehouse_scenario_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("encargado.db");

    let mut tracker = open(&path, SequenceEnvironment::new("id", 1_000));

    let zone = tracker.add_zone("Warehouse").unwrap();
    let event = tracker.add_event(&zone.id, "Leak", Vec::new()).unwrap();
    assert_eq!(tracker.pending_count(&zone.id), 1);

    let outcome = tracker.toggle_event_complete(&event.id).unwrap();
    assert!(matches!(outcome, Outcome::EventToggled(ref e) if e.is_completed));
    assert_eq!(tracker.pending_count(&zone.id), 0);

    tracker.delete_zone(&zone.id).unwrap();
    let before = tracker.data().clone();
    drop(tracker);

    let tracker = open(&path, SequenceEnvironment::new("other", 0));
    let data = tracker.data();
    assert_eq!(data, &before);
    assert!(data.zones.is_empty());
    assert!(data.events.is_empty());

    let kinds: Vec<_> = data.admin_logs.iter().map(|l| l.kind).collect();
    assert_eq!(
        kinds,
        [
            LogType::ZoneDeleted,
            LogType::EventCompleted,
            LogType::EventCreated,
            LogType::ZoneCreated,
        ]
    );
    assert!(data
        .admin_logs
        .iter()
        .all(|l| l.zone_name.as_deref() == Some("Warehouse")));

    let lines: Vec<_> = data.admin_logs.iter().map(report::log_line).collect();
    assert!(lines[0].ends_with("Zone deleted: Warehouse"));
    assert!(lines[3].ends_with("New zone created: Warehouse"));
}

#[test]
fn test_not_found_is_not_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("encargado.db");

    let mut tracker = open(&path, SequenceEnvironment::new("id", 0));
    assert_eq!(
        tracker.toggle_event_complete("missing").unwrap(),
        Outcome::NotFound
    );
    assert_eq!(tracker.delete_event("missing").unwrap(), Outcome::NotFound);
    assert!(tracker.store().storage().read_slot("encargado_app_data").unwrap().is_none());
}

#[test]
fn test_password_change_through_validation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("encargado.db");
    let mut tracker = open(&path, SequenceEnvironment::new("id", 0));

    assert!(tracker.verify_admin_password("12345"));
    assert!(validate::new_password("ab", "ab", 4).is_err());
    assert!(validate::new_password("abcd", "abce", 4).is_err());

    validate::new_password("abcd", "abcd", 4).unwrap();
    tracker.update_admin_password("abcd").unwrap();
    drop(tracker);

    let tracker = open(&path, SequenceEnvironment::new("id", 0));
    assert!(tracker.verify_admin_password("abcd"));
    assert!(!tracker.verify_admin_password("12345"));
    assert!(tracker.data().admin_logs.is_empty());
}

#[test]
fn test_zone_summary_from_stored_events() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("encargado.db");
    let mut tracker = open(&path, SequenceEnvironment::new("id", 0));

    let zone = tracker.add_zone("Dock").unwrap();
    let first = tracker.add_event(&zone.id, "Broken lamp", Vec::new()).unwrap();
    tracker.add_event(&zone.id, "Loose cable", Vec::new()).unwrap();
    tracker.toggle_event_complete(&first.id).unwrap();

    let resolved = query::resolve_event(tracker.data(), &first.id).unwrap();
    assert!(resolved.is_completed);

    let events = tracker.zone_events(&zone.id);
    let text = report::zone_summary_text(&events, &zone.name);
    assert!(text.contains("Total: 2 | Pending: 1 | Completed: 1"));
    assert!(text.contains("*Pending:*\n1. Loose cable"));
    assert!(text.contains("*Completed:*\n1. Broken lamp"));

    let stats = query::admin_stats(tracker.data());
    assert_eq!((stats.zones, stats.pending, stats.completed), (1, 1, 1));
}
