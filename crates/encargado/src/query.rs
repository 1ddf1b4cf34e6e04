//! Read-only derivations over the document.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{AppData, Event, Zone};

/// All events of a zone in storage order, completed or not.
#[must_use]
pub fn zone_events<'a>(state: &'a AppData, zone_id: &str) -> Vec<&'a Event> {
    state.events.iter().filter(|e| e.zone_id == zone_id).collect()
}

/// Number of pending events in a zone.
#[must_use]
pub fn pending_count(state: &AppData, zone_id: &str) -> usize {
    state
        .events
        .iter()
        .filter(|e| e.zone_id == zone_id && e.is_pending())
        .count()
}

/// Exact comparison against the stored administrator password.
#[must_use]
pub fn verify_admin_password(state: &AppData, candidate: &str) -> bool {
    candidate == state.admin_password
}

/// A zone's events split into pending and completed, each in storage order.
///
/// The document itself is not reordered.
#[must_use]
pub fn split_by_status<'a>(
    state: &'a AppData,
    zone_id: &str,
) -> (Vec<&'a Event>, Vec<&'a Event>) {
    zone_events(state, zone_id)
        .into_iter()
        .partition(|e| e.is_pending())
}

/// Counts shown on the administrator dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdminStats {
    /// Number of zones.
    pub zones: usize,
    /// Number of pending events across all zones.
    pub pending: usize,
    /// Number of completed events across all zones.
    pub completed: usize,
    /// Number of admin log entries.
    pub log_entries: usize,
}

/// Compute dashboard counts.
#[must_use]
pub fn admin_stats(state: &AppData) -> AdminStats {
    let pending = state.events.iter().filter(|e| e.is_pending()).count();
    AdminStats {
        zones: state.zones.len(),
        pending,
        completed: state.events.len() - pending,
        log_entries: state.admin_logs.len(),
    }
}

/// Find a zone by full id or unique id prefix.
///
/// # Errors
///
/// Returns [`Error::ZoneNotFound`] if nothing matches and
/// [`Error::AmbiguousId`] if the prefix matches several zones.
pub fn resolve_zone<'a>(state: &'a AppData, id: &str) -> Result<&'a Zone> {
    if let Some(zone) = state.zone(id) {
        return Ok(zone);
    }
    let matches: Vec<_> = state
        .zones
        .iter()
        .filter(|z| !id.is_empty() && z.id.starts_with(id))
        .collect();
    match matches.as_slice() {
        [zone] => Ok(*zone),
        [] => Err(Error::ZoneNotFound(id.to_string())),
        many => Err(Error::AmbiguousId {
            prefix: id.to_string(),
            matches: many.len(),
        }),
    }
}

/// Find an event by full id or unique id prefix.
///
/// # Errors
///
/// Returns [`Error::EventNotFound`] if nothing matches and
/// [`Error::AmbiguousId`] if the prefix matches several events.
pub fn resolve_event<'a>(state: &'a AppData, id: &str) -> Result<&'a Event> {
    if let Some(event) = state.event(id) {
        return Ok(event);
    }
    let matches: Vec<_> = state
        .events
        .iter()
        .filter(|e| !id.is_empty() && e.id.starts_with(id))
        .collect();
    match matches.as_slice() {
        [event] => Ok(*event),
        [] => Err(Error::EventNotFound(id.to_string())),
        many => Err(Error::AmbiguousId {
            prefix: id.to_string(),
            matches: many.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(id: &str, name: &str) -> Zone {
        Zone {
            id: id.to_string(),
            name: name.to_string(),
            created_at: 0,
        }
    }

    fn event(id: &str, zone_id: &str, completed: bool) -> Event {
        Event {
            id: id.to_string(),
            zone_id: zone_id.to_string(),
            description: format!("event {id}"),
            created_at: 0,
            completed_at: completed.then_some(1),
            is_completed: completed,
            photos: Vec::new(),
        }
    }

    fn sample() -> AppData {
        AppData {
            zones: vec![zone("abc-1", "Warehouse"), zone("abd-2", "Office")],
            events: vec![
                event("e1", "abc-1", false),
                event("e2", "abd-2", false),
                event("e3", "abc-1", true),
                event("e4", "abc-1", false),
            ],
            ..AppData::default()
        }
    }

    #[test]
    fn test_zone_events_storage_order() {
        let state = sample();
        let ids: Vec<_> = zone_events(&state, "abc-1")
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, ["e1", "e3", "e4"]);
    }

    #[test]
    fn test_zone_events_unknown_zone() {
        assert!(zone_events(&sample(), "nope").is_empty());
    }

    #[test]
    fn test_pending_count() {
        let state = sample();
        assert_eq!(pending_count(&state, "abc-1"), 2);
        assert_eq!(pending_count(&state, "abd-2"), 1);
        assert_eq!(pending_count(&state, "nope"), 0);
    }

    #[test]
    fn test_pending_count_matches_filter() {
        let state = sample();
        for z in &state.zones {
            let filtered = zone_events(&state, &z.id)
                .iter()
                .filter(|e| !e.is_completed)
                .count();
            assert_eq!(pending_count(&state, &z.id), filtered);
        }
    }

    #[test]
    fn test_verify_admin_password_is_exact() {
        let state = AppData::default();
        assert!(verify_admin_password(&state, "12345"));
        assert!(!verify_admin_password(&state, "12345 "));
        assert!(!verify_admin_password(&state, "1234"));
        assert!(!verify_admin_password(&state, ""));
    }

    #[test]
    fn test_split_by_status() {
        let state = sample();
        let (pending, completed) = split_by_status(&state, "abc-1");
        let pending: Vec<_> = pending.iter().map(|e| e.id.as_str()).collect();
        let completed: Vec<_> = completed.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(pending, ["e1", "e4"]);
        assert_eq!(completed, ["e3"]);
        // storage order untouched
        assert_eq!(state.events[1].id, "e2");
    }

    #[test]
    fn test_admin_stats() {
        let stats = admin_stats(&sample());
        assert_eq!(
            stats,
            AdminStats {
                zones: 2,
                pending: 3,
                completed: 1,
                log_entries: 0,
            }
        );
    }

    #[test]
    fn test_resolve_zone_exact_and_prefix() {
        let state = sample();
        assert_eq!(resolve_zone(&state, "abc-1").unwrap().name, "Warehouse");
        assert_eq!(resolve_zone(&state, "abd").unwrap().name, "Office");
    }

    #[test]
    fn test_resolve_zone_ambiguous() {
        let err = resolve_zone(&sample(), "ab").unwrap_err();
        assert!(matches!(err, Error::AmbiguousId { matches: 2, .. }));
    }

    #[test]
    fn test_resolve_zone_missing() {
        assert!(resolve_zone(&sample(), "zzz").unwrap_err().is_not_found());
        assert!(resolve_zone(&sample(), "").unwrap_err().is_not_found());
    }

    #[test]
    fn test_resolve_event() {
        let state = sample();
        assert_eq!(resolve_event(&state, "e3").unwrap().zone_id, "abc-1");
        assert!(matches!(
            resolve_event(&state, "e").unwrap_err(),
            Error::AmbiguousId { matches: 4, .. }
        ));
        assert!(resolve_event(&state, "x").unwrap_err().is_not_found());
    }
}
