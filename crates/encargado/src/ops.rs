//! Data operations over the document.
//!
//! Every operation is a pure function from the current document to the next
//! one. The input is never modified; callers swap the returned document in as
//! a whole. Lookups that miss leave the document untouched and report
//! [`Outcome::NotFound`].

use tracing::{debug, warn};

use crate::environment::Environment;
use crate::model::{
    AdminLog, AppData, Event, LogType, Millis, PhotoDraft, Zone, MAX_PHOTOS_PER_EVENT,
};

/// A state change requested by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Create a zone.
    AddZone {
        /// Zone name, already validated by the caller.
        name: String,
    },
    /// Delete a zone and all of its events.
    DeleteZone {
        /// Zone to delete.
        zone_id: String,
    },
    /// Record an event in a zone.
    AddEvent {
        /// Owning zone.
        zone_id: String,
        /// Description, already validated by the caller.
        description: String,
        /// Prepared photos; anything past the second is dropped.
        photos: Vec<PhotoDraft>,
    },
    /// Flip an event between pending and completed.
    ToggleEventComplete {
        /// Event to toggle.
        event_id: String,
    },
    /// Delete a single event.
    DeleteEvent {
        /// Event to delete.
        event_id: String,
    },
    /// Replace the administrator password.
    UpdateAdminPassword {
        /// New password, already validated by the caller.
        password: String,
    },
}

/// What an applied mutation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A zone was created.
    ZoneAdded(Zone),
    /// A zone deletion was recorded.
    ZoneDeleted {
        /// Name of the zone, if it still existed.
        zone_name: Option<String>,
        /// Number of events removed with it.
        removed_events: usize,
    },
    /// An event was created.
    EventAdded(Event),
    /// An event changed completion state; holds the updated event.
    EventToggled(Event),
    /// An event was deleted; holds the removed event.
    EventDeleted(Event),
    /// The administrator password was replaced.
    PasswordUpdated,
    /// The referenced record does not exist; nothing changed.
    NotFound,
}

impl Outcome {
    /// Check if the document changed.
    #[must_use]
    pub fn changed(&self) -> bool {
        !matches!(self, Self::NotFound)
    }
}

/// Apply a mutation, returning the next document and what happened.
pub fn apply<E: Environment + ?Sized>(
    state: &AppData,
    mutation: Mutation,
    env: &mut E,
) -> (AppData, Outcome) {
    match mutation {
        Mutation::AddZone { name } => add_zone(state, env, name),
        Mutation::DeleteZone { zone_id } => delete_zone(state, env, &zone_id),
        Mutation::AddEvent {
            zone_id,
            description,
            photos,
        } => add_event(state, env, zone_id, description, photos),
        Mutation::ToggleEventComplete { event_id } => {
            toggle_event_complete(state, env, &event_id)
        }
        Mutation::DeleteEvent { event_id } => delete_event(state, env, &event_id),
        Mutation::UpdateAdminPassword { password } => update_admin_password(state, password),
    }
}

/// Create a zone and log it.
pub fn add_zone<E: Environment + ?Sized>(
    state: &AppData,
    env: &mut E,
    name: String,
) -> (AppData, Outcome) {
    let now = env.now();
    let zone = Zone {
        id: env.next_id(),
        name,
        created_at: now,
    };
    let log = LogEntry::new(LogType::ZoneCreated)
        .zone(&zone.id, Some(zone.name.clone()))
        .build(env, now);

    let mut next = state.clone();
    next.zones.push(zone.clone());
    next.admin_logs.insert(0, log);

    debug!("Added zone {}", zone.id);
    (next, Outcome::ZoneAdded(zone))
}

/// Delete a zone together with every event that references it.
///
/// The deletion is logged even when the zone is already gone; the log then
/// carries no zone name.
pub fn delete_zone<E: Environment + ?Sized>(
    state: &AppData,
    env: &mut E,
    zone_id: &str,
) -> (AppData, Outcome) {
    let zone_name = state.zone_name(zone_id);
    let now = env.now();
    let log = LogEntry::new(LogType::ZoneDeleted)
        .zone(zone_id, zone_name.clone())
        .build(env, now);

    let mut next = state.clone();
    next.zones.retain(|z| z.id != zone_id);
    let before = next.events.len();
    next.events.retain(|e| e.zone_id != zone_id);
    let removed_events = before - next.events.len();
    next.admin_logs.insert(0, log);

    debug!("Deleted zone {} with {} events", zone_id, removed_events);
    (
        next,
        Outcome::ZoneDeleted {
            zone_name,
            removed_events,
        },
    )
}

/// Record a new pending event.
///
/// The owning zone is not checked; its current name is copied into the log
/// when it exists.
pub fn add_event<E: Environment + ?Sized>(
    state: &AppData,
    env: &mut E,
    zone_id: String,
    description: String,
    photos: Vec<PhotoDraft>,
) -> (AppData, Outcome) {
    if photos.len() > MAX_PHOTOS_PER_EVENT {
        warn!(
            "Dropping {} photos past the limit of {}",
            photos.len() - MAX_PHOTOS_PER_EVENT,
            MAX_PHOTOS_PER_EVENT
        );
    }

    let now = env.now();
    let event = Event {
        id: env.next_id(),
        zone_id,
        description,
        created_at: now,
        completed_at: None,
        is_completed: false,
        photos: photos
            .into_iter()
            .take(MAX_PHOTOS_PER_EVENT)
            .map(|p| p.stamp(now))
            .collect(),
    };
    let log = LogEntry::new(LogType::EventCreated)
        .zone(&event.zone_id, state.zone_name(&event.zone_id))
        .event(&event)
        .build(env, now);

    let mut next = state.clone();
    next.events.push(event.clone());
    next.admin_logs.insert(0, log);

    debug!("Added event {} to zone {}", event.id, event.zone_id);
    (next, Outcome::EventAdded(event))
}

/// Flip an event's completion state.
///
/// Only the transition to completed is logged.
pub fn toggle_event_complete<E: Environment + ?Sized>(
    state: &AppData,
    env: &mut E,
    event_id: &str,
) -> (AppData, Outcome) {
    let Some(index) = state.events.iter().position(|e| e.id == event_id) else {
        debug!("Toggle ignored, event {} not found", event_id);
        return (state.clone(), Outcome::NotFound);
    };

    let now = env.now();
    let mut next = state.clone();
    let event = &mut next.events[index];
    event.is_completed = !event.is_completed;
    event.completed_at = event.is_completed.then_some(now);
    let updated = event.clone();

    if updated.is_completed {
        let log = LogEntry::new(LogType::EventCompleted)
            .zone(&updated.zone_id, state.zone_name(&updated.zone_id))
            .event(&updated)
            .build(env, now);
        next.admin_logs.insert(0, log);
    }

    debug!(
        "Event {} is now {}",
        event_id,
        if updated.is_completed { "completed" } else { "pending" }
    );
    (next, Outcome::EventToggled(updated))
}

/// Delete a single event and log it.
pub fn delete_event<E: Environment + ?Sized>(
    state: &AppData,
    env: &mut E,
    event_id: &str,
) -> (AppData, Outcome) {
    let Some(index) = state.events.iter().position(|e| e.id == event_id) else {
        debug!("Delete ignored, event {} not found", event_id);
        return (state.clone(), Outcome::NotFound);
    };

    let mut next = state.clone();
    let removed = next.events.remove(index);
    let now = env.now();
    let log = LogEntry::new(LogType::EventDeleted)
        .zone(&removed.zone_id, state.zone_name(&removed.zone_id))
        .event(&removed)
        .build(env, now);
    next.admin_logs.insert(0, log);

    debug!("Deleted event {}", event_id);
    (next, Outcome::EventDeleted(removed))
}

/// Replace the administrator password. No validation, no log.
#[must_use]
pub fn update_admin_password(state: &AppData, password: String) -> (AppData, Outcome) {
    let mut next = state.clone();
    next.admin_password = password;
    (next, Outcome::PasswordUpdated)
}

/// Builder for admin log entries.
struct LogEntry {
    kind: LogType,
    zone_id: Option<String>,
    zone_name: Option<String>,
    event_id: Option<String>,
    event_description: Option<String>,
}

impl LogEntry {
    fn new(kind: LogType) -> Self {
        Self {
            kind,
            zone_id: None,
            zone_name: None,
            event_id: None,
            event_description: None,
        }
    }

    fn zone(mut self, zone_id: &str, zone_name: Option<String>) -> Self {
        self.zone_id = Some(zone_id.to_string());
        self.zone_name = zone_name;
        self
    }

    fn event(mut self, event: &Event) -> Self {
        self.event_id = Some(event.id.clone());
        self.event_description = Some(event.description.clone());
        self
    }

    fn build<E: Environment + ?Sized>(self, env: &mut E, timestamp: Millis) -> AdminLog {
        AdminLog {
            id: env.next_id(),
            kind: self.kind,
            zone_id: self.zone_id,
            zone_name: self.zone_name,
            event_id: self.event_id,
            event_description: self.event_description,
            timestamp,
        }
    }
}
