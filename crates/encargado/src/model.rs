//! Core record types for encargado.
//!
//! These types mirror the persisted JSON document one to one. Field names are
//! camelCase on the wire, timestamps are milliseconds since the Unix epoch.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// Milliseconds since the Unix epoch.
pub type Millis = i64;

/// Password a fresh document starts with.
pub const DEFAULT_ADMIN_PASSWORD: &str = "12345";

/// Maximum number of photos attached to a single event.
pub const MAX_PHOTOS_PER_EVENT: usize = 2;

/// A named work area grouping events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    /// Opaque unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Creation time.
    pub created_at: Millis,
}

/// A photo attached to an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    /// Opaque unique identifier.
    pub id: String,
    /// Self-contained encoded image (`data:image/jpeg;base64,...`).
    pub data_url: String,
    /// When the photo was attached.
    pub timestamp: Millis,
}

/// A prepared photo that has not been attached to an event yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoDraft {
    /// Opaque unique identifier.
    pub id: String,
    /// Self-contained encoded image.
    pub data_url: String,
}

impl PhotoDraft {
    /// Stamp the draft, turning it into a stored photo.
    #[must_use]
    pub fn stamp(self, timestamp: Millis) -> Photo {
        Photo {
            id: self.id,
            data_url: self.data_url,
            timestamp,
        }
    }
}

/// An incident recorded inside a zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Opaque unique identifier.
    pub id: String,
    /// The zone this event belongs to.
    pub zone_id: String,
    /// What happened.
    pub description: String,
    /// Creation time.
    pub created_at: Millis,
    /// Completion time, present iff `is_completed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Millis>,
    /// Whether the event has been resolved.
    pub is_completed: bool,
    /// Up to [`MAX_PHOTOS_PER_EVENT`] photos.
    #[serde(default)]
    pub photos: Vec<Photo>,
}

impl Event {
    /// Check if the event is still pending.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        !self.is_completed
    }
}

/// The kind of lifecycle action an admin log entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogType {
    /// An event was created.
    EventCreated,
    /// An event was deleted.
    EventDeleted,
    /// An event transitioned to completed.
    EventCompleted,
    /// A zone was created.
    ZoneCreated,
    /// A zone (and its events) was deleted.
    ZoneDeleted,
}

impl std::fmt::Display for LogType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventCreated => write!(f, "event_created"),
            Self::EventDeleted => write!(f, "event_deleted"),
            Self::EventCompleted => write!(f, "event_completed"),
            Self::ZoneCreated => write!(f, "zone_created"),
            Self::ZoneDeleted => write!(f, "zone_deleted"),
        }
    }
}

/// An append-only audit entry.
///
/// Zone names and event descriptions are copied in at write time so the
/// entry stays readable after its zone or event is gone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminLog {
    /// Opaque unique identifier.
    pub id: String,
    /// What happened.
    #[serde(rename = "type")]
    pub kind: LogType,
    /// Zone involved, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<String>,
    /// Zone name at the time of the action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_name: Option<String>,
    /// Event involved, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    /// Event description at the time of the action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_description: Option<String>,
    /// When the action happened.
    pub timestamp: Millis,
}

/// The whole persisted document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppData {
    /// Zones in insertion order.
    pub zones: Vec<Zone>,
    /// Events in insertion order.
    pub events: Vec<Event>,
    /// Audit log, newest first.
    pub admin_logs: Vec<AdminLog>,
    /// Plaintext administrator password.
    pub admin_password: String,
}

impl Default for AppData {
    fn default() -> Self {
        Self {
            zones: Vec::new(),
            events: Vec::new(),
            admin_logs: Vec::new(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }
}

impl AppData {
    /// Build a document from a parsed JSON value, field by field.
    ///
    /// Each top-level field that is present and well-formed wins; anything
    /// missing or malformed keeps its default. A value that is not an object
    /// yields the default document.
    #[must_use]
    pub fn merge_over_defaults(value: Value) -> Self {
        let mut data = Self::default();
        let Value::Object(mut fields) = value else {
            warn!("Stored document is not a JSON object, using defaults");
            return data;
        };

        if let Some(zones) = take_field(&mut fields, "zones") {
            data.zones = zones;
        }
        if let Some(events) = take_field(&mut fields, "events") {
            data.events = events;
        }
        if let Some(admin_logs) = take_field(&mut fields, "adminLogs") {
            data.admin_logs = admin_logs;
        }
        if let Some(admin_password) = take_field(&mut fields, "adminPassword") {
            data.admin_password = admin_password;
        }
        data
    }

    /// Look up a zone by id.
    #[must_use]
    pub fn zone(&self, zone_id: &str) -> Option<&Zone> {
        self.zones.iter().find(|z| z.id == zone_id)
    }

    /// Look up an event by id.
    #[must_use]
    pub fn event(&self, event_id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == event_id)
    }

    /// Current name of a zone, if it exists.
    #[must_use]
    pub fn zone_name(&self, zone_id: &str) -> Option<String> {
        self.zone(zone_id).map(|z| z.name.clone())
    }
}

fn take_field<T: DeserializeOwned>(fields: &mut Map<String, Value>, key: &str) -> Option<T> {
    let value = fields.remove(key)?;
    match serde_json::from_value(value) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            warn!("Ignoring malformed field '{}' in stored document: {}", key, e);
            None
        }
    }
}
