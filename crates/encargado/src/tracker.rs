//! The state container.
//!
//! [`Tracker`] owns the current document and is the only place mutations are
//! applied. Each dispatch computes the next document, persists it, and only
//! then swaps it in, so a failed save leaves the in-memory state untouched.

use tracing::{debug, info};

use crate::environment::{Environment, SystemEnvironment};
use crate::error::{Error, Result};
use crate::model::{AppData, Event, PhotoDraft, Zone};
use crate::ops::{self, Mutation, Outcome};
use crate::query;
use crate::storage::DocumentStore;

/// Owns the document and applies mutations one at a time.
#[derive(Debug)]
pub struct Tracker<E: Environment = SystemEnvironment> {
    store: DocumentStore,
    data: AppData,
    env: E,
}

impl Tracker<SystemEnvironment> {
    /// Load the document from a store, using random ids and the system clock.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn open(store: DocumentStore) -> Result<Self> {
        Self::with_environment(store, SystemEnvironment)
    }
}

impl<E: Environment> Tracker<E> {
    /// Load the document from a store with a custom environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn with_environment(store: DocumentStore, env: E) -> Result<Self> {
        let data = store.load()?;
        Ok(Self { store, data, env })
    }

    /// The current document.
    #[must_use]
    pub fn data(&self) -> &AppData {
        &self.data
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// Apply a mutation and persist the result.
    ///
    /// Nothing is written when the outcome is [`Outcome::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns an error if saving fails; the current document is then kept.
    pub fn dispatch(&mut self, mutation: Mutation) -> Result<Outcome> {
        debug!("Dispatching {}", mutation_name(&mutation));
        let (next, outcome) = ops::apply(&self.data, mutation, &mut self.env);
        if outcome.changed() {
            self.store.save(&next)?;
            self.data = next;
        }
        Ok(outcome)
    }

    /// Create a zone.
    ///
    /// # Errors
    ///
    /// Returns an error if saving fails.
    pub fn add_zone(&mut self, name: impl Into<String>) -> Result<Zone> {
        match self.dispatch(Mutation::AddZone { name: name.into() })? {
            Outcome::ZoneAdded(zone) => {
                info!("Created zone '{}' ({})", zone.name, zone.id);
                Ok(zone)
            }
            other => Err(unexpected(&other)),
        }
    }

    /// Delete a zone and its events.
    ///
    /// # Errors
    ///
    /// Returns an error if saving fails.
    pub fn delete_zone(&mut self, zone_id: impl Into<String>) -> Result<Outcome> {
        self.dispatch(Mutation::DeleteZone {
            zone_id: zone_id.into(),
        })
    }

    /// Record an event.
    ///
    /// # Errors
    ///
    /// Returns an error if saving fails.
    pub fn add_event(
        &mut self,
        zone_id: impl Into<String>,
        description: impl Into<String>,
        photos: Vec<PhotoDraft>,
    ) -> Result<Event> {
        let mutation = Mutation::AddEvent {
            zone_id: zone_id.into(),
            description: description.into(),
            photos,
        };
        match self.dispatch(mutation)? {
            Outcome::EventAdded(event) => {
                info!("Recorded event {} in zone {}", event.id, event.zone_id);
                Ok(event)
            }
            other => Err(unexpected(&other)),
        }
    }

    /// Flip an event between pending and completed.
    ///
    /// # Errors
    ///
    /// Returns an error if saving fails.
    pub fn toggle_event_complete(&mut self, event_id: impl Into<String>) -> Result<Outcome> {
        self.dispatch(Mutation::ToggleEventComplete {
            event_id: event_id.into(),
        })
    }

    /// Delete an event.
    ///
    /// # Errors
    ///
    /// Returns an error if saving fails.
    pub fn delete_event(&mut self, event_id: impl Into<String>) -> Result<Outcome> {
        self.dispatch(Mutation::DeleteEvent {
            event_id: event_id.into(),
        })
    }

    /// Replace the administrator password without validating it.
    ///
    /// # Errors
    ///
    /// Returns an error if saving fails.
    pub fn update_admin_password(&mut self, password: impl Into<String>) -> Result<()> {
        self.dispatch(Mutation::UpdateAdminPassword {
            password: password.into(),
        })?;
        info!("Administrator password updated");
        Ok(())
    }

    /// Events of a zone in storage order.
    #[must_use]
    pub fn zone_events(&self, zone_id: &str) -> Vec<&Event> {
        query::zone_events(&self.data, zone_id)
    }

    /// Pending events in a zone.
    #[must_use]
    pub fn pending_count(&self, zone_id: &str) -> usize {
        query::pending_count(&self.data, zone_id)
    }

    /// Exact password check.
    #[must_use]
    pub fn verify_admin_password(&self, candidate: &str) -> bool {
        query::verify_admin_password(&self.data, candidate)
    }
}

fn mutation_name(mutation: &Mutation) -> &'static str {
    match mutation {
        Mutation::AddZone { .. } => "add_zone",
        Mutation::DeleteZone { .. } => "delete_zone",
        Mutation::AddEvent { .. } => "add_event",
        Mutation::ToggleEventComplete { .. } => "toggle_event_complete",
        Mutation::DeleteEvent { .. } => "delete_event",
        Mutation::UpdateAdminPassword { .. } => "update_admin_password",
    }
}

fn unexpected(outcome: &Outcome) -> Error {
    Error::internal(format!("unexpected outcome {outcome:?}"))
}
