//! Loading and saving the application document through a slot.

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::model::AppData;

use super::Storage;

/// Slot key the application document lives under unless configured otherwise.
pub const DEFAULT_SLOT_KEY: &str = "encargado_app_data";

/// Persistent home of the [`AppData`] document.
#[derive(Debug)]
pub struct DocumentStore {
    storage: Storage,
    key: String,
}

impl DocumentStore {
    /// Bind a storage engine to a slot key.
    #[must_use]
    pub fn new(storage: Storage, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// In-memory store under the default key.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn in_memory() -> Result<Self> {
        Ok(Self::new(Storage::open_in_memory()?, DEFAULT_SLOT_KEY))
    }

    /// The slot key this store reads and writes.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying storage engine.
    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Load the document.
    ///
    /// An empty slot or a value that is not valid JSON yields the default
    /// document. Valid JSON is merged over the defaults field by field.
    ///
    /// # Errors
    ///
    /// Returns an error only if the database itself cannot be read.
    pub fn load(&self) -> Result<AppData> {
        let Some(raw) = self.storage.read_slot(&self.key)? else {
            debug!("Slot '{}' is empty, starting from defaults", self.key);
            return Ok(AppData::default());
        };

        match serde_json::from_str(&raw) {
            Ok(value) => {
                let data = AppData::merge_over_defaults(value);
                info!(
                    "Loaded {} zones, {} events, {} log entries",
                    data.zones.len(),
                    data.events.len(),
                    data.admin_logs.len()
                );
                Ok(data)
            }
            Err(e) => {
                warn!("Slot '{}' holds unparsable data ({}), using defaults", self.key, e);
                Ok(AppData::default())
            }
        }
    }

    /// Serialize the whole document and overwrite the slot.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the database write fails.
    pub fn save(&self, data: &AppData) -> Result<()> {
        let raw = serde_json::to_string(data)?;
        self.storage.write_slot(&self.key, &raw)?;
        debug!("Saved document to slot '{}'", self.key);
        Ok(())
    }
}
