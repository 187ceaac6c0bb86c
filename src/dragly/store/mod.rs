//! # Storage Layer
//!
//! This module defines how the queue survives process restarts. It is split in two:
//!
//! 1. [`SlotBackend`]: raw key-value I/O. One key holds one serialized payload.
//! 2. [`PersistenceGateway`]: turns the item list into a payload and back.
//!
//! The backend handles the "how" of storage (filesystem vs memory), while the
//! gateway handles the "what" (JSON encoding, legacy keys, error absorption).
//!
//! ## Failure Policy
//!
//! The in-memory list is the source of truth for the running process. The
//! gateway therefore never returns an error:
//!
//! - A failed write is logged at `warn` and dropped. The next mutation saves again.
//! - A missing, unreadable or corrupt payload loads as an empty list.
//!
//! ## Legacy Keys
//!
//! Queue data used to live under a different key. When the canonical key holds
//! nothing, each legacy key is tried in order and the first parsable list wins.
//! Saving always targets the canonical key, which completes the migration.
//!
//! ## Implementations
//!
//! - [`fs::FsBackend`]: one `<key>.json` file per slot in a data directory.
//! - [`memory::MemBackend`]: `RefCell`-backed slots for tests.

use crate::error::Result;
use crate::model::Item;
use tracing::{debug, warn};

pub mod fs;
pub mod memory;

/// Key under which the queue is stored.
pub const DEFAULT_STORAGE_KEY: &str = "dragly.items";

/// Key used by earlier releases.
pub const LEGACY_STORAGE_KEY: &str = "dragly.queueItems";

/// Abstract interface for a durable key-value slot.
pub trait SlotBackend {
    /// Read the payload stored under `key`.
    /// Returns Ok(None) if nothing was ever written there.
    fn read_slot(&self, key: &str) -> Result<Option<String>>;

    /// Replace the payload under `key`.
    fn write_slot(&self, key: &str, payload: &str) -> Result<()>;

    /// Delete the payload under `key`. Missing keys are fine.
    fn remove_slot(&self, key: &str) -> Result<()>;
}

// Lets a caller keep a handle on the backend after handing it to a store.
impl<B: SlotBackend> SlotBackend for std::rc::Rc<B> {
    fn read_slot(&self, key: &str) -> Result<Option<String>> {
        (**self).read_slot(key)
    }

    fn write_slot(&self, key: &str, payload: &str) -> Result<()> {
        (**self).write_slot(key, payload)
    }

    fn remove_slot(&self, key: &str) -> Result<()> {
        (**self).remove_slot(key)
    }
}

/// Serializes the full item list to a single slot and reads it back.
pub struct PersistenceGateway<B: SlotBackend> {
    backend: B,
    key: String,
    legacy_keys: Vec<String>,
}

impl<B: SlotBackend> PersistenceGateway<B> {
    pub fn new(backend: B) -> Self {
        Self::with_keys(backend, DEFAULT_STORAGE_KEY, vec![LEGACY_STORAGE_KEY.to_string()])
    }

    pub fn with_keys(backend: B, key: impl Into<String>, legacy_keys: Vec<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            legacy_keys,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Writes the list. Returns whether the write went through.
    pub fn save(&self, items: &[Item]) -> bool {
        let payload = match serde_json::to_string_pretty(items) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to serialize queue items");
                return false;
            }
        };

        match self.backend.write_slot(&self.key, &payload) {
            Ok(()) => {
                debug!(key = %self.key, count = items.len(), "Saved queue items");
                true
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to save queue items");
                false
            }
        }
    }

    /// Reads the list, falling back to legacy keys, then to empty.
    pub fn load(&self) -> Vec<Item> {
        match self.read_key(&self.key) {
            SlotRead::Items(items) => return items,
            SlotRead::Corrupt => return Vec::new(),
            SlotRead::Missing => {}
        }

        for legacy in &self.legacy_keys {
            if let SlotRead::Items(items) = self.read_key(legacy) {
                debug!(key = %legacy, count = items.len(), "Loaded queue items from legacy key");
                return items;
            }
        }

        Vec::new()
    }

    fn read_key(&self, key: &str) -> SlotRead {
        let payload = match self.backend.read_slot(key) {
            Ok(Some(payload)) => payload,
            Ok(None) => return SlotRead::Missing,
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to read queue items");
                return SlotRead::Corrupt;
            }
        };

        match serde_json::from_str::<Vec<Item>>(&payload) {
            Ok(items) => SlotRead::Items(items),
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to parse queue items, starting empty");
                SlotRead::Corrupt
            }
        }
    }
}

enum SlotRead {
    Items(Vec<Item>),
    Missing,
    Corrupt,
}
