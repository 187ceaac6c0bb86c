//! # Drag/Export Protocol
//!
//! An item is "spent" when an external application accepts its text. That
//! acceptance is reported later, by the environment's drag session, and can
//! arrive after the user has already edited, removed or cleared the item.
//!
//! ```text
//!   Active ──begin_export──▶ Exporting ──accepted──▶ Used
//!                               │
//!                               └──────cancelled───▶ Active
//! ```
//!
//! `Exporting` is a guard held by [`ExportSession`], never a repository state and
//! never persisted. It only stops the same drag gesture from starting twice.
//!
//! Callbacks are keyed by [`ItemId`], not by a captured item. Each one
//! re-validates against the store, so a late or repeated callback is a no-op.
//!
//! The copy action is the synchronous variant: hand the text to a sink and mark
//! the item used as soon as the sink succeeds.

use crate::api::QueueStore;
use crate::error::Result;
use crate::model::ItemId;
use crate::store::SlotBackend;
use std::collections::HashSet;
use tracing::debug;

/// Plain-text payload handed to the clipboard or drag pasteboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPayload {
    pub id: ItemId,
    pub text: String,
}

impl ExportPayload {
    pub const MIME: &'static str = "text/plain;charset=utf-8";

    pub fn mime(&self) -> &'static str {
        Self::MIME
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }
}

#[derive(Debug, Default)]
pub struct ExportSession {
    in_flight: HashSet<ItemId>,
}

impl ExportSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_exporting(&self, id: ItemId) -> bool {
        self.in_flight.contains(&id)
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    /// Packages an active item for export. Does not change its state.
    ///
    /// Returns `None` for unknown or used items, or while the same item is
    /// already being exported.
    pub fn begin_export<B: SlotBackend>(
        &mut self,
        store: &QueueStore<B>,
        id: ItemId,
    ) -> Option<ExportPayload> {
        let item = store.find(id).filter(|item| !item.is_used())?;
        if !self.in_flight.insert(id) {
            debug!(item_id = %id, "Export already in flight");
            return None;
        }
        debug!(item_id = %id, "Export started");
        Some(ExportPayload {
            id,
            text: item.text().to_string(),
        })
    }

    /// The drop target consumed the payload. Marks the item used if it still exists.
    pub fn on_export_accepted<B: SlotBackend>(
        &mut self,
        store: &mut QueueStore<B>,
        id: ItemId,
    ) -> bool {
        self.in_flight.remove(&id);
        let changed = store.mark_used(id);
        debug!(item_id = %id, changed, "Export accepted");
        changed
    }

    /// The drag ended without a drop. Only releases the guard.
    pub fn on_export_cancelled(&mut self, id: ItemId) {
        if self.in_flight.remove(&id) {
            debug!(item_id = %id, "Export cancelled");
        }
    }
}

/// Copies an active item's text through `sink` and marks it used right away.
///
/// Returns `Ok(false)` when the item is missing or already used; the sink is not
/// called in that case. A sink error leaves the item active.
pub fn copy<B, F>(store: &mut QueueStore<B>, id: ItemId, sink: F) -> Result<bool>
where
    B: SlotBackend,
    F: FnOnce(&str) -> Result<()>,
{
    let Some(item) = store.find(id).filter(|item| !item.is_used()) else {
        return Ok(false);
    };
    sink(item.text())?;
    Ok(store.mark_used(id))
}
