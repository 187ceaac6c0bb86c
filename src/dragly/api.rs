//! # Queue Store Facade
//!
//! [`QueueStore`] is the single entry point for every collaborator (window, menu,
//! hotkey glue, the CLI host). It owns the canonical [`ItemRepository`] and a
//! [`PersistenceGateway`], and keeps them in step.
//!
//! ## Mutate, Persist, Notify
//!
//! Each mutator runs the same three steps on the caller's thread:
//!
//! 1. Apply the change to the repository.
//! 2. If anything changed, save the full list through the gateway.
//! 3. Call every subscriber, in subscription order, with the new list.
//!
//! Rejected input (blank text) and unknown ids change nothing, so they neither
//! persist nor notify. Every change yields exactly one notification; there is
//! no coalescing.
//!
//! ## Lifecycle
//!
//! - [`QueueStore::open`] is the initialization hook. It loads once from storage.
//! - [`QueueStore::flush`] is the shutdown hook. It retries a save that failed
//!   earlier and writes nothing otherwise, so a process that only reads never
//!   replaces data it could not parse.
//!
//! There is no global instance. The host constructs one store and passes it
//! explicitly to whatever needs it.
//!
//! ## Threading
//!
//! Subscribers are plain `FnMut` closures and backends may use `RefCell`, so a
//! store lives on one thread. Export callbacks that arrive later on the same
//! event loop go through [`crate::export::ExportSession`].

use crate::config::DraglyConfig;
use crate::model::{Item, ItemId};
use crate::repository::ItemRepository;
use crate::store::{PersistenceGateway, SlotBackend};
use tracing::debug;

/// Handle returned by [`QueueStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&[Item])>;

pub struct QueueStore<B: SlotBackend> {
    repo: ItemRepository,
    gateway: PersistenceGateway<B>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
    unsaved: bool,
}

impl<B: SlotBackend> QueueStore<B> {
    /// Opens the store with the default storage keys.
    pub fn new(backend: B) -> Self {
        Self::with_gateway(PersistenceGateway::new(backend))
    }

    /// Opens the store using the keys from `config`.
    pub fn open(backend: B, config: &DraglyConfig) -> Self {
        Self::with_gateway(PersistenceGateway::with_keys(
            backend,
            config.storage_key.clone(),
            config.legacy_keys.clone(),
        ))
    }

    pub fn with_gateway(gateway: PersistenceGateway<B>) -> Self {
        let repo = ItemRepository::from_items(gateway.load());
        debug!(count = repo.len(), key = %gateway.key(), "Opened queue store");
        Self {
            repo,
            gateway,
            subscribers: Vec::new(),
            next_subscription: 0,
            unsaved: false,
        }
    }

    // --- Reads ---

    pub fn items(&self) -> &[Item] {
        self.repo.items()
    }

    pub fn find(&self, id: ItemId) -> Option<&Item> {
        self.repo.find(id)
    }

    pub fn len(&self) -> usize {
        self.repo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repo.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.repo.active_count()
    }

    pub fn used_count(&self) -> usize {
        self.repo.used_count()
    }

    pub fn gateway(&self) -> &PersistenceGateway<B> {
        &self.gateway
    }

    // --- Subscriptions ---

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&[Item]) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    // --- Mutations ---

    pub fn add(&mut self, text: &str) -> Option<ItemId> {
        let id = self.repo.add(text)?;
        debug!(item_id = %id, "Added item");
        self.commit();
        Some(id)
    }

    pub fn remove(&mut self, id: ItemId) -> bool {
        let changed = self.repo.remove(id);
        self.commit_if(changed)
    }

    pub fn update(&mut self, id: ItemId, text: &str) -> bool {
        let changed = self.repo.update(id, text);
        self.commit_if(changed)
    }

    pub fn toggle(&mut self, id: ItemId) -> bool {
        let changed = self.repo.toggle(id);
        self.commit_if(changed)
    }

    pub fn mark_used(&mut self, id: ItemId) -> bool {
        let changed = self.repo.mark_used(id);
        self.commit_if(changed)
    }

    pub fn move_item(&mut self, id: ItemId, to: usize) -> bool {
        let changed = self.repo.move_item(id, to);
        self.commit_if(changed)
    }

    pub fn clear_used(&mut self) -> usize {
        let removed = self.repo.clear_used();
        self.commit_if(removed > 0);
        removed
    }

    pub fn clear_all(&mut self) -> usize {
        let removed = self.repo.clear_all();
        self.commit_if(removed > 0);
        removed
    }

    /// Whether a change made by this store has not reached storage yet.
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    /// Saves the list if a change is still pending. Returns whether storage is
    /// now up to date.
    pub fn flush(&mut self) -> bool {
        if !self.unsaved {
            return true;
        }
        self.unsaved = !self.gateway.save(self.repo.items());
        !self.unsaved
    }

    fn commit_if(&mut self, changed: bool) -> bool {
        if changed {
            self.commit();
        }
        changed
    }

    fn commit(&mut self) {
        self.unsaved = !self.gateway.save(self.repo.items());
        let items = self.repo.items();
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(items);
        }
    }
}
