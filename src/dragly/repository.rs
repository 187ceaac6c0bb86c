//! # Item Repository
//!
//! The in-memory, ordered list of items. Newest items sit at the front.
//!
//! Every id-keyed operation treats an unknown id as a no-op rather than an error.
//! Export callbacks can arrive after the item they refer to was removed or
//! cleared, and the repository has to absorb those late calls quietly.
//!
//! Mutators return whether anything changed. The facade uses that to decide
//! whether to persist and notify; callers never need to treat `false` as failure.

use crate::model::{normalize_text, Item, ItemId, ItemState};
use std::collections::HashSet;

#[derive(Debug, Default, Clone)]
pub struct ItemRepository {
    items: Vec<Item>,
}

impl ItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a previously persisted list.
    ///
    /// Records with a duplicate id (after the first occurrence) or blank text are
    /// dropped so the loaded list satisfies the same invariants as a live one.
    pub fn from_items(items: Vec<Item>) -> Self {
        let mut seen = HashSet::with_capacity(items.len());
        let items = items
            .into_iter()
            .filter(|item| normalize_text(item.text()).is_some())
            .filter(|item| seen.insert(item.id()))
            .collect();
        Self { items }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.items.iter().filter(|item| !item.is_used()).count()
    }

    pub fn used_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_used()).count()
    }

    pub fn find(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id() == id)
    }

    fn find_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    pub fn add(&mut self, text: &str) -> Option<ItemId> {
        let item = Item::new(text)?;
        let id = item.id();
        self.items.insert(0, item);
        Some(id)
    }

    pub fn remove(&mut self, id: ItemId) -> bool {
        match self.position(id) {
            Some(idx) => {
                self.items.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Replaces the text in place. Unchanged text counts as no change.
    pub fn update(&mut self, id: ItemId, text: &str) -> bool {
        let Some(text) = normalize_text(text) else {
            return false;
        };
        match self.find_mut(id) {
            Some(item) if item.text != text => {
                item.text = text;
                true
            }
            _ => false,
        }
    }

    pub fn toggle(&mut self, id: ItemId) -> bool {
        match self.find_mut(id) {
            Some(item) => {
                item.state = item.state.toggled();
                true
            }
            None => false,
        }
    }

    pub fn mark_used(&mut self, id: ItemId) -> bool {
        match self.find_mut(id) {
            Some(item) if !item.is_used() => {
                item.state = ItemState::Used;
                true
            }
            _ => false,
        }
    }

    /// Moves an item to `to`, clamped to the last position.
    pub fn move_item(&mut self, id: ItemId, to: usize) -> bool {
        let Some(from) = self.position(id) else {
            return false;
        };
        let to = to.min(self.items.len() - 1);
        if from == to {
            return false;
        }
        let item = self.items.remove(from);
        self.items.insert(to, item);
        true
    }

    pub fn clear_used(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !item.is_used());
        before - self.items.len()
    }

    pub fn clear_all(&mut self) -> usize {
        let removed = self.items.len();
        self.items.clear();
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(repo: &ItemRepository) -> Vec<&str> {
        repo.items().iter().map(|i| i.text()).collect()
    }

    #[test]
    fn add_prepends_active_item() {
        let mut repo = ItemRepository::new();
        let a = repo.add("A").unwrap();
        let b = repo.add("B").unwrap();

        assert_ne!(a, b);
        assert_eq!(texts(&repo), vec!["B", "A"]);
        assert_eq!(repo.items()[0].state(), ItemState::Active);
    }

    #[test]
    fn add_rejects_blank_text() {
        let mut repo = ItemRepository::new();
        assert!(repo.add("").is_none());
        assert!(repo.add("   ").is_none());
        assert!(repo.is_empty());
    }

    #[test]
    fn remove_missing_is_noop() {
        let mut repo = ItemRepository::new();
        repo.add("A");
        assert!(!repo.remove(ItemId::new()));
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn update_keeps_identity_state_and_position() {
        let mut repo = ItemRepository::new();
        let a = repo.add("A").unwrap();
        repo.add("B");
        repo.mark_used(a);

        assert!(repo.update(a, "  A2 "));
        let item = &repo.items()[1];
        assert_eq!(item.id(), a);
        assert_eq!(item.text(), "A2");
        assert!(item.is_used());
    }

    #[test]
    fn update_rejects_blank_and_missing() {
        let mut repo = ItemRepository::new();
        let a = repo.add("A").unwrap();
        assert!(!repo.update(a, " "));
        assert!(!repo.update(ItemId::new(), "x"));
        assert!(!repo.update(a, "A"));
        assert_eq!(repo.find(a).unwrap().text(), "A");
    }

    #[test]
    fn toggle_twice_restores_state() {
        let mut repo = ItemRepository::new();
        let a = repo.add("A").unwrap();
        repo.toggle(a);
        assert_eq!(repo.find(a).unwrap().state(), ItemState::Used);
        repo.toggle(a);
        assert_eq!(repo.find(a).unwrap().state(), ItemState::Active);
    }

    #[test]
    fn mark_used_is_idempotent() {
        let mut repo = ItemRepository::new();
        let a = repo.add("A").unwrap();
        assert!(repo.mark_used(a));
        assert!(!repo.mark_used(a));
        assert!(!repo.mark_used(ItemId::new()));
        assert!(repo.find(a).unwrap().is_used());
    }

    #[test]
    fn clear_used_preserves_order_of_active() {
        let mut repo = ItemRepository::new();
        let a = repo.add("A").unwrap();
        repo.add("B");
        let c = repo.add("C").unwrap();
        repo.add("D");
        repo.mark_used(a);
        repo.mark_used(c);

        assert_eq!(repo.clear_used(), 2);
        assert_eq!(texts(&repo), vec!["D", "B"]);
        assert_eq!(repo.used_count(), 0);
    }

    #[test]
    fn clear_all_empties() {
        let mut repo = ItemRepository::new();
        repo.add("A");
        repo.add("B");
        assert_eq!(repo.clear_all(), 2);
        assert!(repo.is_empty());
    }

    #[test]
    fn move_item_reorders_and_clamps() {
        let mut repo = ItemRepository::new();
        let a = repo.add("A").unwrap();
        repo.add("B");
        let c = repo.add("C").unwrap();

        // [C, B, A] -> move C to the end
        assert!(repo.move_item(c, 99));
        assert_eq!(texts(&repo), vec!["B", "A", "C"]);

        assert!(repo.move_item(a, 0));
        assert_eq!(texts(&repo), vec!["A", "B", "C"]);

        assert!(!repo.move_item(a, 0));
        assert!(!repo.move_item(ItemId::new(), 1));
    }

    #[test]
    fn from_items_drops_duplicates_and_blank() {
        let first = Item::new("first").unwrap();
        let dup = Item::from_parts(first.id(), "dup", ItemState::Used, None).unwrap();
        let blank = Item::new("x").map(|mut i| {
            i.text = "  ".to_string();
            i
        });
        let other = Item::new("other").unwrap();

        let repo = ItemRepository::from_items(vec![
            first.clone(),
            dup,
            blank.unwrap(),
            other.clone(),
        ]);

        assert_eq!(repo.items(), &[first, other]);
    }

    #[test]
    fn counts() {
        let mut repo = ItemRepository::new();
        let a = repo.add("A").unwrap();
        repo.add("B");
        repo.mark_used(a);
        assert_eq!(repo.active_count(), 1);
        assert_eq!(repo.used_count(), 1);
    }
}
