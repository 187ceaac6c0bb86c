use super::SlotBackend;
use crate::error::{DraglyError, Result};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory slot backend for testing.
///
/// Uses `RefCell` for interior mutability since dragly is single-threaded.
/// This keeps every `SlotBackend` method on `&self`, matching `FsBackend`.
#[derive(Default)]
pub struct MemBackend {
    slots: RefCell<HashMap<String, String>>,
    simulate_write_error: RefCell<bool>,
    simulate_read_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Enable read error simulation for testing error handling.
    pub fn set_simulate_read_error(&self, simulate: bool) {
        *self.simulate_read_error.borrow_mut() = simulate;
    }
}

impl SlotBackend for MemBackend {
    fn read_slot(&self, key: &str) -> Result<Option<String>> {
        if *self.simulate_read_error.borrow() {
            return Err(DraglyError::Store("Simulated read error".to_string()));
        }
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn write_slot(&self, key: &str, payload: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(DraglyError::Store("Simulated write error".to_string()));
        }
        self.slots
            .borrow_mut()
            .insert(key.to_string(), payload.to_string());
        Ok(())
    }

    fn remove_slot(&self, key: &str) -> Result<()> {
        self.slots.borrow_mut().remove(key);
        Ok(())
    }
}
