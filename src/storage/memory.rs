//! In-memory slot storage.

use std::cell::RefCell;
use std::collections::HashMap;

use anyhow::Result;

use super::SlotStore;

/// Slot storage that lives only as long as the value.
///
/// Useful for tests and for embedding the store without touching disk.
#[derive(Debug, Default)]
pub struct MemorySlotStore {
    slots: RefCell<HashMap<String, String>>,
}

impl MemorySlotStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys written so far.
    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    /// Check if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }
}

impl SlotStore for MemorySlotStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let store = MemorySlotStore::new();
        assert!(store.is_empty());
        assert_eq!(store.read("anything").unwrap(), None);
    }

    #[test]
    fn write_then_read() {
        let store = MemorySlotStore::new();
        store.write("k", "v").unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.read("k").unwrap(), Some("v".to_string()));
    }
}
