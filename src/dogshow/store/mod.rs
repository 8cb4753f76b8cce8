//! # Storage Layer
//!
//! The roster lives in memory as a [`RecordStore`]: an ordered list of
//! [`DogEntry`] values where insertion order is display order and the only
//! identity an entry has is its position.
//!
//! Persistence is explicit. Nothing is written until the user saves, and a
//! load replaces the whole store. The file format lives in [`xml`]:
//!
//! ```text
//! <doglist>
//!   <dog name="..." breed="..." owner="..." judge="..." award="..."/>
//! </doglist>
//! ```
//!
//! The store keeps a revision counter that every mutation bumps. Background
//! saves record the revision they wrote, which lets the controller decide
//! whether the document is still clean when the save completes.

use crate::error::{DogShowError, Result};
use crate::model::DogEntry;
use std::sync::{Arc, Mutex, MutexGuard};

pub mod xml;

/// The store as shared between the controller and the background worker.
pub type SharedStore = Arc<Mutex<RecordStore>>;

pub fn shared(store: RecordStore) -> SharedStore {
    Arc::new(Mutex::new(store))
}

/// Locks the shared store, recovering the guard if the lock was poisoned.
pub fn lock(store: &SharedStore) -> MutexGuard<'_, RecordStore> {
    store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Debug, Default, Clone)]
pub struct RecordStore {
    entries: Vec<DogEntry>,
    revision: u64,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: DogEntry) {
        self.entries.push(entry);
        self.revision += 1;
    }

    pub fn update(&mut self, index: usize, entry: DogEntry) -> Result<()> {
        let len = self.entries.len();
        let slot = self
            .entries
            .get_mut(index)
            .ok_or(DogShowError::IndexOutOfRange { index, len })?;
        *slot = entry;
        self.revision += 1;
        Ok(())
    }

    /// Removes every row in `indices`, returning the removed entries in row order.
    ///
    /// The batch is validated up front, so an out-of-range index removes nothing.
    pub fn remove_at<I>(&mut self, indices: I) -> Result<Vec<DogEntry>>
    where
        I: IntoIterator<Item = usize>,
    {
        let mut sorted: Vec<usize> = indices.into_iter().collect();
        sorted.sort_unstable();
        sorted.dedup();

        let len = self.entries.len();
        if let Some(&index) = sorted.iter().find(|&&i| i >= len) {
            return Err(DogShowError::IndexOutOfRange { index, len });
        }
        if sorted.is_empty() {
            return Ok(Vec::new());
        }

        // Highest first so earlier positions stay valid.
        let mut removed: Vec<DogEntry> = sorted
            .iter()
            .rev()
            .map(|&i| self.entries.remove(i))
            .collect();
        removed.reverse();
        self.revision += 1;
        Ok(removed)
    }

    pub fn replace_all(&mut self, entries: Vec<DogEntry>) {
        self.entries = entries;
        self.revision += 1;
    }

    pub fn row_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&DogEntry> {
        self.entries.get(index)
    }

    pub fn all(&self) -> &[DogEntry] {
        &self.entries
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

// --- Test Fixtures ---

#[cfg(test)]
pub mod fixtures {
    use super::*;

    pub fn entry(name: &str, breed: &str) -> DogEntry {
        DogEntry::new(name, breed, "Owner", "Judge", "Award")
    }

    pub fn store_with(names: &[&str]) -> RecordStore {
        let mut store = RecordStore::new();
        for name in names {
            store.append(entry(name, "Mixed"));
        }
        store
    }

    pub fn names(store: &RecordStore) -> Vec<&str> {
        store.all().iter().map(|e| e.name.as_str()).collect()
    }
}
