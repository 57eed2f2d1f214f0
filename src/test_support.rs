//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::cell::{Cell, RefCell};
use std::io;
use std::path::PathBuf;

use crate::core::note::Note;
use crate::core::storage::{NoteStorage, StorageError};

/// Keeps the "persisted" collection in memory and counts saves.
#[derive(Default)]
pub struct MemoryStorage {
    saved: RefCell<Vec<Note>>,
    saves: Cell<usize>,
}

impl MemoryStorage {
    pub fn with_notes(notes: Vec<Note>) -> Self {
        Self {
            saved: RefCell::new(notes),
            saves: Cell::new(0),
        }
    }

    /// The collection as of the last save.
    pub fn saved(&self) -> Vec<Note> {
        self.saved.borrow().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl NoteStorage for MemoryStorage {
    fn load(&self) -> Result<Vec<Note>, StorageError> {
        Ok(self.saved())
    }

    fn save(&self, notes: &[Note]) -> Result<(), StorageError> {
        *self.saved.borrow_mut() = notes.to_vec();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

/// Loads the given notes and refuses every save.
#[derive(Default)]
pub struct FailingStorage {
    notes: Vec<Note>,
}

impl FailingStorage {
    pub fn with_notes(notes: Vec<Note>) -> Self {
        Self { notes }
    }
}

impl NoteStorage for FailingStorage {
    fn load(&self) -> Result<Vec<Note>, StorageError> {
        Ok(self.notes.clone())
    }

    fn save(&self, _notes: &[Note]) -> Result<(), StorageError> {
        Err(StorageError::Io {
            path: PathBuf::from("notes.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        })
    }
}

/// A note with a fixed timestamp.
pub fn note(title: &str, body: &str) -> Note {
    Note {
        title: title.to_string(),
        body: body.to_string(),
        time_added: "2024-03-01T09:30:00.000Z".to_string(),
    }
}
