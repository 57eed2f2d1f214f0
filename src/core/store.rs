//! # Note Store
//!
//! The in-memory note collection and the operations over it.
//!
//! ```text
//! NoteStore
//! ├── notes: Vec<Note>     // insertion order = display order = file order
//! └── storage: S           // rewritten in full after every mutation
//! ```
//!
//! Every mutation is applied in memory first and then saved. A failed save
//! is returned to the caller but the mutation stays in memory; the next
//! successful save brings the file back in sync.

use std::fmt;

use log::{info, warn};

use crate::core::note::{Note, NoteMatch};
use crate::core::storage::{NoteStorage, StorageError};

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum StoreError {
    /// Position is outside the collection. Nothing was changed.
    InvalidPosition { position: usize, len: usize },
    /// The change was applied in memory but could not be persisted.
    Storage(StorageError),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::InvalidPosition { position, len } => {
                write!(f, "no note at position {position} (collection has {len})")
            }
            StoreError::Storage(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::InvalidPosition { .. } => None,
            StoreError::Storage(e) => Some(e),
        }
    }
}

impl From<StorageError> for StoreError {
    fn from(e: StorageError) -> Self {
        StoreError::Storage(e)
    }
}

// ============================================================================
// Store
// ============================================================================

pub struct NoteStore<S: NoteStorage> {
    notes: Vec<Note>,
    storage: S,
}

impl<S: NoteStorage> NoteStore<S> {
    /// Loads the collection from `storage`.
    pub fn open(storage: S) -> Result<Self, StorageError> {
        let notes = storage.load()?;
        info!("Opened note store with {} notes", notes.len());
        Ok(Self { notes, storage })
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Appends a note stamped with the current instant, then saves.
    pub fn add(&mut self, title: &str, body: &str) -> Result<(), StoreError> {
        self.notes.push(Note::new(title, body));
        info!("Added note {:?}", title);
        self.persist()
    }

    /// Notes whose title contains `query`, ignoring case, in collection order.
    /// The empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<NoteMatch> {
        self.notes
            .iter()
            .enumerate()
            .filter(|(_, note)| note.title_contains(query))
            .map(|(position, note)| NoteMatch {
                position,
                note: note.clone(),
            })
            .collect()
    }

    /// Replaces title and/or body at `position`, then saves.
    ///
    /// `None` or a blank value keeps the current field. Non-blank values are
    /// stored as entered. `time_added` is never touched.
    pub fn update(
        &mut self,
        position: usize,
        new_title: Option<&str>,
        new_body: Option<&str>,
    ) -> Result<(), StoreError> {
        let len = self.notes.len();
        let note = self
            .notes
            .get_mut(position)
            .ok_or(StoreError::InvalidPosition { position, len })?;

        if let Some(title) = non_blank(new_title) {
            note.title = title.to_string();
        }
        if let Some(body) = non_blank(new_body) {
            note.body = body.to_string();
        }
        info!("Updated note at position {position}");
        self.persist()
    }

    /// Removes the note at `position`, shifting later notes down, then saves.
    ///
    /// Returns the removed note. On a save failure the note is still gone
    /// from memory.
    pub fn delete(&mut self, position: usize) -> Result<Note, StoreError> {
        let len = self.notes.len();
        if position >= len {
            return Err(StoreError::InvalidPosition { position, len });
        }
        let removed = self.notes.remove(position);
        info!("Deleted note {:?} at position {position}", removed.title);
        self.persist()?;
        Ok(removed)
    }

    fn persist(&self) -> Result<(), StoreError> {
        self.storage.save(&self.notes).map_err(|e| {
            warn!("Failed to save notes: {}", e);
            StoreError::from(e)
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
