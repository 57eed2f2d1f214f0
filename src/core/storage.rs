//! # Note Persistence
//!
//! Loads the note collection from a JSON file and rewrites the whole file on
//! every save.
//!
//! The file is a pretty-printed JSON array (2-space indent). Writes go to a
//! `<name>.tmp` sibling (e.g. `notes.json.tmp`) which is then renamed over
//! the target, so a failed write never leaves a truncated file behind. A
//! symlinked backing file is written through to its target.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::core::note::Note;

/// Default backing file, relative to the working directory.
pub const DEFAULT_NOTES_FILE: &str = "notes.json";

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    Io { path: PathBuf, source: io::Error },
    /// The backing file is not a JSON array of notes.
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// The collection could not be rendered as JSON.
    Serialize(serde_json::Error),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io { path, source } => write!(f, "{}: {source}", path.display()),
            StorageError::Parse { path, source } => {
                write!(f, "{} is not a valid notes file: {source}", path.display())
            }
            StorageError::Serialize(e) => write!(f, "failed to serialize notes: {e}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io { source, .. } => Some(source),
            StorageError::Parse { source, .. } => Some(source),
            StorageError::Serialize(e) => Some(e),
        }
    }
}

// ============================================================================
// Storage Trait
// ============================================================================

/// Where a note collection lives between runs.
pub trait NoteStorage {
    /// Loads the full collection. A missing backing store is an empty collection.
    fn load(&self) -> Result<Vec<Note>, StorageError>;

    /// Replaces the persisted collection with `notes`.
    fn save(&self, notes: &[Note]) -> Result<(), StorageError>;
}

// ============================================================================
// JSON File Storage
// ============================================================================

#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl NoteStorage for JsonFileStorage {
    fn load(&self) -> Result<Vec<Note>, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("No notes file at {}, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        if contents.trim().is_empty() {
            info!("Notes file {} is empty, starting empty", self.path.display());
            return Ok(Vec::new());
        }

        let notes: Vec<Note> =
            serde_json::from_str(&contents).map_err(|source| StorageError::Parse {
                path: self.path.clone(),
                source,
            })?;
        debug!("Loaded {} notes from {}", notes.len(), self.path.display());
        Ok(notes)
    }

    fn save(&self, notes: &[Note]) -> Result<(), StorageError> {
        atomic_write_json(&self.path, notes)?;
        debug!("Saved {} notes to {}", notes.len(), self.path.display());
        Ok(())
    }
}

/// Atomically write `notes` as pretty JSON to `path` (via `.tmp` + rename).
fn atomic_write_json(path: &Path, notes: &[Note]) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(notes).map_err(StorageError::Serialize)?;
    let target = resolve_target(path);
    let tmp_path = tmp_path_for(&target);
    let io_err = |source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    };
    let result = fs::write(&tmp_path, json).and_then(|()| fs::rename(&tmp_path, &target));
    if let Err(e) = result {
        let _ = fs::remove_file(&tmp_path);
        return Err(io_err(e));
    }
    Ok(())
}

/// Follows a symlinked backing file so the rename replaces its target, not the link.
fn resolve_target(path: &Path) -> PathBuf {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
        }
        _ => path.to_path_buf(),
    }
}

/// `notes.json` → `notes.json.tmp`, next to the target.
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::note;
    use tempfile::TempDir;

    fn storage_in(dir: &TempDir) -> JsonFileStorage {
        JsonFileStorage::new(dir.path().join("notes.json"))
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);
        assert!(storage.load().unwrap().is_empty());
        assert!(!storage.path().exists());
    }

    #[test]
    fn test_load_whitespace_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);
        fs::write(storage.path(), "  \n").unwrap();
        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_writes_pretty_json_in_key_order() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);
        storage.save(&[note("Groceries", "milk")]).unwrap();

        let written = fs::read_to_string(storage.path()).unwrap();
        let expected = "[\n  {\n    \"title\": \"Groceries\",\n    \"body\": \"milk\",\n    \"time_added\": \"2024-03-01T09:30:00.000Z\"\n  }\n]";
        assert_eq!(written, expected);
        assert!(!dir.path().join("notes.json.tmp").exists());
    }

    #[test]
    fn test_save_then_load_preserves_notes() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);
        let notes = vec![note("A", "b1"), note("Ab", "b2")];
        storage.save(&notes).unwrap();
        assert_eq!(storage.load().unwrap(), notes);
    }

    #[test]
    fn test_load_reads_compact_json_written_elsewhere() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);
        fs::write(
            storage.path(),
            r#"[{"title":"x","body":"y","time_added":"2023-12-31T23:59:59.999Z"}]"#,
        )
        .unwrap();
        let notes = storage.load().unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].time_added, "2023-12-31T23:59:59.999Z");
    }

    #[test]
    fn test_load_malformed_file_is_parse_error_and_untouched() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);
        fs::write(storage.path(), "{ not json").unwrap();

        let err = storage.load().unwrap_err();
        assert!(matches!(err, StorageError::Parse { .. }));
        assert!(err.to_string().contains("not a valid notes file"));
        assert_eq!(fs::read_to_string(storage.path()).unwrap(), "{ not json");
    }

    #[test]
    fn test_load_wrong_shape_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);
        fs::write(storage.path(), r#"{"title":"not an array"}"#).unwrap();
        assert!(matches!(storage.load(), Err(StorageError::Parse { .. })));
    }

    #[test]
    fn test_save_leaves_unrelated_tmp_sibling_alone() {
        let dir = TempDir::new().unwrap();
        let storage = storage_in(&dir);
        let sibling = dir.path().join("notes.tmp");
        fs::write(&sibling, "someone else's scratch").unwrap();

        storage.save(&[note("a", "b")]).unwrap();
        assert_eq!(fs::read_to_string(&sibling).unwrap(), "someone else's scratch");
        assert!(!dir.path().join("notes.json.tmp").exists());
    }

    #[test]
    fn test_tmp_path_keeps_full_file_name() {
        assert_eq!(
            tmp_path_for(Path::new("/data/notes.json")),
            PathBuf::from("/data/notes.json.tmp")
        );
        assert_eq!(tmp_path_for(Path::new("notes")), PathBuf::from("notes.tmp"));
    }

    #[test]
    fn test_failed_write_keeps_existing_file() {
        let dir = TempDir::new().unwrap();
        // A directory where the temp file should go makes the write fail.
        fs::create_dir(dir.path().join("notes.json.tmp")).unwrap();
        let storage = storage_in(&dir);
        fs::write(storage.path(), "[]").unwrap();

        assert!(matches!(storage.save(&[note("a", "b")]), Err(StorageError::Io { .. })));
        assert_eq!(fs::read_to_string(storage.path()).unwrap(), "[]");
    }

    #[cfg(unix)]
    #[test]
    fn test_save_writes_through_symlink() {
        let dir = TempDir::new().unwrap();
        let real = dir.path().join("real.json");
        fs::write(&real, "[]").unwrap();
        let link = dir.path().join("notes.json");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let storage = JsonFileStorage::new(&link);
        storage.save(&[note("linked", "")]).unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert!(fs::read_to_string(&real).unwrap().contains("\"linked\""));
        assert_eq!(storage.load().unwrap()[0].title, "linked");
    }

    #[test]
    fn test_save_into_missing_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("missing").join("notes.json"));
        let err = storage.save(&[note("a", "b")]).unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
    }
}
