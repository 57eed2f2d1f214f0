//! # Core Application Logic
//!
//! This module contains Notekeeper's business logic.
//! It knows nothing about the console.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Note (the record)    │
//!                    │  • NoteStore (ops)      │
//!                    │  • NoteStorage (disk)   │
//!                    │                         │
//!                    │  No console I/O.        │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │   Shell    │
//!                         │  (menu on  │
//!                         │ stdin/out) │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`note`]: The `Note` struct and search hits
//! - [`store`]: `NoteStore`, the in-memory collection and its operations
//! - [`storage`]: The `NoteStorage` trait and the JSON file backend
//! - [`config`]: Layered settings (file, env, CLI)

pub mod config;
pub mod note;
pub mod storage;
pub mod store;

pub use note::{Note, NoteMatch};
pub use storage::{JsonFileStorage, NoteStorage, StorageError};
pub use store::{NoteStore, StoreError};
