//! Persistent storage for exam tests.
//!
//! # Features
//!
//! - **Whole-document saves** that re-validate the test first
//! - **Atomic writes** to prevent data corruption
//! - **Conflict detection** via SHA-256 fingerprints of the stored content
//! - **Soft deletion** with a `deleted_at` timestamp
//! - **Sheet import/export** through `exam-ingest`
//!
//! # Document Format
//!
//! [`FileStore`] keeps one pretty-printed JSON file per test:
//!
//! ```text
//! {
//!   "schema_version": 1,
//!   "id": "6f1c...",
//!   "created_at": "2026-01-05T09:12:44Z",
//!   "updated_at": "2026-01-05T09:40:02Z",
//!   "test": { "title": ..., "parts": [...] }
//! }
//! ```
//!
//! # Example
//!
//! ```ignore
//! use exam_persistence::{FileStore, TestStore};
//!
//! let store = FileStore::open("tests")?;
//! let stored = store.create_test("Sample", 120)?;
//! let loaded = store.load_test(stored.id)?;
//! ```

mod document;
mod error;
mod file_store;
mod fingerprint;
mod io;
mod memory_store;
mod store;

pub use document::{CURRENT_SCHEMA_VERSION, StoredTest, TestDocument, TestListing};
pub use error::{PersistenceError, Result};
pub use file_store::FileStore;
pub use fingerprint::fingerprint;
pub use io::{load_document, save_document};
pub use memory_store::MemoryStore;
pub use store::{StoreConfig, TestStore};
