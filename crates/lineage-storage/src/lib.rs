//! Lineage Storage - Storage backends for the family graph
//!
//! This crate persists person documents and runs the bounded subgraph
//! queries that feed graph construction.

pub mod error;
pub mod memory;
pub mod sqlite;
pub mod traits;

pub use error::{StorageError, StorageResult};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{EdgeField, PersonStore, RecordClosure, RelativeRecord};
