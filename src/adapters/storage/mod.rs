//! Storage Adapters
//!
//! Implementations of the KeyValueStore port for persisting the learner
//! profile and a pasted API key.
//!
//! ## Available Adapters
//!
//! - **FileKeyValueStore** - One file per key under a data directory
//! - **InMemoryKeyValueStore** - Process-local map (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileKeyValueStore, InMemoryKeyValueStore};
//!
//! // Production: file-based storage
//! let store = FileKeyValueStore::new("./data");
//!
//! // Testing: in-memory storage
//! let store = InMemoryKeyValueStore::new();
//! ```

mod file_store;
mod in_memory_store;

pub use file_store::FileKeyValueStore;
pub use in_memory_store::InMemoryKeyValueStore;
