//! String key-value persistence
//!
//! A tiny storage abstraction for values that must survive a restart, such
//! as the last resolved player address.
//!
//! # Quick Start
//!
//! ```rust
//! use state_store::{KeyValueStore, MemoryStore};
//!
//! let store = MemoryStore::new();
//! store.set("playerAddress", "192.168.1.20:1400")?;
//! assert_eq!(store.get("playerAddress")?.as_deref(), Some("192.168.1.20:1400"));
//!
//! store.delete("playerAddress")?;
//! assert_eq!(store.get("playerAddress")?, None);
//! # Ok::<(), state_store::StoreError>(())
//! ```
//!
//! [`JsonFileStore`] keeps the same data in a JSON object on disk and replaces
//! the file atomically on every write.

pub mod error;
pub mod file;
pub mod store;

pub use error::{Result, StoreError};
pub use file::JsonFileStore;
pub use store::{KeyValueStore, MemoryStore};
