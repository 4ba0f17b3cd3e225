//! jobtrail Storage - Local Key-Value Stores
//!
//! The board keeps a tiny amount of client-local state: the most recent
//! drop's column and item order, plus the id of the card being dragged.
//! This crate provides the string key-value seam that state lives behind,
//! two implementations of it, and the override adapter on top.

pub mod file;
pub mod kv;
pub mod overrides;
pub mod scoped_key;

pub use file::{FileKeyValueStore, FileStoreError};
pub use kv::{InMemoryKeyValueStore, KeyValueStore};
pub use overrides::{ColumnOverride, LocalOverrideStore, OverrideError, OverrideStore};
pub use scoped_key::{ScopedKey, Slot, DEFAULT_SCOPE};
