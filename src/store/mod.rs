//! Local persistence: key-value stores and the player record kept in them.

pub mod kv;
pub mod record;

pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use record::{PlayerRecord, RECORD_VERSION};
