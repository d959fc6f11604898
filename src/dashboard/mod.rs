//! Tile launcher dashboard.
//!
//! A user-editable, ordered collection of launcher tiles persisted under a
//! single storage key.

mod storage;
mod store;
mod tile;

pub use storage::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
pub use store::TileStore;
pub use tile::{default_tiles, slugify, AccentColor, Icon, TileDraft, TileRecord};

/// Storage key holding the serialized tile collection.
pub const STORAGE_KEY: &str = "dashboard_tiles";
