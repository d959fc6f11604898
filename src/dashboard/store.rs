//! Persisted, ordered tile collection.

use super::storage::KeyValueStore;
use super::tile::{default_tiles, slugify, TileDraft, TileRecord};
use crate::error::{Result, VoxError};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Owner of the tile collection.
///
/// Every mutation is written through to the backing store before it becomes
/// visible; a failed write leaves both the memory and the store unchanged.
pub struct TileStore {
    backend: Arc<dyn KeyValueStore>,
    key: String,
    tiles: Vec<TileRecord>,
}

impl TileStore {
    /// Open the store, loading the persisted tiles or the defaults.
    pub fn open(backend: Arc<dyn KeyValueStore>, key: &str) -> Self {
        let tiles = Self::load(backend.as_ref(), key);
        Self {
            backend,
            key: key.to_string(),
            tiles,
        }
    }

    /// Read the persisted tiles.
    ///
    /// Missing, unreadable or unparsable data yields the default tiles.
    #[instrument(skip(backend))]
    pub fn load(backend: &dyn KeyValueStore, key: &str) -> Vec<TileRecord> {
        match backend.get(key) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<TileRecord>>(&raw) {
                Ok(tiles) => {
                    debug!("Loaded {} tiles", tiles.len());
                    tiles
                }
                Err(e) => {
                    warn!("Failed to parse stored tiles, using defaults: {}", e);
                    default_tiles()
                }
            },
            Ok(None) => default_tiles(),
            Err(e) => {
                warn!("Failed to load tiles, using defaults: {}", e);
                default_tiles()
            }
        }
    }

    /// Current tiles in insertion order.
    pub fn tiles(&self) -> &[TileRecord] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Look a tile up by id or by route.
    pub fn find(&self, id_or_route: &str) -> Option<&TileRecord> {
        self.tiles
            .iter()
            .find(|t| t.id == id_or_route || t.route == id_or_route)
    }

    /// Append a tile and persist the collection.
    pub fn add(&mut self, record: TileRecord) -> Result<()> {
        if self.tiles.iter().any(|t| t.id == record.id) {
            return Err(VoxError::InvalidInput(format!(
                "A tile with id '{}' already exists",
                record.id
            )));
        }

        let mut next = self.tiles.clone();
        info!("Adding tile {}", record.id);
        next.push(record);
        self.commit(next)
    }

    /// Remove the tile with `id` and persist the collection.
    ///
    /// Returns whether a tile was removed.
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        let next: Vec<TileRecord> = self.tiles.iter().filter(|t| t.id != id).cloned().collect();
        let removed = next.len() != self.tiles.len();
        self.commit(next)?;
        if removed {
            info!("Removed tile {}", id);
        }
        Ok(removed)
    }

    /// Build a record from a draft using the current time for the id suffix.
    pub fn new_tile(&self, draft: TileDraft) -> Result<TileRecord> {
        self.new_tile_at(draft, chrono::Utc::now().timestamp_millis())
    }

    /// Build a record from a draft with an explicit millisecond stamp.
    ///
    /// The stamp is bumped until the resulting id is unused.
    pub fn new_tile_at(&self, draft: TileDraft, millis: i64) -> Result<TileRecord> {
        let title = draft.title.trim();
        let description = draft.description.trim();
        if title.is_empty() || description.is_empty() {
            return Err(VoxError::InvalidInput(
                "A tile needs both a title and a description".to_string(),
            ));
        }

        let slug = slugify(title);
        let mut stamp = millis;
        let mut id = format!("{}-{}", slug, stamp);
        while self.tiles.iter().any(|t| t.id == id) {
            stamp += 1;
            id = format!("{}-{}", slug, stamp);
        }

        Ok(TileRecord {
            id,
            title: title.to_string(),
            description: description.to_string(),
            icon: draft.icon,
            color: draft.color,
            route: format!("/app/{}", slug),
        })
    }

    fn commit(&mut self, next: Vec<TileRecord>) -> Result<()> {
        let serialized = serde_json::to_string(&next)?;
        self.backend.set(&self.key, &serialized)?;
        self.tiles = next;
        Ok(())
    }
}
