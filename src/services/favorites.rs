// src/services/favorites.rs

//! Favorites ("hearts") store.
//!
//! Holds the set of favorited item ids and writes the whole set back to the
//! preference store after every toggle. The durable copy is read exactly
//! once, when the store is opened.

use indexmap::IndexSet;

use crate::error::Result;
use crate::storage::PreferenceStore;

/// Favorited ids, persisted as a JSON array under a versioned key.
#[derive(Debug)]
pub struct FavoritesStore<S> {
    store: S,
    key: String,
    ids: IndexSet<String>,
    revision: u64,
}

impl<S: PreferenceStore> FavoritesStore<S> {
    /// Open the store, reading the saved favorites.
    ///
    /// A missing, unreadable or corrupt value yields an empty set.
    pub fn open(store: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let ids = match store.get(&key) {
            Ok(Some(raw)) => serde_json::from_str::<Vec<String>>(&raw)
                .map(|ids| ids.into_iter().collect())
                .unwrap_or_else(|e| {
                    log::warn!("Ignoring corrupt favorites under {}: {}", key, e);
                    IndexSet::new()
                }),
            Ok(None) => IndexSet::new(),
            Err(e) => {
                log::warn!("Could not read favorites under {}: {}", key, e);
                IndexSet::new()
            }
        };

        log::debug!("Opened favorites store with {} ids", ids.len());

        Self {
            store,
            key,
            ids,
            revision: 0,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Flip membership of `id` and persist the full set.
    ///
    /// Returns whether `id` is a favorite afterwards. On a persistence error
    /// the in-memory change is kept and the error returned.
    pub fn toggle(&mut self, id: &str) -> Result<bool> {
        let favorited = if self.ids.shift_remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        };
        self.revision += 1;

        self.persist().inspect_err(|e| {
            log::error!("Failed to persist favorites under {}: {}", self.key, e);
        })?;
        Ok(favorited)
    }

    fn persist(&self) -> Result<()> {
        let ids: Vec<&str> = self.ids.iter().map(String::as_str).collect();
        let encoded = serde_json::to_string(&ids)?;
        self.store.set(&self.key, &encoded)
    }

    /// Favorited ids in the order they were added.
    pub fn ids(&self) -> &IndexSet<String> {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Bumped on every toggle.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}
