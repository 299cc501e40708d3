// src/services/archive.rs

//! Archive view state.
//!
//! Owns the loaded items, the search query and the favorites store, and is
//! the only path through which any of them change. The filtered and
//! featured lists are memoized on the inputs they depend on.

use std::sync::Arc;

use crate::error::Result;
use crate::models::ArchiveItem;
use crate::pipeline::{featured_indices, filter_indices};
use crate::services::favorites::FavoritesStore;
use crate::services::manifest::{LoadOutcome, ManifestFetcher, ManifestLoad};
use crate::storage::PreferenceStore;

/// Cached item positions for one derived list.
#[derive(Debug, Default)]
struct Memo<K> {
    key: Option<K>,
    indices: Vec<usize>,
    computed: usize,
}

impl<K: PartialEq> Memo<K> {
    fn refresh(&mut self, key: K, compute: impl FnOnce() -> Vec<usize>) {
        if self.key.as_ref() != Some(&key) {
            self.indices = compute();
            self.key = Some(key);
            self.computed += 1;
        }
    }
}

/// Header statistics for the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveStats {
    /// Loaded item count
    pub records: usize,
    /// Favorite count, stale ids included
    pub curated: usize,
}

/// The derived lists at one point in time.
#[derive(Debug)]
pub struct ArchiveSnapshot<'a> {
    pub filtered: Vec<&'a ArchiveItem>,
    pub featured: Vec<&'a ArchiveItem>,
    /// The featured row is only surfaced while no query is active
    pub show_featured: bool,
    pub loading: bool,
}

/// State container for the archive screen.
pub struct ArchiveView<S> {
    items: Vec<ArchiveItem>,
    items_revision: u64,
    loading: bool,
    query: String,
    favorites: FavoritesStore<S>,
    pending: Option<ManifestLoad>,
    last_outcome: Option<LoadOutcome>,
    filtered: Memo<(u64, String)>,
    featured: Memo<(u64, u64)>,
}

impl<S: PreferenceStore> ArchiveView<S> {
    pub fn new(favorites: FavoritesStore<S>) -> Self {
        Self {
            items: Vec::new(),
            items_revision: 0,
            loading: false,
            query: String::new(),
            favorites,
            pending: None,
            last_outcome: None,
            filtered: Memo::default(),
            featured: Memo::default(),
        }
    }

    /// Start loading the manifest in the background.
    ///
    /// Any load already in flight is aborted.
    pub fn begin_load(&mut self, fetcher: Arc<ManifestFetcher>) {
        self.cancel_load();
        self.pending = Some(fetcher.spawn());
        self.loading = true;
    }

    /// Abort the in-flight load, if any. Items are left untouched.
    pub fn cancel_load(&mut self) {
        if let Some(mut load) = self.pending.take() {
            load.cancel();
        }
        self.loading = false;
    }

    /// Wait for the in-flight load and publish its items.
    ///
    /// Returns `None` when nothing was pending or the load was cancelled.
    pub async fn complete_load(&mut self) -> Option<&LoadOutcome> {
        let outcome = match self.pending.as_mut() {
            Some(load) => load.finish().await,
            None => None,
        };
        self.pending = None;
        self.loading = false;

        let outcome = outcome?;
        self.replace_items(outcome.items.clone());
        self.last_outcome = Some(outcome);
        self.last_outcome.as_ref()
    }

    /// Replace the item list wholesale.
    pub fn replace_items(&mut self, items: Vec<ArchiveItem>) {
        self.items = items;
        self.items_revision += 1;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Toggle a favorite; returns whether it is favorited afterwards.
    pub fn toggle_favorite(&mut self, id: &str) -> Result<bool> {
        self.favorites.toggle(id)
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    pub fn favorites(&self) -> &FavoritesStore<S> {
        &self.favorites
    }

    pub fn items(&self) -> &[ArchiveItem] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_outcome(&self) -> Option<&LoadOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn stats(&self) -> ArchiveStats {
        ArchiveStats {
            records: self.items.len(),
            curated: self.favorites.len(),
        }
    }

    /// Bring both derived lists up to date and return them.
    pub fn snapshot(&mut self) -> ArchiveSnapshot<'_> {
        let items = &self.items;
        let query = &self.query;
        let favorites = self.favorites.ids();

        self.filtered
            .refresh((self.items_revision, query.clone()), || {
                filter_indices(items, query)
            });
        self.featured
            .refresh((self.items_revision, self.favorites.revision()), || {
                featured_indices(items, favorites)
            });

        let featured: Vec<&ArchiveItem> =
            self.featured.indices.iter().map(|&i| &items[i]).collect();

        ArchiveSnapshot {
            filtered: self.filtered.indices.iter().map(|&i| &items[i]).collect(),
            show_featured: query.is_empty() && !featured.is_empty(),
            featured,
            loading: self.loading,
        }
    }
}
