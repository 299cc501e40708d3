// src/pipeline/filter.rs

//! Free-text filtering and the featured (favorited) subset.

use indexmap::IndexSet;

use crate::models::ArchiveItem;

/// A search query, lowercased once up front.
#[derive(Debug, Clone)]
pub struct Query<'a> {
    raw: &'a str,
    lower: String,
}

impl<'a> Query<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self {
            raw,
            lower: raw.to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Title and tags match case-insensitively; the year matches the query
    /// as typed.
    pub fn matches(&self, item: &ArchiveItem) -> bool {
        item.title.to_lowercase().contains(&self.lower)
            || item.year.to_string().contains(self.raw)
            || item
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&self.lower))
    }
}

/// Positions of the items matching `query`, in item order.
pub fn filter_indices(items: &[ArchiveItem], query: &str) -> Vec<usize> {
    let query = Query::new(query);
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| query.matches(item))
        .map(|(idx, _)| idx)
        .collect()
}

/// Positions of the favorited items, in item order.
pub fn featured_indices(items: &[ArchiveItem], favorites: &IndexSet<String>) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| favorites.contains(&item.id))
        .map(|(idx, _)| idx)
        .collect()
}

/// The two lists derived from the archive state.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedLists<'a> {
    pub filtered: Vec<&'a ArchiveItem>,
    pub featured: Vec<&'a ArchiveItem>,
}

/// Derive the filtered and featured lists from scratch.
pub fn derive<'a>(
    items: &'a [ArchiveItem],
    query: &str,
    favorites: &IndexSet<String>,
) -> DerivedLists<'a> {
    DerivedLists {
        filtered: filter_indices(items, query)
            .into_iter()
            .map(|i| &items[i])
            .collect(),
        featured: featured_indices(items, favorites)
            .into_iter()
            .map(|i| &items[i])
            .collect(),
    }
}
