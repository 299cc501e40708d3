//! Pure data transformations over the manifest.
//!
//! - `normalize`: manifest entries to archive items
//! - `filter`: query filtering and the featured subset

pub mod filter;
pub mod normalize;

pub use filter::{DerivedLists, Query, derive, featured_indices, filter_indices};
pub use normalize::{DEFAULT_TITLE, DEFAULT_YEAR, NormalizeWarning, Normalized, Normalizer};
