//! Service layer for the archive application.
//!
//! This module contains the business logic for:
//! - Manifest fetching (`ManifestFetcher`)
//! - Favorites persistence (`FavoritesStore`)
//! - The archive screen state (`ArchiveView`)

mod archive;
mod favorites;
mod manifest;

pub use archive::{ArchiveSnapshot, ArchiveStats, ArchiveView};
pub use favorites::FavoritesStore;
pub use manifest::{HttpManifestSource, LoadOutcome, ManifestFetcher, ManifestLoad, ManifestSource};
