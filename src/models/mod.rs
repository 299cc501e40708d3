// src/models/mod.rs

//! Domain models for the archive application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod item;
mod manifest;
mod portal;

// Re-export all public types
pub use config::{Config, DisplayConfig, FavoritesConfig, HttpConfig, IntroConfig, ManifestConfig};
pub use item::{ArchiveItem, Year};
pub use manifest::{EntryData, Manifest, ManifestEntry, parse_manifest};
pub use portal::{IntroPortal, PortalState};
