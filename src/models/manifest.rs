// src/models/manifest.rs

//! Manifest wire format.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::Year;

/// The whole manifest document: entry id to entry, in document order.
pub type Manifest = IndexMap<String, ManifestEntry>;

/// Parse a manifest document.
pub fn parse_manifest(body: &str) -> Result<Manifest> {
    Ok(serde_json::from_str(body)?)
}

/// One record of the manifest as published by the asset host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Absolute path in the origin system
    pub path: String,

    pub data: EntryData,
}

/// Optional metadata attached to an entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryData {
    #[serde(rename = "Title", default)]
    pub title: Option<String>,

    #[serde(rename = "Year", default)]
    pub year: Option<Year>,

    #[serde(rename = "Tags", default)]
    pub tags: Option<Vec<String>>,
}
