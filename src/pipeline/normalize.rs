// src/pipeline/normalize.rs

//! Manifest entry normalization.
//!
//! Turns raw manifest entries into display-ready [`ArchiveItem`]s. Missing or
//! blank metadata takes the defaults below; paths outside the configured
//! origin prefix are passed through and reported as warnings.

use std::fmt;

use crate::models::{ArchiveItem, Manifest, ManifestConfig, ManifestEntry, Year};
use crate::utils::url::{encode_path, join_asset, strip_origin_prefix};

/// Title used when an entry has none.
pub const DEFAULT_TITLE: &str = "Untitled Moment";

/// Year used when an entry has none.
pub const DEFAULT_YEAR: &str = "Archival";

/// A non-fatal problem found while normalizing an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeWarning {
    /// The entry path does not start with the configured origin prefix.
    PrefixMismatch { id: String, path: String },
}

impl fmt::Display for NormalizeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizeWarning::PrefixMismatch { id, path } => {
                write!(f, "entry {id}: path {path:?} is outside the asset prefix")
            }
        }
    }
}

/// Items produced from a manifest together with any warnings.
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    pub items: Vec<ArchiveItem>,
    pub warnings: Vec<NormalizeWarning>,
}

/// Converts manifest entries using a fixed asset base and origin prefix.
#[derive(Debug, Clone)]
pub struct Normalizer {
    asset_base: String,
    path_prefix: String,
}

impl Normalizer {
    pub fn new(asset_base: impl Into<String>, path_prefix: impl Into<String>) -> Self {
        Self {
            asset_base: asset_base.into(),
            path_prefix: path_prefix.into(),
        }
    }

    pub fn from_config(config: &ManifestConfig) -> Self {
        Self::new(config.asset_base(), config.path_prefix.clone())
    }

    /// Normalize a single entry.
    pub fn normalize(
        &self,
        id: String,
        entry: ManifestEntry,
    ) -> (ArchiveItem, Option<NormalizeWarning>) {
        let (relative, matched) = strip_origin_prefix(&entry.path, &self.path_prefix);
        let url = join_asset(&self.asset_base, &encode_path(relative));

        let warning = (!matched).then(|| NormalizeWarning::PrefixMismatch {
            id: id.clone(),
            path: entry.path.clone(),
        });

        let data = entry.data;
        let title = data
            .title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());
        let year = data
            .year
            .filter(|y| !y.is_blank())
            .unwrap_or_else(|| Year::from(DEFAULT_YEAR));

        let item = ArchiveItem {
            id,
            url,
            title,
            year,
            tags: data.tags.unwrap_or_default(),
        };
        (item, warning)
    }

    /// Normalize every entry, keeping manifest order.
    pub fn normalize_all(&self, manifest: Manifest) -> Normalized {
        let mut normalized = Normalized {
            items: Vec::with_capacity(manifest.len()),
            warnings: Vec::new(),
        };

        for (id, entry) in manifest {
            let (item, warning) = self.normalize(id, entry);
            if let Some(warning) = warning {
                normalized.warnings.push(warning);
            }
            normalized.items.push(item);
        }

        normalized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryData, parse_manifest};

    const BASE: &str = "https://raw.githubusercontent.com/u/r/main";
    const PREFIX: &str = "/content/drive/MyDrive/mizo_production_assets/";

    fn normalizer() -> Normalizer {
        Normalizer::new(BASE, PREFIX)
    }

    fn entry(path: &str, data: EntryData) -> ManifestEntry {
        ManifestEntry {
            path: path.to_string(),
            data,
        }
    }

    #[test]
    fn test_full_entry() {
        let manifest = parse_manifest(
            r#"{"a": {"path":"/x/y/img1.jpg","data":{"Title":"Draft Day","Year":2010,"Tags":["nba"]}}}"#,
        )
        .unwrap();

        let normalized = normalizer().normalize_all(manifest);
        assert_eq!(normalized.items.len(), 1);

        let item = &normalized.items[0];
        assert_eq!(item.id, "a");
        assert_eq!(item.title, "Draft Day");
        assert_eq!(item.year, Year::from(2010));
        assert_eq!(item.tags, vec!["nba".to_string()]);
        assert!(item.url.ends_with("y/img1.jpg"));
    }

    #[test]
    fn test_prefix_stripped_and_segments_encoded() {
        let path = format!("{PREFIX}NBA Draft/day 1.jpg");
        let (item, warning) = normalizer().normalize("k".into(), entry(&path, EntryData::default()));

        assert_eq!(item.url, format!("{BASE}/NBA%20Draft/day%201.jpg"));
        assert!(warning.is_none());
    }

    #[test]
    fn test_prefix_mismatch_passes_through_with_warning() {
        let (item, warning) =
            normalizer().normalize("a".into(), entry("/x/y/img1.jpg", EntryData::default()));

        assert_eq!(item.url, format!("{BASE}//x/y/img1.jpg"));
        assert_eq!(
            warning,
            Some(NormalizeWarning::PrefixMismatch {
                id: "a".to_string(),
                path: "/x/y/img1.jpg".to_string(),
            })
        );
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let (item, _) = normalizer().normalize("a".into(), entry("/x.jpg", EntryData::default()));

        assert_eq!(item.title, DEFAULT_TITLE);
        assert_eq!(item.title, "Untitled Moment");
        assert_eq!(item.year, Year::from(DEFAULT_YEAR));
        assert!(item.tags.is_empty());
    }

    #[test]
    fn test_blank_fields_take_defaults() {
        let data = EntryData {
            title: Some(String::new()),
            year: Some(Year::from(0)),
            tags: Some(Vec::new()),
        };
        let (item, _) = normalizer().normalize("a".into(), entry("/x.jpg", data));

        assert_eq!(item.title, DEFAULT_TITLE);
        assert_eq!(item.year, Year::from(DEFAULT_YEAR));
        assert!(item.tags.is_empty());
    }

    #[test]
    fn test_text_year_kept() {
        let data = EntryData {
            year: Some(Year::from("1990s")),
            ..EntryData::default()
        };
        let (item, _) = normalizer().normalize("a".into(), entry("/x.jpg", data));
        assert_eq!(item.year.to_string(), "1990s");
    }

    #[test]
    fn test_one_item_per_entry_in_manifest_order() {
        let manifest = parse_manifest(
            r#"{
                "c": {"path": "/c.jpg", "data": {}},
                "a": {"path": "/a.jpg", "data": {}},
                "b": {"path": "/b.jpg", "data": {}}
            }"#,
        )
        .unwrap();
        let keys: Vec<String> = manifest.keys().cloned().collect();

        let normalized = normalizer().normalize_all(manifest);
        let ids: Vec<String> = normalized.items.iter().map(|i| i.id.clone()).collect();

        assert_eq!(ids, keys);
        assert_eq!(normalized.warnings.len(), 3);
    }
}
