//! Local filesystem preference storage.
//!
//! All keys live in one JSON object file which is rewritten atomically on
//! every `set`.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::error::{AppError, Result};
use crate::storage::PreferenceStore;

type Entries = IndexMap<String, String>;

/// File-backed preference store.
#[derive(Debug, Clone)]
pub struct LocalPreferences {
    path: PathBuf,
}

impl LocalPreferences {
    /// Create a store backed by the JSON file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all entries, returning None if the file doesn't exist.
    fn read_entries(&self) -> Result<Option<Entries>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Write bytes atomically (write to temp, then rename).
    fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("tmp");
        let mut file = fs::File::create(&tmp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        drop(file);

        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl PreferenceStore for LocalPreferences {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .read_entries()?
            .and_then(|mut entries| entries.shift_remove(key)))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = match self.read_entries() {
            Ok(entries) => entries.unwrap_or_default(),
            Err(AppError::Json(e)) => {
                log::warn!(
                    "Preferences file {} is corrupt ({}), starting fresh",
                    self.path.display(),
                    e
                );
                Entries::new()
            }
            Err(e) => return Err(e),
        };

        entries.insert(key.to_string(), value.to_string());
        let bytes = serde_json::to_vec_pretty(&entries)?;
        self.write_bytes(&bytes)
            .map_err(|e| AppError::storage(format!("{}: {}", self.path.display(), e)))
    }
}
