//! Durable preference storage.
//!
//! Preferences are plain string values addressed by key, the same shape as
//! a browser's local storage. Callers own the encoding of the values.
//!
//! ## Storage Layout
//!
//! ```text
//! {storage_dir}/
//! ├── config.toml           # Application configuration
//! └── preferences.json      # { "<key>": "<value>", ... }
//! ```

pub mod local;
pub mod memory;

use crate::error::Result;

// Re-export for convenience
pub use local::LocalPreferences;
pub use memory::MemoryPreferences;

/// Trait for key-value preference backends.
pub trait PreferenceStore: Send + Sync {
    /// Read the value stored under `key`, `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, durable once this returns `Ok`.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}
