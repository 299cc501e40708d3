//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Where the manifest and its assets live
    #[serde(default)]
    pub manifest: ManifestConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Durable favorites settings
    #[serde(default)]
    pub favorites: FavoritesConfig,

    /// Intro gate behavior
    #[serde(default)]
    pub intro: IntroConfig,

    /// Listing presentation
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if self.manifest.file.trim().is_empty() {
            return Err(AppError::validation("manifest.file is empty"));
        }
        if self.favorites.storage_key.trim().is_empty() {
            return Err(AppError::validation("favorites.storage_key is empty"));
        }
        Url::parse(&self.manifest.manifest_url()).map_err(|e| {
            AppError::validation(format!("manifest URL is not valid: {e}"))
        })?;
        Ok(())
    }
}

/// Remote location of the manifest and the assets it points to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestConfig {
    /// Owner of the asset repository
    #[serde(default = "defaults::user")]
    pub user: String,

    /// Asset repository name
    #[serde(default = "defaults::repo")]
    pub repo: String,

    /// Branch the raw files are served from
    #[serde(default = "defaults::branch")]
    pub branch: String,

    /// Manifest file name relative to the asset base
    #[serde(default = "defaults::manifest_file")]
    pub file: String,

    /// Origin-system prefix stripped from every entry path
    #[serde(default = "defaults::path_prefix")]
    pub path_prefix: String,

    /// Overrides the raw-content host, e.g. for a mirror
    #[serde(default)]
    pub base_url: Option<String>,
}

impl ManifestConfig {
    /// Base URL that encoded asset paths are appended to.
    pub fn asset_base(&self) -> String {
        match &self.base_url {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => format!(
                "https://raw.githubusercontent.com/{}/{}/{}",
                self.user, self.repo, self.branch
            ),
        }
    }

    /// Full URL of the manifest document.
    pub fn manifest_url(&self) -> String {
        format!("{}/{}", self.asset_base(), self.file)
    }
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            user: defaults::user(),
            repo: defaults::repo(),
            branch: defaults::branch(),
            file: defaults::manifest_file(),
            path_prefix: defaults::path_prefix(),
            base_url: None,
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Durable favorites settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoritesConfig {
    /// Versioned key the favorites array is stored under
    #[serde(default = "defaults::storage_key")]
    pub storage_key: String,

    /// Preferences file, relative to the storage directory
    #[serde(default = "defaults::preferences_file")]
    pub preferences_file: String,
}

impl Default for FavoritesConfig {
    fn default() -> Self {
        Self {
            storage_key: defaults::storage_key(),
            preferences_file: defaults::preferences_file(),
        }
    }
}

/// Intro gate settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntroConfig {
    #[serde(default = "defaults::intro_enabled")]
    pub enabled: bool,

    /// Delay between the tap and the archive reveal
    #[serde(default = "defaults::explode_delay")]
    pub explode_delay_ms: u64,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::intro_enabled(),
            explode_delay_ms: defaults::explode_delay(),
        }
    }
}

/// Listing presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Number of tags shown per item
    #[serde(default = "defaults::tag_preview")]
    pub tag_preview: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            tag_preview: defaults::tag_preview(),
        }
    }
}

mod defaults {
    // Manifest defaults
    pub fn user() -> String {
        "mizoamin".into()
    }
    pub fn repo() -> String {
        "mizo-assets-media-1".into()
    }
    pub fn branch() -> String {
        "main".into()
    }
    pub fn manifest_file() -> String {
        "assets_manifest_v8.json".into()
    }
    pub fn path_prefix() -> String {
        "/content/drive/MyDrive/mizo_production_assets/".into()
    }

    // HTTP defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; mizo-archive/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Favorites defaults
    pub fn storage_key() -> String {
        "mizo_hearts_v2".into()
    }
    pub fn preferences_file() -> String {
        "preferences.json".into()
    }

    // Intro defaults
    pub fn intro_enabled() -> bool {
        true
    }
    pub fn explode_delay() -> u64 {
        800
    }

    pub fn tag_preview() -> usize {
        3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.http.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.http.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_unparsable_base_url() {
        let mut config = Config::default();
        config.manifest.base_url = Some("not a url".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn default_urls_point_at_raw_content_host() {
        let manifest = ManifestConfig::default();
        assert_eq!(
            manifest.asset_base(),
            "https://raw.githubusercontent.com/mizoamin/mizo-assets-media-1/main"
        );
        assert_eq!(
            manifest.manifest_url(),
            "https://raw.githubusercontent.com/mizoamin/mizo-assets-media-1/main/assets_manifest_v8.json"
        );
    }

    #[test]
    fn base_url_override_drops_trailing_slash() {
        let manifest = ManifestConfig {
            base_url: Some("http://127.0.0.1:8080/".to_string()),
            ..ManifestConfig::default()
        };
        assert_eq!(manifest.asset_base(), "http://127.0.0.1:8080");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [manifest]
            branch = "staging"

            [intro]
            enabled = false
            "#,
        )
        .unwrap();
        assert_eq!(config.manifest.branch, "staging");
        assert_eq!(config.manifest.user, "mizoamin");
        assert!(!config.intro.enabled);
        assert_eq!(config.intro.explode_delay_ms, 800);
        assert_eq!(config.favorites.storage_key, "mizo_hearts_v2");
    }

    #[test]
    fn load_or_default_falls_back_on_missing_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = Config::load_or_default(tmp.path().join("missing.toml"));
        assert_eq!(config.http.timeout_secs, 30);
    }
}
