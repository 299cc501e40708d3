// src/services/manifest.rs

//! Manifest fetcher service.
//!
//! Fetches the manifest once, normalizes it and reports the outcome. Every
//! failure degrades to an empty archive; nothing is retried.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use tokio::task::JoinHandle;

use crate::error::Result;
use crate::models::{ArchiveItem, Config, parse_manifest};
use crate::pipeline::{NormalizeWarning, Normalized, Normalizer};
use crate::utils::http;

/// Where a manifest document comes from.
#[async_trait]
pub trait ManifestSource: Send + Sync {
    /// Human-readable location, used in logs.
    fn location(&self) -> String;

    /// Fetch the raw manifest body.
    async fn fetch(&self) -> Result<String>;
}

/// Manifest served over HTTP(S).
pub struct HttpManifestSource {
    client: Client,
    url: String,
}

impl HttpManifestSource {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Build a source for the configured manifest URL.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = http::create_async_client(&config.http)?;
        Ok(Self::new(client, config.manifest.manifest_url()))
    }
}

#[async_trait]
impl ManifestSource for HttpManifestSource {
    fn location(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<String> {
        http::fetch_text(&self.client, &self.url).await
    }
}

/// Result of one load attempt.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub items: Vec<ArchiveItem>,
    pub warnings: Vec<NormalizeWarning>,
    /// Failure that caused the fallback to an empty archive
    pub error: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

impl LoadOutcome {
    fn loaded(normalized: Normalized) -> Self {
        Self {
            items: normalized.items,
            warnings: normalized.warnings,
            error: None,
            fetched_at: Utc::now(),
        }
    }

    fn failed(error: String) -> Self {
        Self {
            items: Vec::new(),
            warnings: Vec::new(),
            error: Some(error),
            fetched_at: Utc::now(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Fetches and normalizes the manifest.
pub struct ManifestFetcher {
    source: Arc<dyn ManifestSource>,
    normalizer: Normalizer,
}

impl ManifestFetcher {
    pub fn new(source: Arc<dyn ManifestSource>, normalizer: Normalizer) -> Self {
        Self { source, normalizer }
    }

    /// Fetcher for the configured remote manifest.
    pub fn from_config(config: &Config) -> Result<Self> {
        let source = HttpManifestSource::from_config(config)?;
        Ok(Self::new(
            Arc::new(source),
            Normalizer::from_config(&config.manifest),
        ))
    }

    /// Fetch, parse and normalize, propagating the first failure.
    pub async fn fetch_items(&self) -> Result<Normalized> {
        let body = self.source.fetch().await?;
        let manifest = parse_manifest(&body)?;
        Ok(self.normalizer.normalize_all(manifest))
    }

    /// Load the archive, falling back to an empty one on any failure.
    pub async fn load(&self) -> LoadOutcome {
        let location = self.source.location();
        log::debug!("Fetching manifest from {}", location);

        match self.fetch_items().await {
            Ok(normalized) => {
                for warning in &normalized.warnings {
                    log::warn!("Manifest {}", warning);
                }
                log::info!(
                    "Loaded {} archive items from {}",
                    normalized.items.len(),
                    location
                );
                LoadOutcome::loaded(normalized)
            }
            Err(error) => {
                log::error!("Failed to load manifest from {}: {}", location, error);
                LoadOutcome::failed(error.to_string())
            }
        }
    }

    /// Run [`load`](Self::load) on a background task.
    pub fn spawn(self: Arc<Self>) -> ManifestLoad {
        let handle = tokio::spawn(async move { self.load().await });
        ManifestLoad {
            handle: Some(handle),
        }
    }
}

/// Handle to an in-flight manifest load.
///
/// Dropping the handle aborts the load, so a discarded view never receives
/// a stale response.
#[derive(Debug)]
pub struct ManifestLoad {
    handle: Option<JoinHandle<LoadOutcome>>,
}

impl ManifestLoad {
    /// Abort the load. A later [`finish`](Self::finish) returns `None`.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(|h| h.is_finished())
    }

    /// Wait for the load. `None` if it was cancelled or already consumed.
    pub async fn finish(&mut self) -> Option<LoadOutcome> {
        let handle = self.handle.as_mut()?;
        let result = handle.await;
        self.handle = None;

        match result {
            Ok(outcome) => Some(outcome),
            Err(e) if e.is_cancelled() => None,
            Err(e) => {
                log::error!("Manifest load task failed: {}", e);
                Some(LoadOutcome::failed(e.to_string()))
            }
        }
    }
}

impl Drop for ManifestLoad {
    fn drop(&mut self) {
        self.cancel();
    }
}
