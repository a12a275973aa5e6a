//! Content retrieval.
//!
//! A task carries a reference to the content it operates on; the fetcher
//! resolves that reference to raw bytes before extraction. A fetch failure
//! fails the task immediately, with no extraction attempt and no retry at
//! this layer.

use async_trait::async_trait;
use quarry_core::ContentSource;
use std::path::PathBuf;

/// Content retrieval failure.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("unsupported storage scheme in {url}")]
    UnsupportedScheme { url: String },

    #[error("failed to read {url}: {source}")]
    Io {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

/// Resolves a content reference to raw bytes.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch(&self, source: &ContentSource) -> Result<Vec<u8>, FetchError>;
}

/// Fetcher for `file://` storage URLs.
#[derive(Debug, Default)]
pub struct DiskFetcher;

impl DiskFetcher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ContentFetcher for DiskFetcher {
    async fn fetch(&self, source: &ContentSource) -> Result<Vec<u8>, FetchError> {
        let path = source.storage_url.strip_prefix("file://").ok_or_else(|| {
            FetchError::UnsupportedScheme {
                url: source.storage_url.clone(),
            }
        })?;
        tokio::fs::read(PathBuf::from(path))
            .await
            .map_err(|source_err| FetchError::Io {
                url: source.storage_url.clone(),
                source: source_err,
            })
    }
}
