//! The extraction seam.
//!
//! The agent hosts exactly one extraction capability, reached through the
//! [`Extractor`] trait: `describe` yields the capability descriptor sent at
//! registration, `extract` turns fetched content plus parameters into derived
//! content items. The production implementation crosses a process boundary
//! ([`worker::WorkerProcessExtractor`]); tests substitute in-process doubles.

mod worker;

pub use worker::WorkerProcessExtractor;

use async_trait::async_trait;
use quarry_core::{CapabilityDescriptor, ContentItem};
use std::time::Duration;

/// Extraction failure. All variants fail the task, never the agent.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    /// Worker process could not be started
    #[error("failed to run worker: {0}")]
    Spawn(#[source] std::io::Error),

    /// Worker process exited with a nonzero status
    #[error("worker exited with status {status}: {stderr}")]
    WorkerFailed { status: i32, stderr: String },

    /// Worker ran but reported an extraction error
    #[error("extraction failed: {0}")]
    Reported(String),

    /// Worker output could not be parsed
    #[error("worker produced invalid output: {0}")]
    InvalidOutput(#[source] serde_json::Error),

    /// Worker exceeded the execution timeout and was killed
    #[error("worker timed out after {0:?}")]
    Timeout(Duration),
}

/// An extraction capability.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// The capability's self-description.
    async fn describe(&self) -> Result<CapabilityDescriptor, ExtractionError>;

    /// Produce zero or more derived content items from one piece of content.
    async fn extract(
        &self,
        content: ContentItem,
        params: serde_json::Value,
    ) -> Result<Vec<ContentItem>, ExtractionError>;
}
