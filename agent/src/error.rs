//! Error types for the quarry agent.

use crate::extractor::ExtractionError;
use crate::fetch::FetchError;
use crate::registry::RegistryError;
pub use quarry_core::{CoreError, CoreResult};

/// Main error type for the agent runtime.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// Registration handshake failed; absorbed by the supervisor's retry loop
    #[error("registration failed: {0}")]
    Registration(#[source] CoreError),

    /// Heartbeat/dispatch channel failed; triggers a full reconnect
    #[error("heartbeat session failed: {0}")]
    Session(#[source] CoreError),

    /// Content retrieval failed; fails the task, never the process
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Worker-reported failure, crash, or timeout; fails the task
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// Invalid registry transition (programming error)
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Error from the core client or shared machinery
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;
