//! Core error types shared by the quarry agent crates.

/// Error type for coordinator client operations and shared machinery.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// gRPC status returned by the coordinator
    #[error("gRPC error: {0}")]
    Grpc(#[from] tonic::Status),

    /// Transport-level failure (dial, connection reset)
    #[error("transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    /// Serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Timeout error
    #[error("timeout: {0}")]
    Timeout(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type alias for core operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Whether retrying the failed call could plausibly succeed.
    ///
    /// Transport failures and the transient gRPC codes are retryable;
    /// everything else (bad config, serialization, definitive statuses)
    /// is not.
    pub fn is_retryable(&self) -> bool {
        match self {
            CoreError::Transport(_) | CoreError::Timeout(_) => true,
            CoreError::Grpc(status) => matches!(
                status.code(),
                tonic::Code::Unavailable
                    | tonic::Code::DeadlineExceeded
                    | tonic::Code::ResourceExhausted
                    | tonic::Code::Aborted
                    | tonic::Code::Unknown
            ),
            _ => false,
        }
    }
}
