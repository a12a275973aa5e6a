//! Agent configuration.

use crate::error::{AgentError, Result};
use quarry_core::{BackoffPolicy, CoordinatorClient};
use std::time::Duration;

/// Configuration for the executor agent.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Coordinator endpoint URI (e.g. `http://localhost:8950`).
    pub coordinator_endpoint: String,
    /// Cadence of the liveness signal on the dispatch channel.
    pub heartbeat_interval: Duration,
    /// Upper bound on concurrently running extraction workers.
    pub max_concurrent_tasks: usize,
    /// Hard per-task execution timeout; a worker past it is killed.
    pub task_timeout: Duration,
    /// Delay policy for the register -> heartbeat cycle after a failure.
    pub registration_backoff: BackoffPolicy,
    /// Delay policy for retrying a failed outcome report.
    pub report_backoff: BackoffPolicy,
    /// How long in-flight tasks may keep running after a shutdown signal.
    pub shutdown_grace: Duration,
}

impl AgentConfig {
    /// Configuration with defaults for the given coordinator endpoint.
    pub fn new(coordinator_endpoint: impl Into<String>) -> Self {
        Self {
            coordinator_endpoint: coordinator_endpoint.into(),
            heartbeat_interval: Duration::from_secs(5),
            max_concurrent_tasks: 8,
            task_timeout: Duration::from_secs(300),
            registration_backoff: BackoffPolicy::default(),
            report_backoff: BackoffPolicy::exponential(
                Duration::from_millis(500),
                Duration::from_secs(10),
                2.0,
                Some(5),
            ),
            shutdown_grace: Duration::from_secs(10),
        }
    }

    /// Set the heartbeat interval.
    pub fn with_heartbeat_interval(mut self, interval: Duration) -> Self {
        self.heartbeat_interval = interval;
        self
    }

    /// Set the concurrent-task bound.
    pub fn with_max_concurrent_tasks(mut self, max: usize) -> Self {
        self.max_concurrent_tasks = max;
        self
    }

    /// Set the per-task execution timeout.
    pub fn with_task_timeout(mut self, timeout: Duration) -> Self {
        self.task_timeout = timeout;
        self
    }

    /// Set the registration/reconnect backoff policy.
    pub fn with_registration_backoff(mut self, policy: BackoffPolicy) -> Self {
        self.registration_backoff = policy;
        self
    }

    /// Set the shutdown grace period.
    pub fn with_shutdown_grace(mut self, grace: Duration) -> Self {
        self.shutdown_grace = grace;
        self
    }

    /// Validate field ranges and the endpoint URI.
    pub fn validate(&self) -> Result<()> {
        if self.heartbeat_interval.is_zero() {
            return Err(AgentError::InvalidConfiguration(
                "heartbeat_interval must be positive".to_string(),
            ));
        }
        if self.max_concurrent_tasks == 0 {
            return Err(AgentError::InvalidConfiguration(
                "max_concurrent_tasks must be positive".to_string(),
            ));
        }
        if self.task_timeout.is_zero() {
            return Err(AgentError::InvalidConfiguration(
                "task_timeout must be positive".to_string(),
            ));
        }
        CoordinatorClient::validate_endpoint(&self.coordinator_endpoint)
            .map_err(|e| AgentError::InvalidConfiguration(e.to_string()))?;
        Ok(())
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new("http://localhost:8950")
    }
}
