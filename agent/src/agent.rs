//! ExecutorAgent - the supervisory loop.
//!
//! Drives the full lifecycle: register with the coordinator, hold the
//! heartbeat/dispatch session open, feed admitted tasks to the executor, and
//! recover from every transport failure by re-registering under backoff. The
//! loop has no natural terminal state; only the shutdown token ends it, at
//! which point in-flight tasks get a bounded grace period before they are
//! aborted.

use crate::config::AgentConfig;
use crate::error::{AgentError, Result};
use crate::executor::TaskExecutor;
use crate::extractor::Extractor;
use crate::fetch::ContentFetcher;
use crate::registry::TaskRegistry;
use crate::report::OutcomeReporter;
use crate::session::HeartbeatSession;
use quarry_core::{CapabilityDescriptor, CoordinatorClient, TaskDescriptor};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Lifecycle state, published for observability and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentState {
    Unregistered,
    RegisteredIdle,
    Streaming,
    Reconnecting,
}

pub struct ExecutorAgent {
    executor_id: String,
    capability: CapabilityDescriptor,
    config: AgentConfig,
    client: CoordinatorClient,
    registry: Arc<TaskRegistry>,
    executor: Arc<TaskExecutor>,
    reporter: Arc<OutcomeReporter>,
    shutdown: CancellationToken,
    state_tx: watch::Sender<AgentState>,
}

impl ExecutorAgent {
    /// Build an agent. Generates the process-lifetime executor identity and
    /// validates the configuration; nothing touches the network yet.
    pub fn new(
        config: AgentConfig,
        capability: CapabilityDescriptor,
        fetcher: Arc<dyn ContentFetcher>,
        extractor: Arc<dyn Extractor>,
    ) -> Result<Self> {
        config.validate()?;
        let executor_id = nanoid::nanoid!();
        let client = CoordinatorClient::new(&config.coordinator_endpoint)?;
        let registry = Arc::new(TaskRegistry::new());
        let executor = Arc::new(TaskExecutor::new(
            registry.clone(),
            fetcher,
            extractor,
            &config,
        ));
        let reporter = Arc::new(OutcomeReporter::new(
            client.clone(),
            &executor_id,
            config.report_backoff.clone(),
        ));
        let (state_tx, _) = watch::channel(AgentState::Unregistered);

        Ok(Self {
            executor_id,
            capability,
            config,
            client,
            registry,
            executor,
            reporter,
            shutdown: CancellationToken::new(),
            state_tx,
        })
    }

    pub fn executor_id(&self) -> &str {
        &self.executor_id
    }

    pub fn registry(&self) -> Arc<TaskRegistry> {
        self.registry.clone()
    }

    /// Token that terminates `run` when cancelled.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Receiver for lifecycle state transitions.
    pub fn state(&self) -> watch::Receiver<AgentState> {
        self.state_tx.subscribe()
    }

    fn set_state(&self, state: AgentState) {
        // Send only fails with no receivers, which is the normal headless case.
        let _ = self.state_tx.send(state);
    }

    /// Run until the shutdown token fires. Registration failures and session
    /// teardowns are absorbed; no error short of an invalid configuration
    /// escapes this loop.
    pub async fn run(mut self) -> Result<()> {
        info!(
            executor_id = %self.executor_id,
            capability = %self.capability.name,
            coordinator = %self.config.coordinator_endpoint,
            "executor agent starting"
        );

        let shutdown = self.shutdown.clone();
        let mut in_flight: JoinSet<()> = JoinSet::new();

        while !shutdown.is_cancelled() {
            self.set_state(AgentState::Unregistered);
            if !self.register_with_backoff(&shutdown).await? {
                break;
            }
            self.set_state(AgentState::RegisteredIdle);

            let mut session = match HeartbeatSession::open(
                &mut self.client,
                &self.executor_id,
                self.config.heartbeat_interval,
            )
            .await
            {
                Ok(session) => session,
                Err(err) => {
                    warn!(error = %err, "failed to open heartbeat session");
                    self.set_state(AgentState::Reconnecting);
                    continue;
                }
            };
            self.set_state(AgentState::Streaming);
            info!("heartbeat session established");

            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => break,
                    batch = session.next_batch() => match batch {
                        Ok(Some(tasks)) => self.dispatch(tasks, &mut in_flight),
                        Ok(None) => {
                            info!("dispatch stream closed by coordinator");
                            break;
                        }
                        Err(err) => {
                            warn!(error = %err, "heartbeat session failed");
                            break;
                        }
                    }
                }
            }

            // A torn-down session does not cancel dispatched runs; they
            // continue while the agent re-registers.
            self.set_state(AgentState::Reconnecting);
        }

        info!("shutdown signal received, draining in-flight tasks");
        self.drain(in_flight).await;
        info!("executor agent stopped");
        Ok(())
    }

    /// Retry register() under the configured backoff until it succeeds.
    /// Returns false if shutdown interrupted the wait.
    async fn register_with_backoff(&mut self, shutdown: &CancellationToken) -> Result<bool> {
        let mut attempt = 0u32;
        loop {
            let register = self
                .client
                .register_executor(&self.executor_id, self.capability.clone());
            tokio::select! {
                _ = shutdown.cancelled() => return Ok(false),
                result = register => match result {
                    Ok(()) => {
                        info!(executor_id = %self.executor_id, "registered with coordinator");
                        return Ok(true);
                    }
                    Err(err) => {
                        let delay = self
                            .config
                            .registration_backoff
                            .delay_for(attempt)
                            .ok_or(AgentError::Registration(err))?;
                        warn!(attempt, delay = ?delay, "registration failed, retrying");
                        attempt += 1;
                        tokio::select! {
                            _ = shutdown.cancelled() => return Ok(false),
                            _ = tokio::time::sleep(delay) => {}
                        }
                    }
                }
            }
        }
    }

    /// Admit unseen tasks and spawn an executor run for each. Never blocks
    /// on task completion; heartbeats and later batches must keep flowing.
    fn dispatch(&self, tasks: Vec<TaskDescriptor>, in_flight: &mut JoinSet<()>) {
        // Reap already finished runs so the set does not grow unbounded.
        while let Some(joined) = in_flight.try_join_next() {
            if let Err(err) = joined {
                if err.is_panic() {
                    error!(error = %err, "task execution panicked");
                }
            }
        }

        for task in tasks {
            if !self.registry.try_admit(&task.id) {
                debug!(task_id = %task.id, "duplicate task dropped");
                continue;
            }
            info!(task_id = %task.id, "task admitted");

            let executor = self.executor.clone();
            let reporter = self.reporter.clone();
            in_flight.spawn(async move {
                let outcome = executor.run_task(task).await;
                reporter.report(&outcome).await;
            });
        }
    }

    /// Let in-flight runs finish within the grace period, then abort the rest.
    async fn drain(&self, mut in_flight: JoinSet<()>) {
        if in_flight.is_empty() {
            return;
        }
        info!(remaining = in_flight.len(), "waiting for in-flight tasks");

        let all_done = async {
            while in_flight.join_next().await.is_some() {}
        };
        if tokio::time::timeout(self.config.shutdown_grace, all_done)
            .await
            .is_err()
        {
            warn!("shutdown grace period elapsed, aborting remaining tasks");
            in_flight.shutdown().await;
        }
    }
}
