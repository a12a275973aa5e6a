//! TaskExecutor - runs one admitted task to a terminal outcome.
//!
//! Every failure mode (fetch error, bad parameters, worker crash, timeout)
//! is captured into a `TaskOutcome`; nothing here can fail the agent process.
//! A semaphore bounds how many extractions run at once so one large batch
//! from the coordinator cannot fan out without limit.

use crate::config::AgentConfig;
use crate::extractor::Extractor;
use crate::fetch::ContentFetcher;
use crate::registry::TaskRegistry;
use quarry_core::{ContentItem, TaskDescriptor, TaskOutcome};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{debug, error, warn};

pub struct TaskExecutor {
    registry: Arc<TaskRegistry>,
    fetcher: Arc<dyn ContentFetcher>,
    extractor: Arc<dyn Extractor>,
    pool: Semaphore,
    task_timeout: Duration,
}

impl TaskExecutor {
    pub fn new(
        registry: Arc<TaskRegistry>,
        fetcher: Arc<dyn ContentFetcher>,
        extractor: Arc<dyn Extractor>,
        config: &AgentConfig,
    ) -> Self {
        Self {
            registry,
            fetcher,
            extractor,
            pool: Semaphore::new(config.max_concurrent_tasks),
            task_timeout: config.task_timeout,
        }
    }

    /// Run one admitted task to completion and record the result in the
    /// registry. Returns the terminal outcome for the reporting path.
    pub async fn run_task(&self, task: TaskDescriptor) -> TaskOutcome {
        let _permit = match self.pool.acquire().await {
            Ok(permit) => permit,
            // The semaphore is never closed; keep the task terminal anyway.
            Err(_) => return TaskOutcome::failed(task.id, "executor pool closed"),
        };

        self.registry.mark_running(&task.id);
        debug!(task_id = %task.id, "task started");

        let outcome = self.execute(&task).await;

        if let Err(err) = self.registry.mark_done(&task.id, outcome.status) {
            // Double completion would mean a second run slipped past
            // admission; abort only this unit.
            error!(task_id = %task.id, error = %err, "registry completion failed");
        }

        outcome
    }

    async fn execute(&self, task: &TaskDescriptor) -> TaskOutcome {
        let bytes = match self.fetcher.fetch(&task.content).await {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(task_id = %task.id, error = %err, "content fetch failed");
                return TaskOutcome::failed(&task.id, format!("content fetch failed: {err}"));
            }
        };

        let params = if task.input_params.is_empty() {
            serde_json::json!({})
        } else {
            match serde_json::from_str(&task.input_params) {
                Ok(params) => params,
                Err(err) => {
                    warn!(task_id = %task.id, error = %err, "invalid input params");
                    return TaskOutcome::failed(&task.id, format!("invalid input params: {err}"));
                }
            }
        };

        let content = ContentItem {
            mime: task.content.mime.clone(),
            data: bytes,
            labels: task.content.labels.clone(),
            features: Vec::new(),
        };

        match tokio::time::timeout(self.task_timeout, self.extractor.extract(content, params)).await
        {
            Ok(Ok(items)) => {
                debug!(task_id = %task.id, items = items.len(), "task succeeded");
                TaskOutcome::succeeded(&task.id, items)
            }
            Ok(Err(err)) => {
                warn!(task_id = %task.id, error = %err, "extraction failed");
                TaskOutcome::failed(&task.id, err.to_string())
            }
            Err(_) => {
                warn!(task_id = %task.id, timeout = ?self.task_timeout, "task timed out");
                TaskOutcome::failed(
                    &task.id,
                    format!("task timed out after {:?}", self.task_timeout),
                )
            }
        }
    }
}
