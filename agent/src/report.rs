//! Outcome reporting.
//!
//! The coordinator can only advance task state if it learns how each task
//! ended, so every executor run hands its outcome here. Transient report
//! failures are retried under a bounded backoff; a report that still cannot
//! be delivered is logged at error level and dropped. The registry upstream
//! guarantees at most one run (and so at most one report attempt sequence)
//! per task id.

use quarry_core::{BackoffPolicy, CoordinatorClient, TaskOutcome};
use tracing::{debug, error, warn};

pub struct OutcomeReporter {
    client: CoordinatorClient,
    executor_id: String,
    backoff: BackoffPolicy,
}

impl OutcomeReporter {
    pub fn new(client: CoordinatorClient, executor_id: &str, backoff: BackoffPolicy) -> Self {
        Self {
            client,
            executor_id: executor_id.to_string(),
            backoff,
        }
    }

    /// Deliver one outcome, retrying transient failures until the backoff
    /// budget is spent.
    pub async fn report(&self, outcome: &TaskOutcome) {
        let mut attempt = 0u32;
        loop {
            let mut client = self.client.clone();
            match client.report_task_outcome(&self.executor_id, outcome).await {
                Ok(()) => {
                    debug!(task_id = %outcome.task_id, status = ?outcome.status, "outcome reported");
                    return;
                }
                Err(err) if err.is_retryable() => match self.backoff.delay_for(attempt) {
                    Some(delay) => {
                        warn!(
                            task_id = %outcome.task_id,
                            attempt,
                            error = %err,
                            "outcome report failed, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                    }
                    None => {
                        error!(
                            task_id = %outcome.task_id,
                            error = %err,
                            "outcome report dropped after retries"
                        );
                        return;
                    }
                },
                Err(err) => {
                    error!(task_id = %outcome.task_id, error = %err, "outcome report rejected");
                    return;
                }
            }
        }
    }
}
