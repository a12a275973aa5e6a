//! TaskRegistry - deduplicates task admission under concurrent delivery.
//!
//! The coordinator redelivers tasks over an unreliable, reconnecting channel,
//! so the same task id can arrive more than once. The registry is the single
//! piece of state shared across concurrent executor runs: admission is one
//! atomic check-and-insert under the lock, and an id is admitted at most once
//! for the lifetime of the agent process. Done entries are retained rather
//! than pruned, so redelivery after an outcome-report retry is still rejected.

use parking_lot::Mutex;
use quarry_core::TaskStatus;
use std::collections::HashMap;

/// Execution state of one admitted task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionState {
    Admitted,
    Running,
    Done(TaskStatus),
}

/// Invalid registry transition. Completing a task twice (or completing a task
/// that was never admitted) is a programming error in the caller; it aborts
/// the offending unit, never the process.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("task {0} marked done twice")]
    DoubleCompletion(String),

    #[error("task {0} was never admitted")]
    UnknownTask(String),
}

/// In-flight task map. Owned by the agent, mutated by concurrent executor
/// runs through `&self`.
#[derive(Debug, Default)]
pub struct TaskRegistry {
    tasks: Mutex<HashMap<String, ExecutionState>>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically admit `id` if it has never been seen before. Returns false
    /// for any id already admitted, running, or done.
    pub fn try_admit(&self, id: &str) -> bool {
        let mut tasks = self.tasks.lock();
        if tasks.contains_key(id) {
            return false;
        }
        tasks.insert(id.to_string(), ExecutionState::Admitted);
        true
    }

    /// Record that an admitted task has started executing.
    pub fn mark_running(&self, id: &str) {
        let mut tasks = self.tasks.lock();
        if let Some(state @ ExecutionState::Admitted) = tasks.get_mut(id) {
            *state = ExecutionState::Running;
        }
    }

    /// Transition an admitted/running task to done. Safe to call exactly once
    /// per id.
    pub fn mark_done(&self, id: &str, status: TaskStatus) -> Result<(), RegistryError> {
        let mut tasks = self.tasks.lock();
        match tasks.get_mut(id) {
            Some(ExecutionState::Done(_)) => Err(RegistryError::DoubleCompletion(id.to_string())),
            Some(state) => {
                *state = ExecutionState::Done(status);
                Ok(())
            }
            None => Err(RegistryError::UnknownTask(id.to_string())),
        }
    }

    /// Current state of a task, if it was ever admitted.
    pub fn state(&self, id: &str) -> Option<ExecutionState> {
        self.tasks.lock().get(id).copied()
    }

    /// Number of tasks admitted but not yet done.
    pub fn in_flight(&self) -> usize {
        self.tasks
            .lock()
            .values()
            .filter(|state| !matches!(state, ExecutionState::Done(_)))
            .count()
    }

    /// Total number of task ids ever admitted.
    pub fn len(&self) -> usize {
        self.tasks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.lock().is_empty()
    }
}
