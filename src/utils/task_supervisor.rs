use std::collections::HashMap;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::error::{Error, Result};

/// Task Supervisor - tracks feed worker tasks and detects failures
///
/// Feed connections spawn their own workers (they keep the abort handle for
/// their idempotent `disconnect`); the orchestrator registers the returned
/// join handles here so dead workers surface through `check_health` instead
/// of failing silently.
pub struct TaskSupervisor {
    tasks: HashMap<String, JoinHandle<()>>,
}

impl TaskSupervisor {
    pub fn new() -> Self {
        TaskSupervisor {
            tasks: HashMap::new(),
        }
    }

    /// Register an already-spawned worker under a name. A finished or
    /// replaced predecessor under the same name is dropped.
    pub fn register(&mut self, name: impl Into<String>, handle: JoinHandle<()>) {
        let name = name.into();
        info!("Registered feed worker: {}", name);
        self.tasks.insert(name, handle);
    }

    /// Check health of all registered workers.
    /// Returns an error naming any worker that has terminated.
    pub fn check_health(&mut self) -> Result<()> {
        let mut failed_tasks = Vec::new();

        for (name, handle) in &self.tasks {
            if handle.is_finished() {
                failed_tasks.push(name.clone());
            }
        }

        if !failed_tasks.is_empty() {
            let error_msg = format!("Feed workers terminated: {:?}", failed_tasks);
            error!("{}", error_msg);

            for name in &failed_tasks {
                self.tasks.remove(name);
            }

            return Err(Error::TaskFailure(error_msg));
        }

        Ok(())
    }

    /// Get count of tracked workers
    pub fn active_task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Abort every tracked worker
    pub fn shutdown_all(&mut self) {
        info!("Shutting down {} feed workers", self.tasks.len());

        for (name, handle) in self.tasks.drain() {
            handle.abort();
            info!("Aborted worker: {}", name);
        }
    }
}

impl Default for TaskSupervisor {
    fn default() -> Self {
        Self::new()
    }
}
