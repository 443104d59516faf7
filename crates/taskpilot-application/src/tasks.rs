//! Task panel state.
//!
//! Mirrors the backend's task list for display. A broken fetch degrades to
//! an empty list with a visible error; mutations go through the backend
//! and re-fetch, with completion applied optimistically as an explicit
//! snapshot/commit/rollback transaction.

use std::sync::Arc;
use taskpilot_core::error::Result;
use taskpilot_core::task::{Task, TaskDraft};
use taskpilot_interaction::TaskService;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPanelState {
    pub tasks: Vec<Task>,
    /// Failure from the last refresh, cleared by the next successful one.
    pub error: Option<String>,
}

pub struct TaskPanel {
    service: Arc<dyn TaskService>,
    state: RwLock<TaskPanelState>,
}

impl TaskPanel {
    pub fn new(service: Arc<dyn TaskService>) -> Self {
        Self {
            service,
            state: RwLock::new(TaskPanelState::default()),
        }
    }

    /// A clone of the current panel state for rendering.
    pub async fn state(&self) -> TaskPanelState {
        self.state.read().await.clone()
    }

    /// Re-fetches the task list.
    ///
    /// A failed or malformed fetch degrades to an empty list plus an error
    /// string; calling `refresh` again is the retry affordance.
    pub async fn refresh(&self) {
        match self.service.list_tasks().await {
            Ok(tasks) => {
                let mut state = self.state.write().await;
                state.tasks = tasks;
                state.error = None;
            }
            Err(e) => {
                tracing::warn!(target: "tasks", "task list refresh failed: {e}");
                let mut state = self.state.write().await;
                state.tasks.clear();
                state.error = Some(e.to_string());
            }
        }
    }

    pub async fn create(&self, draft: &TaskDraft) -> Result<()> {
        draft.validate()?;
        let result = self.service.create_task(draft).await.map(|_| ());
        self.refresh().await;
        result
    }

    pub async fn update(&self, task_id: &str, draft: &TaskDraft) -> Result<()> {
        draft.validate()?;
        let result = self.service.update_task(task_id, draft).await.map(|_| ());
        self.refresh().await;
        result
    }

    /// Completes a task optimistically: the entry disappears immediately
    /// and comes back if the backend refuses.
    pub async fn complete(&self, task_id: &str) -> Result<()> {
        let prior = self.remove_locally(task_id).await;
        match self.service.close_task(task_id).await {
            Ok(()) => {
                self.refresh().await;
                Ok(())
            }
            Err(e) => {
                self.state.write().await.tasks = prior;
                Err(e)
            }
        }
    }

    /// Deletes a task optimistically, restoring the list on failure.
    pub async fn delete(&self, task_id: &str) -> Result<()> {
        let prior = self.remove_locally(task_id).await;
        match self.service.delete_task(task_id).await {
            Ok(()) => {
                self.refresh().await;
                Ok(())
            }
            Err(e) => {
                self.state.write().await.tasks = prior;
                Err(e)
            }
        }
    }

    /// Snapshots the list, drops the task, returns the snapshot for rollback.
    async fn remove_locally(&self, task_id: &str) -> Vec<Task> {
        let mut state = self.state.write().await;
        let prior = state.tasks.clone();
        state.tasks.retain(|t| t.id != task_id);
        prior
    }
}
