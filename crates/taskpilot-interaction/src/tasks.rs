//! Task CRUD service.
//!
//! Tasks live in the external backend; this client only reads and mutates
//! them. The list endpoint is shape-checked before anything is trusted: a
//! non-array payload degrades to a typed error the panel can show.

use crate::http::HttpEndpoint;
use async_trait::async_trait;
use serde_json::Value;
use taskpilot_core::config::ClientConfig;
use taskpilot_core::error::{Result, TaskpilotError};
use taskpilot_core::task::{Task, TaskDraft};

/// The backend's task API.
#[async_trait]
pub trait TaskService: Send + Sync {
    async fn list_tasks(&self) -> Result<Vec<Task>>;
    async fn create_task(&self, draft: &TaskDraft) -> Result<Task>;
    async fn update_task(&self, task_id: &str, draft: &TaskDraft) -> Result<Task>;
    /// Marks a task completed.
    async fn close_task(&self, task_id: &str) -> Result<()>;
    async fn delete_task(&self, task_id: &str) -> Result<()>;
}

/// `TaskService` over the backend's HTTP API.
#[derive(Clone)]
pub struct HttpTaskService {
    endpoint: HttpEndpoint,
}

impl HttpTaskService {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            endpoint: HttpEndpoint::new(config),
        }
    }
}

#[async_trait]
impl TaskService for HttpTaskService {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        let payload: Value = self.endpoint.get("/tasks/").await?;
        parse_task_list(payload)
    }

    async fn create_task(&self, draft: &TaskDraft) -> Result<Task> {
        draft.validate()?;
        self.endpoint.post("/tasks/", draft).await
    }

    async fn update_task(&self, task_id: &str, draft: &TaskDraft) -> Result<Task> {
        draft.validate()?;
        self.endpoint.put(&format!("/tasks/{task_id}"), draft).await
    }

    async fn close_task(&self, task_id: &str) -> Result<()> {
        let _: Value = self
            .endpoint
            .post_empty(&format!("/tasks/{task_id}/close"))
            .await?;
        Ok(())
    }

    async fn delete_task(&self, task_id: &str) -> Result<()> {
        self.endpoint.delete(&format!("/tasks/{task_id}")).await
    }
}

/// Validates that the list payload is actually a list before decoding it.
fn parse_task_list(payload: Value) -> Result<Vec<Task>> {
    let Value::Array(items) = payload else {
        return Err(TaskpilotError::malformed(
            "task list",
            format!("got {}", json_type(&payload)),
        ));
    };
    items
        .into_iter()
        .map(|item| {
            serde_json::from_value(item)
                .map_err(|e| TaskpilotError::malformed("task object", e.to_string()))
        })
        .collect()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
