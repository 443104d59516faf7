//! Task domain model.
//!
//! Tasks are owned by the external backend; this module only mirrors the
//! resource shape the task endpoints expose, plus the draft type used when
//! creating or updating one.

use crate::error::{Result, TaskpilotError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A task as exposed by the backend task endpoints.
///
/// Unknown or absent fields default so that older or partial payloads still
/// deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Backend-assigned identifier
    pub id: String,
    /// Short task text shown in lists
    pub content: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Priority from 1 (normal) to 4 (urgent)
    #[serde(default = "default_priority")]
    pub priority: u8,
    /// Human-readable due phrase (e.g. "tomorrow at 9am")
    #[serde(default)]
    pub due_string: Option<String>,
    /// Resolved due date, if the backend computed one
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_priority() -> u8 {
    1
}

impl Task {
    /// Creates a task with the given id and content and default fields.
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            description: None,
            priority: default_priority(),
            due_string: None,
            due_date: None,
            labels: Vec::new(),
            project_id: None,
            is_completed: false,
            url: None,
            created_at: None,
        }
    }
}

/// Fields for creating or updating a task.
///
/// Only the fields the caller sets are sent; the backend fills the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskDraft {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_string: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
}

impl TaskDraft {
    /// Creates a draft with the given content and no other fields set.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the due phrase.
    pub fn with_due(mut self, due_string: impl Into<String>) -> Self {
        self.due_string = Some(due_string.into());
        self
    }

    /// Sets the priority (1-4).
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Validates the draft before it is sent to the backend.
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error when the content is empty or the
    /// priority falls outside 1-4.
    pub fn validate(&self) -> Result<()> {
        if self.content.trim().is_empty() {
            return Err(TaskpilotError::validation("task content must not be empty"));
        }
        if let Some(priority) = self.priority
            && !(1..=4).contains(&priority)
        {
            return Err(TaskpilotError::validation(format!(
                "priority must be within 1-4, got {priority}"
            )));
        }
        Ok(())
    }
}
