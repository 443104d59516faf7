//! Proposed actions and the selection set over a pending batch.
//!
//! A proposed action is an assistant-requested task mutation held for human
//! approval before execution. The batch attached to the latest assistant
//! turn carries a selection set: the subset of action ids the user intends
//! to approve.

use crate::task::Task;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fmt;

/// The kind of mutation an assistant proposes.
///
/// Known kinds map to the backend's tool names; anything else is preserved
/// verbatim in `Other` so newer backends keep working against this client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionKind {
    CreateTask,
    UpdateTask,
    DeleteTask,
    CompleteTask,
    Other(String),
}

impl ActionKind {
    /// The backend tool name for this kind.
    pub fn as_str(&self) -> &str {
        match self {
            Self::CreateTask => "create_task",
            Self::UpdateTask => "update_task",
            Self::DeleteTask => "delete_task",
            Self::CompleteTask => "complete_task",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for ActionKind {
    fn from(name: String) -> Self {
        match name.as_str() {
            "create_task" => Self::CreateTask,
            "update_task" => Self::UpdateTask,
            "delete_task" => Self::DeleteTask,
            "complete_task" => Self::CompleteTask,
            _ => Self::Other(name),
        }
    }
}

impl From<ActionKind> for String {
    fn from(kind: ActionKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An assistant-requested task mutation awaiting human approval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposedAction {
    /// Tool-call id, unique within the batch
    pub id: String,
    pub name: ActionKind,
    /// Field -> new value mapping for the mutation
    #[serde(default)]
    pub args: Map<String, Value>,
    /// Snapshot of the task before the action, when the backend resolved one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_details: Option<Task>,
}

impl ProposedAction {
    /// Creates an action with the given id and kind and empty args.
    pub fn new(id: impl Into<String>, name: ActionKind) -> Self {
        Self {
            id: id.into(),
            name,
            args: Map::new(),
            task_details: None,
        }
    }
}

/// The pending proposed actions of the latest assistant turn, plus the
/// user's selection over them.
///
/// Invariants:
/// - the selection is always a subset of the ids present in the batch;
/// - a freshly created batch starts with every action selected.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ActionBatch {
    actions: Vec<ProposedAction>,
    selected: BTreeSet<String>,
}

impl ActionBatch {
    /// Creates a batch over `actions` with every id selected.
    pub fn new(actions: Vec<ProposedAction>) -> Self {
        let selected = actions.iter().map(|a| a.id.clone()).collect();
        Self { actions, selected }
    }

    /// Creates an empty batch.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Flips selection membership for `id`.
    ///
    /// Unknown ids are ignored, so toggling is always its own inverse and
    /// the subset invariant cannot be broken.
    pub fn toggle(&mut self, id: &str) {
        if !self.contains(id) {
            return;
        }
        if !self.selected.remove(id) {
            self.selected.insert(id.to_string());
        }
    }

    /// Whether an action with `id` is present in the batch.
    pub fn contains(&self, id: &str) -> bool {
        self.actions.iter().any(|a| a.id == id)
    }

    /// Whether `id` is currently selected for approval.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// The selected ids, in batch order.
    pub fn selected_ids(&self) -> Vec<String> {
        self.actions
            .iter()
            .filter(|a| self.selected.contains(&a.id))
            .map(|a| a.id.clone())
            .collect()
    }

    /// Number of selected actions.
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// The actions in the batch, in arrival order.
    pub fn actions(&self) -> &[ProposedAction] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
