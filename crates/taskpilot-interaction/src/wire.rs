//! Wire payloads for the backend endpoints.
//!
//! These mirror the backend's snake_case JSON exactly; the service modules
//! convert them into the domain shapes the application layer consumes.

use crate::chat::{ChatExchange, ChatStatus, ThreadState};
use serde::{Deserialize, Serialize};
use taskpilot_core::action::ProposedAction;
use taskpilot_core::thread::{Message, ThreadSummary};

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ApproveRequest<'a> {
    pub thread_id: &'a str,
    pub approved_tool_call_ids: &'a [String],
}

#[derive(Debug, Serialize)]
pub(crate) struct RejectRequest<'a> {
    pub thread_id: &'a str,
    pub reason: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    pub thread_id: String,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub proposed_actions: Vec<ProposedAction>,
    /// Legacy field: older backends send a single action here instead of
    /// filling `proposed_actions`.
    #[serde(default)]
    pub proposed_action: Option<ProposedAction>,
    #[serde(default)]
    pub status: ChatStatus,
}

impl ChatResponse {
    /// Folds the legacy single-action field into the batch shape.
    pub(crate) fn into_exchange(self) -> ChatExchange {
        let actions = if self.proposed_actions.is_empty() {
            self.proposed_action.into_iter().collect()
        } else {
            self.proposed_actions
        };
        ChatExchange {
            thread_id: self.thread_id,
            messages: self.messages,
            actions,
            status: self.status,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ThreadStateResponse {
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub proposed_actions: Vec<ProposedAction>,
}

impl ThreadStateResponse {
    pub(crate) fn into_state(self) -> ThreadState {
        ThreadState {
            messages: self.messages,
            actions: self.proposed_actions,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ThreadListResponse {
    #[serde(default)]
    pub threads: Vec<ThreadSummary>,
}

#[derive(Debug, Serialize)]
pub(crate) struct GuidedStartRequest<'a> {
    pub duration_minutes: u32,
    pub labels: &'a [String],
}
