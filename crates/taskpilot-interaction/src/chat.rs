//! Chat service: message exchange, approval decisions, thread state.
//!
//! The trait is the substitution seam for the application layer and its
//! tests; `HttpChatService` is the production implementation over the
//! backend's `/chat` endpoints.

use crate::http::HttpEndpoint;
use crate::wire::{
    ApproveRequest, ChatRequest, ChatResponse, RejectRequest, ThreadListResponse,
    ThreadStateResponse,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use taskpilot_core::action::ProposedAction;
use taskpilot_core::config::ClientConfig;
use taskpilot_core::error::Result;
use taskpilot_core::thread::{Message, ThreadSummary};

/// Reason attached to a reject when the caller gives none.
pub const DEFAULT_REJECT_REASON: &str = "Rejected by user";

/// Where the conversation stands after an exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatStatus {
    Ready,
    WaitingForApproval,
    /// A status this client does not recognize yet.
    #[serde(other)]
    #[default]
    Unknown,
}

/// The server's canonical state after a message, approve or reject round
/// trip: the full message log plus whatever actions are still pending.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatExchange {
    pub thread_id: String,
    pub messages: Vec<Message>,
    pub actions: Vec<ProposedAction>,
    pub status: ChatStatus,
}

/// Stored state of an existing thread.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ThreadState {
    pub messages: Vec<Message>,
    pub actions: Vec<ProposedAction>,
}

/// The backend's chat API.
///
/// All calls are single attempts; retry policy belongs to the caller.
#[async_trait]
pub trait ChatService: Send + Sync {
    /// Sends one user utterance and returns the server's canonical state.
    ///
    /// `thread_id` is `None` on the first turn of a new thread; the server
    /// mints an id and returns it.
    async fn send_message(&self, text: &str, thread_id: Option<&str>) -> Result<ChatExchange>;

    /// Fetches the stored state of an existing thread.
    async fn fetch_thread(&self, thread_id: &str) -> Result<ThreadState>;

    /// Approves the given tool-call ids out of the pending batch.
    async fn approve(
        &self,
        thread_id: &str,
        approved_tool_call_ids: &[String],
    ) -> Result<ChatExchange>;

    /// Rejects the entire pending batch.
    async fn reject(&self, thread_id: &str, reason: Option<&str>) -> Result<ChatExchange>;

    /// Lists the persisted threads for the history panel.
    async fn list_threads(&self) -> Result<Vec<ThreadSummary>>;
}

/// `ChatService` over the backend's HTTP API.
#[derive(Clone)]
pub struct HttpChatService {
    endpoint: HttpEndpoint,
}

impl HttpChatService {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            endpoint: HttpEndpoint::new(config),
        }
    }
}

#[async_trait]
impl ChatService for HttpChatService {
    async fn send_message(&self, text: &str, thread_id: Option<&str>) -> Result<ChatExchange> {
        let request = ChatRequest {
            message: text,
            thread_id,
        };
        let response: ChatResponse = self.endpoint.post("/chat/message", &request).await?;
        Ok(response.into_exchange())
    }

    async fn fetch_thread(&self, thread_id: &str) -> Result<ThreadState> {
        let response: ThreadStateResponse = self
            .endpoint
            .get(&format!("/chat/threads/{thread_id}"))
            .await?;
        Ok(response.into_state())
    }

    async fn approve(
        &self,
        thread_id: &str,
        approved_tool_call_ids: &[String],
    ) -> Result<ChatExchange> {
        let request = ApproveRequest {
            thread_id,
            approved_tool_call_ids,
        };
        let response: ChatResponse = self.endpoint.post("/chat/approve", &request).await?;
        Ok(response.into_exchange())
    }

    async fn reject(&self, thread_id: &str, reason: Option<&str>) -> Result<ChatExchange> {
        let request = RejectRequest {
            thread_id,
            reason: reason.unwrap_or(DEFAULT_REJECT_REASON),
        };
        let response: ChatResponse = self.endpoint.post("/chat/reject", &request).await?;
        Ok(response.into_exchange())
    }

    async fn list_threads(&self) -> Result<Vec<ThreadSummary>> {
        let response: ThreadListResponse = self.endpoint.get("/chat/threads").await?;
        Ok(response.threads)
    }
}
