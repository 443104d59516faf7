//! Thread session domain model.
//!
//! A `ThreadSession` holds the in-memory state of the active conversation:
//! the message log and the pending batch of proposed actions. It is owned
//! exclusively by the session store; everything here is pure state
//! manipulation with no I/O.

use super::message::Message;
use crate::action::{ActionBatch, ProposedAction};
use serde::{Deserialize, Serialize};

/// A row in the thread history list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadSummary {
    pub id: String,
    pub title: String,
}

/// Delivery state of the most recent optimistic user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryState {
    /// The exchange carrying this message is still in flight.
    Sending,
    /// The exchange failed; the message was never seen by the assistant.
    Failed,
}

/// Marks which log entry is the optimistic user message of the exchange
/// currently (or last) in flight, and how that exchange went.
///
/// The marker lives beside the log rather than inside `Message` so log
/// entries stay immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryMarker {
    pub message_index: usize,
    pub state: DeliveryState,
}

/// The in-memory state of the active conversation thread.
///
/// `thread_id` is `None` for a fresh, not-yet-persisted thread; the first
/// successful exchange mints the id server-side and the session adopts it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ThreadSession {
    pub thread_id: Option<String>,
    pub messages: Vec<Message>,
    pub pending_batch: ActionBatch,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery: Option<DeliveryMarker>,
}

impl ThreadSession {
    /// An empty session representing a new, unsaved chat.
    pub fn empty() -> Self {
        Self::default()
    }

    /// An empty session pinned to an existing thread id.
    ///
    /// Used when loading the thread's state failed: the user is on that
    /// thread, there is just nothing to show.
    pub fn empty_for(thread_id: impl Into<String>) -> Self {
        Self {
            thread_id: Some(thread_id.into()),
            ..Self::default()
        }
    }

    /// A session populated from fetched thread state.
    pub fn for_thread(
        thread_id: impl Into<String>,
        messages: Vec<Message>,
        actions: Vec<ProposedAction>,
    ) -> Self {
        Self {
            thread_id: Some(thread_id.into()),
            messages,
            pending_batch: ActionBatch::new(actions),
            delivery: None,
        }
    }

    /// Appends an optimistic user message ahead of its network round trip.
    ///
    /// The entry is never retracted; a later successful exchange replaces
    /// the whole log with the server's canonical version.
    pub fn append_user_message(&mut self, text: impl Into<String>) {
        self.messages.push(Message::user(text));
        self.delivery = Some(DeliveryMarker {
            message_index: self.messages.len() - 1,
            state: DeliveryState::Sending,
        });
    }

    /// Marks the in-flight optimistic message as failed, if there is one.
    pub fn mark_delivery_failed(&mut self) {
        if let Some(marker) = self.delivery.as_mut() {
            marker.state = DeliveryState::Failed;
        }
    }

    /// Atomically adopts the server's canonical state after a round trip:
    /// the full message log, a fresh batch (selection reset to all), the
    /// thread id when the session had none, and a cleared delivery marker.
    pub fn adopt(&mut self, thread_id: String, messages: Vec<Message>, actions: Vec<ProposedAction>) {
        if self.thread_id.is_none() {
            self.thread_id = Some(thread_id);
        }
        self.messages = messages;
        self.pending_batch = ActionBatch::new(actions);
        self.delivery = None;
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Whether the last send failed and its message is awaiting a resend.
    pub fn has_failed_delivery(&self) -> bool {
        matches!(
            self.delivery,
            Some(DeliveryMarker {
                state: DeliveryState::Failed,
                ..
            })
        )
    }
}
