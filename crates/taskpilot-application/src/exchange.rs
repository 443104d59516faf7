//! Message exchange engine.
//!
//! One user turn: optimistically append the utterance, run a single round
//! trip against the chat API, then adopt the server's canonical log and
//! pending actions. At most one exchange runs per session at a time.

use crate::session_store::ThreadSessionStore;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use taskpilot_core::error::Result;
use taskpilot_interaction::ChatService;

/// What `send` did with the utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The exchange completed and the session adopted the server state.
    Sent,
    /// The utterance was refused locally (empty input, or an exchange
    /// already in flight). No network call was made.
    Ignored,
}

pub struct MessageExchangeEngine {
    chat: Arc<dyn ChatService>,
    store: Arc<ThreadSessionStore>,
    in_flight: AtomicBool,
}

impl MessageExchangeEngine {
    pub fn new(chat: Arc<dyn ChatService>, store: Arc<ThreadSessionStore>) -> Self {
        Self {
            chat,
            store,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Whether an exchange is awaiting the backend. Drives the caller's
    /// typing indicator.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Sends one user utterance through the assistant.
    ///
    /// A call made while another exchange is pending is ignored, not
    /// queued. Empty or whitespace-only input is ignored without touching
    /// the session. On failure the optimistic user message stays in the
    /// log, marked failed, and the pending batch is left as it was.
    pub async fn send(&self, text: &str) -> Result<SendOutcome> {
        if text.trim().is_empty() {
            tracing::debug!(target: "exchange", "ignoring empty utterance");
            return Ok(SendOutcome::Ignored);
        }
        if self.in_flight.swap(true, Ordering::SeqCst) {
            tracing::debug!(target: "exchange", "exchange already in flight, ignoring send");
            return Ok(SendOutcome::Ignored);
        }

        let result = self.exchange(text).await;
        self.in_flight.store(false, Ordering::SeqCst);

        match result {
            Ok(()) => Ok(SendOutcome::Sent),
            Err(e) => {
                self.store.mark_delivery_failed().await;
                tracing::warn!(target: "exchange", "exchange failed: {e}");
                Err(e)
            }
        }
    }

    async fn exchange(&self, text: &str) -> Result<()> {
        let thread_id = self.store.thread_id().await;
        self.store.append_user_message(text).await;

        let exchange = self.chat.send_message(text, thread_id.as_deref()).await?;
        self.store.adopt_exchange(exchange).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockChatService, action, exchange, message_pair};
    use std::time::Duration;
    use taskpilot_core::action::ActionKind;
    use tokio::sync::Semaphore;

    fn engine_with(chat: Arc<MockChatService>) -> (Arc<MessageExchangeEngine>, Arc<ThreadSessionStore>) {
        let store = Arc::new(ThreadSessionStore::new(chat.clone()));
        let engine = Arc::new(MessageExchangeEngine::new(chat, store.clone()));
        (engine, store)
    }

    #[tokio::test]
    async fn empty_utterances_are_ignored_without_a_network_call() {
        let chat = Arc::new(MockChatService::new());
        let (engine, store) = engine_with(chat.clone());

        assert_eq!(engine.send("   ").await.unwrap(), SendOutcome::Ignored);
        assert_eq!(chat.send_calls(), 0);
        assert_eq!(store.message_count().await, 0);
    }

    #[tokio::test]
    async fn a_successful_send_adopts_the_server_state() {
        let chat = Arc::new(MockChatService::new());
        chat.push_send(Ok(exchange(
            "t1",
            message_pair("Schedule a meeting", "ok"),
            vec![action("a1", ActionKind::CreateTask)],
        )));
        let (engine, store) = engine_with(chat.clone());

        assert_eq!(
            engine.send("Schedule a meeting").await.unwrap(),
            SendOutcome::Sent
        );

        let session = store.snapshot().await;
        assert_eq!(session.thread_id.as_deref(), Some("t1"));
        assert_eq!(session.message_count(), 2);
        assert_eq!(session.pending_batch.selected_ids(), vec!["a1"]);
        assert!(session.delivery.is_none());
        assert!(!engine.is_in_flight());
    }

    #[tokio::test]
    async fn a_failed_send_keeps_the_optimistic_message_and_the_batch() {
        let chat = Arc::new(MockChatService::new());
        chat.push_send(Ok(exchange(
            "t1",
            message_pair("first", "reply"),
            vec![action("a1", ActionKind::DeleteTask)],
        )));
        let (engine, store) = engine_with(chat.clone());
        engine.send("first").await.unwrap();

        // No scripted response: the mock reports a transport failure.
        let err = engine.send("second").await.unwrap_err();
        assert!(err.is_transport());

        let session = store.snapshot().await;
        assert_eq!(session.message_count(), 3);
        assert!(session.has_failed_delivery());
        assert_eq!(session.pending_batch.selected_ids(), vec!["a1"]);
        assert!(!engine.is_in_flight());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn a_second_send_while_one_is_in_flight_is_ignored() {
        let gate = Arc::new(Semaphore::new(0));
        let chat = Arc::new(MockChatService::new().with_gate(gate.clone()));
        chat.push_send(Ok(exchange("t1", message_pair("first", "done"), Vec::new())));
        let (engine, store) = engine_with(chat.clone());

        let first = {
            let engine = engine.clone();
            tokio::spawn(async move { engine.send("first").await })
        };
        let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
        while store.message_count().await == 0 {
            assert!(
                tokio::time::Instant::now() < deadline,
                "optimistic append never happened"
            );
            tokio::time::sleep(Duration::from_millis(1)).await;
        }

        assert_eq!(engine.send("second").await.unwrap(), SendOutcome::Ignored);
        assert_eq!(store.message_count().await, 1);

        gate.add_permits(1);
        assert_eq!(first.await.unwrap().unwrap(), SendOutcome::Sent);
        assert_eq!(chat.send_calls(), 1);
        assert_eq!(store.message_count().await, 2);
    }
}
