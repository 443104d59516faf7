//! Thread session store.
//!
//! Owns the single active [`ThreadSession`]. The store is shared by handle
//! (`Arc`) between the exchange engine, the approval coordinator and the
//! caller's rendering loop; there are no process-wide singletons.

use std::sync::Arc;
use taskpilot_core::action::ActionBatch;
use taskpilot_core::thread::ThreadSession;
use taskpilot_interaction::{ChatExchange, ChatService};
use tokio::sync::RwLock;

pub struct ThreadSessionStore {
    chat: Arc<dyn ChatService>,
    session: RwLock<ThreadSession>,
}

impl ThreadSessionStore {
    /// Creates a store holding an empty, unsaved session.
    pub fn new(chat: Arc<dyn ChatService>) -> Self {
        Self {
            chat,
            session: RwLock::new(ThreadSession::empty()),
        }
    }

    /// A clone of the current session for rendering.
    pub async fn snapshot(&self) -> ThreadSession {
        self.session.read().await.clone()
    }

    pub async fn thread_id(&self) -> Option<String> {
        self.session.read().await.thread_id.clone()
    }

    pub async fn message_count(&self) -> usize {
        self.session.read().await.message_count()
    }

    pub async fn pending_batch(&self) -> ActionBatch {
        self.session.read().await.pending_batch.clone()
    }

    /// Flips selection membership for `id` on the pending batch.
    pub async fn toggle_selection(&self, id: &str) {
        self.session.write().await.pending_batch.toggle(id);
    }

    /// Switches the active thread, discarding the in-memory session.
    ///
    /// A no-op when `new_id` already is the current thread. `Some(id)`
    /// fetches the thread state in a single attempt; a failed fetch
    /// degrades to an empty session pinned to that id, with the error
    /// logged and swallowed. `None` resets to a fresh unsaved chat.
    pub async fn switch_thread(&self, new_id: Option<&str>) {
        {
            let session = self.session.read().await;
            if session.thread_id.as_deref() == new_id {
                return;
            }
        }

        let replacement = match new_id {
            None => ThreadSession::empty(),
            Some(id) => match self.chat.fetch_thread(id).await {
                Ok(state) => ThreadSession::for_thread(id, state.messages, state.actions),
                Err(e) => {
                    tracing::warn!(target: "session", thread_id = id, "failed to load thread state: {e}");
                    ThreadSession::empty_for(id)
                }
            },
        };

        *self.session.write().await = replacement;
    }

    pub(crate) async fn append_user_message(&self, text: &str) {
        self.session.write().await.append_user_message(text);
    }

    pub(crate) async fn mark_delivery_failed(&self) {
        self.session.write().await.mark_delivery_failed();
    }

    /// Adopts the server's canonical state in one critical section.
    pub(crate) async fn adopt_exchange(&self, exchange: ChatExchange) {
        self.session
            .write()
            .await
            .adopt(exchange.thread_id, exchange.messages, exchange.actions);
    }
}
