//! Approval coordinator.
//!
//! The user selects a subset of the pending batch and either approves the
//! selection or rejects the whole batch. Both decisions are server round
//! trips whose response is the new canonical state: executing approved
//! actions may advance the conversation and leave residual or follow-on
//! proposals, so the response always replaces the log and the batch
//! together, never a local edit of either.

use crate::session_store::ThreadSessionStore;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use taskpilot_core::error::Result;
use taskpilot_interaction::ChatService;

/// What a decision call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalOutcome {
    /// The decision was submitted and the session adopted the server state.
    Applied,
    /// The call was refused locally (nothing selected, no active thread,
    /// or a decision already in flight). No network call was made.
    Ignored,
}

pub struct ApprovalCoordinator {
    chat: Arc<dyn ChatService>,
    store: Arc<ThreadSessionStore>,
    processing: AtomicBool,
}

impl ApprovalCoordinator {
    pub fn new(chat: Arc<dyn ChatService>, store: Arc<ThreadSessionStore>) -> Self {
        Self {
            chat,
            store,
            processing: AtomicBool::new(false),
        }
    }

    /// Whether a decision is awaiting the backend. Disables the approve
    /// and reject affordances while set.
    pub fn is_processing(&self) -> bool {
        self.processing.load(Ordering::SeqCst)
    }

    /// Flips selection membership for `id` on the pending batch.
    pub async fn toggle(&self, id: &str) {
        self.store.toggle_selection(id).await;
    }

    /// `(selected, total)` over the pending batch.
    pub async fn selection_summary(&self) -> (usize, usize) {
        let batch = self.store.pending_batch().await;
        (batch.selected_count(), batch.len())
    }

    /// Submits the current selection for execution.
    ///
    /// Requires an active thread and a non-empty selection. On failure the
    /// batch stays pending so the user can retry.
    pub async fn approve(&self) -> Result<ApprovalOutcome> {
        let Some(thread_id) = self.store.thread_id().await else {
            tracing::debug!(target: "approval", "no active thread, ignoring approve");
            return Ok(ApprovalOutcome::Ignored);
        };
        let selected = self.store.pending_batch().await.selected_ids();
        if selected.is_empty() {
            tracing::debug!(target: "approval", "empty selection, ignoring approve");
            return Ok(ApprovalOutcome::Ignored);
        }
        if self.processing.swap(true, Ordering::SeqCst) {
            return Ok(ApprovalOutcome::Ignored);
        }

        let result = self.chat.approve(&thread_id, &selected).await;
        self.processing.store(false, Ordering::SeqCst);

        match result {
            Ok(exchange) => {
                self.store.adopt_exchange(exchange).await;
                Ok(ApprovalOutcome::Applied)
            }
            Err(e) => {
                tracing::warn!(target: "approval", "approve failed, batch stays pending: {e}");
                Err(e)
            }
        }
    }

    /// Rejects the entire pending batch, regardless of the selection.
    ///
    /// `reason` falls back to the backend's default when `None`. On failure
    /// the batch stays pending.
    pub async fn reject(&self, reason: Option<&str>) -> Result<ApprovalOutcome> {
        let Some(thread_id) = self.store.thread_id().await else {
            tracing::debug!(target: "approval", "no active thread, ignoring reject");
            return Ok(ApprovalOutcome::Ignored);
        };
        if self.store.pending_batch().await.is_empty() {
            tracing::debug!(target: "approval", "no pending batch, ignoring reject");
            return Ok(ApprovalOutcome::Ignored);
        }
        if self.processing.swap(true, Ordering::SeqCst) {
            return Ok(ApprovalOutcome::Ignored);
        }

        let result = self.chat.reject(&thread_id, reason).await;
        self.processing.store(false, Ordering::SeqCst);

        match result {
            Ok(exchange) => {
                self.store.adopt_exchange(exchange).await;
                Ok(ApprovalOutcome::Applied)
            }
            Err(e) => {
                tracing::warn!(target: "approval", "reject failed, batch stays pending: {e}");
                Err(e)
            }
        }
    }
}
