//! Guided session runner.
//!
//! Drives the one-task-at-a-time focus workflow against the guided API.
//! Every transition replaces the whole state with the server's snapshot;
//! the runner only guards which transitions are legal from where.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use taskpilot_core::error::Result;
use taskpilot_core::guided::GuidedState;
use taskpilot_interaction::GuidedService;
use tokio::sync::RwLock;

/// What a transition call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuidedOutcome {
    /// The transition ran and the state was replaced from the response.
    Advanced,
    /// The call was refused locally: illegal from the current state, or a
    /// transition already in flight.
    Ignored,
}

enum AdvanceKind {
    Complete,
    Skip,
}

pub struct GuidedSessionRunner {
    guided: Arc<dyn GuidedService>,
    state: RwLock<GuidedState>,
    in_flight: AtomicBool,
}

impl GuidedSessionRunner {
    pub fn new(guided: Arc<dyn GuidedService>) -> Self {
        Self {
            guided,
            state: RwLock::new(GuidedState::NotStarted),
            in_flight: AtomicBool::new(false),
        }
    }

    /// A clone of the current state for rendering.
    pub async fn state(&self) -> GuidedState {
        self.state.read().await.clone()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Starts a session over tasks matching `labels`. Only valid before a
    /// session exists.
    pub async fn start(&self, duration_minutes: u32, labels: &[String]) -> Result<GuidedOutcome> {
        if !self.state.read().await.is_not_started() {
            tracing::debug!(target: "guided", "session already exists, ignoring start");
            return Ok(GuidedOutcome::Ignored);
        }
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Ok(GuidedOutcome::Ignored);
        }

        let result = self.guided.start(duration_minutes, labels).await;
        self.in_flight.store(false, Ordering::SeqCst);

        match result {
            Ok(snapshot) => {
                *self.state.write().await = GuidedState::from_snapshot(snapshot);
                Ok(GuidedOutcome::Advanced)
            }
            Err(e) => {
                tracing::warn!(target: "guided", "start failed: {e}");
                Err(e)
            }
        }
    }

    /// Completes the current task and advances.
    pub async fn complete(&self) -> Result<GuidedOutcome> {
        self.advance(AdvanceKind::Complete).await
    }

    /// Advances without completing the current task.
    pub async fn skip(&self) -> Result<GuidedOutcome> {
        self.advance(AdvanceKind::Skip).await
    }

    /// Discards a finished session so a new one can start. Local only.
    pub async fn reset(&self) {
        let mut state = self.state.write().await;
        if state.is_finished() {
            *state = GuidedState::NotStarted;
        }
    }

    async fn advance(&self, kind: AdvanceKind) -> Result<GuidedOutcome> {
        // session_id() is Some only while InProgress with a loaded task.
        let Some(session_id) = self.state.read().await.session_id().map(str::to_string) else {
            tracing::debug!(target: "guided", "no task in progress, ignoring transition");
            return Ok(GuidedOutcome::Ignored);
        };
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Ok(GuidedOutcome::Ignored);
        }

        let result = match kind {
            AdvanceKind::Complete => self.guided.complete(&session_id).await,
            AdvanceKind::Skip => self.guided.skip(&session_id).await,
        };
        self.in_flight.store(false, Ordering::SeqCst);

        match result {
            Ok(snapshot) => {
                *self.state.write().await = GuidedState::from_snapshot(snapshot);
                Ok(GuidedOutcome::Advanced)
            }
            Err(e) => {
                tracing::warn!(target: "guided", "transition failed: {e}");
                Err(e)
            }
        }
    }
}
