//! Client-side workflows for Taskpilot.
//!
//! This crate owns the state machines that sit between the UI and the
//! backend services:
//!
//! - [`ThreadSessionStore`]: the single active conversation thread
//! - [`MessageExchangeEngine`]: one user turn through the assistant
//! - [`ApprovalCoordinator`]: approve/reject decisions over proposed actions
//! - [`GuidedSessionRunner`]: the one-task-at-a-time focus workflow
//! - [`HistoryPoller`]: background thread-history refresh
//! - [`TaskPanel`]: the displayed task list
//!
//! Everything runs on the caller's tokio runtime; the services injected at
//! construction are the only I/O.

pub mod approval;
pub mod exchange;
pub mod guided;
pub mod history;
pub mod session_store;
pub mod tasks;

pub use approval::{ApprovalCoordinator, ApprovalOutcome};
pub use exchange::{MessageExchangeEngine, SendOutcome};
pub use guided::{GuidedOutcome, GuidedSessionRunner};
pub use history::{HistoryPoller, HistoryPollerHandle};
pub use session_store::ThreadSessionStore;
pub use tasks::{TaskPanel, TaskPanelState};

#[cfg(test)]
pub(crate) mod test_support;
