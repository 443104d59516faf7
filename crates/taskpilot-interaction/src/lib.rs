//! HTTP clients for the Taskpilot backend.
//!
//! Each external collaborator is a trait (`ChatService`, `GuidedService`,
//! `TaskService`) with a `reqwest`-backed implementation, so the
//! application layer and its tests can substitute their own.

mod http;
mod wire;

pub mod chat;
pub mod guided;
pub mod tasks;

pub use chat::{
    ChatExchange, ChatService, ChatStatus, DEFAULT_REJECT_REASON, HttpChatService, ThreadState,
};
pub use guided::{GuidedService, HttpGuidedService};
pub use tasks::{HttpTaskService, TaskService};
