//! Thread domain module.
//!
//! - `message`: message log types (`Message`, `MessageRole`, `ToolCall`)
//! - `model`: active-thread state (`ThreadSession`, `ThreadSummary`,
//!   delivery tracking for the optimistic user message)

mod message;
mod model;

pub use message::{Message, MessageRole, ToolCall};
pub use model::{DeliveryMarker, DeliveryState, ThreadSession, ThreadSummary};
