//! Inbox module - the conversation aggregation core
//!
//! Everything in here is pure, in-memory computation over data the
//! repositories have already fetched. No I/O, no shared state: the HTTP
//! layer snapshots its inputs and calls into this module.

pub mod aggregator;
pub mod conversation_key;

pub use aggregator::{ConversationSummary, InboxView, aggregate};
pub use conversation_key::conversation_key;
