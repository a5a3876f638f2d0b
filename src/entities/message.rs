//! Message entity
//!
//! Messages are immutable once created; the only mutable field is the
//! `is_read` flag, and only the receiving side may flip it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Message {
    pub message_id: String,
    pub conversation_id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub is_read: bool,
    /// Optional link to the job posting this exchange started from,
    /// display-only ("Applied to: ...").
    pub related_opportunity_id: Option<String>,
}

impl Message {
    /// A record fetched from the store is usable only when all key fields
    /// are non-blank. Records failing this check are dropped from derived
    /// views rather than propagated as errors.
    pub fn is_well_formed(&self) -> bool {
        !self.message_id.trim().is_empty()
            && !self.conversation_id.trim().is_empty()
            && !self.sender_id.trim().is_empty()
            && !self.receiver_id.trim().is_empty()
    }

    /// True when the given user is either side of the message.
    pub fn involves(&self, user_id: &str) -> bool {
        self.sender_id == user_id || self.receiver_id == user_id
    }

    pub fn is_from(&self, user_id: &str) -> bool {
        self.sender_id == user_id
    }
}
