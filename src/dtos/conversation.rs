//! Conversation DTOs
//!
//! The wire shape of the aggregated inbox: ordered summaries plus the
//! per-conversation thread map.

use super::{MessageDTO, ProfileDTO};
use crate::inbox::{ConversationSummary, InboxView};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ConversationDTO {
    pub conversation_id: String,
    pub counterpart: ProfileDTO,
    pub last_message: MessageDTO,
    pub unread_count: usize,
}

impl From<ConversationSummary> for ConversationDTO {
    fn from(value: ConversationSummary) -> Self {
        Self {
            conversation_id: value.conversation_id,
            counterpart: ProfileDTO::from(value.counterpart),
            last_message: MessageDTO::from(value.last_message),
            unread_count: value.unread_count,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct InboxDTO {
    pub conversations: Vec<ConversationDTO>,
    pub messages_by_conversation: HashMap<String, Vec<MessageDTO>>,
}

impl From<InboxView> for InboxDTO {
    fn from(value: InboxView) -> Self {
        Self {
            conversations: value
                .conversations
                .into_iter()
                .map(ConversationDTO::from)
                .collect(),
            messages_by_conversation: value
                .messages_by_conversation
                .into_iter()
                .map(|(id, thread)| (id, thread.into_iter().map(MessageDTO::from).collect()))
                .collect(),
        }
    }
}

/// Response of the mark-conversation-read operation.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ReadReceiptDTO {
    pub conversation_id: String,
    /// Messages that transitioned from unread to read.
    pub marked_read: u64,
}
