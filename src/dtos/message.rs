//! Message DTOs

use crate::entities::Message;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MessageDTO {
    pub message_id: String,
    pub conversation_id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub is_read: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_opportunity_id: Option<String>,
}

impl From<Message> for MessageDTO {
    fn from(value: Message) -> Self {
        Self {
            message_id: value.message_id,
            conversation_id: value.conversation_id,
            sender_id: value.sender_id,
            receiver_id: value.receiver_id,
            content: value.content,
            created_at: value.created_at,
            is_read: value.is_read,
            related_opportunity_id: value.related_opportunity_id,
        }
    }
}

/// Inbound body of the send-reply operation. Sender identity comes from
/// the token, never from the body.
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct SendReplyDTO {
    #[validate(custom(function = "not_blank"))]
    pub receiver_id: String,

    #[validate(
        custom(function = "not_blank"),
        length(max = 5000, message = "Message content must be at most 5000 characters")
    )]
    pub content: String,

    /// Absent on first contact; the service derives a deterministic id
    /// from the participant pair.
    pub conversation_id: Option<String>,

    pub related_opportunity_id: Option<String>,
}

/// Internal DTO handed to the message repository once validation passed.
/// Id, timestamp and read flag are assigned at persistence.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateMessageDTO {
    pub conversation_id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
    pub related_opportunity_id: Option<String>,
}

/// Rejects values that are empty once trimmed.
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.message = Some("Value must not be blank".into());
        return Err(error);
    }
    Ok(())
}
