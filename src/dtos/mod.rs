//! DTOs module - Data Transfer Objects
//!
//! DTOs separate the API representation from the internal entities and
//! derived views.

pub mod conversation;
pub mod message;
pub mod profile;

pub use conversation::{ConversationDTO, InboxDTO, ReadReceiptDTO};
pub use message::{CreateMessageDTO, MessageDTO, SendReplyDTO};
pub use profile::ProfileDTO;
