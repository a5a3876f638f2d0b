//! MessageRepository - message store access

use super::Create;
use crate::dtos::CreateMessageDTO;
use crate::entities::Message;
use chrono::Utc;
use sqlx::{Error, MySqlPool};
use uuid::Uuid;

pub struct MessageRepository {
    connection_pool: MySqlPool,
}

impl MessageRepository {
    pub fn new(connection_pool: MySqlPool) -> Self {
        Self { connection_pool }
    }

    /// All messages where the given user is sender or receiver. Order is
    /// not part of the contract, the aggregator establishes its own.
    pub async fn find_many_by_participant(&self, user_id: &str) -> Result<Vec<Message>, Error> {
        let messages = sqlx::query_as::<_, Message>(
            r#"
            SELECT
                message_id,
                conversation_id,
                sender_id,
                receiver_id,
                content,
                created_at,
                is_read,
                related_opportunity_id
            FROM messages
            WHERE sender_id = ? OR receiver_id = ?
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .bind(user_id)
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(messages)
    }

    /// Marks every message of one conversation addressed to `receiver_id`
    /// as read. The predicate is the receiver-only rule: a sender can
    /// never flip the flag on messages addressed to someone else, the
    /// rows simply do not match.
    ///
    /// # Returns
    /// Number of messages that transitioned from unread to read.
    pub async fn mark_conversation_read(
        &self,
        conversation_id: &str,
        receiver_id: &str,
    ) -> Result<u64, Error> {
        let result = sqlx::query(
            r#"
            UPDATE messages
            SET is_read = TRUE
            WHERE conversation_id = ?
              AND receiver_id = ?
              AND is_read = FALSE
            "#,
        )
        .bind(conversation_id)
        .bind(receiver_id)
        .execute(&self.connection_pool)
        .await?;

        Ok(result.rows_affected())
    }
}

impl Create<Message, CreateMessageDTO> for MessageRepository {
    /// Persists a new message. Id and timestamp are assigned here, the
    /// read flag always starts false.
    async fn create(&self, data: &CreateMessageDTO) -> Result<Message, Error> {
        let message = Message {
            message_id: Uuid::new_v4().to_string(),
            conversation_id: data.conversation_id.clone(),
            sender_id: data.sender_id.clone(),
            receiver_id: data.receiver_id.clone(),
            content: data.content.clone(),
            created_at: Utc::now(),
            is_read: false,
            related_opportunity_id: data.related_opportunity_id.clone(),
        };

        sqlx::query(
            r#"
            INSERT INTO messages (
                message_id,
                conversation_id,
                sender_id,
                receiver_id,
                content,
                created_at,
                is_read,
                related_opportunity_id
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&message.message_id)
        .bind(&message.conversation_id)
        .bind(&message.sender_id)
        .bind(&message.receiver_id)
        .bind(&message.content)
        .bind(message.created_at)
        .bind(message.is_read)
        .bind(&message.related_opportunity_id)
        .execute(&self.connection_pool)
        .await?;

        Ok(message)
    }
}
