//! Inbox services - conversation list, send-reply, read transition

use crate::core::{AppError, AppState, AuthenticatedViewer};
use crate::dtos::{CreateMessageDTO, InboxDTO, MessageDTO, ReadReceiptDTO, SendReplyDTO};
use crate::inbox::{aggregate, conversation_key};
use crate::repositories::{Create, ReadMany};
use axum::{
    Extension,
    extract::{Json, Path, State},
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

#[instrument(skip(state, viewer), fields(viewer_id = %viewer.profile_id))]
pub async fn get_inbox(
    State(state): State<Arc<AppState>>,
    Extension(viewer): Extension<AuthenticatedViewer>,
) -> Result<Json<InboxDTO>, AppError> {
    debug!("Aggregating inbox for viewer");
    // 1. Fetch every message where the viewer is sender or receiver.
    // 2. Resolve the profiles of every participant seen on those messages.
    // 3. Run the pure aggregation over the snapshot.
    // 4. Convert to the wire shape.
    let messages = state
        .msg
        .find_many_by_participant(&viewer.profile_id)
        .await?;

    debug!("Fetched {} messages for viewer", messages.len());

    let mut participant_ids: Vec<String> = messages
        .iter()
        .flat_map(|m| [m.sender_id.clone(), m.receiver_id.clone()])
        .collect();
    participant_ids.sort_unstable();
    participant_ids.dedup();

    let profiles = state
        .profile
        .read_many(&participant_ids)
        .await?
        .into_iter()
        .map(|p| (p.profile_id.clone(), p))
        .collect::<HashMap<_, _>>();

    let view = aggregate(&messages, &profiles, Some(&viewer.profile_id));

    info!(
        "Inbox aggregated: {} conversations from {} messages",
        view.conversations.len(),
        messages.len()
    );
    Ok(Json(InboxDTO::from(view)))
}

#[instrument(skip(state, viewer, body), fields(sender_id = %viewer.profile_id))]
pub async fn send_reply(
    State(state): State<Arc<AppState>>,
    Extension(viewer): Extension<AuthenticatedViewer>,
    Json(body): Json<SendReplyDTO>,
) -> Result<Json<MessageDTO>, AppError> {
    debug!("Sending reply");
    body.validate()?;

    let receiver_id = body.receiver_id.trim();
    if receiver_id == viewer.profile_id {
        warn!("Viewer attempted to message themselves");
        return Err(AppError::bad_request("Receiver must differ from sender"));
    }

    // First-contact messages get a deterministic conversation id from the
    // unordered participant pair, so either side initiating lands in the
    // same conversation.
    let conversation_id = body
        .conversation_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .unwrap_or_else(|| conversation_key(&viewer.profile_id, receiver_id));

    let new_message = CreateMessageDTO {
        conversation_id,
        sender_id: viewer.profile_id.clone(),
        receiver_id: receiver_id.to_string(),
        content: body.content.clone(),
        related_opportunity_id: body.related_opportunity_id.clone(),
    };

    let message = state.msg.create(&new_message).await?;

    info!(
        "Message {} sent in conversation {}",
        message.message_id, message.conversation_id
    );
    Ok(Json(MessageDTO::from(message)))
}

#[instrument(skip(state, viewer), fields(viewer_id = %viewer.profile_id, conversation_id = %conversation_id))]
pub async fn mark_conversation_read(
    State(state): State<Arc<AppState>>,
    Path(conversation_id): Path<String>,
    Extension(viewer): Extension<AuthenticatedViewer>,
) -> Result<Json<ReadReceiptDTO>, AppError> {
    debug!("Marking conversation read");
    // Unread -> Read is terminal and receiver-only; the repository
    // predicate only ever matches messages addressed to the viewer.
    let marked_read = state
        .msg
        .mark_conversation_read(&conversation_id, &viewer.profile_id)
        .await?;

    info!("Marked {} messages read", marked_read);
    Ok(Json(ReadReceiptDTO {
        conversation_id,
        marked_read,
    }))
}
