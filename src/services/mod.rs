//! Services module - HTTP handlers per feature
//!
//! Handlers own the I/O boundary: fetch, validate, delegate to the pure
//! inbox core, convert to DTOs. All failure handling lives here, the
//! aggregator itself never errors.

pub mod inbox;
pub mod profile;

pub use inbox::{get_inbox, mark_conversation_read, send_reply};
pub use profile::get_profile_by_id;

use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

/// Root endpoint - health check
pub async fn root(State(_state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, "Server is running!")
}
