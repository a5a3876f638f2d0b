//! Library root - exposes the modules and the router for the binary and
//! the integration tests

pub mod core;
pub mod dtos;
pub mod entities;
pub mod inbox;
pub mod repositories;
pub mod services;

pub use crate::core::{AppError, AppState, auth, config};
pub use crate::services::root;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Builds the application router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .nest("/inbox", configure_inbox_routes(state.clone()))
        .nest("/messages", configure_message_routes(state.clone()))
        .nest("/conversations", configure_conversation_routes(state.clone()))
        .nest("/profiles", configure_profile_routes(state.clone()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Conversation-list aggregation
fn configure_inbox_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::authentication_middleware;
    use crate::services::get_inbox;

    Router::new()
        .route("/", get(get_inbox))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}

/// Send-reply
fn configure_message_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::authentication_middleware;
    use crate::services::send_reply;

    Router::new()
        .route("/", post(send_reply))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}

/// Read-state transition
fn configure_conversation_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::authentication_middleware;
    use crate::services::mark_conversation_read;

    Router::new()
        .route("/{conversation_id}/read", post(mark_conversation_read))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}

/// Profile lookup passthrough
fn configure_profile_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::authentication_middleware;
    use crate::services::get_profile_by_id;

    Router::new()
        .route("/{profile_id}", get(get_profile_by_id))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}
