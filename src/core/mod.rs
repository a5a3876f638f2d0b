//! Core module - infrastructural components
//!
//! - JWT verification and the authenticated-viewer middleware
//! - Configuration
//! - Error handling
//! - Application state

pub mod auth;
pub mod config;
pub mod error;
pub mod state;

pub use auth::{AuthenticatedViewer, Claims, authentication_middleware, decode_jwt};
pub use config::Config;
pub use error::AppError;
pub use state::AppState;
