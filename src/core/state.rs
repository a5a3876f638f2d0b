//! Application state shared across routes and middleware

use crate::repositories::{MessageRepository, ProfileRepository};
use sqlx::MySqlPool;

pub struct AppState {
    /// Message store access
    pub msg: MessageRepository,

    /// Read-only profile lookup
    pub profile: ProfileRepository,

    /// Secret for verifying the bearer tokens issued upstream
    pub jwt_secret: String,
}

impl AppState {
    /// Builds the state, handing each repository a clone of the pool.
    pub fn new(pool: MySqlPool, jwt_secret: String) -> Self {
        Self {
            msg: MessageRepository::new(pool.clone()),
            profile: ProfileRepository::new(pool),
            jwt_secret,
        }
    }
}
