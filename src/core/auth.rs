//! Viewer authentication boundary
//!
//! Token issuance belongs to the hosted identity platform; this service
//! only verifies the bearer token and threads the viewer id it carries
//! into every operation as an explicit parameter. Nothing below the
//! middleware reads ambient session state.

use crate::core::{AppError, AppState};
use axum::extract::State;
use axum::{body::Body, extract::Request, http, http::Response, middleware::Next};
use jsonwebtoken::{DecodingKey, TokenData, Validation, decode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Claims carried by the upstream-issued token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub exp: usize,
    pub iat: usize,
    /// Profile id of the authenticated viewer.
    pub sub: String,
}

/// The viewer extracted from the token, inserted into request extensions
/// by [`authentication_middleware`].
#[derive(Debug, Clone)]
pub struct AuthenticatedViewer {
    pub profile_id: String,
}

#[instrument(skip(jwt_token, secret))]
pub fn decode_jwt(jwt_token: &str, secret: &str) -> Result<TokenData<Claims>, AppError> {
    debug!("Decoding JWT token");
    decode(
        jwt_token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|e| {
        warn!("Failed to decode JWT token: {:?}", e);
        AppError::unauthorized("Unable to decode token")
    })
}

#[instrument(skip(state, req, next))]
pub async fn authentication_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response<Body>, AppError> {
    debug!("Running authentication middleware");
    let auth_header = match req.headers().get(http::header::AUTHORIZATION) {
        Some(header) => header.to_str().map_err(|_| {
            warn!("Invalid authorization header format");
            AppError::forbidden("Empty header is not allowed")
        })?,
        None => {
            warn!("Missing authorization header");
            return Err(AppError::forbidden("Please add the JWT token to the header"));
        }
    };

    let token = auth_header
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| {
            warn!("Malformed authorization header");
            AppError::forbidden("Expected a bearer token")
        })?;

    let token_data = decode_jwt(token, &state.jwt_secret)?;
    if token_data.claims.sub.trim().is_empty() {
        warn!("Token carries no subject");
        return Err(AppError::unauthorized("Token carries no viewer identity"));
    }

    debug!("Viewer authenticated: {}", token_data.claims.sub);
    req.extensions_mut().insert(AuthenticatedViewer {
        profile_id: token_data.claims.sub,
    });
    Ok(next.run(req).await)
}
