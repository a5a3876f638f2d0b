//! Profile services - counterpart lookup passthrough

use crate::core::{AppError, AppState};
use crate::dtos::ProfileDTO;
use crate::repositories::Read;
use axum::extract::{Json, Path, State};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

#[instrument(skip(state), fields(profile_id = %profile_id))]
pub async fn get_profile_by_id(
    State(state): State<Arc<AppState>>,
    Path(profile_id): Path<String>,
) -> Result<Json<Option<ProfileDTO>>, AppError> {
    debug!("Fetching profile by id");
    let profile_option = state.profile.read(&profile_id).await?;
    if profile_option.is_some() {
        info!("Profile found");
    } else {
        warn!("Profile not found");
    }
    Ok(Json(profile_option.map(ProfileDTO::from)))
}
