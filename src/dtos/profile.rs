//! Profile DTOs

use crate::entities::{Profile, RoleKind};
use serde::{Deserialize, Serialize};

/// Counterpart as shown in the conversation list. The display name is
/// resolved here so the shell never re-implements the naming rule.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ProfileDTO {
    pub profile_id: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub role: RoleKind,
}

impl From<Profile> for ProfileDTO {
    fn from(value: Profile) -> Self {
        let display_name = value.display_name().to_string();
        Self {
            profile_id: value.profile_id,
            display_name,
            avatar_url: value.avatar_url,
            role: value.role,
        }
    }
}
