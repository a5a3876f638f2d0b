//! Profile entity
//!
//! Profiles are owned by the identity side of the platform; this service
//! only ever reads them to resolve conversation counterparts.

use super::enums::RoleKind;
use serde::{Deserialize, Serialize};

/// Placeholder shown when a profile has no usable name.
pub const DISPLAY_NAME_FALLBACK: &str = "Usuario";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Profile {
    pub profile_id: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    /// Present only for organization profiles.
    pub company_name: Option<String>,
    pub role: RoleKind,
}

impl Profile {
    /// Organizations are shown by company name when they have one,
    /// everyone falls back to the personal name, then to the placeholder.
    pub fn display_name(&self) -> &str {
        let preferred = match self.role {
            RoleKind::Organization => self.company_name.as_deref().or(self.full_name.as_deref()),
            RoleKind::Applicant => self.full_name.as_deref(),
        };
        preferred
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DISPLAY_NAME_FALLBACK)
    }
}
