//! Enumerations used by the entities

use serde::{Deserialize, Serialize};

/// The two sides of the marketplace.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "role_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RoleKind {
    Applicant,
    Organization,
}
