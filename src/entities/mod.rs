//! Entities module - domain entities of the messaging backend
//!
//! Each entity mirrors a table in the database. The derived conversation
//! view is NOT an entity: it is recomputed from the message set on every
//! read and lives in the `inbox` module.

pub mod enums;
pub mod message;
pub mod profile;

pub use enums::RoleKind;
pub use message::Message;
pub use profile::Profile;
