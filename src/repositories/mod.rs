//! Repositories module - database access per entity
//!
//! Each repository owns a pool handle and speaks plain SQL through
//! runtime-bound `sqlx::query_as`. Messages are immutable once written
//! (the read flag is the single exception, flipped through a dedicated
//! operation), so the generic seam is create/read only.

pub mod message;
pub mod profile;
pub mod traits;

pub use message::MessageRepository;
pub use profile::ProfileRepository;
pub use traits::{Create, Read, ReadMany};
