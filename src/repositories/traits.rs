//! Common repository traits
//!
//! Generic interfaces for the database operations the service needs.
//! There is deliberately no generic update or delete: messages are
//! immutable and profiles are read-only here.

/// Trait for creating new entities in the database
///
/// # Type Parameters
/// * `Entity` - Type of the returned entity (with id and server-assigned fields set)
/// * `CreateDTO` - DTO for creation
pub trait Create<Entity, CreateDTO> {
    /// Creates a new entity in the database
    ///
    /// # Returns
    /// * `Ok(Entity)` - Created entity as persisted
    /// * `Err(sqlx::Error)` - Error during insertion
    async fn create(&self, data: &CreateDTO) -> Result<Entity, sqlx::Error>;
}

/// Trait for reading a single entity by primary key
pub trait Read<Entity, Id> {
    /// Reads an entity from the database by its primary key
    ///
    /// # Returns
    /// * `Ok(Some(Entity))` - Entity found
    /// * `Ok(None)` - No entity with that id
    /// * `Err(sqlx::Error)` - Error during reading
    async fn read(&self, id: &Id) -> Result<Option<Entity>, sqlx::Error>;
}

/// Trait for reading multiple entities by list of primary keys
pub trait ReadMany<Entity, Id> {
    /// Reads multiple entities from the database by their primary keys.
    /// Missing ids simply produce no entry, never an error.
    ///
    /// # Note
    /// Entities are returned in the order the database yields them,
    /// which may not match the order of the provided ids.
    async fn read_many(&self, ids: &[Id]) -> Result<Vec<Entity>, sqlx::Error>;
}
