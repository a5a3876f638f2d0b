//! ProfileRepository - read-only profile lookup
//!
//! Profiles are owned by the identity side of the platform; this service
//! only resolves them for counterpart display.

use super::{Read, ReadMany};
use crate::entities::Profile;
use sqlx::{Error, MySqlPool, QueryBuilder};

pub struct ProfileRepository {
    connection_pool: MySqlPool,
}

impl ProfileRepository {
    pub fn new(connection_pool: MySqlPool) -> Self {
        Self { connection_pool }
    }
}

impl Read<Profile, String> for ProfileRepository {
    async fn read(&self, id: &String) -> Result<Option<Profile>, Error> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            SELECT
                profile_id,
                full_name,
                avatar_url,
                company_name,
                role
            FROM profiles
            WHERE profile_id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(profile)
    }
}

impl ReadMany<Profile, String> for ProfileRepository {
    /// Batch resolution of participant ids. Ids without a profile row are
    /// simply absent from the result.
    async fn read_many(&self, ids: &[String]) -> Result<Vec<Profile>, Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query: QueryBuilder<sqlx::MySql> = QueryBuilder::new(
            "SELECT profile_id, full_name, avatar_url, company_name, role \
             FROM profiles WHERE profile_id IN (",
        );
        let mut separated = query.separated(", ");
        for id in ids {
            separated.push_bind(id);
        }
        query.push(")");

        let profiles = query
            .build_query_as::<Profile>()
            .fetch_all(&self.connection_pool)
            .await?;

        Ok(profiles)
    }
}
