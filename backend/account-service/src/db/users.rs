/// PostgreSQL identity store
use super::{IdentityStore, UpdateOutcome};
use crate::error::Result;
use crate::models::{IdentityChanges, IdentityRecord, NewIdentity};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

const SELECT_COLUMNS: &str = "id, username, password, email, created_at, updated_at";

#[derive(Clone)]
pub struct PgIdentityStore {
    pool: PgPool,
}

impl PgIdentityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityStore for PgIdentityStore {
    /// Insert a new user; a duplicate username trips `users_username_key`
    async fn create(&self, identity: NewIdentity) -> Result<Uuid> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO users (username, password, email, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&identity.username)
        .bind(&identity.password_digest)
        .bind(&identity.email)
        .bind(identity.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<IdentityRecord>> {
        let user = sqlx::query_as::<_, IdentityRecord>(&format!(
            "SELECT {SELECT_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<IdentityRecord>> {
        let user = sqlx::query_as::<_, IdentityRecord>(&format!(
            "SELECT {SELECT_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Only the provided fields change; `updated_at` is always refreshed
    async fn update_fields(&self, id: Uuid, changes: IdentityChanges) -> Result<UpdateOutcome> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET username = COALESCE($2, username),
                email = COALESCE($3, email),
                updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(changes.username)
        .bind(changes.email)
        .bind(changes.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(match result.rows_affected() {
            0 => UpdateOutcome::NotFound,
            _ => UpdateOutcome::Updated,
        })
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
