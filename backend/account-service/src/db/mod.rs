//! Identity Store: persistence boundary for identity records
//!
//! - `users`: PostgreSQL-backed store (unique index on `username`)
//! - `memory`: in-process store with the same guarantees, for tests and local runs
use crate::error::Result;
use crate::models::{IdentityChanges, IdentityRecord, NewIdentity};
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use uuid::Uuid;

pub mod memory;
pub mod users;

pub use memory::MemoryIdentityStore;
pub use users::PgIdentityStore;

/// Result of applying an [`IdentityChanges`] to a stored record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    NotFound,
    /// The record exists but the write did not modify it
    Unchanged,
}

/// Storage contract consumed by the identity service
///
/// Implementations must enforce `username` uniqueness themselves and report a
/// violation as `AccountError::Conflict`; backend failures surface as
/// `AccountError::Persistence`.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Persist a new record and return the id assigned to it
    async fn create(&self, identity: NewIdentity) -> Result<Uuid>;

    async fn find_by_username(&self, username: &str) -> Result<Option<IdentityRecord>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<IdentityRecord>>;

    async fn update_fields(&self, id: Uuid, changes: IdentityChanges) -> Result<UpdateOutcome>;

    /// Returns `false` when no record matched
    async fn delete_by_id(&self, id: Uuid) -> Result<bool>;

    /// Cheap reachability check used by the health endpoint
    async fn ping(&self) -> Result<()>;
}

/// Create the PostgreSQL connection pool
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(600))
        .connect(database_url)
        .await?;

    tracing::info!(max_connections, "Database pool created");
    Ok(pool)
}

/// Apply pending migrations from `migrations/`
pub async fn run_migrations(pool: &PgPool) -> std::result::Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
