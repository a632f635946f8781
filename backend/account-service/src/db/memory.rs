/// In-process identity store
///
/// Holds every record behind one `RwLock`; uniqueness checks and the write
/// that depends on them happen under the same write guard.
use super::{IdentityStore, UpdateOutcome};
use crate::error::{AccountError, Result};
use crate::models::{IdentityChanges, IdentityRecord, NewIdentity};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug)]
pub struct MemoryIdentityStore {
    records: RwLock<HashMap<Uuid, IdentityRecord>>,
    available: AtomicBool,
}

impl Default for MemoryIdentityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            available: AtomicBool::new(true),
        }
    }

    /// Simulate the backend going away (or coming back)
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    fn ensure_available(&self) -> Result<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(AccountError::Persistence(
                "identity store unavailable".to_string(),
            ))
        }
    }
}

#[async_trait]
impl IdentityStore for MemoryIdentityStore {
    async fn create(&self, identity: NewIdentity) -> Result<Uuid> {
        self.ensure_available()?;
        let mut records = self.records.write().await;

        if records.values().any(|r| r.username == identity.username) {
            return Err(AccountError::Conflict);
        }

        let id = Uuid::new_v4();
        records.insert(
            id,
            IdentityRecord {
                id,
                username: identity.username,
                password: identity.password_digest,
                email: identity.email,
                created_at: identity.created_at,
                updated_at: None,
            },
        );
        Ok(id)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<IdentityRecord>> {
        self.ensure_available()?;
        let records = self.records.read().await;
        Ok(records.values().find(|r| r.username == username).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<IdentityRecord>> {
        self.ensure_available()?;
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn update_fields(&self, id: Uuid, changes: IdentityChanges) -> Result<UpdateOutcome> {
        self.ensure_available()?;
        let mut records = self.records.write().await;

        if !records.contains_key(&id) {
            return Ok(UpdateOutcome::NotFound);
        }

        if let Some(username) = &changes.username {
            if records
                .values()
                .any(|r| r.id != id && &r.username == username)
            {
                return Err(AccountError::Conflict);
            }
        }

        let Some(record) = records.get_mut(&id) else {
            return Ok(UpdateOutcome::NotFound);
        };

        if let Some(username) = changes.username {
            record.username = username;
        }
        if let Some(email) = changes.email {
            record.email = email;
        }
        record.updated_at = Some(changes.updated_at);

        Ok(UpdateOutcome::Updated)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool> {
        self.ensure_available()?;
        Ok(self.records.write().await.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<()> {
        self.ensure_available()
    }
}
