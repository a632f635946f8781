/// Test fixtures and helpers for account-service tests
use crate::db::{IdentityStore, MemoryIdentityStore, UpdateOutcome};
use crate::error::Result;
use crate::models::{IdentityChanges, IdentityRecord, LoginRequest, NewIdentity, RegisterRequest};
use crate::services::IdentityService;
use async_trait::async_trait;
use crypto_core::SessionTokens;
use std::sync::Arc;
use uuid::Uuid;

pub const TEST_SECRET: &str = "account-service-test-secret";
pub const TEST_USERNAME: &str = "alice";
pub const TEST_PASSWORD: &str = "secret1";
pub const TEST_EMAIL: &str = "a@x.com";

pub struct Harness {
    pub store: Arc<MemoryIdentityStore>,
    pub tokens: Arc<SessionTokens>,
    pub service: IdentityService,
}

/// Service wired to a fresh in-memory store
pub fn harness() -> Harness {
    let store = Arc::new(MemoryIdentityStore::new());
    let tokens = Arc::new(SessionTokens::new(TEST_SECRET).expect("test secret is non-empty"));
    let service = IdentityService::new(store.clone(), tokens.clone());
    Harness {
        store,
        tokens,
        service,
    }
}

pub fn valid_register_request() -> RegisterRequest {
    custom_register_request(TEST_USERNAME, TEST_PASSWORD, TEST_EMAIL)
}

pub fn custom_register_request(username: &str, password: &str, email: &str) -> RegisterRequest {
    RegisterRequest {
        username: username.to_string(),
        password: password.to_string(),
        email: email.to_string(),
    }
}

pub fn login_request(username: &str, password: &str) -> LoginRequest {
    LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    }
}

/// Store whose updates match the record but never apply
pub struct StaleWriteStore {
    pub inner: MemoryIdentityStore,
}

#[async_trait]
impl IdentityStore for StaleWriteStore {
    async fn create(&self, identity: NewIdentity) -> Result<Uuid> {
        self.inner.create(identity).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<IdentityRecord>> {
        self.inner.find_by_username(username).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<IdentityRecord>> {
        self.inner.find_by_id(id).await
    }

    async fn update_fields(&self, _id: Uuid, _changes: IdentityChanges) -> Result<UpdateOutcome> {
        Ok(UpdateOutcome::Unchanged)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool> {
        self.inner.delete_by_id(id).await
    }

    async fn ping(&self) -> Result<()> {
        self.inner.ping().await
    }
}
