/// Identity service: registration, login and self-service record operations
///
/// Every operation is a single request against the store; the service keeps
/// no mutable state of its own. Username uniqueness under concurrent
/// registrations is ultimately enforced by the store.
use crate::db::{IdentityStore, UpdateOutcome};
use crate::error::{AccountError, Result};
use crate::metrics;
use crate::models::{
    IdentityChanges, LoginRequest, NewIdentity, RegisterRequest, UpdateUserRequest, UserProfile,
};
use crate::validators::{is_present, validate_email};
use chrono::Utc;
use crypto_core::{digest_password, verify_password, IssuedToken, SessionTokens};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

#[derive(Clone)]
pub struct IdentityService {
    store: Arc<dyn IdentityStore>,
    tokens: Arc<SessionTokens>,
}

impl IdentityService {
    pub fn new(store: Arc<dyn IdentityStore>, tokens: Arc<SessionTokens>) -> Self {
        Self { store, tokens }
    }

    /// Validate, digest and persist a new identity; returns the new record id
    pub async fn register(&self, req: RegisterRequest) -> Result<Uuid> {
        if let Err(errors) = req.validate() {
            metrics::record_register("validation_error");
            return Err(errors.into());
        }

        let result = self.create_identity(req).await;
        match &result {
            Ok(id) => {
                metrics::record_register("success");
                tracing::info!(user_id = %id, "User registered");
            }
            Err(AccountError::Conflict) => metrics::record_register("conflict"),
            Err(e) => {
                metrics::record_register("error");
                tracing::error!("Failed to register user: {}", e);
            }
        }
        result
    }

    async fn create_identity(&self, req: RegisterRequest) -> Result<Uuid> {
        if self.store.find_by_username(&req.username).await?.is_some() {
            tracing::debug!(username = %req.username, "Registration rejected: username taken");
            return Err(AccountError::Conflict);
        }

        let identity = NewIdentity {
            password_digest: digest_password(&req.password),
            username: req.username,
            email: req.email,
            created_at: Utc::now(),
        };

        self.store.create(identity).await
    }

    /// Check credentials and issue a session token
    ///
    /// Unknown usernames (`NotFound`) and wrong passwords
    /// (`InvalidCredentials`) are reported separately.
    pub async fn login(&self, req: LoginRequest) -> Result<IssuedToken> {
        if req.username.is_empty() || req.password.is_empty() {
            metrics::record_login("missing_credentials");
            return Err(AccountError::MissingCredentials);
        }

        let Some(user) = self.store.find_by_username(&req.username).await? else {
            metrics::record_login("not_found");
            tracing::info!(username = %req.username, "Login failed: unknown username");
            return Err(AccountError::NotFound);
        };

        if !verify_password(&req.password, &user.password) {
            metrics::record_login("invalid_credentials");
            tracing::info!(user_id = %user.id, "Login failed: wrong password");
            return Err(AccountError::InvalidCredentials);
        }

        let issued = self.tokens.issue(&user.id.to_string(), &user.username)?;
        metrics::record_login("success");
        metrics::record_token_issued();
        tracing::info!(user_id = %user.id, username = %user.username, "User logged in");

        Ok(issued)
    }

    /// Fetch the authenticated subject's own record
    pub async fn get_self(&self, subject_id: &str) -> Result<UserProfile> {
        let id = parse_subject(subject_id)?;

        let user = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound)?;

        Ok(UserProfile::from(user))
    }

    /// Apply username/email changes to the subject's own record
    pub async fn update_self(&self, subject_id: &str, req: UpdateUserRequest) -> Result<()> {
        let id = parse_subject(subject_id)?;

        let username = req.username.filter(|u| is_present(u));
        let email = req.email.filter(|e| is_present(e));

        if username.is_none() && email.is_none() {
            return Err(AccountError::NoFieldsProvided);
        }

        if let Some(email) = &email {
            if !validate_email(email) {
                return Err(AccountError::field("email", "Invalid email address."));
            }
        }

        let changes = IdentityChanges {
            username,
            email,
            updated_at: Utc::now(),
        };

        match self.store.update_fields(id, changes).await? {
            UpdateOutcome::Updated => {
                tracing::info!(user_id = %id, "User updated");
                Ok(())
            }
            UpdateOutcome::NotFound => Err(AccountError::NotFound),
            UpdateOutcome::Unchanged => {
                tracing::error!(user_id = %id, "Update matched the user but modified nothing");
                Err(AccountError::Persistence(format!(
                    "update of user {} did not apply",
                    id
                )))
            }
        }
    }

    /// Remove the subject's own record
    pub async fn delete_self(&self, subject_id: &str) -> Result<()> {
        let id = parse_subject(subject_id)?;

        if self.store.delete_by_id(id).await? {
            tracing::info!(user_id = %id, "User deleted");
            Ok(())
        } else {
            Err(AccountError::NotFound)
        }
    }

    /// Verify the backing store is reachable
    pub async fn ping(&self) -> Result<()> {
        self.store.ping().await
    }
}

/// Parse a token subject into a record id
fn parse_subject(subject_id: &str) -> Result<Uuid> {
    Uuid::parse_str(subject_id).map_err(|_| {
        tracing::warn!(subject = %subject_id, "Token subject is not a valid user id");
        AccountError::InvalidReference
    })
}
