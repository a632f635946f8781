/// Session tokens for the account backend
///
/// Tokens are compact JWTs signed with HS256 using a single process-wide
/// secret. A token carries the subject's record id, its username and an
/// absolute expiry; nothing about issued tokens is stored server-side, so
/// validity is decided purely by signature and expiry at verification time.
///
/// ## Usage
///
/// Build one `SessionTokens` at startup and share it behind an `Arc`:
///
/// ```rust
/// use crypto_core::jwt::SessionTokens;
///
/// let tokens = SessionTokens::new("change-me").expect("non-empty secret");
/// let issued = tokens.issue("4b1d6e4c-2f64-4f0c-9c53-0f3d2b8f8a11", "alice").unwrap();
/// let claims = tokens.verify(&issued.token).unwrap();
/// assert_eq!(claims.username(), "alice");
/// ```
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ============================================================================
// Constants
// ============================================================================

/// Lifetime of a session token issued at login
pub const SESSION_TOKEN_EXPIRY_HOURS: i64 = 24;

const JWT_ALGORITHM: Algorithm = Algorithm::HS256;

// ============================================================================
// Data Structures
// ============================================================================

/// JWT claims carried by a session token
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (identity record id, rendered as a string)
    pub sub: String,
    /// Username at the time of issuance
    pub username: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    pub fn subject(&self) -> &str {
        &self.sub
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

/// A freshly signed token and the instant it stops being valid
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("signing secret must not be empty")]
    MissingSecret,

    #[error("token is invalid")]
    Invalid,

    #[error("token has expired")]
    Expired,

    #[error("failed to sign token: {0}")]
    Signing(String),
}

// ============================================================================
// Issuer / Verifier
// ============================================================================

/// Issues and verifies session tokens with a fixed HS256 secret.
///
/// Keys are derived once in [`SessionTokens::new`] and never change.
#[derive(Clone)]
pub struct SessionTokens {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validity: Duration,
}

impl fmt::Debug for SessionTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionTokens")
            .field("secret", &"[REDACTED]")
            .field("validity", &self.validity)
            .finish()
    }
}

impl SessionTokens {
    pub fn new(secret: &str) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validity: Duration::hours(SESSION_TOKEN_EXPIRY_HOURS),
        })
    }

    /// Override the validity window applied by [`SessionTokens::issue`].
    pub fn with_validity(mut self, validity: Duration) -> Self {
        self.validity = validity;
        self
    }

    pub fn validity(&self) -> Duration {
        self.validity
    }

    /// Sign a token for `subject_id` that expires one validity window from now.
    pub fn issue(&self, subject_id: &str, username: &str) -> Result<IssuedToken, TokenError> {
        let now = Utc::now();
        let expires_at = now.checked_add_signed(self.validity).ok_or_else(|| {
            TokenError::Signing(format!(
                "validity of {} hours overflows the token expiry",
                self.validity.num_hours()
            ))
        })?;

        let claims = Claims {
            sub: subject_id.to_string(),
            username: username.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(JWT_ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Validate and decode a session token
    ///
    /// The signature is checked before the expiry, so a tampered token is
    /// always reported as `Invalid` even if its claimed expiry has passed.
    ///
    /// ## Errors
    ///
    /// - `TokenError::Expired` when the signature holds but `exp` is in the past
    /// - `TokenError::Invalid` for anything else: bad signature, foreign
    ///   algorithm, missing claims, malformed encoding
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                other => {
                    tracing::debug!("session token rejected: {:?}", other);
                    TokenError::Invalid
                }
            })
    }
}

// ============================================================================
// Tests
// ============================================================================
