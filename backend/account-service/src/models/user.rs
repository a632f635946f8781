use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Stored identity record, one row of the `users` table
///
/// `password` holds the credential digest, never the plaintext. Not
/// `Serialize`: outbound payloads go through [`UserProfile`].
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct IdentityRecord {
    pub id: Uuid,
    pub username: String,
    pub password: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Validated registration data ready to be persisted; the store assigns the id
#[derive(Debug, Clone)]
pub struct NewIdentity {
    pub username: String,
    pub password_digest: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Partial update applied to an identity record
#[derive(Debug, Clone)]
pub struct IdentityChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Public view of an identity record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<IdentityRecord> for UserProfile {
    fn from(record: IdentityRecord) -> Self {
        Self {
            id: record.id.to_string(),
            username: record.username,
            email: record.email,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// User registration request
///
/// Absent fields deserialize as empty strings so that validation can report
/// them per field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterRequest {
    #[validate(custom(function = "crate::validators::validate_required"))]
    pub username: String,
    #[validate(custom(function = "crate::validators::validate_password_field"))]
    pub password: String,
    #[validate(custom(function = "crate::validators::validate_email_field"))]
    pub email: String,
}

/// User login request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Self-service update request; blank values count as absent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub msg: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> IdentityRecord {
        IdentityRecord {
            id: Uuid::new_v4(),
            username: "alice".into(),
            password: crypto_core::digest_password("secret1"),
            email: "a@x.com".into(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_profile_omits_credential_and_renders_id() {
        let record = record();
        let id = record.id;
        let json = serde_json::to_value(UserProfile::from(record)).unwrap();

        assert_eq!(json["id"], id.to_string());
        assert_eq!(json["username"], "alice");
        assert!(json.get("password").is_none());
        assert!(json.get("updatedAt").is_none());
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_profile_includes_updated_at_once_set() {
        let mut record = record();
        record.updated_at = Some(Utc::now());
        let json = serde_json::to_value(UserProfile::from(record)).unwrap();
        assert!(json.get("updatedAt").is_some());
    }

    #[test]
    fn test_register_request_reports_each_field() {
        let req: RegisterRequest = serde_json::from_str(r#"{"password":"123"}"#).unwrap();
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("email"));
    }

    #[test]
    fn test_register_request_valid() {
        let req = RegisterRequest {
            username: "alice".into(),
            password: "secret1".into(),
            email: "a@x.com".into(),
        };
        assert!(req.validate().is_ok());
    }
}
