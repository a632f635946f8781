use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use crypto_core::TokenError;
use serde_json::json;
use std::collections::BTreeMap;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AccountError>;

/// Field name -> human readable problems with that field
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Validation error")]
    Validation(FieldErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Username already exists")]
    Conflict,

    #[error("User not found")]
    NotFound,

    #[error("Missing username or password")]
    MissingCredentials,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token does not reference a valid user")]
    InvalidReference,

    #[error("At least one of 'username' or 'email' is required")]
    NoFieldsProvided,

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AccountError {
    /// Single-field validation failure
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), vec![message.into()]);
        AccountError::Validation(errors)
    }

    /// True for failures whose detail must stay server-side
    pub fn is_internal(&self) -> bool {
        matches!(self, AccountError::Persistence(_) | AccountError::Internal(_))
    }
}

impl ResponseError for AccountError {
    fn status_code(&self) -> StatusCode {
        match self {
            AccountError::Validation(_)
            | AccountError::BadRequest(_)
            | AccountError::MissingCredentials
            | AccountError::InvalidReference
            | AccountError::NoFieldsProvided => StatusCode::BAD_REQUEST,
            AccountError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AccountError::NotFound => StatusCode::NOT_FOUND,
            AccountError::Conflict => StatusCode::CONFLICT,
            AccountError::Persistence(_) | AccountError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        let error = match self {
            AccountError::Validation(fields) => json!(fields),
            // Don't leak internal details to callers
            _ if self.is_internal() => json!("Internal server error"),
            other => json!(other.to_string()),
        };

        HttpResponse::build(status).json(json!({
            "error": error,
            "status": status.as_u16(),
        }))
    }
}

// Conversions from external error types
impl From<sqlx::Error> for AccountError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() {
                return AccountError::Conflict;
            }
        }
        tracing::error!("Database error: {}", err);
        AccountError::Persistence(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AccountError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let messages = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();
        AccountError::Validation(fields)
    }
}

impl From<TokenError> for AccountError {
    fn from(err: TokenError) -> Self {
        tracing::error!("Session token error: {}", err);
        AccountError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_json(err: AccountError) -> serde_json::Value {
        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AccountError::field("email", "bad").status_code(), 400);
        assert_eq!(AccountError::MissingCredentials.status_code(), 400);
        assert_eq!(AccountError::InvalidReference.status_code(), 400);
        assert_eq!(AccountError::NoFieldsProvided.status_code(), 400);
        assert_eq!(AccountError::InvalidCredentials.status_code(), 401);
        assert_eq!(AccountError::NotFound.status_code(), 404);
        assert_eq!(AccountError::Conflict.status_code(), 409);
        assert_eq!(AccountError::Persistence("x".into()).status_code(), 500);
    }

    #[actix_rt::test]
    async fn test_validation_body_lists_fields() {
        let body = body_json(AccountError::field("password", "too short")).await;
        assert_eq!(body["error"]["password"][0], "too short");
        assert_eq!(body["status"], 400);
    }

    #[actix_rt::test]
    async fn test_persistence_detail_not_leaked() {
        let body = body_json(AccountError::Persistence(
            "connection refused: 10.0.0.5:5432".into(),
        ))
        .await;
        assert_eq!(body["error"], "Internal server error");
        assert!(!body.to_string().contains("10.0.0.5"));
    }
}
