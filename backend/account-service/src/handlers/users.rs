/// Authenticated self-service handlers
///
/// All routes here sit behind `JwtAuthMiddleware`, which supplies the
/// `AuthenticatedUser` extractor.
use actix_middleware::AuthenticatedUser;
use actix_web::{web, HttpResponse};

use crate::{
    error::AccountError,
    models::{MessageResponse, UpdateUserRequest},
    AppState,
};

/// GET /users
pub async fn get_user(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AccountError> {
    let profile = state.identity.get_self(&user.subject_id).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// PUT /user
///
/// A record that vanished between login and update is reported as a failed
/// update (500), not as 404.
pub async fn update_user(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    payload: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, AccountError> {
    state
        .identity
        .update_self(&user.subject_id, payload.into_inner())
        .await
        .map_err(|e| match e {
            AccountError::NotFound => {
                tracing::error!(user_id = %user.subject_id, "User could not be updated: no such record");
                AccountError::Persistence(format!("user {} could not be updated", user.subject_id))
            }
            other => other,
        })?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("User updated successfully")))
}

/// DELETE /user
///
/// Deleting a record that no longer exists is reported as 500.
pub async fn delete_user(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AccountError> {
    state
        .identity
        .delete_self(&user.subject_id)
        .await
        .map_err(|e| match e {
            AccountError::NotFound => {
                tracing::error!(user_id = %user.subject_id, "User could not be deleted: no such record");
                AccountError::Persistence(format!("user {} could not be deleted", user.subject_id))
            }
            other => other,
        })?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("User deleted successfully")))
}
