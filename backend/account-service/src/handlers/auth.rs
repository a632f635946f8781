/// Authentication handlers
use actix_web::{web, HttpResponse};

use crate::{
    error::AccountError,
    models::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse},
    AppState,
};

/// POST /register
pub async fn register(
    state: web::Data<AppState>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AccountError> {
    state.identity.register(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(RegisterResponse {
        msg: "User added successfully".to_string(),
    }))
}

/// POST /login
pub async fn login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AccountError> {
    let issued = state.identity.login(payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        token: issued.token,
    }))
}
