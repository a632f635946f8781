use actix_web::{
    body::{BoxBody, MessageBody},
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::StatusCode,
    Error, HttpMessage, HttpResponse, ResponseError,
};
use crypto_core::jwt::{SessionTokens, TokenError};
use futures::future::{ready, LocalBoxFuture, Ready};
use std::rc::Rc;
use std::sync::Arc;
use thiserror::Error;

/// Identity carried by a verified session token.
///
/// `subject_id` is passed through exactly as it appeared in the token;
/// handlers decide whether it is a well-formed record id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub subject_id: String,
    pub username: String,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing Authorization header")]
    MissingToken,

    #[error("Invalid Authorization header format")]
    MalformedHeader,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        }
    }
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(("WWW-Authenticate", "Bearer"))
            .json(serde_json::json!({
                "error": self.to_string(),
                "status": self.status_code().as_u16(),
            }))
    }
}

/// Pull the bearer token out of an `Authorization` header value.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or(AuthError::MissingToken)?;
    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::MalformedHeader)?
        .trim();
    if token.is_empty() {
        return Err(AuthError::MalformedHeader);
    }
    Ok(token)
}

/// JWT Authentication Middleware
///
/// Rejects requests without a valid session token with 401 and otherwise
/// stores an [`AuthenticatedUser`] in the request extensions.
#[derive(Clone)]
pub struct JwtAuthMiddleware {
    tokens: Arc<SessionTokens>,
}

impl JwtAuthMiddleware {
    pub fn new(tokens: Arc<SessionTokens>) -> Self {
        Self { tokens }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Transform = JwtAuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddlewareService {
            service: Rc::new(service),
            tokens: self.tokens.clone(),
        }))
    }
}

pub struct JwtAuthMiddlewareService<S> {
    service: Rc<S>,
    tokens: Arc<SessionTokens>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        let verified = bearer_token(
            req.headers()
                .get("Authorization")
                .and_then(|h| h.to_str().ok()),
        )
        .and_then(|token| self.tokens.verify(token).map_err(AuthError::from));

        Box::pin(async move {
            match verified {
                Ok(claims) => {
                    req.extensions_mut().insert(AuthenticatedUser {
                        subject_id: claims.sub,
                        username: claims.username,
                    });
                    let res = service.call(req).await?;
                    Ok(res.map_into_boxed_body())
                }
                Err(err) => {
                    tracing::warn!(path = %req.path(), "session token rejected: {}", err);
                    Ok(req.into_response(err.error_response()))
                }
            }
        })
    }
}

impl actix_web::FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(
        req: &actix_web::HttpRequest,
        _payload: &mut actix_web::dev::Payload,
    ) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AuthError::MissingToken.into())),
        }
    }
}
