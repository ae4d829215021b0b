//! Caller identification.
//!
//! Requests without an `Authorization` header run as the anonymous actor and
//! the mutation handlers decide whether that is enough. A header that is
//! present but does not carry a valid bearer token is rejected outright.

use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload, http::header, web};
use std::future::{Ready, ready};

use blog_core::ports::AuthError;
use blog_core::{Actor, RequestContext};
use blog_shared::ErrorResponse;

use crate::observability::RequestId;
use crate::state::AppState;

/// Extracts the [`RequestContext`] for the current request.
///
/// ```ignore
/// async fn handler(caller: Caller) -> impl Responder {
///     format!("Hello, {:?}!", caller.0.actor)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Caller(pub RequestContext);

/// Error type for authentication failures.
#[derive(Debug)]
pub struct AuthenticationError(pub AuthError);

impl std::fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl actix_web::ResponseError for AuthenticationError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        let error = match &self.0 {
            AuthError::TokenExpired => ErrorResponse::new(401, "Token Expired", "token_expired")
                .with_detail("Your authentication token has expired. Please login again."),
            AuthError::InvalidToken(msg) => {
                ErrorResponse::new(401, "Invalid Token", "invalid_token").with_detail(msg.clone())
            }
        };

        actix_web::HttpResponse::build(self.status_code()).json(error)
    }
}

impl FromRequest for Caller {
    type Error = AuthenticationError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let request_id = req.extensions().get::<RequestId>().map(|r| r.0.clone());

        let actor = match resolve_actor(req) {
            Ok(actor) => actor,
            Err(e) => {
                tracing::debug!(error = %e, "Rejected bearer token");
                return ready(Err(AuthenticationError(e)));
            }
        };

        let mut ctx = RequestContext::new(actor);
        if let Some(id) = request_id {
            ctx = ctx.with_request_id(id);
        }
        ready(Ok(Caller(ctx)))
    }
}

fn resolve_actor(req: &HttpRequest) -> Result<Actor, AuthError> {
    let Some(auth_header) = req.headers().get(header::AUTHORIZATION) else {
        return Ok(Actor::Anonymous);
    };

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

    // Parse "Bearer <token>"
    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))?;

    let Some(state) = req.app_data::<web::Data<AppState>>() else {
        tracing::error!("AppState not found in app data");
        return Err(AuthError::InvalidToken(
            "Server configuration error".to_string(),
        ));
    };

    let claims = state.tokens.validate_token(token)?;
    Ok(Actor::from(claims))
}
