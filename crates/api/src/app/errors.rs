//! Error-to-HTTP translation.
//!
//! Every failure leaves the process as the same `{success, message, errors}`
//! envelope. Not-found and forbidden share one 404 shape so a response never
//! reveals whether a record exists under someone else's account.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use funnel_auth::{AuthError, AuthzError, TokenError};
use funnel_core::{DomainError, FieldError, Outcome};

pub fn failure(status: StatusCode, message: impl Into<String>, errors: Vec<FieldError>) -> Response {
    (status, Json(Outcome::failure(message, errors))).into_response()
}

pub fn internal() -> Response {
    failure(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error",
        Vec::new(),
    )
}

pub fn auth(err: &AuthError) -> Response {
    match err {
        AuthError::MissingCredential => failure(
            StatusCode::UNAUTHORIZED,
            "Access denied. No token provided.",
            vec![FieldError::new("auth", "Authentication token required")],
        ),
        AuthError::Token(TokenError::Expired) => {
            failure(StatusCode::UNAUTHORIZED, "Token expired", Vec::new())
        }
        AuthError::Token(TokenError::Invalid(_)) => {
            failure(StatusCode::UNAUTHORIZED, "Invalid token", Vec::new())
        }
        AuthError::PrincipalNotFound => {
            failure(StatusCode::UNAUTHORIZED, "User not found", Vec::new())
        }
        AuthError::Directory(msg) => {
            tracing::error!(error = %msg, "credential store failure during authentication");
            internal()
        }
    }
}

pub fn authz(err: &AuthzError) -> Response {
    let AuthzError::Forbidden(role) = err;
    failure(
        StatusCode::FORBIDDEN,
        "Access denied. Insufficient permissions.",
        vec![FieldError::new("role", format!("role '{role}' is not permitted"))],
    )
}

/// Translate a domain failure; `entity` names the resource for 404 messages
/// ("Customer", "Lead").
pub fn domain(err: DomainError, entity: &'static str) -> Response {
    match err {
        DomainError::Validation(errors) => {
            failure(StatusCode::BAD_REQUEST, "Validation failed", errors)
        }
        DomainError::InvalidId(msg) => failure(
            StatusCode::BAD_REQUEST,
            "Validation failed",
            vec![FieldError::new("id", msg)],
        ),
        DomainError::NotFoundOrForbidden => failure(
            StatusCode::NOT_FOUND,
            format!("{entity} not found"),
            vec![FieldError::new(
                "id",
                format!("{entity} does not exist or access denied"),
            )],
        ),
        DomainError::Conflict(msg) => failure(
            StatusCode::BAD_REQUEST,
            msg,
            vec![FieldError::new("email", "already registered")],
        ),
        DomainError::Cascade(msg) => {
            tracing::error!(error = %msg, "cascade delete aborted");
            internal()
        }
        DomainError::Store(msg) => {
            tracing::error!(error = %msg, "store failure");
            internal()
        }
    }
}
