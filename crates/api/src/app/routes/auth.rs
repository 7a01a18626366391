//! Registration and login.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde_json::json;

use funnel_auth::{NewUser, Role, UserRecord, hash_password, verify_password};
use funnel_core::{DomainError, FieldError, UserId};
use funnel_infra::UserStore;

use crate::app::dto::{LoginRequest, UserBody};
use crate::app::errors;
use crate::app::services::AppServices;

pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Json(input): Json<NewUser>,
) -> Result<Response, Response> {
    input.validate().map_err(|e| errors::domain(e, "User"))?;

    let password_hash = hash_password(&input.password).map_err(|e| {
        tracing::error!(error = %e, "password hashing failed");
        errors::internal()
    })?;

    let user = UserRecord {
        id: UserId::new(),
        name: input.name.trim().to_string(),
        email: input.normalized_email(),
        password_hash,
        role: Role::User,
    };

    services
        .users
        .insert(user.clone())
        .await
        .map_err(|e| errors::domain(DomainError::from(e), "User"))?;

    let token = services
        .codec
        .issue(user.id, user.role, services.token_ttl)
        .map_err(|e| {
            tracing::error!(error = %e, "token issuance failed");
            errors::internal()
        })?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "User registered successfully",
            "token": token,
            "user": UserBody::from(&user),
        })),
    )
        .into_response())
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(input): Json<LoginRequest>,
) -> Result<Response, Response> {
    // Unknown email and wrong password produce identical responses.
    let invalid_credentials = || {
        errors::failure(
            StatusCode::UNAUTHORIZED,
            "Invalid credentials",
            vec![FieldError::new("credentials", "email or password is incorrect")],
        )
    };

    let email = input.email.trim().to_lowercase();
    let user = services
        .users
        .find_by_email(&email)
        .await
        .map_err(|e| errors::domain(DomainError::from(e), "User"))?
        .ok_or_else(invalid_credentials)?;

    if !verify_password(&user.password_hash, &input.password) {
        return Err(invalid_credentials());
    }

    let token = services
        .codec
        .issue(user.id, user.role, services.token_ttl)
        .map_err(|e| {
            tracing::error!(error = %e, "token issuance failed");
            errors::internal()
        })?;

    tracing::info!(user_id = %user.id, "user logged in");

    Ok(Json(json!({
        "success": true,
        "message": "Login successful",
        "token": token,
        "user": UserBody::from(&user),
    }))
    .into_response())
}
