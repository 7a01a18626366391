//! Liveness and identity endpoints.

use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde_json::json;

use funnel_core::DomainError;
use funnel_infra::UserStore;

use crate::app::dto::UserBody;
use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::PrincipalContext;

pub async fn health() -> Response {
    Json(json!({ "success": true, "message": "ok" })).into_response()
}

/// The authenticated caller's own record.
pub async fn whoami(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
) -> Result<Response, Response> {
    let user = services
        .users
        .find_by_id(ctx.user_id())
        .await
        .map_err(|e| errors::domain(DomainError::from(e), "User"))?
        .ok_or_else(|| errors::domain(DomainError::NotFoundOrForbidden, "User"))?;

    Ok(Json(json!({
        "success": true,
        "message": "User retrieved successfully",
        "user": UserBody::from(&user),
    }))
    .into_response())
}
