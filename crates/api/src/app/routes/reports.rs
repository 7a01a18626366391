//! Owner-scoped reporting.

use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde_json::json;

use funnel_auth::{authorize, policy};
use funnel_core::DomainError;
use funnel_leads::summarize;

use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::PrincipalContext;

/// Pipeline summary across everything the caller owns. Only owned leads are
/// ever aggregated; another user's pipeline cannot leak into these numbers.
pub async fn summary(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
) -> Result<Response, Response> {
    authorize(&ctx.principal(), policy::USER_OR_ADMIN).map_err(|e| errors::authz(&e))?;

    let customers = services
        .customers
        .list_by_owner(ctx.user_id(), None)
        .await
        .map_err(|e| errors::domain(DomainError::from(e), "Customer"))?;

    let leads = services
        .resolver
        .leads_for(ctx.user_id())
        .await
        .map_err(|e| errors::domain(e, "Lead"))?;

    Ok(Json(json!({
        "success": true,
        "message": "Summary retrieved successfully",
        "data": {
            "total_customers": customers.len(),
            "leads": summarize(&leads),
        },
    }))
    .into_response())
}
