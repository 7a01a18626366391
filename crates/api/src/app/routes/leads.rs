//! Lead CRUD. Ownership is always resolved through the parent customer.

use std::sync::Arc;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use chrono::Utc;
use serde_json::json;

use funnel_auth::{authorize, policy};
use funnel_core::{CustomerId, DomainError, LeadId};
use funnel_leads::{LeadPatch, NewLead};

use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::PrincipalContext;

fn parse_id(raw: &str) -> Result<LeadId, Response> {
    raw.parse().map_err(|e| errors::domain(e, "Lead"))
}

pub async fn create(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Json(input): Json<NewLead>,
) -> Result<Response, Response> {
    authorize(&ctx.principal(), policy::USER_OR_ADMIN).map_err(|e| errors::authz(&e))?;
    input.validate().map_err(|e| errors::domain(e, "Lead"))?;

    // A lead can only be attached to a customer the caller owns; an unowned
    // customer id reads the same as a nonexistent one.
    services
        .resolver
        .require_customer(ctx.user_id(), input.customer_id)
        .await
        .map_err(|e| errors::domain(e, "Customer"))?;

    let lead = input.into_lead(Utc::now());
    services
        .leads
        .insert(lead.clone())
        .await
        .map_err(|e| errors::domain(DomainError::from(e), "Lead"))?;

    tracing::info!(lead_id = %lead.id, customer_id = %lead.customer_id, "lead created");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Lead created successfully",
            "data": lead,
        })),
    )
        .into_response())
}

/// Every lead across all of the caller's customers.
pub async fn list(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
) -> Result<Response, Response> {
    authorize(&ctx.principal(), policy::USER_OR_ADMIN).map_err(|e| errors::authz(&e))?;

    let leads = services
        .resolver
        .leads_for(ctx.user_id())
        .await
        .map_err(|e| errors::domain(e, "Lead"))?;

    Ok(Json(json!({
        "success": true,
        "message": "Leads retrieved successfully",
        "data": leads,
    }))
    .into_response())
}

pub async fn list_by_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Path(raw_id): Path<String>,
) -> Result<Response, Response> {
    authorize(&ctx.principal(), policy::USER_OR_ADMIN).map_err(|e| errors::authz(&e))?;
    let customer_id: CustomerId = raw_id.parse().map_err(|e| errors::domain(e, "Customer"))?;

    services
        .resolver
        .require_customer(ctx.user_id(), customer_id)
        .await
        .map_err(|e| errors::domain(e, "Customer"))?;

    let leads = services
        .leads
        .list_by_customer(customer_id)
        .await
        .map_err(|e| errors::domain(DomainError::from(e), "Lead"))?;

    Ok(Json(json!({
        "success": true,
        "message": "Leads retrieved successfully",
        "data": leads,
    }))
    .into_response())
}

pub async fn get_one(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Path(raw_id): Path<String>,
) -> Result<Response, Response> {
    authorize(&ctx.principal(), policy::USER_OR_ADMIN).map_err(|e| errors::authz(&e))?;
    let id = parse_id(&raw_id)?;

    let lead = services
        .resolver
        .require_lead(ctx.user_id(), id)
        .await
        .map_err(|e| errors::domain(e, "Lead"))?;

    Ok(Json(json!({
        "success": true,
        "message": "Lead retrieved successfully",
        "data": lead,
    }))
    .into_response())
}

pub async fn update(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Path(raw_id): Path<String>,
    Json(patch): Json<LeadPatch>,
) -> Result<Response, Response> {
    authorize(&ctx.principal(), policy::USER_OR_ADMIN).map_err(|e| errors::authz(&e))?;
    let id = parse_id(&raw_id)?;
    patch.validate().map_err(|e| errors::domain(e, "Lead"))?;

    services
        .resolver
        .require_lead(ctx.user_id(), id)
        .await
        .map_err(|e| errors::domain(e, "Lead"))?;

    let updated = services
        .leads
        .update(id, &patch)
        .await
        .map_err(|e| errors::domain(DomainError::from(e), "Lead"))?
        .ok_or_else(|| errors::domain(DomainError::NotFoundOrForbidden, "Lead"))?;

    Ok(Json(json!({
        "success": true,
        "message": "Lead updated successfully",
        "data": updated,
    }))
    .into_response())
}

pub async fn remove(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Path(raw_id): Path<String>,
) -> Result<Response, Response> {
    authorize(&ctx.principal(), policy::USER_OR_ADMIN).map_err(|e| errors::authz(&e))?;
    let id = parse_id(&raw_id)?;

    services
        .resolver
        .require_lead(ctx.user_id(), id)
        .await
        .map_err(|e| errors::domain(e, "Lead"))?;

    let deleted = services
        .leads
        .delete(id)
        .await
        .map_err(|e| errors::domain(DomainError::from(e), "Lead"))?;
    if !deleted {
        return Err(errors::domain(DomainError::NotFoundOrForbidden, "Lead"));
    }

    Ok(Json(json!({
        "success": true,
        "message": "Lead deleted successfully",
    }))
    .into_response())
}
