//! Customer CRUD, always scoped to the authenticated owner.

use std::sync::Arc;

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde_json::json;

use funnel_auth::{authorize, policy};
use funnel_core::{CustomerId, DomainError};
use funnel_customers::{CustomerPatch, NewCustomer};

use crate::app::dto::{ListQuery, paginate};
use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::PrincipalContext;

fn parse_id(raw: &str) -> Result<CustomerId, Response> {
    raw.parse().map_err(|e| errors::domain(e, "Customer"))
}

pub async fn create(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Json(input): Json<NewCustomer>,
) -> Result<Response, Response> {
    authorize(&ctx.principal(), policy::USER_OR_ADMIN).map_err(|e| errors::authz(&e))?;
    input.validate().map_err(|e| errors::domain(e, "Customer"))?;

    let customer = input.into_customer(ctx.user_id());
    services
        .customers
        .insert(customer.clone())
        .await
        .map_err(|e| errors::domain(DomainError::from(e), "Customer"))?;

    tracing::info!(customer_id = %customer.id, owner = %customer.owner, "customer created");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Customer created successfully",
            "data": customer,
        })),
    )
        .into_response())
}

pub async fn list(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Query(query): Query<ListQuery>,
) -> Result<Response, Response> {
    authorize(&ctx.principal(), policy::USER_OR_ADMIN).map_err(|e| errors::authz(&e))?;

    let customers = services
        .customers
        .list_by_owner(ctx.user_id(), query.search.as_deref())
        .await
        .map_err(|e| errors::domain(DomainError::from(e), "Customer"))?;

    let (page, meta) = paginate(customers, query.page, query.limit);

    Ok(Json(json!({
        "success": true,
        "message": "Customers retrieved successfully",
        "data": page,
        "pagination": meta,
    }))
    .into_response())
}

/// One customer plus its leads, if the caller owns it.
pub async fn get_one(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Path(raw_id): Path<String>,
) -> Result<Response, Response> {
    authorize(&ctx.principal(), policy::USER_OR_ADMIN).map_err(|e| errors::authz(&e))?;
    let id = parse_id(&raw_id)?;

    let customer = services
        .resolver
        .require_customer(ctx.user_id(), id)
        .await
        .map_err(|e| errors::domain(e, "Customer"))?;

    let leads = services
        .leads
        .list_by_customer(id)
        .await
        .map_err(|e| errors::domain(DomainError::from(e), "Customer"))?;

    Ok(Json(json!({
        "success": true,
        "message": "Customer retrieved successfully",
        "data": { "customer": customer, "leads": leads },
    }))
    .into_response())
}

pub async fn update(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<PrincipalContext>,
    Path(raw_id): Path<String>,
    Json(patch): Json<CustomerPatch>,
) -> Result<Response, Response> {
    authorize(&ctx.principal(), policy::USER_OR_ADMIN).map_err(|e| errors::authz(&e))?;
    let id = parse_id(&raw_id)?;
    patch.validate().map_err(|e| errors::domain(e, "Customer"))?;

    services
        .resolver
        .require_customer(ctx.user_id(), id)
        .await
        .map_err(|e| errors::domain(e, "Customer"))?;

    // The record can vanish between the ownership check and the write; that
    // race resolves to the same 404 as never having existed.
    let updated = services
        .customers
        .update(id, &patch)
        .await
        .map_err(|e| errors::domain(DomainError::from(e), "Customer"))?
        .ok_or_else(|| errors::domain(DomainError::NotFoundOrForbidden, "Customer"))?;

    Ok(Json(json!({
        "success": true,
        "message": "Customer updated successfully",
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
        .require_customer(ctx.user_id(), id)
        .await
        .map_err(|e| errors::domain(e, "Customer"))?;

    let leads_removed = services
        .cascade
        .delete_customer_cascade(id)
        .await
        .map_err(|e| errors::domain(e, "Customer"))?;

    Ok(Json(json!({
        "success": true,
        "message": "Customer and associated leads deleted successfully",
        "data": { "leads_removed": leads_removed },
    }))
    .into_response())
}
