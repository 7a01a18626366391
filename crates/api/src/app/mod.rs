//! Application wiring: stores, services, middleware, and the router.

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Extension, Router};

use funnel_auth::{Authenticator, TokenCodec};
use funnel_infra::{
    CascadeCoordinator, CustomerStore, InMemoryCustomerStore, InMemoryLeadStore, InMemoryUserStore,
    LeadStore, OwnershipResolver,
};

use crate::middleware::{AuthState, auth_middleware};
use self::services::AppServices;

pub struct AppConfig {
    pub jwt_secret: String,
    pub token_ttl: chrono::Duration,
}

/// Build the full application router.
///
/// Everything behind the auth middleware carries a [`crate::context::PrincipalContext`]
/// extension; `/health` and the two `/auth` entry points are the only public
/// routes.
pub fn build_app(config: AppConfig) -> Router {
    let users = Arc::new(InMemoryUserStore::new());
    let customers: Arc<dyn CustomerStore> = Arc::new(InMemoryCustomerStore::new());
    let leads: Arc<dyn LeadStore> = Arc::new(InMemoryLeadStore::new());

    let resolver = OwnershipResolver::new(customers.clone(), leads.clone());
    let cascade = CascadeCoordinator::new(customers.clone(), leads.clone());

    let authenticator = Arc::new(Authenticator::new(
        TokenCodec::new(config.jwt_secret.as_bytes()),
        users.clone(),
    ));

    let app_services = Arc::new(AppServices {
        users,
        customers,
        leads,
        resolver,
        cascade,
        codec: TokenCodec::new(config.jwt_secret.as_bytes()),
        token_ttl: config.token_ttl,
    });

    let public = Router::new()
        .route("/health", get(routes::system::health))
        .route("/auth/register", post(routes::auth::register))
        .route("/auth/login", post(routes::auth::login));

    let protected = Router::new()
        .route("/auth/me", get(routes::system::whoami))
        .route(
            "/customers",
            post(routes::customers::create).get(routes::customers::list),
        )
        .route(
            "/customers/:id",
            get(routes::customers::get_one)
                .patch(routes::customers::update)
                .delete(routes::customers::remove),
        )
        .route("/leads", post(routes::leads::create).get(routes::leads::list))
        .route(
            "/leads/customer/:customer_id",
            get(routes::leads::list_by_customer),
        )
        .route(
            "/leads/:id",
            get(routes::leads::get_one)
                .patch(routes::leads::update)
                .delete(routes::leads::remove),
        )
        .route("/reports/summary", get(routes::reports::summary))
        .layer(axum::middleware::from_fn_with_state(
            AuthState { authenticator },
            auth_middleware,
        ));

    public.merge(protected).layer(Extension(app_services))
}
