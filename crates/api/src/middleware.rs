//! Bearer-token authentication middleware.
//!
//! Runs before every protected route: no handler behind it ever sees a
//! request without a resolved [`PrincipalContext`] extension.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;

use funnel_auth::Authenticator;

use crate::app::errors;
use crate::context::PrincipalContext;

#[derive(Clone)]
pub struct AuthState {
    pub authenticator: Arc<Authenticator>,
}

pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    match state.authenticator.authenticate(header, Utc::now()).await {
        Ok(principal) => {
            request
                .extensions_mut()
                .insert(PrincipalContext::new(principal));
            next.run(request).await
        }
        Err(err) => errors::auth(&err),
    }
}
