//! Shared service graph handed to every handler.

use std::sync::Arc;

use funnel_auth::TokenCodec;
use funnel_infra::{CascadeCoordinator, CustomerStore, InMemoryUserStore, LeadStore, OwnershipResolver};

/// Everything a handler needs, wired once at startup and shared via
/// `Extension<Arc<AppServices>>`.
pub struct AppServices {
    /// Concrete user store: doubles as the authenticator's principal
    /// directory, so handlers and middleware see the same records.
    pub users: Arc<InMemoryUserStore>,
    pub customers: Arc<dyn CustomerStore>,
    pub leads: Arc<dyn LeadStore>,
    pub resolver: OwnershipResolver,
    pub cascade: CascadeCoordinator,
    /// Issues login tokens; verification happens in the auth middleware.
    pub codec: TokenCodec,
    pub token_ttl: chrono::Duration,
}
