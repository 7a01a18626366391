use funnel_auth::{Principal, Role};
use funnel_core::UserId;

/// Authenticated principal for a request.
///
/// Inserted by the auth middleware; its presence means authentication has
/// already succeeded for this request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrincipalContext {
    principal: Principal,
}

impl PrincipalContext {
    pub fn new(principal: Principal) -> Self {
        Self { principal }
    }

    pub fn principal(&self) -> Principal {
        self.principal
    }

    pub fn user_id(&self) -> UserId {
        self.principal.id
    }

    pub fn role(&self) -> Role {
        self.principal.role
    }
}
