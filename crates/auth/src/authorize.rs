//! Role gate.

use thiserror::Error;

use crate::{Principal, Role};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthzError {
    #[error("access denied for role '{0}'")]
    Forbidden(Role),
}

/// Standing role policies.
///
/// Every data route currently admits both roles; ownership is the real gate.
/// `ADMIN_ONLY` exists as a capability for future admin surfaces and is
/// deliberately not wired to any ownership-scoped resource.
pub mod policy {
    use crate::Role;

    /// No role filter: any authenticated principal.
    pub const ANY_AUTHENTICATED: &[Role] = &[];

    pub const USER_OR_ADMIN: &[Role] = &[Role::User, Role::Admin];

    pub const ADMIN_ONLY: &[Role] = &[Role::Admin];
}

/// Accept or reject an authenticated principal against a role set.
///
/// - No IO
/// - No panics
/// - An empty `allowed` set means "any authenticated principal"
pub fn authorize(principal: &Principal, allowed: &[Role]) -> Result<(), AuthzError> {
    if allowed.is_empty() || allowed.contains(&principal.role) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden(principal.role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use funnel_core::UserId;

    fn principal(role: Role) -> Principal {
        Principal {
            id: UserId::new(),
            role,
        }
    }

    #[test]
    fn empty_policy_admits_any_authenticated_principal() {
        assert!(authorize(&principal(Role::User), policy::ANY_AUTHENTICATED).is_ok());
        assert!(authorize(&principal(Role::Admin), policy::ANY_AUTHENTICATED).is_ok());
    }

    #[test]
    fn user_or_admin_admits_both_roles() {
        assert!(authorize(&principal(Role::User), policy::USER_OR_ADMIN).is_ok());
        assert!(authorize(&principal(Role::Admin), policy::USER_OR_ADMIN).is_ok());
    }

    #[test]
    fn admin_only_rejects_plain_users() {
        let err = authorize(&principal(Role::User), policy::ADMIN_ONLY).unwrap_err();
        assert_eq!(err, AuthzError::Forbidden(Role::User));
        assert!(authorize(&principal(Role::Admin), policy::ADMIN_ONLY).is_ok());
    }
}
