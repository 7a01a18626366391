//! Resolving a raw credential into a live principal.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use funnel_core::UserId;

use crate::{Role, TokenCodec, TokenError};

/// An authenticated identity: the only thing downstream checks ever see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub id: UserId,
    pub role: Role,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No bearer credential supplied (or the header is not `Bearer <token>`).
    #[error("no bearer credential supplied")]
    MissingCredential,

    #[error(transparent)]
    Token(#[from] TokenError),

    /// Token verified but the referenced principal no longer exists.
    #[error("principal not found")]
    PrincipalNotFound,

    /// The credential store itself failed.
    #[error("credential store failure: {0}")]
    Directory(String),
}

/// Lookup seam into the credential store.
///
/// Implementations return `Ok(None)` for deleted/unknown principals; only
/// infrastructure failures are errors.
#[async_trait]
pub trait PrincipalDirectory: Send + Sync {
    async fn lookup(&self, id: UserId) -> anyhow::Result<Option<Principal>>;
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
pub fn extract_bearer(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or(AuthError::MissingCredential)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::MissingCredential)?
        .trim();

    if token.is_empty() {
        return Err(AuthError::MissingCredential);
    }

    Ok(token)
}

/// Turns a raw `Authorization` header into a live [`Principal`].
///
/// Verification order is fixed: credential shape, token signature/claims,
/// expiry, then directory lookup. Ownership checks downstream assume this
/// has already run.
pub struct Authenticator {
    codec: TokenCodec,
    directory: Arc<dyn PrincipalDirectory>,
}

impl Authenticator {
    pub fn new(codec: TokenCodec, directory: Arc<dyn PrincipalDirectory>) -> Self {
        Self { codec, directory }
    }

    pub async fn authenticate(
        &self,
        header: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Principal, AuthError> {
        let token = extract_bearer(header)?;
        let claims = self.codec.verify(token, now)?;

        let principal = self
            .directory
            .lookup(claims.sub)
            .await
            .map_err(|e| AuthError::Directory(e.to_string()))?;

        // The directory is authoritative for the live role; the token's role
        // claim is only a snapshot from issuance.
        principal.ok_or(AuthError::PrincipalNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::collections::HashMap;

    struct FixedDirectory {
        users: HashMap<UserId, Principal>,
    }

    #[async_trait]
    impl PrincipalDirectory for FixedDirectory {
        async fn lookup(&self, id: UserId) -> anyhow::Result<Option<Principal>> {
            Ok(self.users.get(&id).copied())
        }
    }

    fn authenticator_with(users: Vec<Principal>) -> (Authenticator, TokenCodec) {
        let directory = FixedDirectory {
            users: users.into_iter().map(|p| (p.id, p)).collect(),
        };
        (
            Authenticator::new(TokenCodec::new(b"authn-test"), Arc::new(directory)),
            TokenCodec::new(b"authn-test"),
        )
    }

    #[test]
    fn extract_bearer_accepts_well_formed_header() {
        assert_eq!(extract_bearer(Some("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn extract_bearer_rejects_absent_or_malformed_header() {
        assert_eq!(extract_bearer(None).unwrap_err(), AuthError::MissingCredential);
        assert_eq!(
            extract_bearer(Some("Basic dXNlcjpwdw==")).unwrap_err(),
            AuthError::MissingCredential
        );
        assert_eq!(
            extract_bearer(Some("Bearer ")).unwrap_err(),
            AuthError::MissingCredential
        );
    }

    #[tokio::test]
    async fn authenticates_live_principal() {
        let principal = Principal {
            id: UserId::new(),
            role: Role::User,
        };
        let (authn, codec) = authenticator_with(vec![principal]);
        let token = codec.issue(principal.id, principal.role, Duration::hours(1)).unwrap();
        let header = format!("Bearer {token}");

        let resolved = authn.authenticate(Some(&header), Utc::now()).await.unwrap();
        assert_eq!(resolved, principal);
    }

    #[tokio::test]
    async fn token_for_deleted_principal_is_rejected() {
        let (authn, codec) = authenticator_with(vec![]);
        let token = codec.issue(UserId::new(), Role::User, Duration::hours(1)).unwrap();
        let header = format!("Bearer {token}");

        let err = authn.authenticate(Some(&header), Utc::now()).await.unwrap_err();
        assert_eq!(err, AuthError::PrincipalNotFound);
    }

    #[tokio::test]
    async fn expired_token_fails_before_directory_lookup() {
        let principal = Principal {
            id: UserId::new(),
            role: Role::Admin,
        };
        let (authn, codec) = authenticator_with(vec![principal]);
        let token = codec.issue(principal.id, principal.role, Duration::zero()).unwrap();
        let header = format!("Bearer {token}");

        let err = authn.authenticate(Some(&header), Utc::now()).await.unwrap_err();
        assert_eq!(err, AuthError::Token(TokenError::Expired));
    }

    #[tokio::test]
    async fn missing_header_short_circuits() {
        let (authn, _) = authenticator_with(vec![]);
        let err = authn.authenticate(None, Utc::now()).await.unwrap_err();
        assert_eq!(err, AuthError::MissingCredential);
    }
}
