use serde::{Deserialize, Serialize};

use funnel_core::UserId;

use crate::Role;

/// Claims carried by an access token.
///
/// This is the minimal set the service signs and expects back: subject,
/// role, issuance time and expiry, all as JWT numeric dates (seconds since
/// epoch). Deserialization fails when any required claim is absent, which
/// the codec reports as an invalid token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject: the principal this token was issued to.
    pub sub: UserId,

    /// Role claim captured at issuance.
    pub role: Role,

    /// Issued-at timestamp.
    pub iat: i64,

    /// Expiration timestamp.
    pub exp: i64,
}
