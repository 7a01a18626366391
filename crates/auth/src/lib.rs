//! `funnel-auth` — authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: the HTTP
//! layer hands it a raw `Authorization` header value, storage hands it a
//! [`PrincipalDirectory`] implementation, and everything in between (token
//! verification, principal resolution, the role gate, password hashing) is
//! deterministic and testable with an injected secret and clock.

pub mod authenticate;
pub mod authorize;
pub mod claims;
pub mod password;
pub mod roles;
pub mod token;
pub mod user;

pub use authenticate::{AuthError, Authenticator, Principal, PrincipalDirectory, extract_bearer};
pub use authorize::{AuthzError, authorize, policy};
pub use claims::AccessClaims;
pub use password::{PasswordError, hash_password, verify_password};
pub use roles::Role;
pub use token::{TokenCodec, TokenError};
pub use user::{NewUser, UserRecord};
