//! `funnel-core` — shared domain primitives.
//!
//! Typed identifiers, the domain error taxonomy, and the structured outcome
//! envelope every caller-facing layer reports through. No I/O, no policy.

pub mod error;
pub mod id;
pub mod outcome;
pub mod validate;

pub use error::{DomainError, DomainResult};
pub use id::{CustomerId, LeadId, UserId};
pub use outcome::{FieldError, Outcome};
pub use validate::looks_like_email;
