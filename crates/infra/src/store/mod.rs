//! Persistence adapter contracts.
//!
//! The store guarantees per-document atomicity for a single update or
//! delete; it is the sole point of mutual exclusion in the system. Misses on
//! update/delete are reported in-band (`None` / `false`), not as errors —
//! check-then-act races resolve to not-found at the call site.

use async_trait::async_trait;
use thiserror::Error;

use funnel_core::{CustomerId, DomainError, LeadId, UserId};

use funnel_auth::UserRecord;
use funnel_customers::{Customer, CustomerPatch};
use funnel_leads::{Lead, LeadPatch};

mod in_memory;

pub use in_memory::{InMemoryCustomerStore, InMemoryLeadStore, InMemoryUserStore};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Uniqueness violation (e.g. duplicate email).
    #[error("conflict: {0}")]
    Conflict(String),

    /// The backend itself failed (unreachable, corrupted, poisoned).
    #[error("store backend failure: {0}")]
    Backend(String),
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(msg) => DomainError::Conflict(msg),
            StoreError::Backend(msg) => DomainError::Store(msg),
        }
    }
}

/// Credential store: the system of record for principals.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a new user. Fails with [`StoreError::Conflict`] when the
    /// email is already registered.
    async fn insert(&self, user: UserRecord) -> Result<(), StoreError>;

    /// Lookup by normalized email.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<UserRecord>, StoreError>;
}

#[async_trait]
pub trait CustomerStore: Send + Sync {
    async fn insert(&self, customer: Customer) -> Result<(), StoreError>;

    async fn get(&self, id: CustomerId) -> Result<Option<Customer>, StoreError>;

    /// Apply a partial update; `None` when the document is gone.
    async fn update(
        &self,
        id: CustomerId,
        patch: &CustomerPatch,
    ) -> Result<Option<Customer>, StoreError>;

    /// Remove a document; `false` when it was already gone.
    async fn delete(&self, id: CustomerId) -> Result<bool, StoreError>;

    /// All customers owned by `owner`, optionally filtered by a
    /// case-insensitive name substring.
    async fn list_by_owner(
        &self,
        owner: UserId,
        search: Option<&str>,
    ) -> Result<Vec<Customer>, StoreError>;
}

#[async_trait]
pub trait LeadStore: Send + Sync {
    async fn insert(&self, lead: Lead) -> Result<(), StoreError>;

    async fn get(&self, id: LeadId) -> Result<Option<Lead>, StoreError>;

    async fn update(&self, id: LeadId, patch: &LeadPatch) -> Result<Option<Lead>, StoreError>;

    async fn delete(&self, id: LeadId) -> Result<bool, StoreError>;

    async fn list_by_customer(&self, customer_id: CustomerId) -> Result<Vec<Lead>, StoreError>;

    /// Remove every lead referencing `customer_id`; returns how many went.
    async fn delete_by_customer(&self, customer_id: CustomerId) -> Result<usize, StoreError>;
}
