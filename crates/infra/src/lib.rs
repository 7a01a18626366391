//! `funnel-infra` — persistence seams and the cross-entity coordinators.
//!
//! Store traits model an external document store reachable by id; the
//! in-memory implementations back tests and dev. [`ownership`] and
//! [`cascade`] are the two pieces of logic that span more than one entity:
//! the transitive owns-check and the two-phase customer delete.

pub mod cascade;
pub mod ownership;
pub mod store;

pub use cascade::CascadeCoordinator;
pub use ownership::OwnershipResolver;
pub use store::{
    CustomerStore, InMemoryCustomerStore, InMemoryLeadStore, InMemoryUserStore, LeadStore,
    StoreError, UserStore,
};
