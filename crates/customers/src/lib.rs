//! `funnel-customers` — the customer entity and its input shapes.

pub mod customer;

pub use customer::{Customer, CustomerPatch, NewCustomer};
