//! Transitive ownership checks (user → customer → lead).
//!
//! One resolver, consumed by every entity-scoped operation; the inline
//! owner comparison is never re-implemented per route. Failures surface as
//! [`DomainError::NotFoundOrForbidden`]: a caller cannot distinguish a
//! record that does not exist from one it does not own.

use std::sync::Arc;

use funnel_core::{CustomerId, DomainError, LeadId, UserId};
use funnel_customers::Customer;
use funnel_leads::Lead;

use crate::store::{CustomerStore, LeadStore, StoreError};

pub struct OwnershipResolver {
    customers: Arc<dyn CustomerStore>,
    leads: Arc<dyn LeadStore>,
}

impl OwnershipResolver {
    pub fn new(customers: Arc<dyn CustomerStore>, leads: Arc<dyn LeadStore>) -> Self {
        Self { customers, leads }
    }

    /// Does `principal` own this customer? Missing customer → false.
    pub async fn owns_customer(
        &self,
        principal: UserId,
        id: CustomerId,
    ) -> Result<bool, StoreError> {
        let customer = self.customers.get(id).await?;
        Ok(customer.is_some_and(|c| c.owner == principal))
    }

    /// Does `principal` transitively own this lead?
    ///
    /// Missing lead → false. A lead whose customer reference dangles is
    /// treated as not owned rather than an error.
    pub async fn owns_lead(&self, principal: UserId, id: LeadId) -> Result<bool, StoreError> {
        let Some(lead) = self.leads.get(id).await? else {
            return Ok(false);
        };
        let customer = self.customers.get(lead.customer_id).await?;
        Ok(customer.is_some_and(|c| c.owner == principal))
    }

    /// Load a customer the principal owns, or `NotFoundOrForbidden`.
    pub async fn require_customer(
        &self,
        principal: UserId,
        id: CustomerId,
    ) -> Result<Customer, DomainError> {
        match self.customers.get(id).await? {
            Some(customer) if customer.owner == principal => Ok(customer),
            _ => Err(DomainError::NotFoundOrForbidden),
        }
    }

    /// Load a lead the principal transitively owns, or `NotFoundOrForbidden`.
    pub async fn require_lead(&self, principal: UserId, id: LeadId) -> Result<Lead, DomainError> {
        let Some(lead) = self.leads.get(id).await? else {
            return Err(DomainError::NotFoundOrForbidden);
        };

        match self.customers.get(lead.customer_id).await? {
            Some(customer) if customer.owner == principal => Ok(lead),
            _ => Err(DomainError::NotFoundOrForbidden),
        }
    }

    /// Every lead the principal owns, across all of their customers.
    ///
    /// Leads carry no owner field, so the scope is resolved through the
    /// customers: no unowned lead is ever materialized.
    pub async fn leads_for(&self, principal: UserId) -> Result<Vec<Lead>, DomainError> {
        let mut out = Vec::new();
        for customer in self.customers.list_by_owner(principal, None).await? {
            out.extend(self.leads.list_by_customer(customer.id).await?);
        }
        Ok(out)
    }
}
