//! Two-phase customer deletion.
//!
//! The only multi-entity mutation in the system. Ordering is fixed:
//! dependent leads are removed (and durably gone) before the customer delete
//! is issued, so no lead can observably reference a deleted customer. A
//! failure in the first phase aborts the whole operation with the customer
//! intact.

use std::sync::Arc;

use funnel_core::{CustomerId, DomainError};

use crate::store::{CustomerStore, LeadStore};

pub struct CascadeCoordinator {
    customers: Arc<dyn CustomerStore>,
    leads: Arc<dyn LeadStore>,
}

impl CascadeCoordinator {
    pub fn new(customers: Arc<dyn CustomerStore>, leads: Arc<dyn LeadStore>) -> Self {
        Self { customers, leads }
    }

    /// Delete `customer_id` and every lead referencing it.
    ///
    /// Returns the number of leads removed. Callers must have already
    /// established ownership; a customer that vanished between the check and
    /// this call reports `NotFoundOrForbidden`.
    pub async fn delete_customer_cascade(
        &self,
        customer_id: CustomerId,
    ) -> Result<usize, DomainError> {
        // Phase 1: dependents. Fail closed — the parent survives any error here.
        let leads_removed = self
            .leads
            .delete_by_customer(customer_id)
            .await
            .map_err(|e| DomainError::cascade(format!("lead removal failed: {e}")))?;

        // Phase 2: the customer itself.
        let deleted = self.customers.delete(customer_id).await?;
        if !deleted {
            return Err(DomainError::NotFoundOrForbidden);
        }

        tracing::info!(customer_id = %customer_id, leads_removed, "customer cascade delete complete");
        Ok(leads_removed)
    }
}
