//! In-memory stores for tests and dev.
//!
//! RwLock-per-collection; a single update/delete against one id is atomic,
//! matching the contract the real document store is assumed to provide.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use funnel_auth::{Principal, PrincipalDirectory, UserRecord};
use funnel_core::{CustomerId, LeadId, UserId};
use funnel_customers::{Customer, CustomerPatch};
use funnel_leads::{Lead, LeadPatch};

use super::{CustomerStore, LeadStore, StoreError, UserStore};

fn poisoned() -> StoreError {
    StoreError::Backend("store lock poisoned".to_string())
}

#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    inner: RwLock<HashMap<UserId, UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn insert(&self, user: UserRecord) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        if map.values().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict(format!(
                "email '{}' is already registered",
                user.email
            )));
        }
        map.insert(user.id, user);
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<UserRecord>, StoreError> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.get(&id).cloned())
    }
}

#[async_trait]
impl PrincipalDirectory for InMemoryUserStore {
    async fn lookup(&self, id: UserId) -> anyhow::Result<Option<Principal>> {
        let record = self.find_by_id(id).await?;
        Ok(record.map(|u| u.principal()))
    }
}

#[derive(Debug, Default)]
pub struct InMemoryCustomerStore {
    inner: RwLock<HashMap<CustomerId, Customer>>,
}

impl InMemoryCustomerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomerStore for InMemoryCustomerStore {
    async fn insert(&self, customer: Customer) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        map.insert(customer.id, customer);
        Ok(())
    }

    async fn get(&self, id: CustomerId) -> Result<Option<Customer>, StoreError> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.get(&id).cloned())
    }

    async fn update(
        &self,
        id: CustomerId,
        patch: &CustomerPatch,
    ) -> Result<Option<Customer>, StoreError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        match map.get_mut(&id) {
            Some(customer) => {
                patch.apply_to(customer);
                Ok(Some(customer.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: CustomerId) -> Result<bool, StoreError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        Ok(map.remove(&id).is_some())
    }

    async fn list_by_owner(
        &self,
        owner: UserId,
        search: Option<&str>,
    ) -> Result<Vec<Customer>, StoreError> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        let needle = search.map(str::to_lowercase);

        let mut out: Vec<Customer> = map
            .values()
            .filter(|c| c.owner == owner)
            .filter(|c| match &needle {
                Some(n) => c.name.to_lowercase().contains(n),
                None => true,
            })
            .cloned()
            .collect();

        // UUIDv7 ids are time-ordered, so this is creation order.
        out.sort_by_key(|c| *c.id.as_uuid());
        Ok(out)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryLeadStore {
    inner: RwLock<HashMap<LeadId, Lead>>,
}

impl InMemoryLeadStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LeadStore for InMemoryLeadStore {
    async fn insert(&self, lead: Lead) -> Result<(), StoreError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        map.insert(lead.id, lead);
        Ok(())
    }

    async fn get(&self, id: LeadId) -> Result<Option<Lead>, StoreError> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.get(&id).cloned())
    }

    async fn update(&self, id: LeadId, patch: &LeadPatch) -> Result<Option<Lead>, StoreError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        match map.get_mut(&id) {
            Some(lead) => {
                patch.apply_to(lead);
                Ok(Some(lead.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: LeadId) -> Result<bool, StoreError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        Ok(map.remove(&id).is_some())
    }

    async fn list_by_customer(&self, customer_id: CustomerId) -> Result<Vec<Lead>, StoreError> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        let mut out: Vec<Lead> = map
            .values()
            .filter(|l| l.customer_id == customer_id)
            .cloned()
            .collect();
        out.sort_by_key(|l| *l.id.as_uuid());
        Ok(out)
    }

    async fn delete_by_customer(&self, customer_id: CustomerId) -> Result<usize, StoreError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        let before = map.len();
        map.retain(|_, l| l.customer_id != customer_id);
        Ok(before - map.len())
    }
}
