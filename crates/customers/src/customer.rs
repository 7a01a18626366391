use serde::{Deserialize, Serialize};

use funnel_core::{CustomerId, DomainError, FieldError, UserId, looks_like_email};

/// A customer record.
///
/// `owner` is set once at creation from the authenticated principal and never
/// changes; it is the anchor of every ownership check for this record and,
/// transitively, for its leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub owner: UserId,
}

/// Input for creating a customer. The owner comes from the request principal,
/// never from the payload.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
}

impl NewCustomer {
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut errors = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push(FieldError::new("name", "name is required"));
        } else if name.len() > 100 {
            errors.push(FieldError::new("name", "name must be at most 100 characters"));
        }

        if !looks_like_email(&self.email) {
            errors.push(FieldError::new("email", "a valid email is required"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(errors))
        }
    }

    pub fn into_customer(self, owner: UserId) -> Customer {
        Customer {
            id: CustomerId::new(),
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone,
            company: self.company,
            owner,
        }
    }
}

/// Partial update; every field optional, at least one required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
}

impl CustomerPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none() && self.company.is_none()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.is_empty() {
            return Err(DomainError::validation(
                "general",
                "at least one field must be provided",
            ));
        }

        let mut errors = Vec::new();

        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                errors.push(FieldError::new("name", "name cannot be empty"));
            }
        }

        if let Some(email) = &self.email {
            if !looks_like_email(email) {
                errors.push(FieldError::new("email", "a valid email is required"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(errors))
        }
    }

    /// Apply this patch to an existing record (id and owner are untouchable).
    pub fn apply_to(&self, customer: &mut Customer) {
        if let Some(name) = &self.name {
            customer.name = name.trim().to_string();
        }
        if let Some(email) = &self.email {
            customer.email = email.trim().to_string();
        }
        if let Some(phone) = &self.phone {
            customer.phone = Some(phone.clone());
        }
        if let Some(company) = &self.company {
            customer.company = Some(company.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_customer(name: &str, email: &str) -> NewCustomer {
        NewCustomer {
            name: name.to_string(),
            email: email.to_string(),
            phone: None,
            company: None,
        }
    }

    #[test]
    fn valid_customer_passes_and_gets_owner() {
        let input = new_customer("Acme Corp", "sales@acme.example");
        assert!(input.validate().is_ok());

        let owner = UserId::new();
        let customer = input.into_customer(owner);
        assert_eq!(customer.owner, owner);
        assert_eq!(customer.name, "Acme Corp");
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = new_customer("  ", "sales@acme.example").validate().unwrap_err();
        let DomainError::Validation(errors) = err else {
            panic!("expected Validation");
        };
        assert_eq!(errors[0].field, "name");
    }

    #[test]
    fn bad_email_is_rejected() {
        assert!(new_customer("Acme", "nope").validate().is_err());
    }

    #[test]
    fn empty_patch_is_rejected() {
        let err = CustomerPatch::default().validate().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn patch_applies_only_provided_fields() {
        let owner = UserId::new();
        let mut customer = new_customer("Old Name", "old@acme.example").into_customer(owner);
        let id = customer.id;

        let patch = CustomerPatch {
            name: Some("New Name".to_string()),
            ..Default::default()
        };
        patch.validate().unwrap();
        patch.apply_to(&mut customer);

        assert_eq!(customer.name, "New Name");
        assert_eq!(customer.email, "old@acme.example");
        assert_eq!(customer.id, id);
        assert_eq!(customer.owner, owner);
    }
}
