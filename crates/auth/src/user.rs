//! User records held in the credential store.

use serde::{Deserialize, Serialize};

use funnel_core::{DomainError, FieldError, UserId, looks_like_email};

use crate::{Principal, Role};

/// A registered user as persisted by the credential store.
///
/// Never deleted by this core; password reset is not modeled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

impl UserRecord {
    pub fn principal(&self) -> Principal {
        Principal {
            id: self.id,
            role: self.role,
        }
    }
}

/// Registration input, validated before hashing or persisting anything.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl NewUser {
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

        if self.password.len() < 6 {
            errors.push(FieldError::new(
                "password",
                "password must be at least 6 characters",
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(errors))
        }
    }

    /// Normalized email used as the uniqueness key.
    pub fn normalized_email(&self) -> String {
        self.email.trim().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(name: &str, email: &str, password: &str) -> NewUser {
        NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn valid_registration_passes() {
        assert!(new_user("Alice", "alice@example.com", "hunter22").validate().is_ok());
    }

    #[test]
    fn short_password_and_bad_email_are_both_reported() {
        let err = new_user("Alice", "not-an-email", "abc").validate().unwrap_err();
        let DomainError::Validation(errors) = err else {
            panic!("expected Validation");
        };
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"email"));
        assert!(fields.contains(&"password"));
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = new_user("   ", "a@example.com", "longenough").validate().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn email_is_normalized_for_uniqueness() {
        let u = new_user("A", "  Alice@Example.COM ", "longenough");
        assert_eq!(u.normalized_email(), "alice@example.com");
    }
}
