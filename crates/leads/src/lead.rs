use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use funnel_core::{CustomerId, DomainError, FieldError, LeadId};

/// Largest accepted deal value.
pub const MAX_LEAD_VALUE: f64 = 999_999_999.0;

/// Lead pipeline status. Serialized capitalized on the wire (`"New"`,
/// `"Contacted"`, ...).
///
/// Transitions are deliberately unconstrained: any status may move to any
/// other (a lost lead can be revived, a new lead can convert directly).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Converted,
    Lost,
}

impl core::fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            LeadStatus::New => "New",
            LeadStatus::Contacted => "Contacted",
            LeadStatus::Converted => "Converted",
            LeadStatus::Lost => "Lost",
        };
        f.write_str(s)
    }
}

/// A tracked opportunity.
///
/// Leads carry no owner field: ownership is derived through `customer_id`,
/// so there is exactly one place the owns-relationship can disagree with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: LeadId,
    pub customer_id: CustomerId,
    pub title: String,
    pub description: Option<String>,
    pub status: LeadStatus,
    pub value: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a lead against an (ownership-checked) customer.
#[derive(Debug, Clone, Deserialize)]
pub struct NewLead {
    pub customer_id: CustomerId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<LeadStatus>,
    #[serde(default)]
    pub value: Option<f64>,
}

impl NewLead {
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut errors = Vec::new();

        let title = self.title.trim();
        if title.is_empty() {
            errors.push(FieldError::new("title", "title is required"));
        } else if title.len() < 2 {
            errors.push(FieldError::new("title", "title must be at least 2 characters"));
        } else if title.len() > 200 {
            errors.push(FieldError::new("title", "title must be at most 200 characters"));
        }

        if let Some(description) = &self.description {
            if description.len() > 1000 {
                errors.push(FieldError::new(
                    "description",
                    "description must be at most 1000 characters",
                ));
            }
        }

        if let Some(value) = self.value {
            if !value.is_finite() || value < 0.0 {
                errors.push(FieldError::new("value", "value must be a non-negative number"));
            } else if value > MAX_LEAD_VALUE {
                errors.push(FieldError::new("value", "value must be at most 999,999,999"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(errors))
        }
    }

    pub fn into_lead(self, now: DateTime<Utc>) -> Lead {
        Lead {
            id: LeadId::new(),
            customer_id: self.customer_id,
            title: self.title.trim().to_string(),
            description: self.description,
            status: self.status.unwrap_or_default(),
            value: self.value,
            created_at: now,
        }
    }
}

/// Partial update; `customer_id` is not patchable (a lead never moves between
/// customers).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeadPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<LeadStatus>,
    #[serde(default)]
    pub value: Option<f64>,
}

impl LeadPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.value.is_none()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.is_empty() {
            return Err(DomainError::validation(
                "general",
                "at least one field must be provided",
            ));
        }

        let mut errors = Vec::new();

        if let Some(title) = &self.title {
            let title = title.trim();
            if title.is_empty() {
                errors.push(FieldError::new("title", "title cannot be empty"));
            } else if title.len() < 2 {
                errors.push(FieldError::new("title", "title must be at least 2 characters"));
            } else if title.len() > 200 {
                errors.push(FieldError::new("title", "title must be at most 200 characters"));
            }
        }

        if let Some(description) = &self.description {
            if description.len() > 1000 {
                errors.push(FieldError::new(
                    "description",
                    "description must be at most 1000 characters",
                ));
            }
        }

        if let Some(value) = self.value {
            if !value.is_finite() || value < 0.0 {
                errors.push(FieldError::new("value", "value must be a non-negative number"));
            } else if value > MAX_LEAD_VALUE {
                errors.push(FieldError::new("value", "value must be at most 999,999,999"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(errors))
        }
    }

    pub fn apply_to(&self, lead: &mut Lead) {
        if let Some(title) = &self.title {
            lead.title = title.trim().to_string();
        }
        if let Some(description) = &self.description {
            lead.description = Some(description.clone());
        }
        if let Some(status) = self.status {
            lead.status = status;
        }
        if let Some(value) = self.value {
            lead.value = Some(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_lead(title: &str, value: Option<f64>) -> NewLead {
        NewLead {
            customer_id: CustomerId::new(),
            title: title.to_string(),
            description: None,
            status: None,
            value,
        }
    }

    #[test]
    fn status_defaults_to_new() {
        let lead = new_lead("Renewal", None).into_lead(Utc::now());
        assert_eq!(lead.status, LeadStatus::New);
    }

    #[test]
    fn explicit_status_is_kept() {
        let mut input = new_lead("Renewal", Some(100.0));
        input.status = Some(LeadStatus::Converted);
        assert!(input.validate().is_ok());
        assert_eq!(input.into_lead(Utc::now()).status, LeadStatus::Converted);
    }

    #[test]
    fn negative_or_non_finite_value_is_rejected() {
        assert!(new_lead("Deal", Some(-1.0)).validate().is_err());
        assert!(new_lead("Deal", Some(f64::NAN)).validate().is_err());
        assert!(new_lead("Deal", Some(0.0)).validate().is_ok());
    }

    #[test]
    fn value_above_the_cap_is_rejected() {
        assert!(new_lead("Deal", Some(MAX_LEAD_VALUE)).validate().is_ok());
        assert!(new_lead("Deal", Some(MAX_LEAD_VALUE + 1.0)).validate().is_err());
    }

    #[test]
    fn single_character_title_is_rejected() {
        assert!(new_lead("X", None).validate().is_err());
        assert!(new_lead("Xy", None).validate().is_ok());

        let patch = LeadPatch {
            title: Some("X".to_string()),
            ..Default::default()
        };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn oversized_description_is_rejected() {
        let mut input = new_lead("Deal", None);
        input.description = Some("d".repeat(1001));
        assert!(input.validate().is_err());

        input.description = Some("d".repeat(1000));
        assert!(input.validate().is_ok());
    }

    #[test]
    fn status_serializes_capitalized() {
        assert_eq!(
            serde_json::to_string(&LeadStatus::Contacted).unwrap(),
            "\"Contacted\""
        );
        assert_eq!(
            serde_json::from_str::<LeadStatus>("\"New\"").unwrap(),
            LeadStatus::New
        );
        assert!(serde_json::from_str::<LeadStatus>("\"new\"").is_err());
    }

    #[test]
    fn empty_title_is_rejected() {
        assert!(new_lead("  ", None).validate().is_err());
    }

    #[test]
    fn empty_patch_is_rejected() {
        assert!(LeadPatch::default().validate().is_err());
    }

    #[test]
    fn any_status_transition_is_allowed() {
        let mut lead = new_lead("Deal", None).into_lead(Utc::now());
        for status in [
            LeadStatus::Lost,
            LeadStatus::New,
            LeadStatus::Converted,
            LeadStatus::Contacted,
        ] {
            let patch = LeadPatch {
                status: Some(status),
                ..Default::default()
            };
            patch.validate().unwrap();
            patch.apply_to(&mut lead);
            assert_eq!(lead.status, status);
        }
    }

    #[test]
    fn patch_does_not_touch_customer_reference() {
        let mut lead = new_lead("Deal", None).into_lead(Utc::now());
        let customer_id = lead.customer_id;

        let patch = LeadPatch {
            title: Some("Bigger Deal".to_string()),
            value: Some(500.0),
            ..Default::default()
        };
        patch.apply_to(&mut lead);

        assert_eq!(lead.customer_id, customer_id);
        assert_eq!(lead.title, "Bigger Deal");
        assert_eq!(lead.value, Some(500.0));
    }
}
