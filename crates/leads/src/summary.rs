//! Pipeline aggregates for reporting.

use serde::Serialize;

use crate::{Lead, LeadStatus};

/// Owner-scoped pipeline summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeadSummary {
    pub total_leads: usize,
    /// Sum of all present lead values; absent values contribute nothing.
    pub total_value: f64,
    pub new: usize,
    pub contacted: usize,
    pub converted: usize,
    pub lost: usize,
}

/// Aggregate a set of (already ownership-scoped) leads.
pub fn summarize(leads: &[Lead]) -> LeadSummary {
    let mut summary = LeadSummary {
        total_leads: leads.len(),
        total_value: 0.0,
        new: 0,
        contacted: 0,
        converted: 0,
        lost: 0,
    };

    for lead in leads {
        if let Some(value) = lead.value {
            summary.total_value += value;
        }
        match lead.status {
            LeadStatus::New => summary.new += 1,
            LeadStatus::Contacted => summary.contacted += 1,
            LeadStatus::Converted => summary.converted += 1,
            LeadStatus::Lost => summary.lost += 1,
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NewLead;
    use chrono::Utc;
    use funnel_core::CustomerId;

    fn lead(title: &str, status: LeadStatus, value: Option<f64>) -> Lead {
        let input = NewLead {
            customer_id: CustomerId::new(),
            title: title.to_string(),
            description: None,
            status: Some(status),
            value,
        };
        input.into_lead(Utc::now())
    }

    #[test]
    fn sums_values_and_counts_statuses() {
        let leads = vec![
            lead("a", LeadStatus::New, Some(100.0)),
            lead("b", LeadStatus::Converted, Some(250.0)),
        ];

        let summary = summarize(&leads);
        assert_eq!(summary.total_leads, 2);
        assert_eq!(summary.total_value, 350.0);
        assert_eq!(summary.converted, 1);
        assert_eq!(summary.new, 1);
        assert_eq!(summary.lost, 0);
    }

    #[test]
    fn absent_values_contribute_nothing() {
        let leads = vec![
            lead("a", LeadStatus::Contacted, None),
            lead("b", LeadStatus::Contacted, Some(40.0)),
        ];

        let summary = summarize(&leads);
        assert_eq!(summary.total_value, 40.0);
        assert_eq!(summary.contacted, 2);
    }

    #[test]
    fn empty_input_is_all_zero() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_leads, 0);
        assert_eq!(summary.total_value, 0.0);
    }
}
