//! `funnel-leads` — the lead entity, its lifecycle status, and reporting
//! aggregates.

pub mod lead;
pub mod summary;

pub use lead::{Lead, LeadPatch, LeadStatus, MAX_LEAD_VALUE, NewLead};
pub use summary::{LeadSummary, summarize};
