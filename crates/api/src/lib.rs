//! `funnel-api` — HTTP surface for the funnel CRM core.

pub mod app;
pub mod context;
pub mod middleware;
