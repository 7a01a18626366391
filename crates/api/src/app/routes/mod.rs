pub mod auth;
pub mod customers;
pub mod leads;
pub mod reports;
pub mod system;
