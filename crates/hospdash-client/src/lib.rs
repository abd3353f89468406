//! Typed client and page state for the hospdash reporting API
//!
//! Mirrors what the browser pages do: fetch JSON from the reporting
//! endpoints, hold the result in page-local state, and shape the detail
//! table locally with the shared pipeline.

#![forbid(unsafe_code)]

pub mod api_client;
pub mod pages;
pub mod table;

pub use api_client::{ApiClient, RevenueParams};
pub use pages::{DrugCostPage, InpatientRevenuePage, OutpatientAppointmentPage};
pub use table::TableState;
