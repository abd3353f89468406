//! Page view models: one struct per report page
//!
//! Each page owns its fetched data exclusively and replaces it wholesale on
//! refresh. Fetch failures are reduced to a single message the page shows
//! inline; the next successful refresh clears it.

pub mod appointments;
pub mod drug_cost;
pub mod inpatient_revenue;

pub use appointments::OutpatientAppointmentPage;
pub use drug_cost::DrugCostPage;
pub use inpatient_revenue::InpatientRevenuePage;
