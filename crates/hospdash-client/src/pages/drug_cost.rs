//! Drug cost page: summary cards and daily trend

use crate::api_client::{ApiClient, DrugCostResponse};
use hospdash_core::types::DateRange;

/// View state of the drug cost page
#[derive(Debug, Clone, Default)]
pub struct DrugCostPage {
    range: Option<DateRange>,
    report: Option<DrugCostResponse>,
    error: Option<String>,
}

impl DrugCostPage {
    /// An empty page; the first refresh uses the server's default range
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selected date range
    pub fn set_range(&mut self, range: DateRange) {
        self.range = Some(range);
    }

    /// Fetch the report, replacing the held one
    pub async fn refresh(&mut self, client: &ApiClient) {
        match client.drug_cost(self.range).await {
            Ok(report) => {
                self.range = Some(report.range);
                self.report = Some(report);
                self.error = None;
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    /// The held report, once loaded
    #[must_use]
    pub const fn report(&self) -> Option<&DrugCostResponse> {
        self.report.as_ref()
    }

    /// Message of the last failed fetch, if any
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
