//! Outpatient appointment page: summary cards and daily trend

use crate::api_client::{ApiClient, AppointmentResponse};
use hospdash_core::types::DateRange;

/// View state of the outpatient appointment page
#[derive(Debug, Clone, Default)]
pub struct OutpatientAppointmentPage {
    range: Option<DateRange>,
    report: Option<AppointmentResponse>,
    error: Option<String>,
}

impl OutpatientAppointmentPage {
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
        match client.outpatient_appointments(self.range).await {
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
    pub const fn report(&self) -> Option<&AppointmentResponse> {
        self.report.as_ref()
    }

    /// Message of the last failed fetch, if any
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
