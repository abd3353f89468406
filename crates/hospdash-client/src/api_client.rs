//! HTTP client for the hospdash reporting API

use hospdash_core::config::ClientConfig;
use hospdash_core::types::{DateRange, DoctorId, ErrorResponse, SortColumn, SortDirection};
use hospdash_core::{Error, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

// Response types come from the API handlers so both sides stay in lockstep
pub use hospdash_api::handlers::appointments::{AppointmentResponse, AppointmentSummary};
pub use hospdash_api::handlers::drug_cost::{DrugCostResponse, DrugCostSummary};
pub use hospdash_api::handlers::health::HealthResponse;
pub use hospdash_api::handlers::revenue::{InitResponse, QueryResponse, SummaryResponse};

/// Parameters for the revenue summary and query endpoints
#[derive(Debug, Clone, Default)]
pub struct RevenueParams {
    /// Reporting range; the server falls back to its default when absent
    pub range: Option<DateRange>,

    /// Department codes to include (empty = unfiltered)
    pub departments: Vec<String>,

    /// Doctor ids to include (empty = unfiltered)
    pub doctors: Vec<DoctorId>,

    /// Column to sort by server-side
    pub sort_by: Option<SortColumn>,

    /// Sort direction
    pub sort_dir: Option<SortDirection>,

    /// Page number; presence enables server-side pagination
    pub page: Option<u32>,

    /// Rows per page
    pub per_page: Option<u32>,
}

impl RevenueParams {
    fn to_query_string(&self) -> String {
        let mut query_params = Vec::new();

        if let Some(range) = self.range {
            query_params.push(format!("start={}", range.start));
            query_params.push(format!("end={}", range.end));
        }
        if !self.departments.is_empty() {
            query_params.push(format!("departments={}", self.departments.join(",")));
        }
        if !self.doctors.is_empty() {
            let ids: Vec<String> = self.doctors.iter().map(ToString::to_string).collect();
            query_params.push(format!("doctors={}", ids.join(",")));
        }
        if let Some(sort_by) = self.sort_by {
            query_params.push(format!("sort_by={sort_by}"));
        }
        if let Some(sort_dir) = self.sort_dir {
            query_params.push(format!("sort_dir={sort_dir}"));
        }
        if let Some(page) = self.page {
            query_params.push(format!("page={page}"));
        }
        if let Some(per_page) = self.per_page {
            query_params.push(format!("per_page={per_page}"));
        }

        if query_params.is_empty() {
            String::new()
        } else {
            format!("?{}", query_params.join("&"))
        }
    }
}

/// API client for making HTTP requests to the reporting server
///
/// Every request carries the configured timeout; a request that exceeds it
/// is aborted and reported with a fixed message.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client from the client configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout.max(1)))
            .build()
            .map_err(|e| Error::Configuration {
                message: format!("Failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Filter options for the inpatient revenue page
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, times out, or the response
    /// cannot be parsed.
    pub async fn revenue_init(&self) -> Result<InitResponse> {
        self.get_json("/api/inpatient_total_revenue/init".to_string())
            .await
    }

    /// Summary cards and trend chart for the inpatient revenue page
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, times out, or the response
    /// cannot be parsed.
    pub async fn revenue_summary(&self, params: &RevenueParams) -> Result<SummaryResponse> {
        self.get_json(format!(
            "/api/inpatient_total_revenue/summary{}",
            params.to_query_string()
        ))
        .await
    }

    /// Detail-table rows for the inpatient revenue page
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, times out, or the response
    /// cannot be parsed.
    pub async fn revenue_query(&self, params: &RevenueParams) -> Result<QueryResponse> {
        self.get_json(format!(
            "/api/inpatient_total_revenue/query{}",
            params.to_query_string()
        ))
        .await
    }

    /// Drug cost report
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, times out, or the response
    /// cannot be parsed.
    pub async fn drug_cost(&self, range: Option<DateRange>) -> Result<DrugCostResponse> {
        self.get_json(format!("/api/drug-cost{}", range_query(range)))
            .await
    }

    /// Outpatient appointment report
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, times out, or the response
    /// cannot be parsed.
    pub async fn outpatient_appointments(
        &self,
        range: Option<DateRange>,
    ) -> Result<AppointmentResponse> {
        self.get_json(format!("/api/outpatient-appointment{}", range_query(range)))
            .await
    }

    /// Service health
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, times out, or the response
    /// cannot be parsed.
    pub async fn health(&self) -> Result<HealthResponse> {
        self.get_json("/health".to_string()).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path_and_query: String) -> Result<T> {
        let url = format!("{}{}", self.base_url, path_and_query);
        debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            // Prefer the server's own message when it sent an error body
            let message = match response.json::<ErrorResponse>().await {
                Ok(body) => body.error,
                Err(_) => format!("server returned {status}"),
            };
            return Err(Error::Http(message));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| Error::Http(format!("Failed to parse response: {e}")))
    }
}

fn range_query(range: Option<DateRange>) -> String {
    range.map_or_else(String::new, |range| {
        format!("?start={}&end={}", range.start, range.end)
    })
}

/// Reduce a transport failure to the error staff will see
fn map_transport_error(error: reqwest::Error) -> Error {
    if error.is_timeout() {
        Error::Timeout
    } else {
        Error::Http(error.to_string())
    }
}
