//! Inpatient total revenue page: filter bar, summary cards, trend chart
//! and the paginated detail table

use crate::api_client::{ApiClient, RevenueParams};
use crate::table::TableState;
use hospdash_core::Result;
use hospdash_core::filters::{FilterOptions, FilterState};
use hospdash_core::pipeline::{DetailPage, shape_page};
use hospdash_core::types::{
    DateRange, DoctorId, RevenueDetailRow, RevenueSummary, SortColumn, TrendPoint,
};
use tracing::debug;

/// View state of the inpatient revenue page
#[derive(Debug, Clone)]
pub struct InpatientRevenuePage {
    filter: FilterState,
    table: TableState,
    rows: Vec<RevenueDetailRow>,
    summary: Option<RevenueSummary>,
    trend: Vec<TrendPoint>,
    error: Option<String>,
}

impl InpatientRevenuePage {
    /// Open the page: load filter options and the default range
    ///
    /// # Errors
    ///
    /// Returns an error when the filter options cannot be loaded; without
    /// them the page has nothing to offer.
    pub async fn open(client: &ApiClient, per_page: u32) -> Result<Self> {
        let init = client.revenue_init().await?;

        let options = FilterOptions {
            departments: init.departments,
            doctors: init.doctors,
        };

        Ok(Self {
            filter: FilterState::new(options, init.default_range),
            table: TableState::new(per_page),
            rows: Vec::new(),
            summary: None,
            trend: Vec::new(),
            error: None,
        })
    }

    /// Fetch summary and detail rows for the current selection
    ///
    /// Each response replaces the previous one wholesale; the last
    /// completed fetch wins. A failure leaves the previous data in place
    /// and surfaces one message.
    pub async fn refresh(&mut self, client: &ApiClient) {
        self.error = None;

        let doctors: Vec<DoctorId> = self.filter.selected_doctors().iter().copied().collect();
        let departments: Vec<String> = self
            .filter
            .selected_departments()
            .iter()
            .cloned()
            .collect();

        // Summary cards reflect the full selection server-side
        let summary_params = RevenueParams {
            range: Some(self.filter.date_range()),
            departments: departments.clone(),
            doctors,
            ..RevenueParams::default()
        };
        match client.revenue_summary(&summary_params).await {
            Ok(response) => {
                self.summary = Some(response.summary);
                self.trend = response.trend;
            }
            Err(e) => self.error = Some(e.to_string()),
        }

        // The detail table fetches department-filtered rows once and shapes
        // them locally (doctor filter, sort, pagination)
        let query_params = RevenueParams {
            range: Some(self.filter.date_range()),
            departments,
            ..RevenueParams::default()
        };
        match client.revenue_query(&query_params).await {
            Ok(response) => {
                debug!("Loaded {} detail rows", response.rows.len());
                self.rows = response.rows;
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    /// The detail-table page for the current sort, filters and page number
    #[must_use]
    pub fn visible_rows(&self) -> DetailPage {
        shape_page(
            &self.rows,
            self.filter.selected_doctors(),
            self.table.sort_column,
            self.table.sort_direction,
            self.table.page,
            self.table.per_page,
        )
    }

    /// Replace the selected date range and jump back to page 1
    pub fn set_date_range(&mut self, range: DateRange) {
        self.filter.set_date_range(range);
        self.table.reset_page();
    }

    /// Replace the department selection and jump back to page 1
    ///
    /// Narrowing prunes doctor selections that left with their department.
    pub fn select_departments<I>(&mut self, codes: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.filter.set_departments(codes);
        self.table.reset_page();
    }

    /// Replace the doctor selection and jump back to page 1
    pub fn select_doctors<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = DoctorId>,
    {
        self.filter.set_doctors(ids);
        self.table.reset_page();
    }

    /// React to a column-header click
    pub fn toggle_sort(&mut self, column: SortColumn) {
        self.table.toggle_sort(column);
    }

    /// Jump to a detail-table page
    pub fn set_page(&mut self, page: u32) {
        self.table.set_page(page);
    }

    /// Filter-bar state (options, selections, date range)
    #[must_use]
    pub const fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Current table state (sort and page)
    #[must_use]
    pub const fn table(&self) -> TableState {
        self.table
    }

    /// Summary card figures, once loaded
    #[must_use]
    pub const fn summary(&self) -> Option<&RevenueSummary> {
        self.summary.as_ref()
    }

    /// Trend chart series, once loaded
    #[must_use]
    pub fn trend(&self) -> &[TrendPoint] {
        &self.trend
    }

    /// All detail rows currently held by the page
    #[must_use]
    pub fn rows(&self) -> &[RevenueDetailRow] {
        &self.rows
    }

    /// Message of the last failed fetch, if any
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
