//! Inpatient total revenue endpoints: filter options, summary cards,
//! detail-table rows

use crate::handlers::{
    HandlerError, invalid_parameters, parse_department_codes, parse_doctor_ids, resolve_range,
};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    response::Json,
};
use chrono::NaiveDate;
use hospdash_core::pipeline::{self, shape_page};
use hospdash_core::types::{
    DateRange, DepartmentOption, DoctorOption, PaginationInfo, RevenueDetailRow, RevenueSummary,
    SortColumn, SortDirection, TrendPoint,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

/// Query parameters shared by the summary and query endpoints
#[derive(Debug, Deserialize, Validate)]
pub struct RevenueQuery {
    /// First day of the reporting range (requires `end`)
    pub start: Option<NaiveDate>,

    /// Last day of the reporting range (requires `start`)
    pub end: Option<NaiveDate>,

    /// Comma-separated department codes to include
    pub departments: Option<String>,

    /// Comma-separated doctor ids to include
    pub doctors: Option<String>,

    /// Column to sort the detail table by
    pub sort_by: Option<SortColumn>,

    /// Sort direction
    pub sort_dir: Option<SortDirection>,

    /// Page number (1-based); presence enables server-side pagination
    #[validate(range(min = 1, max = 10_000))]
    pub page: Option<u32>,

    /// Rows per page
    #[validate(range(min = 1, max = 200))]
    pub per_page: Option<u32>,
}

/// Rows per page when pagination is requested without an explicit size
const DEFAULT_PER_PAGE: u32 = 20;

/// Response for the `init` endpoint populating the filter bar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitResponse {
    /// Departments offered by the department multiselect
    pub departments: Vec<DepartmentOption>,

    /// Doctors offered by the doctor multiselect
    pub doctors: Vec<DoctorOption>,

    /// Range a page opens with
    pub default_range: DateRange,

    /// Days covered by the reporting data
    pub coverage: DateRange,
}

/// Response for the `summary` endpoint feeding cards and the trend chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    /// Range the figures cover
    pub range: DateRange,

    /// Aggregate totals for the summary cards
    pub summary: RevenueSummary,

    /// Daily revenue series for the trend chart
    pub trend: Vec<TrendPoint>,

    /// Response generation timestamp
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// Response for the `query` endpoint feeding the detail table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Range the rows cover
    pub range: DateRange,

    /// Detail rows in display order
    pub rows: Vec<RevenueDetailRow>,

    /// Total number of matching rows
    pub total: u64,

    /// Pagination metadata, present when pagination was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationInfo>,
}

/// Populate the filter bar: departments, doctors, default range
pub async fn init(State(state): State<Arc<AppState>>) -> Json<InitResponse> {
    let dataset = &state.dataset;

    Json(InitResponse {
        departments: dataset.departments().to_vec(),
        doctors: dataset.doctors().to_vec(),
        default_range: dataset.default_range(),
        coverage: dataset.coverage(),
    })
}

/// Summary cards and trend chart for the selected filters
pub async fn summary(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RevenueQuery>,
) -> Result<Json<SummaryResponse>, HandlerError> {
    if let Err(validation_errors) = query.validate() {
        warn!("Invalid revenue summary parameters: {:?}", validation_errors);
        return Err(invalid_parameters(&validation_errors));
    }

    let range = resolve_range(query.start, query.end, state.dataset.default_range())?;
    let departments = parse_department_codes(query.departments.as_deref());
    let doctors = parse_doctor_ids(query.doctors.as_deref())?;

    info!(
        "Revenue summary: {}..{}, {} departments, {} doctors",
        range.start,
        range.end,
        departments.len(),
        doctors.len()
    );

    let summary = state.dataset.revenue_summary(range, &departments, &doctors);
    let trend = state.dataset.revenue_trend(range, &departments, &doctors);

    Ok(Json(SummaryResponse {
        range,
        summary,
        trend,
        generated_at: chrono::Utc::now(),
    }))
}

/// Detail-table rows for the selected filters
///
/// Without `page`/`per_page` the full matching row set is returned in the
/// requested order and the page layer shapes it locally. With them the same
/// shaping pipeline runs server-side and one page is returned.
pub async fn query(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RevenueQuery>,
) -> Result<Json<QueryResponse>, HandlerError> {
    if let Err(validation_errors) = query.validate() {
        warn!("Invalid revenue query parameters: {:?}", validation_errors);
        return Err(invalid_parameters(&validation_errors));
    }

    let range = resolve_range(query.start, query.end, state.dataset.default_range())?;
    let departments = parse_department_codes(query.departments.as_deref());
    let doctors = parse_doctor_ids(query.doctors.as_deref())?;

    let column = query.sort_by.unwrap_or_default();
    let direction = query.sort_dir.unwrap_or_default();

    // Doctor filtering is left to the shaping pipeline so server-side and
    // page-local shaping go through the same code path.
    let all_rows = state
        .dataset
        .revenue_rows(range, &departments, &BTreeSet::new());

    let paginated = query.page.is_some() || query.per_page.is_some();
    let response = if paginated {
        let page = query.page.unwrap_or(1);
        let per_page = query.per_page.unwrap_or(DEFAULT_PER_PAGE);
        let shaped = shape_page(&all_rows, &doctors, column, direction, page, per_page);

        info!(
            "Revenue query: {}..{} page {}/{} ({} rows total)",
            range.start,
            range.end,
            shaped.pagination.page,
            shaped.pagination.total_pages,
            shaped.pagination.total_count
        );

        QueryResponse {
            range,
            total: shaped.pagination.total_count,
            pagination: Some(shaped.pagination),
            rows: shaped.rows,
        }
    } else {
        let mut rows = pipeline::filter_by_doctors(&all_rows, &doctors);
        pipeline::sort_rows(&mut rows, column, direction);

        info!(
            "Revenue query: {}..{} returning all {} rows",
            range.start,
            range.end,
            rows.len()
        );

        QueryResponse {
            range,
            total: rows.len() as u64,
            pagination: None,
            rows,
        }
    };

    Ok(Json(response))
}
