//! Core data types for hospdash reporting

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Department identifier type (short code such as `CARD`)
pub type DepartmentCode = String;

/// Doctor identifier type
pub type DoctorId = i64;

/// Inclusive calendar date range selected in the filter bar
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    /// First day of the range
    pub start: NaiveDate,

    /// Last day of the range
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting one whose start falls after its end
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidDateRange`] when `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> crate::Result<Self> {
        if start > end {
            return Err(crate::Error::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Whether the given day falls inside the range
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of days covered by the range (at least 1)
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// The same range shifted back by whole calendar months
    ///
    /// Used for month-over-month baselines. Returns `None` when the shift
    /// underflows the calendar.
    #[must_use]
    pub fn shifted_back_months(&self, months: u32) -> Option<Self> {
        let start = self.start.checked_sub_months(Months::new(months))?;
        let end = self.end.checked_sub_months(Months::new(months))?;
        Some(Self { start, end })
    }

    /// The same range shifted back by whole years
    ///
    /// Used for year-over-year baselines.
    #[must_use]
    pub fn shifted_back_years(&self, years: u32) -> Option<Self> {
        self.shifted_back_months(years.checked_mul(12)?)
    }
}

/// Department entry offered by the filter bar
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DepartmentOption {
    /// Short department code
    pub code: DepartmentCode,

    /// Human-readable department name
    pub name: String,
}

/// Doctor entry offered by the filter bar
///
/// The department code is optional: visiting physicians are not attached to
/// a department and only appear while the department filter is inactive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DoctorOption {
    /// Doctor identifier
    pub id: DoctorId,

    /// Doctor display name
    pub name: String,

    /// Code of the department the doctor belongs to, if any
    pub department_code: Option<DepartmentCode>,
}

/// One detail-table row: a doctor's revenue for a single day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RevenueDetailRow {
    /// Day the revenue was booked
    pub date: NaiveDate,

    /// Department code
    pub department_code: DepartmentCode,

    /// Department display name
    pub department_name: String,

    /// Doctor identifier
    pub doctor_id: DoctorId,

    /// Doctor display name
    pub doctor_name: String,

    /// Booked revenue for the day
    pub revenue: Decimal,

    /// Booked cost for the day
    pub cost: Decimal,

    /// Year-over-year revenue growth in percent; absent without a baseline
    pub yoy_pct: Option<f64>,

    /// Month-over-month revenue growth in percent; absent without a baseline
    pub mom_pct: Option<f64>,
}

/// One point of a trend chart series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendPoint {
    /// Day the value belongs to
    pub date: NaiveDate,

    /// Aggregated value for the day
    pub value: Decimal,

    /// Year-over-year growth in percent; absent without a baseline
    pub yoy_pct: Option<f64>,

    /// Month-over-month growth in percent; absent without a baseline
    pub mom_pct: Option<f64>,
}

/// Aggregate totals shown on the summary cards
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RevenueSummary {
    /// Total revenue over the selected range
    pub total_revenue: Decimal,

    /// Total cost over the selected range
    pub total_cost: Decimal,

    /// Year-over-year revenue growth in percent; absent without a baseline
    pub yoy_pct: Option<f64>,

    /// Month-over-month revenue growth in percent; absent without a baseline
    pub mom_pct: Option<f64>,

    /// Number of detail rows contributing to the totals
    pub row_count: u64,
}

/// Growth of `current` over `baseline` in percent
///
/// A zero or negative-to-zero baseline has no meaningful growth figure, so
/// the comparison yields `None` rather than a division artifact.
#[must_use]
pub fn growth_pct(current: Decimal, baseline: Decimal) -> Option<f64> {
    if baseline.is_zero() {
        return None;
    }
    let current = current.to_f64()?;
    let baseline = baseline.to_f64()?;
    Some((current - baseline) / baseline * 100.0)
}

/// Column of the detail table a sort can target
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    /// Row date
    #[default]
    Date,
    /// Department display name
    Department,
    /// Doctor display name
    Doctor,
    /// Revenue amount
    Revenue,
    /// Cost amount
    Cost,
    /// Year-over-year growth percentage
    YoyPct,
    /// Month-over-month growth percentage
    MomPct,
}

impl std::fmt::Display for SortColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Date => write!(f, "date"),
            Self::Department => write!(f, "department"),
            Self::Doctor => write!(f, "doctor"),
            Self::Revenue => write!(f, "revenue"),
            Self::Cost => write!(f, "cost"),
            Self::YoyPct => write!(f, "yoy_pct"),
            Self::MomPct => write!(f, "mom_pct"),
        }
    }
}

/// Direction of a column sort
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Smallest value first
    Asc,
    /// Largest value first
    #[default]
    Desc,
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

/// Pagination information for table responses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaginationInfo {
    /// Current page number (1-based)
    pub page: u32,

    /// Number of rows per page
    pub per_page: u32,

    /// Total number of matching rows
    pub total_count: u64,

    /// Total number of pages (at least 1)
    pub total_pages: u32,

    /// Whether there are more pages
    pub has_next: bool,

    /// Whether there are previous pages
    pub has_prev: bool,
}

impl PaginationInfo {
    /// Compute pagination metadata for a page over `total_count` rows
    #[must_use]
    pub fn new(page: u32, per_page: u32, total_count: u64) -> Self {
        let per_page = per_page.max(1);
        let page = page.max(1);
        let total_pages = total_count
            .div_ceil(u64::from(per_page))
            .try_into()
            .unwrap_or(u32::MAX);
        let total_pages = total_pages.max(1);

        Self {
            page,
            per_page,
            total_count,
            total_pages,
            has_next: u64::from(page) * u64::from(per_page) < total_count,
            has_prev: page > 1,
        }
    }
}

/// Error response structure returned by every endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,

    /// Error code
    pub code: String,

    /// Success status (always false for errors)
    pub success: bool,

    /// Error timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,

    /// Optional additional details
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
            success: false,
            timestamp: chrono::Utc::now(),
            details: None,
        }
    }

    /// Create an error response with details
    pub fn with_details(
        error: impl Into<String>,
        code: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
            success: false,
            timestamp: chrono::Utc::now(),
            details: Some(details),
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::missing_panics_doc,
    clippy::float_cmp,
    clippy::uninlined_format_args
)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_range_rejects_inverted() {
        let result = DateRange::new(date(2025, 6, 30), date(2025, 6, 1));
        assert!(result.is_err());
    }

    #[test]
    fn test_date_range_contains_and_days() {
        let range = DateRange::new(date(2025, 6, 1), date(2025, 6, 30)).unwrap();
        assert!(range.contains(date(2025, 6, 1)));
        assert!(range.contains(date(2025, 6, 30)));
        assert!(!range.contains(date(2025, 7, 1)));
        assert_eq!(range.days(), 30);

        let single = DateRange::new(date(2025, 6, 1), date(2025, 6, 1)).unwrap();
        assert_eq!(single.days(), 1);
    }

    #[test]
    fn test_date_range_shifts() {
        let range = DateRange::new(date(2025, 3, 31), date(2025, 4, 30)).unwrap();

        let mom = range.shifted_back_months(1).unwrap();
        // chrono clamps the end of the month
        assert_eq!(mom.start, date(2025, 2, 28));
        assert_eq!(mom.end, date(2025, 3, 30));

        let yoy = range.shifted_back_years(1).unwrap();
        assert_eq!(yoy.start, date(2024, 3, 31));
        assert_eq!(yoy.end, date(2024, 4, 30));
    }

    #[test]
    fn test_date_range_serialization() {
        let range = DateRange::new(date(2025, 1, 1), date(2025, 1, 31)).unwrap();
        let serialized = serde_json::to_string(&range).unwrap();
        assert_eq!(serialized, r#"{"start":"2025-01-01","end":"2025-01-31"}"#);

        let deserialized: DateRange = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, range);
    }

    #[test]
    fn test_growth_pct_zero_baseline_is_none() {
        assert_eq!(growth_pct(Decimal::from(100), Decimal::ZERO), None);
    }

    #[test]
    fn test_growth_pct() {
        let pct = growth_pct(Decimal::from(120), Decimal::from(100)).unwrap();
        assert!((pct - 20.0).abs() < 1e-9);

        let pct = growth_pct(Decimal::from(80), Decimal::from(100)).unwrap();
        assert!((pct + 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_sort_column_display_matches_serde() {
        for column in [
            SortColumn::Date,
            SortColumn::Department,
            SortColumn::Doctor,
            SortColumn::Revenue,
            SortColumn::Cost,
            SortColumn::YoyPct,
            SortColumn::MomPct,
        ] {
            let serialized = serde_json::to_string(&column).unwrap();
            assert_eq!(serialized, format!("\"{column}\""));
        }
    }

    #[test]
    fn test_sort_direction_display_matches_serde() {
        assert_eq!(serde_json::to_string(&SortDirection::Asc).unwrap(), "\"asc\"");
        assert_eq!(
            serde_json::to_string(&SortDirection::Desc).unwrap(),
            "\"desc\""
        );
        assert_eq!(SortDirection::default(), SortDirection::Desc);
    }

    #[test]
    fn test_pagination_info() {
        let pagination = PaginationInfo::new(2, 10, 95);

        assert_eq!(pagination.page, 2);
        assert_eq!(pagination.per_page, 10);
        assert_eq!(pagination.total_count, 95);
        assert_eq!(pagination.total_pages, 10);
        assert!(pagination.has_next);
        assert!(pagination.has_prev);
    }

    #[test]
    fn test_pagination_info_empty_set_has_one_page() {
        let pagination = PaginationInfo::new(1, 25, 0);

        assert_eq!(pagination.total_pages, 1);
        assert!(!pagination.has_next);
        assert!(!pagination.has_prev);
    }

    #[test]
    fn test_detail_row_serialization() {
        let row = RevenueDetailRow {
            date: date(2025, 6, 15),
            department_code: "CARD".to_string(),
            department_name: "Cardiology".to_string(),
            doctor_id: 42,
            doctor_name: "Gregory Pratt".to_string(),
            revenue: Decimal::new(1234_56, 2),
            cost: Decimal::new(789_01, 2),
            yoy_pct: Some(12.5),
            mom_pct: None,
        };

        let serialized = serde_json::to_string(&row).unwrap();
        let deserialized: RevenueDetailRow = serde_json::from_str(&serialized).unwrap();

        assert_eq!(deserialized, row);
        assert!(serialized.contains(r#""mom_pct":null"#));
    }

    #[test]
    fn test_error_response_new() {
        let response = ErrorResponse::new("Something went wrong", "INTERNAL_ERROR");

        assert_eq!(response.error, "Something went wrong");
        assert_eq!(response.code, "INTERNAL_ERROR");
        assert!(!response.success);
        assert!(response.details.is_none());
    }

    #[test]
    fn test_error_response_with_details() {
        let details = serde_json::json!({"field": "per_page", "message": "Out of range"});
        let response =
            ErrorResponse::with_details("Validation failed", "INVALID_PARAMETERS", details.clone());

        assert_eq!(response.code, "INVALID_PARAMETERS");
        assert_eq!(response.details, Some(details));
    }

    proptest! {
        #[test]
        fn test_pagination_metadata_consistent(
            page in 1u32..500,
            per_page in 1u32..200,
            total in 0u64..100_000,
        ) {
            let info = PaginationInfo::new(page, per_page, total);

            prop_assert!(info.total_pages >= 1);
            prop_assert_eq!(info.has_prev, page > 1);
            prop_assert_eq!(
                info.has_next,
                u64::from(page) * u64::from(per_page) < total
            );
            // every row fits inside total_pages pages
            prop_assert!(u64::from(info.total_pages) * u64::from(per_page) >= total);
        }

        #[test]
        fn test_sort_column_roundtrip(column in prop_oneof![
            Just(SortColumn::Date),
            Just(SortColumn::Department),
            Just(SortColumn::Doctor),
            Just(SortColumn::Revenue),
            Just(SortColumn::Cost),
            Just(SortColumn::YoyPct),
            Just(SortColumn::MomPct),
        ]) {
            let serialized = serde_json::to_string(&column).unwrap();
            let deserialized: SortColumn = serde_json::from_str(&serialized).unwrap();
            prop_assert_eq!(column, deserialized);
        }

        #[test]
        fn test_growth_pct_never_panics(
            current in -1_000_000i64..1_000_000,
            baseline in -1_000_000i64..1_000_000,
        ) {
            let result = growth_pct(Decimal::from(current), Decimal::from(baseline));
            if baseline == 0 {
                prop_assert_eq!(result, None);
            } else {
                prop_assert!(result.is_some());
            }
        }
    }
}
