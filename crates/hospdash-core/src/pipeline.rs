//! Detail-table shaping: filter by doctors, sort, paginate
//!
//! Every step is a pure function over row arrays so the same shaping runs
//! identically on the server (`query` endpoint) and in the page layer.

use crate::types::{
    DoctorId, PaginationInfo, RevenueDetailRow, SortColumn, SortDirection,
};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// One shaped page of the detail table
#[derive(Debug, Clone, PartialEq)]
pub struct DetailPage {
    /// Rows of the requested page, in display order
    pub rows: Vec<RevenueDetailRow>,

    /// Pagination metadata over all matching rows
    pub pagination: PaginationInfo,
}

/// Keep the rows booked by one of the selected doctors
///
/// An empty selection means the doctor filter is inactive: every row passes.
#[must_use]
pub fn filter_by_doctors(
    rows: &[RevenueDetailRow],
    selected: &BTreeSet<DoctorId>,
) -> Vec<RevenueDetailRow> {
    if selected.is_empty() {
        return rows.to_vec();
    }

    rows.iter()
        .filter(|row| selected.contains(&row.doctor_id))
        .cloned()
        .collect()
}

/// Sort rows by the chosen column and direction
///
/// Comparators are type-aware: dates and amounts compare numerically,
/// names compare case-insensitively, and absent growth percentages sort
/// last regardless of direction. Equal keys fall back to `(date,
/// doctor_id)` ascending so the order is deterministic for any input
/// permutation.
pub fn sort_rows(rows: &mut [RevenueDetailRow], column: SortColumn, direction: SortDirection) {
    rows.sort_by(|a, b| compare_rows(a, b, column, direction));
}

/// Slice out the 1-based `page` of `per_page` rows
///
/// A page past the end yields an empty slice with truthful metadata.
#[must_use]
pub fn paginate(
    rows: Vec<RevenueDetailRow>,
    page: u32,
    per_page: u32,
) -> (Vec<RevenueDetailRow>, PaginationInfo) {
    let per_page = per_page.max(1);
    let page = page.max(1);
    let pagination = PaginationInfo::new(page, per_page, rows.len() as u64);

    let start = (page as usize - 1).saturating_mul(per_page as usize);
    let rows = rows
        .into_iter()
        .skip(start)
        .take(per_page as usize)
        .collect();

    (rows, pagination)
}

/// The composed pipeline: filter by selected doctors, sort, paginate
#[must_use]
pub fn shape_page(
    rows: &[RevenueDetailRow],
    selected_doctors: &BTreeSet<DoctorId>,
    column: SortColumn,
    direction: SortDirection,
    page: u32,
    per_page: u32,
) -> DetailPage {
    let mut matching = filter_by_doctors(rows, selected_doctors);
    sort_rows(&mut matching, column, direction);
    let (rows, pagination) = paginate(matching, page, per_page);

    DetailPage { rows, pagination }
}

fn compare_rows(
    a: &RevenueDetailRow,
    b: &RevenueDetailRow,
    column: SortColumn,
    direction: SortDirection,
) -> Ordering {
    let primary = match column {
        SortColumn::Date => directed(a.date.cmp(&b.date), direction),
        SortColumn::Department => {
            directed(compare_names(&a.department_name, &b.department_name), direction)
        }
        SortColumn::Doctor => directed(compare_names(&a.doctor_name, &b.doctor_name), direction),
        SortColumn::Revenue => directed(a.revenue.cmp(&b.revenue), direction),
        SortColumn::Cost => directed(a.cost.cmp(&b.cost), direction),
        SortColumn::YoyPct => compare_nullable(a.yoy_pct, b.yoy_pct, direction),
        SortColumn::MomPct => compare_nullable(a.mom_pct, b.mom_pct, direction),
    };

    primary
        .then_with(|| a.date.cmp(&b.date))
        .then_with(|| a.doctor_id.cmp(&b.doctor_id))
}

const fn directed(ordering: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

/// Case-insensitive name comparison with the raw string as final fallback
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Nullable comparison where `None` sorts last in BOTH directions
fn compare_nullable(a: Option<f64>, b: Option<f64>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => directed(x.total_cmp(&y), direction),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
