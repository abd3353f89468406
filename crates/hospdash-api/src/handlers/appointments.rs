//! Outpatient appointment report endpoint

use crate::handlers::{HandlerError, invalid_parameters, resolve_range};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    response::Json,
};
use chrono::NaiveDate;
use hospdash_core::types::{DateRange, TrendPoint, growth_pct};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

/// Query parameters for the appointment report
#[derive(Debug, Deserialize, Validate)]
pub struct AppointmentQuery {
    /// First day of the reporting range (requires `end`)
    pub start: Option<NaiveDate>,

    /// Last day of the reporting range (requires `start`)
    pub end: Option<NaiveDate>,
}

/// Aggregate appointment figures for the summary cards
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentSummary {
    /// Appointments booked over the range
    pub scheduled: i64,

    /// Appointments that took place
    pub completed: i64,

    /// Appointments cancelled or missed
    pub cancelled: i64,

    /// Share of scheduled appointments that completed, in percent
    pub completion_rate_pct: Option<f64>,

    /// Year-over-year growth of scheduled appointments in percent
    pub yoy_pct: Option<f64>,

    /// Month-over-month growth of scheduled appointments in percent
    pub mom_pct: Option<f64>,
}

/// Response for the appointment report page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentResponse {
    /// Range the figures cover
    pub range: DateRange,

    /// Aggregate figures for the summary cards
    pub summary: AppointmentSummary,

    /// Daily scheduled-appointment series for the trend chart
    pub series: Vec<TrendPoint>,

    /// Response generation timestamp
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// Appointment KPIs and daily trend over the selected range
pub async fn report(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AppointmentQuery>,
) -> Result<Json<AppointmentResponse>, HandlerError> {
    if let Err(validation_errors) = query.validate() {
        warn!("Invalid appointment parameters: {:?}", validation_errors);
        return Err(invalid_parameters(&validation_errors));
    }

    let range = resolve_range(query.start, query.end, state.dataset.default_range())?;
    let totals = state.dataset.appointment_totals(range);
    let series = state.dataset.appointment_series(range);

    info!(
        "Appointment report: {}..{} ({} scheduled)",
        range.start, range.end, totals.scheduled
    );

    let completion_rate_pct = (totals.scheduled > 0)
        .then(|| totals.completed as f64 / totals.scheduled as f64 * 100.0);

    let yoy_pct = range.shifted_back_years(1).and_then(|baseline| {
        let base = state.dataset.appointment_totals(baseline);
        growth_pct(
            Decimal::from(totals.scheduled),
            Decimal::from(base.scheduled),
        )
    });
    let mom_pct = range.shifted_back_months(1).and_then(|baseline| {
        let base = state.dataset.appointment_totals(baseline);
        growth_pct(
            Decimal::from(totals.scheduled),
            Decimal::from(base.scheduled),
        )
    });

    Ok(Json(AppointmentResponse {
        range,
        summary: AppointmentSummary {
            scheduled: totals.scheduled,
            completed: totals.completed,
            cancelled: totals.cancelled,
            completion_rate_pct,
            yoy_pct,
            mom_pct,
        },
        series,
        generated_at: chrono::Utc::now(),
    }))
}
