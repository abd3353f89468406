//! Drug cost report endpoint

use crate::handlers::{HandlerError, invalid_parameters, resolve_range};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    response::Json,
};
use chrono::NaiveDate;
use hospdash_core::types::{DateRange, TrendPoint};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

/// Query parameters for the drug cost report
#[derive(Debug, Deserialize, Validate)]
pub struct DrugCostQuery {
    /// First day of the reporting range (requires `end`)
    pub start: Option<NaiveDate>,

    /// Last day of the reporting range (requires `start`)
    pub end: Option<NaiveDate>,
}

/// Aggregate drug cost figures for the summary cards
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrugCostSummary {
    /// Total drug cost over the range
    pub total_cost: Decimal,

    /// Average cost per covered day
    pub avg_daily_cost: Decimal,

    /// Year-over-year cost growth in percent; absent without a baseline
    pub yoy_pct: Option<f64>,

    /// Month-over-month cost growth in percent; absent without a baseline
    pub mom_pct: Option<f64>,
}

/// Response for the drug cost report page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrugCostResponse {
    /// Range the figures cover
    pub range: DateRange,

    /// Aggregate figures for the summary cards
    pub summary: DrugCostSummary,

    /// Daily cost series for the trend chart
    pub series: Vec<TrendPoint>,

    /// Response generation timestamp
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// Drug cost KPIs and daily trend over the selected range
pub async fn report(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DrugCostQuery>,
) -> Result<Json<DrugCostResponse>, HandlerError> {
    if let Err(validation_errors) = query.validate() {
        warn!("Invalid drug cost parameters: {:?}", validation_errors);
        return Err(invalid_parameters(&validation_errors));
    }

    let range = resolve_range(query.start, query.end, state.dataset.default_range())?;
    let (total_cost, yoy_pct, mom_pct) = state.dataset.drug_cost_total(range);
    let series = state.dataset.drug_cost_series(range);

    info!(
        "Drug cost report: {}..{} ({} points)",
        range.start,
        range.end,
        series.len()
    );

    let avg_daily_cost = (total_cost / Decimal::from(range.days())).round_dp(2);

    Ok(Json(DrugCostResponse {
        range,
        summary: DrugCostSummary {
            total_cost,
            avg_daily_cost,
            yoy_pct,
            mom_pct,
        },
        series,
        generated_at: chrono::Utc::now(),
    }))
}
