//! Request handlers for the reporting endpoints

pub mod appointments;
pub mod drug_cost;
pub mod health;
pub mod revenue;

use axum::{http::StatusCode, response::Json};
use chrono::NaiveDate;
use hospdash_core::types::{DateRange, DoctorId, ErrorResponse};
use std::collections::BTreeSet;

/// Error shape shared by every handler
pub type HandlerError = (StatusCode, Json<ErrorResponse>);

/// 400 with a stable error code
pub(crate) fn bad_request(message: impl Into<String>, code: &str) -> HandlerError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new(message, code)),
    )
}

/// 400 carrying the validator error details
pub(crate) fn invalid_parameters(errors: &validator::ValidationErrors) -> HandlerError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::with_details(
            "Invalid query parameters",
            "INVALID_PARAMETERS",
            serde_json::json!(errors),
        )),
    )
}

/// Resolve the requested date range
///
/// Both bounds present selects that range (rejecting an inverted one), both
/// absent falls back to the page default; a single bound is an error.
pub(crate) fn resolve_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    fallback: DateRange,
) -> Result<DateRange, HandlerError> {
    match (start, end) {
        (Some(start), Some(end)) => DateRange::new(start, end).map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(e.to_string(), "INVALID_DATE_RANGE")),
            )
        }),
        (None, None) => Ok(fallback),
        _ => Err(bad_request(
            "Provide both start and end, or neither",
            "INVALID_DATE_RANGE",
        )),
    }
}

/// Parse a comma-separated department code list (`CARD,NEUR`)
pub(crate) fn parse_department_codes(raw: Option<&str>) -> BTreeSet<String> {
    raw.map_or_else(BTreeSet::new, |raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(str::to_uppercase)
            .collect()
    })
}

/// Parse a comma-separated doctor id list (`3,17,42`)
pub(crate) fn parse_doctor_ids(raw: Option<&str>) -> Result<BTreeSet<DoctorId>, HandlerError> {
    let Some(raw) = raw else {
        return Ok(BTreeSet::new());
    };

    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| {
            id.parse::<DoctorId>().map_err(|_| {
                bad_request(
                    format!("Invalid doctor id: {id}"),
                    "INVALID_PARAMETERS",
                )
            })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_resolve_range_uses_fallback_when_absent() {
        let fallback = DateRange::new(date(2025, 6, 1), date(2025, 6, 30)).unwrap();
        let range = resolve_range(None, None, fallback).unwrap();
        assert_eq!(range, fallback);
    }

    #[test]
    fn test_resolve_range_rejects_single_bound() {
        let fallback = DateRange::new(date(2025, 6, 1), date(2025, 6, 30)).unwrap();
        let result = resolve_range(Some(date(2025, 6, 1)), None, fallback);
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_range_rejects_inverted() {
        let fallback = DateRange::new(date(2025, 6, 1), date(2025, 6, 30)).unwrap();
        let result = resolve_range(Some(date(2025, 6, 30)), Some(date(2025, 6, 1)), fallback);

        let (status, body) = result.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "INVALID_DATE_RANGE");
    }

    #[test]
    fn test_parse_department_codes() {
        let codes = parse_department_codes(Some("card, NEUR,,orth"));
        let expected: BTreeSet<String> = ["CARD", "NEUR", "ORTH"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(codes, expected);

        assert!(parse_department_codes(None).is_empty());
        assert!(parse_department_codes(Some("")).is_empty());
    }

    #[test]
    fn test_parse_doctor_ids() {
        let ids = parse_doctor_ids(Some("3, 17,42")).unwrap();
        let expected: BTreeSet<DoctorId> = [3, 17, 42].into_iter().collect();
        assert_eq!(ids, expected);

        assert!(parse_doctor_ids(None).unwrap().is_empty());
        assert!(parse_doctor_ids(Some("3,abc")).is_err());
    }
}
