//! Error types for the hospdash reporting suite

use std::{error::Error as StdError, fmt};

/// Main error type for the hospdash reporting suite
#[derive(Debug)]
pub enum Error {
    /// Configuration error
    Configuration {
        /// Error message
        message: String,
    },

    /// Validation error
    Validation {
        /// Field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },

    /// Date range where the start falls after the end
    InvalidDateRange {
        /// Requested range start
        start: chrono::NaiveDate,
        /// Requested range end
        end: chrono::NaiveDate,
    },

    /// HTTP transport or status failure
    Http(String),

    /// Request timed out
    ///
    /// The request was aborted; the message shown to staff is fixed.
    Timeout,

    /// Not found error
    NotFound {
        /// Resource that was not found
        resource: String,
    },

    /// Serialization error
    Serialization(serde_json::Error),

    /// Other error
    Other(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration { message } => write!(f, "Configuration error: {message}"),
            Self::Validation { field, message } => {
                write!(f, "Validation error: {field} - {message}")
            }
            Self::InvalidDateRange { start, end } => {
                write!(f, "Invalid date range: {start} is after {end}")
            }
            Self::Http(msg) => write!(f, "Request failed: {msg}"),
            Self::Timeout => write!(f, "Request timed out"),
            Self::NotFound { resource } => write!(f, "Resource not found: {resource}"),
            Self::Serialization(err) => write!(f, "Serialization error: {err}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Serialization(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err)
    }
}

#[cfg(test)]
#[allow(
    clippy::missing_panics_doc,
    clippy::uninlined_format_args,
    clippy::match_same_arms
)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_configuration_error() {
        let error = Error::Configuration {
            message: "Missing server section".to_string(),
        };

        assert_eq!(
            format!("{}", error),
            "Configuration error: Missing server section"
        );
    }

    #[test]
    fn test_validation_error() {
        let error = Error::Validation {
            field: "per_page".to_string(),
            message: "Must be between 1 and 200".to_string(),
        };

        assert_eq!(
            format!("{}", error),
            "Validation error: per_page - Must be between 1 and 200"
        );
    }

    #[test]
    fn test_invalid_date_range_error() {
        let error = Error::InvalidDateRange {
            start: chrono::NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            end: chrono::NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        };

        assert_eq!(
            format!("{}", error),
            "Invalid date range: 2025-06-30 is after 2025-06-01"
        );
    }

    #[test]
    fn test_timeout_error_message_is_fixed() {
        assert_eq!(format!("{}", Error::Timeout), "Request timed out");
    }

    #[test]
    fn test_http_error() {
        let error = Error::Http("server returned 503".to_string());
        assert_eq!(format!("{}", error), "Request failed: server returned 503");
    }

    #[test]
    fn test_not_found_error() {
        let error = Error::NotFound {
            resource: "department XRAY".to_string(),
        };

        assert_eq!(format!("{}", error), "Resource not found: department XRAY");
    }

    #[test]
    fn test_serialization_error_conversion() {
        let json_str = r#"{"invalid": json}"#;
        let json_error = serde_json::from_str::<serde_json::Value>(json_str).unwrap_err();
        let app_error = Error::from(json_error);

        match app_error {
            Error::Serialization(_) => {}
            _ => panic!("Expected Serialization error variant"),
        }

        assert!(format!("{}", app_error).contains("Serialization error"));
        assert!(app_error.source().is_some());
    }

    #[test]
    fn test_other_error() {
        let error = Error::Other("Unexpected failure".to_string());
        assert_eq!(format!("{}", error), "Unexpected failure");
    }

    #[test]
    fn test_error_source_for_plain_variants() {
        let error = Error::Configuration {
            message: "test".to_string(),
        };
        assert!(error.source().is_none());

        let error = Error::Timeout;
        assert!(error.source().is_none());

        let error = Error::Http("test".to_string());
        assert!(error.source().is_none());
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<String> {
            Ok("success".to_string())
        }

        fn returns_error() -> Result<String> {
            Err(Error::Other("test error".to_string()))
        }

        assert!(returns_result().is_ok());
        assert!(returns_error().is_err());
    }
}
