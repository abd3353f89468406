//! Application state management

use crate::dataset::ReportDataset;
use hospdash_core::{Config, context_error, context_error::Result};
use std::time::Instant;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Config,
    /// In-memory reporting dataset
    pub dataset: ReportDataset,
    /// Server start time, for uptime reporting
    started_at: Instant,
}

impl AppState {
    /// Create new application state, generating the reporting dataset
    #[must_use]
    pub fn new(config: Config) -> Self {
        let dataset = ReportDataset::generate(&config.dataset);

        Self {
            config,
            dataset,
            started_at: Instant::now(),
        }
    }

    /// Seconds elapsed since the server started
    #[must_use]
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    /// Check that the application can serve reports
    ///
    /// # Errors
    ///
    /// Returns an error if the generated dataset is unusable.
    pub fn validate(&self) -> Result<()> {
        let stats = self.dataset.stats();

        if stats.revenue_rows == 0 {
            return Err(context_error!(
                "Reporting dataset is empty for {}..{}",
                stats.coverage.start,
                stats.coverage.end
            ));
        }

        if self.dataset.departments().is_empty() || self.dataset.doctors().is_empty() {
            return Err(context_error!("Reporting dataset has no filter options"));
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn test_config() -> Config {
        let mut config = Config::default();
        config.dataset.start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        config.dataset.end = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        config.dataset.doctors_per_department = 1;
        config
    }

    #[test]
    fn test_appstate_new_generates_dataset() {
        let state = AppState::new(test_config());

        assert!(state.dataset.stats().revenue_rows > 0);
        assert!(state.validate().is_ok());
    }

    #[test]
    fn test_appstate_clone_shares_figures() {
        let state1 = AppState::new(test_config());
        let state2 = state1.clone();

        assert_eq!(
            state1.dataset.stats().revenue_rows,
            state2.dataset.stats().revenue_rows
        );
    }

    #[test]
    fn test_uptime_starts_near_zero() {
        let state = AppState::new(test_config());
        assert!(state.uptime_seconds() < 5);
    }
}
