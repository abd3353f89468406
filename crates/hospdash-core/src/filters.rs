//! Dependent filter-bar state: date range, departments, doctors
//!
//! The doctor list narrows to the selected departments, and doctor
//! selections that fall outside the narrowed list are pruned automatically.

use crate::types::{DateRange, DepartmentCode, DepartmentOption, DoctorId, DoctorOption};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Filter options served by an `init` endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterOptions {
    /// Departments offered by the department multiselect
    pub departments: Vec<DepartmentOption>,

    /// Doctors offered by the doctor multiselect (before narrowing)
    pub doctors: Vec<DoctorOption>,
}

/// Filter-bar state owned by a report page
#[derive(Debug, Clone)]
pub struct FilterState {
    options: FilterOptions,
    date_range: DateRange,
    departments: BTreeSet<DepartmentCode>,
    doctors: BTreeSet<DoctorId>,
}

impl FilterState {
    /// Create filter state over the given options and initial date range
    #[must_use]
    pub fn new(options: FilterOptions, date_range: DateRange) -> Self {
        Self {
            options,
            date_range,
            departments: BTreeSet::new(),
            doctors: BTreeSet::new(),
        }
    }

    /// The options the selects were populated with
    #[must_use]
    pub const fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Currently selected date range
    #[must_use]
    pub const fn date_range(&self) -> DateRange {
        self.date_range
    }

    /// Currently selected department codes
    #[must_use]
    pub const fn selected_departments(&self) -> &BTreeSet<DepartmentCode> {
        &self.departments
    }

    /// Currently selected doctor ids
    #[must_use]
    pub const fn selected_doctors(&self) -> &BTreeSet<DoctorId> {
        &self.doctors
    }

    /// Doctors offered by the doctor multiselect for the current
    /// department selection
    ///
    /// With no department selected every doctor is offered. With an active
    /// department filter only doctors attached to one of the selected
    /// departments appear; unattached doctors drop out.
    #[must_use]
    pub fn available_doctors(&self) -> Vec<&DoctorOption> {
        if self.departments.is_empty() {
            return self.options.doctors.iter().collect();
        }

        self.options
            .doctors
            .iter()
            .filter(|doctor| {
                doctor
                    .department_code
                    .as_ref()
                    .is_some_and(|code| self.departments.contains(code))
            })
            .collect()
    }

    /// Replace the selected date range
    pub fn set_date_range(&mut self, range: DateRange) {
        self.date_range = range;
    }

    /// Replace the department selection
    ///
    /// Unknown codes are discarded. Doctor selections that fall outside the
    /// narrowed doctor list are pruned.
    pub fn set_departments<I>(&mut self, codes: I)
    where
        I: IntoIterator<Item = DepartmentCode>,
    {
        let known: BTreeSet<&DepartmentCode> =
            self.options.departments.iter().map(|d| &d.code).collect();

        self.departments = codes
            .into_iter()
            .filter(|code| known.contains(code))
            .collect();

        let available: BTreeSet<DoctorId> =
            self.available_doctors().iter().map(|d| d.id).collect();
        self.doctors.retain(|id| available.contains(id));
    }

    /// Replace the doctor selection, discarding ids not currently offered
    pub fn set_doctors<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = DoctorId>,
    {
        let available: BTreeSet<DoctorId> =
            self.available_doctors().iter().map(|d| d.id).collect();

        self.doctors = ids
            .into_iter()
            .filter(|id| available.contains(id))
            .collect();
    }

    /// Clear department and doctor selections, keeping the date range
    pub fn clear_selections(&mut self) {
        self.departments.clear();
        self.doctors.clear();
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn options() -> FilterOptions {
        FilterOptions {
            departments: vec![
                DepartmentOption {
                    code: "CARD".to_string(),
                    name: "Cardiology".to_string(),
                },
                DepartmentOption {
                    code: "NEUR".to_string(),
                    name: "Neurology".to_string(),
                },
                DepartmentOption {
                    code: "ORTH".to_string(),
                    name: "Orthopedics".to_string(),
                },
            ],
            doctors: vec![
                DoctorOption {
                    id: 1,
                    name: "Amara Okafor".to_string(),
                    department_code: Some("CARD".to_string()),
                },
                DoctorOption {
                    id: 2,
                    name: "Chen Wei".to_string(),
                    department_code: Some("NEUR".to_string()),
                },
                DoctorOption {
                    id: 3,
                    name: "Silva Mendes".to_string(),
                    department_code: Some("CARD".to_string()),
                },
                DoctorOption {
                    id: 4,
                    name: "Visiting Fellow".to_string(),
                    department_code: None,
                },
            ],
        }
    }

    fn state() -> FilterState {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
        )
        .unwrap();
        FilterState::new(options(), range)
    }

    #[test]
    fn test_no_department_selection_offers_all_doctors() {
        let state = state();
        assert_eq!(state.available_doctors().len(), 4);
    }

    #[test]
    fn test_department_selection_narrows_doctor_list() {
        let mut state = state();
        state.set_departments(["CARD".to_string()]);

        let ids: Vec<DoctorId> = state.available_doctors().iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_unattached_doctor_drops_out_under_active_filter() {
        let mut state = state();
        state.set_departments(["NEUR".to_string()]);

        let ids: Vec<DoctorId> = state.available_doctors().iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![2], "visiting fellow must not be offered");
    }

    #[test]
    fn test_narrowing_prunes_stale_doctor_selection() {
        let mut state = state();
        state.set_doctors([1, 2, 3]);
        assert_eq!(state.selected_doctors().len(), 3);

        state.set_departments(["CARD".to_string()]);

        let selected: Vec<DoctorId> = state.selected_doctors().iter().copied().collect();
        assert_eq!(selected, vec![1, 3], "doctor 2 left with their department");
    }

    #[test]
    fn test_unknown_department_codes_are_discarded() {
        let mut state = state();
        state.set_departments(["CARD".to_string(), "XRAY".to_string()]);

        let selected: Vec<&str> = state
            .selected_departments()
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(selected, vec!["CARD"]);
    }

    #[test]
    fn test_set_doctors_discards_unavailable_ids() {
        let mut state = state();
        state.set_departments(["CARD".to_string()]);
        state.set_doctors([1, 2, 99]);

        let selected: Vec<DoctorId> = state.selected_doctors().iter().copied().collect();
        assert_eq!(selected, vec![1]);
    }

    #[test]
    fn test_widening_back_keeps_existing_selection() {
        let mut state = state();
        state.set_departments(["CARD".to_string()]);
        state.set_doctors([1]);

        state.set_departments(["CARD".to_string(), "NEUR".to_string()]);

        let selected: Vec<DoctorId> = state.selected_doctors().iter().copied().collect();
        assert_eq!(selected, vec![1], "widening must not drop valid selections");
    }

    #[test]
    fn test_clear_selections_keeps_date_range() {
        let mut state = state();
        let range = state.date_range();
        state.set_departments(["CARD".to_string()]);
        state.set_doctors([1]);

        state.clear_selections();

        assert!(state.selected_departments().is_empty());
        assert!(state.selected_doctors().is_empty());
        assert_eq!(state.date_range(), range);
    }

    #[test]
    fn test_filter_options_serialization() {
        let options = options();
        let serialized = serde_json::to_string(&options).unwrap();
        let deserialized: FilterOptions = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, options);
    }
}
