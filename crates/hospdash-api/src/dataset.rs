//! Deterministic in-memory reporting dataset
//!
//! The upstream billing and scheduling systems are outside this codebase, so
//! the API serves a seeded demo dataset instead: the same configuration
//! always produces the same figures, which keeps every endpoint testable.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use hospdash_core::config::DatasetConfig;
use hospdash_core::types::{
    DateRange, DepartmentOption, DoctorId, DoctorOption, RevenueDetailRow, RevenueSummary,
    TrendPoint, growth_pct,
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Departments generated into every dataset: code, display name and a base
/// daily revenue in cents shared by the department's doctors
const DEPARTMENTS: &[(&str, &str, i64)] = &[
    ("CARD", "Cardiology", 520_000),
    ("NEUR", "Neurology", 460_000),
    ("ORTH", "Orthopedics", 430_000),
    ("PEDS", "Pediatrics", 300_000),
    ("ONCO", "Oncology", 610_000),
    ("GYNE", "Gynecology", 350_000),
];

const GIVEN_NAMES: &[&str] = &[
    "Amara", "Chen", "Silva", "Ingrid", "Tomas", "Leila", "Viktor", "Noor", "Mateo", "Hana",
    "Kwame", "Priya",
];

const SURNAMES: &[&str] = &[
    "Okafor", "Wei", "Mendes", "Johansson", "Novak", "Haddad", "Petrov", "Rahman", "Alvarez",
    "Sato", "Mensah", "Iyer",
];

/// One doctor's bookings for one day
#[derive(Debug, Clone, Copy)]
struct DayBooking {
    doctor_id: DoctorId,
    revenue: Decimal,
    cost: Decimal,
}

/// Per-day outpatient appointment counts
#[derive(Debug, Clone, Copy)]
pub struct AppointmentCounts {
    /// Appointments booked for the day
    pub scheduled: i64,
    /// Appointments that took place
    pub completed: i64,
    /// Appointments cancelled or missed
    pub cancelled: i64,
}

/// Dataset size figures reported by the health endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetStats {
    /// Number of departments
    pub departments: usize,
    /// Number of doctors
    pub doctors: usize,
    /// Number of daily revenue bookings
    pub revenue_rows: usize,
    /// Days covered by the dataset
    pub coverage: DateRange,
}

/// The in-memory reporting dataset every endpoint reads from
#[derive(Debug, Clone)]
pub struct ReportDataset {
    departments: Vec<DepartmentOption>,
    doctors: Vec<DoctorOption>,
    doctor_department: HashMap<DoctorId, usize>,
    bookings_by_day: BTreeMap<NaiveDate, Vec<DayBooking>>,
    booking_index: HashMap<(DoctorId, NaiveDate), (Decimal, Decimal)>,
    drug_costs: BTreeMap<NaiveDate, Decimal>,
    appointments: BTreeMap<NaiveDate, AppointmentCounts>,
    coverage: DateRange,
}

impl ReportDataset {
    /// Generate the dataset for the given configuration
    ///
    /// Generation is deterministic: the same configuration yields the same
    /// dataset on every run.
    #[must_use]
    pub fn generate(config: &DatasetConfig) -> Self {
        let coverage = DateRange {
            start: config.start.min(config.end),
            end: config.end.max(config.start),
        };
        let mut rng = StdRng::seed_from_u64(config.seed);

        let departments: Vec<DepartmentOption> = DEPARTMENTS
            .iter()
            .map(|(code, name, _)| DepartmentOption {
                code: (*code).to_string(),
                name: (*name).to_string(),
            })
            .collect();

        let mut doctors = Vec::new();
        let mut doctor_department = HashMap::new();
        let mut productivity = HashMap::new();
        let mut next_id: DoctorId = 1;

        for (dept_idx, _) in DEPARTMENTS.iter().enumerate() {
            for _ in 0..config.doctors_per_department.max(1) {
                let given = GIVEN_NAMES[rng.gen_range(0..GIVEN_NAMES.len())];
                let surname = SURNAMES[rng.gen_range(0..SURNAMES.len())];
                doctors.push(DoctorOption {
                    id: next_id,
                    name: format!("{given} {surname}"),
                    department_code: Some(DEPARTMENTS[dept_idx].0.to_string()),
                });
                doctor_department.insert(next_id, dept_idx);
                productivity.insert(next_id, rng.gen_range(0.75..1.25));
                next_id += 1;
            }
        }

        // Visiting physicians appear in the filter options but are not
        // attached to a department and book no inpatient revenue.
        for _ in 0..2 {
            let given = GIVEN_NAMES[rng.gen_range(0..GIVEN_NAMES.len())];
            let surname = SURNAMES[rng.gen_range(0..SURNAMES.len())];
            doctors.push(DoctorOption {
                id: next_id,
                name: format!("{given} {surname}"),
                department_code: None,
            });
            next_id += 1;
        }

        let mut bookings_by_day: BTreeMap<NaiveDate, Vec<DayBooking>> = BTreeMap::new();
        let mut booking_index = HashMap::new();
        let mut drug_costs = BTreeMap::new();
        let mut appointments = BTreeMap::new();

        let mut day = coverage.start;
        while day <= coverage.end {
            let drift = yearly_drift(coverage.start, day);
            let weekday = weekday_factor(day);

            let mut day_bookings = Vec::new();
            for doctor in &doctors {
                let Some(&dept_idx) = doctor_department.get(&doctor.id) else {
                    continue;
                };
                let base = DEPARTMENTS[dept_idx].2 as f64
                    / config.doctors_per_department.max(1) as f64;
                let factor = productivity.get(&doctor.id).copied().unwrap_or(1.0);
                let noise = rng.gen_range(0.85..1.15);

                let revenue_cents = (base * factor * weekday * drift * noise).round() as i64;
                let cost_cents =
                    (revenue_cents as f64 * rng.gen_range(0.55..0.75)).round() as i64;

                let booking = DayBooking {
                    doctor_id: doctor.id,
                    revenue: Decimal::new(revenue_cents, 2),
                    cost: Decimal::new(cost_cents, 2),
                };
                booking_index.insert((doctor.id, day), (booking.revenue, booking.cost));
                day_bookings.push(booking);
            }
            bookings_by_day.insert(day, day_bookings);

            let drug_cents =
                (180_000.0 * weekday * drift * rng.gen_range(0.8..1.2)).round() as i64;
            drug_costs.insert(day, Decimal::new(drug_cents, 2));

            let scheduled =
                (240.0 * weekday * drift * rng.gen_range(0.85..1.15)).round() as i64;
            let completed = (scheduled as f64 * rng.gen_range(0.82..0.95)).round() as i64;
            appointments.insert(
                day,
                AppointmentCounts {
                    scheduled,
                    completed,
                    cancelled: scheduled - completed,
                },
            );

            day += Duration::days(1);
        }

        Self {
            departments,
            doctors,
            doctor_department,
            bookings_by_day,
            booking_index,
            drug_costs,
            appointments,
            coverage,
        }
    }

    /// Departments offered by the filter bar
    #[must_use]
    pub fn departments(&self) -> &[DepartmentOption] {
        &self.departments
    }

    /// Doctors offered by the filter bar
    #[must_use]
    pub fn doctors(&self) -> &[DoctorOption] {
        &self.doctors
    }

    /// Days covered by the dataset
    #[must_use]
    pub const fn coverage(&self) -> DateRange {
        self.coverage
    }

    /// Range a page opens with: the last 30 covered days
    #[must_use]
    pub fn default_range(&self) -> DateRange {
        let start = (self.coverage.end - Duration::days(29)).max(self.coverage.start);
        DateRange {
            start,
            end: self.coverage.end,
        }
    }

    /// Dataset size figures for the health endpoint
    #[must_use]
    pub fn stats(&self) -> DatasetStats {
        DatasetStats {
            departments: self.departments.len(),
            doctors: self.doctors.len(),
            revenue_rows: self.booking_index.len(),
            coverage: self.coverage,
        }
    }

    /// Detail rows for the range, filtered by departments and doctors
    ///
    /// Rows carry per-day growth percentages against the same calendar day
    /// one year and one month earlier; a missing baseline yields `None`.
    #[must_use]
    pub fn revenue_rows(
        &self,
        range: DateRange,
        departments: &BTreeSet<String>,
        doctors: &BTreeSet<DoctorId>,
    ) -> Vec<RevenueDetailRow> {
        let mut rows = Vec::new();

        for (&day, bookings) in self.bookings_by_day.range(range.start..=range.end) {
            for booking in bookings {
                let Some(&dept_idx) = self.doctor_department.get(&booking.doctor_id) else {
                    continue;
                };
                let (code, name, _) = DEPARTMENTS[dept_idx];
                if !departments.is_empty() && !departments.contains(code) {
                    continue;
                }
                if !doctors.is_empty() && !doctors.contains(&booking.doctor_id) {
                    continue;
                }

                rows.push(RevenueDetailRow {
                    date: day,
                    department_code: code.to_string(),
                    department_name: name.to_string(),
                    doctor_id: booking.doctor_id,
                    doctor_name: self.doctor_name(booking.doctor_id),
                    revenue: booking.revenue,
                    cost: booking.cost,
                    yoy_pct: self.booking_growth(booking, day, 12),
                    mom_pct: self.booking_growth(booking, day, 1),
                });
            }
        }

        rows
    }

    /// Aggregate totals over the range, filtered by departments and doctors
    #[must_use]
    pub fn revenue_summary(
        &self,
        range: DateRange,
        departments: &BTreeSet<String>,
        doctors: &BTreeSet<DoctorId>,
    ) -> RevenueSummary {
        let (revenue, cost, count) = self.revenue_totals(range, departments, doctors);

        let yoy_pct = range.shifted_back_years(1).and_then(|baseline| {
            let (base_revenue, _, _) = self.revenue_totals(baseline, departments, doctors);
            growth_pct(revenue, base_revenue)
        });
        let mom_pct = range.shifted_back_months(1).and_then(|baseline| {
            let (base_revenue, _, _) = self.revenue_totals(baseline, departments, doctors);
            growth_pct(revenue, base_revenue)
        });

        RevenueSummary {
            total_revenue: revenue,
            total_cost: cost,
            yoy_pct,
            mom_pct,
            row_count: count,
        }
    }

    /// Daily revenue totals for the trend chart
    #[must_use]
    pub fn revenue_trend(
        &self,
        range: DateRange,
        departments: &BTreeSet<String>,
        doctors: &BTreeSet<DoctorId>,
    ) -> Vec<TrendPoint> {
        let mut points = Vec::new();

        for (&day, _) in self.bookings_by_day.range(range.start..=range.end) {
            let single = DateRange {
                start: day,
                end: day,
            };
            let (value, _, _) = self.revenue_totals(single, departments, doctors);

            let yoy_pct = shifted_day(day, 12).and_then(|baseline_day| {
                let baseline = DateRange {
                    start: baseline_day,
                    end: baseline_day,
                };
                let (base, _, count) = self.revenue_totals(baseline, departments, doctors);
                (count > 0).then(|| growth_pct(value, base)).flatten()
            });
            let mom_pct = shifted_day(day, 1).and_then(|baseline_day| {
                let baseline = DateRange {
                    start: baseline_day,
                    end: baseline_day,
                };
                let (base, _, count) = self.revenue_totals(baseline, departments, doctors);
                (count > 0).then(|| growth_pct(value, base)).flatten()
            });

            points.push(TrendPoint {
                date: day,
                value,
                yoy_pct,
                mom_pct,
            });
        }

        points
    }

    /// Total drug cost over the range with growth baselines
    #[must_use]
    pub fn drug_cost_total(&self, range: DateRange) -> (Decimal, Option<f64>, Option<f64>) {
        let total = self.drug_cost_sum(range);

        let yoy = range
            .shifted_back_years(1)
            .and_then(|baseline| growth_pct(total, self.drug_cost_sum(baseline)));
        let mom = range
            .shifted_back_months(1)
            .and_then(|baseline| growth_pct(total, self.drug_cost_sum(baseline)));

        (total, yoy, mom)
    }

    /// Daily drug cost series for the trend chart
    #[must_use]
    pub fn drug_cost_series(&self, range: DateRange) -> Vec<TrendPoint> {
        self.drug_costs
            .range(range.start..=range.end)
            .map(|(&day, &value)| TrendPoint {
                date: day,
                value,
                yoy_pct: shifted_day(day, 12)
                    .and_then(|d| self.drug_costs.get(&d))
                    .and_then(|&base| growth_pct(value, base)),
                mom_pct: shifted_day(day, 1)
                    .and_then(|d| self.drug_costs.get(&d))
                    .and_then(|&base| growth_pct(value, base)),
            })
            .collect()
    }

    /// Appointment totals over the range
    #[must_use]
    pub fn appointment_totals(&self, range: DateRange) -> AppointmentCounts {
        let mut totals = AppointmentCounts {
            scheduled: 0,
            completed: 0,
            cancelled: 0,
        };

        for counts in self
            .appointments
            .range(range.start..=range.end)
            .map(|(_, counts)| counts)
        {
            totals.scheduled += counts.scheduled;
            totals.completed += counts.completed;
            totals.cancelled += counts.cancelled;
        }

        totals
    }

    /// Daily scheduled-appointment series for the trend chart
    #[must_use]
    pub fn appointment_series(&self, range: DateRange) -> Vec<TrendPoint> {
        self.appointments
            .range(range.start..=range.end)
            .map(|(&day, counts)| {
                let value = Decimal::from(counts.scheduled);
                TrendPoint {
                    date: day,
                    value,
                    yoy_pct: shifted_day(day, 12)
                        .and_then(|d| self.appointments.get(&d))
                        .and_then(|base| growth_pct(value, Decimal::from(base.scheduled))),
                    mom_pct: shifted_day(day, 1)
                        .and_then(|d| self.appointments.get(&d))
                        .and_then(|base| growth_pct(value, Decimal::from(base.scheduled))),
                }
            })
            .collect()
    }

    fn doctor_name(&self, id: DoctorId) -> String {
        self.doctors
            .iter()
            .find(|d| d.id == id)
            .map_or_else(String::new, |d| d.name.clone())
    }

    fn booking_growth(&self, booking: &DayBooking, day: NaiveDate, months: u32) -> Option<f64> {
        let baseline_day = shifted_day(day, months)?;
        let &(base_revenue, _) = self.booking_index.get(&(booking.doctor_id, baseline_day))?;
        growth_pct(booking.revenue, base_revenue)
    }

    fn revenue_totals(
        &self,
        range: DateRange,
        departments: &BTreeSet<String>,
        doctors: &BTreeSet<DoctorId>,
    ) -> (Decimal, Decimal, u64) {
        let mut revenue = Decimal::ZERO;
        let mut cost = Decimal::ZERO;
        let mut count = 0u64;

        for bookings in self
            .bookings_by_day
            .range(range.start..=range.end)
            .map(|(_, bookings)| bookings)
        {
            for booking in bookings {
                let Some(&dept_idx) = self.doctor_department.get(&booking.doctor_id) else {
                    continue;
                };
                if !departments.is_empty() && !departments.contains(DEPARTMENTS[dept_idx].0) {
                    continue;
                }
                if !doctors.is_empty() && !doctors.contains(&booking.doctor_id) {
                    continue;
                }

                revenue += booking.revenue;
                cost += booking.cost;
                count += 1;
            }
        }

        (revenue, cost, count)
    }

    fn drug_cost_sum(&self, range: DateRange) -> Decimal {
        self.drug_costs
            .range(range.start..=range.end)
            .map(|(_, &value)| value)
            .sum()
    }
}

/// The same calendar day shifted back by whole months, for growth baselines
fn shifted_day(day: NaiveDate, months: u32) -> Option<NaiveDate> {
    day.checked_sub_months(chrono::Months::new(months))
}

/// Slow upward drift so growth percentages trend positive year over year
fn yearly_drift(start: NaiveDate, day: NaiveDate) -> f64 {
    let years = (day - start).num_days() as f64 / 365.25;
    1.0 + 0.08 * years
}

/// Weekends book roughly half the weekday volume
fn weekday_factor(day: NaiveDate) -> f64 {
    match day.weekday() {
        Weekday::Sat | Weekday::Sun => 0.55,
        _ => 1.0,
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use hospdash_core::config::DatasetConfig;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn small_config() -> DatasetConfig {
        DatasetConfig {
            seed: 7,
            start: date(2024, 1, 1),
            end: date(2025, 3, 31),
            doctors_per_department: 2,
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = ReportDataset::generate(&small_config());
        let b = ReportDataset::generate(&small_config());

        assert_eq!(a.doctors(), b.doctors());

        let range = a.default_range();
        let empty = BTreeSet::new();
        assert_eq!(
            a.revenue_summary(range, &empty, &BTreeSet::new()),
            b.revenue_summary(range, &empty, &BTreeSet::new()),
        );
    }

    #[test]
    fn test_department_doctors_are_attached() {
        let dataset = ReportDataset::generate(&small_config());

        let attached = dataset
            .doctors()
            .iter()
            .filter(|d| d.department_code.is_some())
            .count();
        assert_eq!(attached, DEPARTMENTS.len() * 2);

        let visiting = dataset.doctors().len() - attached;
        assert_eq!(visiting, 2);
    }

    #[test]
    fn test_rows_respect_department_filter() {
        let dataset = ReportDataset::generate(&small_config());
        let range = DateRange::new(date(2025, 3, 1), date(2025, 3, 7)).unwrap();

        let departments: BTreeSet<String> = ["CARD".to_string()].into_iter().collect();
        let rows = dataset.revenue_rows(range, &departments, &BTreeSet::new());

        assert!(!rows.is_empty());
        assert!(rows.iter().all(|r| r.department_code == "CARD"));
        // 2 doctors x 7 days
        assert_eq!(rows.len(), 14);
    }

    #[test]
    fn test_rows_carry_growth_when_baseline_exists() {
        let dataset = ReportDataset::generate(&small_config());

        // March 2025 has both the March 2024 and February 2025 baselines
        let range = DateRange::new(date(2025, 3, 1), date(2025, 3, 7)).unwrap();
        let rows = dataset.revenue_rows(range, &BTreeSet::new(), &BTreeSet::new());
        assert!(rows.iter().all(|r| r.yoy_pct.is_some() && r.mom_pct.is_some()));

        // January 2024 is the first covered month: no baselines at all
        let range = DateRange::new(date(2024, 1, 2), date(2024, 1, 8)).unwrap();
        let rows = dataset.revenue_rows(range, &BTreeSet::new(), &BTreeSet::new());
        assert!(rows.iter().all(|r| r.yoy_pct.is_none() && r.mom_pct.is_none()));
    }

    #[test]
    fn test_summary_totals_match_rows() {
        let dataset = ReportDataset::generate(&small_config());
        let range = DateRange::new(date(2025, 2, 1), date(2025, 2, 28)).unwrap();
        let empty = BTreeSet::new();
        let none = BTreeSet::new();

        let rows = dataset.revenue_rows(range, &empty, &none);
        let summary = dataset.revenue_summary(range, &empty, &none);

        let total: Decimal = rows.iter().map(|r| r.revenue).sum();
        assert_eq!(summary.total_revenue, total);
        assert_eq!(summary.row_count, rows.len() as u64);
        assert!(summary.yoy_pct.is_some());
    }

    #[test]
    fn test_trend_has_one_point_per_day() {
        let dataset = ReportDataset::generate(&small_config());
        let range = DateRange::new(date(2025, 3, 1), date(2025, 3, 10)).unwrap();

        let trend = dataset.revenue_trend(range, &BTreeSet::new(), &BTreeSet::new());
        assert_eq!(trend.len(), 10);
        assert!(trend.iter().all(|p| p.value > Decimal::ZERO));
    }

    #[test]
    fn test_out_of_coverage_range_is_empty() {
        let dataset = ReportDataset::generate(&small_config());
        let range = DateRange::new(date(2030, 1, 1), date(2030, 1, 31)).unwrap();

        assert!(dataset
            .revenue_rows(range, &BTreeSet::new(), &BTreeSet::new())
            .is_empty());
        assert_eq!(dataset.appointment_totals(range).scheduled, 0);
        assert_eq!(dataset.drug_cost_total(range).0, Decimal::ZERO);
    }

    #[test]
    fn test_appointment_totals_are_consistent() {
        let dataset = ReportDataset::generate(&small_config());
        let range = dataset.default_range();

        let totals = dataset.appointment_totals(range);
        assert!(totals.scheduled > 0);
        assert_eq!(totals.scheduled, totals.completed + totals.cancelled);

        let series = dataset.appointment_series(range);
        assert_eq!(series.len(), range.days() as usize);
    }

    #[test]
    fn test_default_range_is_last_thirty_days() {
        let dataset = ReportDataset::generate(&small_config());
        let range = dataset.default_range();

        assert_eq!(range.end, date(2025, 3, 31));
        assert_eq!(range.days(), 30);
    }
}
