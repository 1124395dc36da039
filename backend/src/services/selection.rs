//! Working set of dates an employee is picking before submission.
//!
//! Every insertion goes through the validator; removals are always
//! accepted. The set is owned by one caller and mutated synchronously.

use std::collections::{BTreeSet, HashSet};

use thiserror::Error;

use crate::models::calendar_date::{CalendarDate, DateError};
use crate::models::vacation_policy::VacationPolicy;
use crate::services::vacation_stats::{get_stats, VacationStats};
use crate::services::vacation_validator::{
    can_select_date, check_bulk_selection, validate, ValidationOutcome,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("{0}")]
    Rejected(ValidationOutcome),
    #[error(transparent)]
    Date(#[from] DateError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    Rejected(ValidationOutcome),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSelection {
    dates: HashSet<CalendarDate>,
}

impl CandidateSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, date: &CalendarDate) -> bool {
        self.dates.contains(date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn as_set(&self) -> &HashSet<CalendarDate> {
        &self.dates
    }

    /// Selected dates in ascending order.
    pub fn sorted(&self) -> BTreeSet<CalendarDate> {
        self.dates.iter().copied().collect()
    }

    /// Adds `date` if absent and permitted, removes it if present.
    pub fn toggle(&mut self, policy: &VacationPolicy, date: CalendarDate) -> ToggleOutcome {
        if self.dates.remove(&date) {
            return ToggleOutcome::Removed;
        }

        if can_select_date(policy, date, &self.dates) {
            self.dates.insert(date);
            return ToggleOutcome::Added;
        }

        let mut proposed = self.dates.clone();
        proposed.insert(date);
        let outcome = validate(policy, &proposed, date.year(), date.month());
        tracing::debug!(%date, reason = %outcome, "vacation date rejected");
        ToggleOutcome::Rejected(outcome)
    }

    /// Adds every date in `dates` or none of them. Returns how many dates
    /// were newly added.
    pub fn select_all<I>(
        &mut self,
        policy: &VacationPolicy,
        dates: I,
    ) -> Result<usize, ValidationOutcome>
    where
        I: IntoIterator<Item = CalendarDate>,
    {
        let batch: Vec<CalendarDate> = dates
            .into_iter()
            .filter(|date| !self.dates.contains(date))
            .collect();
        if batch.is_empty() {
            return Ok(0);
        }

        let outcome = check_bulk_selection(policy, &batch, &self.dates);
        if !outcome.is_valid() {
            tracing::debug!(
                requested = batch.len(),
                reason = %outcome,
                "bulk vacation selection rejected"
            );
            return Err(outcome);
        }

        let before = self.dates.len();
        self.dates.extend(batch);
        Ok(self.dates.len() - before)
    }

    /// Bulk-selects every Saturday and Sunday of the policy's month.
    pub fn select_all_weekends(
        &mut self,
        policy: &VacationPolicy,
    ) -> Result<usize, SelectionError> {
        let (year, month) = policy.period();
        let weekends = CalendarDate::days_in_month(year, month)?
            .into_iter()
            .filter(CalendarDate::is_weekend);
        self.select_all(policy, weekends)
            .map_err(SelectionError::Rejected)
    }

    pub fn clear(&mut self) {
        self.dates.clear();
    }

    pub fn stats(&self, policy: &VacationPolicy) -> VacationStats {
        let (year, month) = policy.period();
        get_stats(policy, &self.dates, year, month)
    }
}

impl FromIterator<CalendarDate> for CandidateSelection {
    fn from_iter<T: IntoIterator<Item = CalendarDate>>(iter: T) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vacation_policy::{LimitKind, PolicySettings};
    use crate::types::CompanyId;
    use chrono::{TimeZone, Utc};

    fn policy(monthly: i64, weekly: i64) -> VacationPolicy {
        VacationPolicy::new(
            CompanyId::new(),
            2025,
            9,
            PolicySettings {
                limit_kind: LimitKind::Flexible,
                max_days_per_month: monthly,
                max_days_per_week: weekly,
                deadline: Utc.with_ymd_and_hms(2025, 8, 20, 0, 0, 0).unwrap(),
            },
        )
        .unwrap()
    }

    fn date(raw: &str) -> CalendarDate {
        raw.parse().unwrap()
    }

    #[test]
    fn toggle_adds_then_removes() {
        let policy = policy(8, 2);
        let mut selection = CandidateSelection::new();
        assert_eq!(selection.toggle(&policy, date("2025-09-01")), ToggleOutcome::Added);
        assert!(selection.contains(&date("2025-09-01")));
        assert_eq!(selection.toggle(&policy, date("2025-09-01")), ToggleOutcome::Removed);
        assert!(selection.is_empty());
    }

    #[test]
    fn toggle_rejects_date_over_weekly_limit() {
        let policy = policy(8, 2);
        let mut selection: CandidateSelection = [date("2025-09-01"), date("2025-09-02")]
            .into_iter()
            .collect();
        assert_eq!(
            selection.toggle(&policy, date("2025-09-03")),
            ToggleOutcome::Rejected(ValidationOutcome::WeeklyLimitExceeded {
                week: 36,
                current: 3,
                limit: 2
            })
        );
        assert_eq!(selection.len(), 2);
    }

    #[test]
    fn select_all_weekends_is_all_or_nothing() {
        // September 2025 has 8 weekend days
        let mut selection = CandidateSelection::new();
        let tight = policy(7, 0);
        assert_eq!(
            selection.select_all_weekends(&tight),
            Err(SelectionError::Rejected(
                ValidationOutcome::MonthlyLimitExceeded {
                    current: 8,
                    limit: 7
                }
            ))
        );
        assert!(selection.is_empty());

        let roomy = policy(8, 2);
        assert_eq!(selection.select_all_weekends(&roomy), Ok(8));
        assert!(selection.sorted().iter().all(CalendarDate::is_weekend));
    }

    #[test]
    fn select_all_counts_only_new_dates() {
        let policy = policy(0, 0);
        let mut selection: CandidateSelection = [date("2025-09-01")].into_iter().collect();
        let added = selection
            .select_all(&policy, [date("2025-09-01"), date("2025-09-02")])
            .unwrap();
        assert_eq!(added, 1);
        assert_eq!(selection.select_all(&policy, [date("2025-09-02")]), Ok(0));
    }

    #[test]
    fn stats_follow_policy_period() {
        let policy = policy(4, 0);
        let selection: CandidateSelection = [
            date("2025-09-01"),
            date("2025-09-02"),
            date("2025-09-09"),
            date("2025-10-01"),
        ]
        .into_iter()
        .collect();
        let stats = selection.stats(&policy);
        assert_eq!(stats.selected_days, 3);
        assert!(!stats.is_near_monthly_limit);
    }
}
