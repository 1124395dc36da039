//! Admission control for vacation date selections.
//!
//! Every function here is pure: it reads a policy snapshot and a date set
//! and classifies the result. Checks run in a fixed order: deadline,
//! monthly ceiling, weekly ceiling.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::calendar_date::CalendarDate;
use crate::models::vacation_policy::VacationPolicy;
use crate::services::week_bucket::{bucket_by_week, dates_in_period};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationOutcome {
    Valid,
    MonthlyLimitExceeded { current: u32, limit: u32 },
    WeeklyLimitExceeded { week: u32, current: u32, limit: u32 },
    DeadlineExpired,
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }

    /// Human readable explanation, `None` for [`ValidationOutcome::Valid`].
    pub fn message(&self) -> Option<String> {
        (!self.is_valid()).then(|| self.to_string())
    }

    pub fn code(&self) -> &'static str {
        match self {
            ValidationOutcome::Valid => "VALID",
            ValidationOutcome::MonthlyLimitExceeded { .. } => "MONTHLY_LIMIT_EXCEEDED",
            ValidationOutcome::WeeklyLimitExceeded { .. } => "WEEKLY_LIMIT_EXCEEDED",
            ValidationOutcome::DeadlineExpired => "DEADLINE_EXPIRED",
        }
    }
}

impl fmt::Display for ValidationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationOutcome::Valid => f.write_str("valid"),
            ValidationOutcome::MonthlyLimitExceeded { current, limit } => write!(
                f,
                "exceeds monthly vacation limit: currently {} days, limit is {} days",
                current, limit
            ),
            ValidationOutcome::WeeklyLimitExceeded {
                week,
                current,
                limit,
            } => write!(
                f,
                "week {} exceeds vacation limit: currently {} days, limit is {} days",
                week, current, limit
            ),
            ValidationOutcome::DeadlineExpired => f.write_str("submission deadline has passed"),
        }
    }
}

fn count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

/// Checks the number of dates inside the target month against the
/// monthly ceiling. Dates of other months are ignored.
pub fn validate_monthly_limit<'a, I>(
    policy: &VacationPolicy,
    selected_dates: I,
    target_year: i32,
    target_month: u32,
) -> ValidationOutcome
where
    I: IntoIterator<Item = &'a CalendarDate>,
{
    if !policy.has_monthly_limit() {
        return ValidationOutcome::Valid;
    }

    let current = count(dates_in_period(selected_dates, target_year, target_month).len());
    let limit = policy.max_days_per_month();
    if current > limit {
        ValidationOutcome::MonthlyLimitExceeded { current, limit }
    } else {
        ValidationOutcome::Valid
    }
}

/// Checks every ISO week of the target month against the weekly ceiling
/// and reports the chronologically earliest offending week.
pub fn validate_weekly_limit<'a, I>(
    policy: &VacationPolicy,
    selected_dates: I,
    target_year: i32,
    target_month: u32,
) -> ValidationOutcome
where
    I: IntoIterator<Item = &'a CalendarDate>,
{
    if !policy.has_weekly_limit() {
        return ValidationOutcome::Valid;
    }

    let in_month = dates_in_period(selected_dates, target_year, target_month);
    let limit = policy.max_days_per_week();
    bucket_by_week(&in_month)
        .into_iter()
        .find(|(_, current)| *current > limit)
        .map(|(week, current)| ValidationOutcome::WeeklyLimitExceeded {
            week: week.week,
            current,
            limit,
        })
        .unwrap_or(ValidationOutcome::Valid)
}

/// Monthly ceiling first, then weekly.
pub fn validate<'a, I>(
    policy: &VacationPolicy,
    selected_dates: I,
    target_year: i32,
    target_month: u32,
) -> ValidationOutcome
where
    I: IntoIterator<Item = &'a CalendarDate> + Clone,
{
    let monthly = validate_monthly_limit(policy, selected_dates.clone(), target_year, target_month);
    if !monthly.is_valid() {
        return monthly;
    }
    validate_weekly_limit(policy, selected_dates, target_year, target_month)
}

/// [`validate`] preceded by the deadline check. A selection submitted
/// after the deadline is rejected regardless of its size.
pub fn validate_submission<'a, I>(
    policy: &VacationPolicy,
    selected_dates: I,
    target_year: i32,
    target_month: u32,
    now: DateTime<Utc>,
) -> ValidationOutcome
where
    I: IntoIterator<Item = &'a CalendarDate> + Clone,
{
    if policy.is_expired(now) {
        return ValidationOutcome::DeadlineExpired;
    }
    validate(policy, selected_dates, target_year, target_month)
}

/// Whether toggling `new_date` is permitted.
///
/// Deselecting an already selected date is always allowed. Selecting a new
/// date is allowed when the resulting set is valid for the new date's month.
pub fn can_select_date(
    policy: &VacationPolicy,
    new_date: CalendarDate,
    current_selection: &HashSet<CalendarDate>,
) -> bool {
    if current_selection.contains(&new_date) {
        return true;
    }

    let mut proposed: Vec<&CalendarDate> = current_selection.iter().collect();
    proposed.push(&new_date);
    validate(
        policy,
        proposed.iter().copied(),
        new_date.year(),
        new_date.month(),
    )
    .is_valid()
}

/// Validates the whole set produced by adding `new_dates` to
/// `current_selection`, once per month touched by the new dates.
///
/// Bulk operations use this so that a batch is either accepted entirely or
/// rejected with a single outcome.
pub fn check_bulk_selection<'a, I>(
    policy: &VacationPolicy,
    new_dates: I,
    current_selection: &HashSet<CalendarDate>,
) -> ValidationOutcome
where
    I: IntoIterator<Item = &'a CalendarDate>,
{
    let mut proposed: HashSet<CalendarDate> = current_selection.clone();
    let mut periods = BTreeSet::new();
    for date in new_dates {
        periods.insert((date.year(), date.month()));
        proposed.insert(*date);
    }

    periods
        .into_iter()
        .map(|(year, month)| validate(policy, &proposed, year, month))
        .find(|outcome| !outcome.is_valid())
        .unwrap_or(ValidationOutcome::Valid)
}
