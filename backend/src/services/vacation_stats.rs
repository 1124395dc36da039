//! Usage figures for progress indicators.
//!
//! Uses the same month filter and week buckets as the validator, so a
//! selection shown as over a limit here is exactly one the validator rejects.

use serde::Serialize;

use crate::models::calendar_date::CalendarDate;
use crate::models::vacation_policy::VacationPolicy;
use crate::services::week_bucket::{bucket_by_week, dates_in_period, max_weekly_count};

/// Usage ratio at which a limit is reported as nearly reached.
pub const NEAR_LIMIT_THRESHOLD: f64 = 0.8;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VacationStats {
    pub selected_days: u32,
    pub monthly_limit: Option<u32>,
    pub weekly_limit: Option<u32>,
    pub max_weekly_used: u32,
    pub monthly_usage_percentage: Option<f64>,
    pub weekly_usage_percentage: Option<f64>,
    pub is_near_monthly_limit: bool,
    pub is_near_weekly_limit: bool,
}

impl VacationStats {
    pub fn is_monthly_limit_exceeded(&self) -> bool {
        self.monthly_limit
            .is_some_and(|limit| self.selected_days > limit)
    }

    pub fn is_weekly_limit_exceeded(&self) -> bool {
        self.weekly_limit
            .is_some_and(|limit| self.max_weekly_used > limit)
    }

    pub fn remaining_monthly_days(&self) -> Option<u32> {
        self.monthly_limit
            .map(|limit| limit.saturating_sub(self.selected_days))
    }
}

fn usage(used: u32, limit: Option<u32>) -> Option<f64> {
    limit
        .filter(|limit| *limit > 0)
        .map(|limit| f64::from(used) / f64::from(limit))
}

pub fn get_stats<'a, I>(
    policy: &VacationPolicy,
    selected_dates: I,
    target_year: i32,
    target_month: u32,
) -> VacationStats
where
    I: IntoIterator<Item = &'a CalendarDate>,
{
    let in_month = dates_in_period(selected_dates, target_year, target_month);
    let selected_days = u32::try_from(in_month.len()).unwrap_or(u32::MAX);
    let max_weekly_used = max_weekly_count(&bucket_by_week(&in_month));

    let monthly_limit = policy
        .has_monthly_limit()
        .then(|| policy.max_days_per_month());
    let weekly_limit = policy
        .has_weekly_limit()
        .then(|| policy.max_days_per_week());

    let monthly_usage_percentage = usage(selected_days, monthly_limit);
    let weekly_usage_percentage = usage(max_weekly_used, weekly_limit);

    VacationStats {
        selected_days,
        monthly_limit,
        weekly_limit,
        max_weekly_used,
        monthly_usage_percentage,
        weekly_usage_percentage,
        is_near_monthly_limit: monthly_usage_percentage
            .is_some_and(|ratio| ratio >= NEAR_LIMIT_THRESHOLD),
        is_near_weekly_limit: weekly_usage_percentage
            .is_some_and(|ratio| ratio >= NEAR_LIMIT_THRESHOLD),
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

    fn dates(raw: &[&str]) -> Vec<CalendarDate> {
        raw.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn stats_without_limits_have_no_percentages() {
        let selected = dates(&["2025-09-01", "2025-09-02"]);
        let stats = get_stats(&policy(0, 0), &selected, 2025, 9);
        assert_eq!(stats.selected_days, 2);
        assert_eq!(stats.monthly_limit, None);
        assert_eq!(stats.weekly_limit, None);
        assert_eq!(stats.max_weekly_used, 2);
        assert_eq!(stats.monthly_usage_percentage, None);
        assert_eq!(stats.weekly_usage_percentage, None);
        assert!(!stats.is_near_monthly_limit);
        assert!(!stats.is_near_weekly_limit);
        assert_eq!(stats.remaining_monthly_days(), None);
    }

    #[test]
    fn near_limit_starts_at_eighty_percent() {
        let four = dates(&["2025-09-01", "2025-09-08", "2025-09-15", "2025-09-22"]);
        let stats = get_stats(&policy(5, 0), &four, 2025, 9);
        assert_eq!(stats.monthly_usage_percentage, Some(0.8));
        assert!(stats.is_near_monthly_limit);
        assert_eq!(stats.remaining_monthly_days(), Some(1));

        let three = &four[..3];
        let stats = get_stats(&policy(5, 0), three, 2025, 9);
        assert!(!stats.is_near_monthly_limit);
    }

    #[test]
    fn weekly_usage_uses_busiest_week() {
        let selected = dates(&["2025-09-01", "2025-09-02", "2025-09-03", "2025-09-10"]);
        let stats = get_stats(&policy(0, 4), &selected, 2025, 9);
        assert_eq!(stats.max_weekly_used, 3);
        assert_eq!(stats.weekly_usage_percentage, Some(0.75));
        assert!(!stats.is_near_weekly_limit);
        assert!(!stats.is_weekly_limit_exceeded());
    }

    #[test]
    fn other_months_do_not_count() {
        let selected = dates(&["2025-10-01", "2025-10-02", "2025-08-31"]);
        let stats = get_stats(&policy(1, 1), &selected, 2025, 9);
        assert_eq!(stats.selected_days, 0);
        assert_eq!(stats.max_weekly_used, 0);
        assert_eq!(stats.monthly_usage_percentage, Some(0.0));
        assert!(!stats.is_monthly_limit_exceeded());
    }

    #[test]
    fn repeated_dates_are_not_double_counted() {
        let selected = dates(&["2025-09-01", "2025-09-01", "2025-09-02"]);
        let stats = get_stats(&policy(2, 2), &selected, 2025, 9);
        assert_eq!(stats.selected_days, 2);
        assert_eq!(stats.max_weekly_used, 2);
        assert!(!stats.is_monthly_limit_exceeded());
        assert!(!stats.is_weekly_limit_exceeded());
    }

    #[test]
    fn exceeded_flags_over_limit() {
        let selected = dates(&["2025-09-01", "2025-09-02", "2025-09-03"]);
        let stats = get_stats(&policy(2, 2), &selected, 2025, 9);
        assert!(stats.is_monthly_limit_exceeded());
        assert!(stats.is_weekly_limit_exceeded());
        assert_eq!(stats.monthly_usage_percentage, Some(1.5));
        assert_eq!(stats.remaining_monthly_days(), Some(0));
    }
}
