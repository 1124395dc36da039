#![allow(dead_code)]
use std::collections::HashSet;

use chrono::{DateTime, TimeZone, Utc};
use shiftplan_backend::{
    models::calendar_date::CalendarDate,
    models::vacation_policy::{LimitKind, PolicySettings, VacationPolicy},
    types::CompanyId,
};

pub fn deadline() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 20, 23, 59, 59).unwrap()
}

pub fn before_deadline() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 10, 9, 0, 0).unwrap()
}

pub fn after_deadline() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 21, 0, 0, 0).unwrap()
}

pub fn settings(monthly: i64, weekly: i64) -> PolicySettings {
    PolicySettings {
        limit_kind: LimitKind::Flexible,
        max_days_per_month: monthly,
        max_days_per_week: weekly,
        deadline: deadline(),
    }
}

pub fn policy_for(year: i32, month: u32, monthly: i64, weekly: i64) -> VacationPolicy {
    VacationPolicy::new(CompanyId::new(), year, month, settings(monthly, weekly))
        .expect("valid policy")
}

/// Policy for September 2025.
pub fn policy(monthly: i64, weekly: i64) -> VacationPolicy {
    policy_for(2025, 9, monthly, weekly)
}

pub fn date(raw: &str) -> CalendarDate {
    raw.parse().expect("valid date literal")
}

pub fn dates(raw: &[&str]) -> HashSet<CalendarDate> {
    raw.iter().map(|s| date(s)).collect()
}

pub fn september(days: impl IntoIterator<Item = u32>) -> HashSet<CalendarDate> {
    days.into_iter()
        .map(|day| CalendarDate::new(2025, 9, day).expect("september day"))
        .collect()
}
