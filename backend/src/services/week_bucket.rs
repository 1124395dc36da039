//! Month filtering and week bucketing shared by the validator and the
//! stats helper. Both must see identical buckets.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::calendar_date::{CalendarDate, WeekOfYear};

/// Distinct dates from `dates` that fall in the given year/month. A date
/// repeated in the input is counted once.
pub fn dates_in_period<'a, I>(dates: I, year: i32, month: u32) -> BTreeSet<CalendarDate>
where
    I: IntoIterator<Item = &'a CalendarDate>,
{
    dates
        .into_iter()
        .filter(|date| date.is_in_period(year, month))
        .copied()
        .collect()
}

/// Counts dates per ISO week. Iteration order is chronological.
pub fn bucket_by_week<'a, I>(dates: I) -> BTreeMap<WeekOfYear, u32>
where
    I: IntoIterator<Item = &'a CalendarDate>,
{
    let mut buckets = BTreeMap::new();
    for date in dates {
        *buckets.entry(date.week_of_year()).or_insert(0) += 1;
    }
    buckets
}

/// Largest bucket, or 0 when there are no dates.
pub fn max_weekly_count(buckets: &BTreeMap<WeekOfYear, u32>) -> u32 {
    buckets.values().copied().max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(raw: &[&str]) -> Vec<CalendarDate> {
        raw.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn dates_in_period_drops_other_months() {
        let all = dates(&["2025-09-30", "2025-10-01", "2024-09-15", "2025-09-01"]);
        let filtered = dates_in_period(&all, 2025, 9);
        assert_eq!(
            filtered.into_iter().collect::<Vec<_>>(),
            dates(&["2025-09-01", "2025-09-30"])
        );
    }

    #[test]
    fn dates_in_period_counts_repeated_dates_once() {
        let all = dates(&["2025-09-01", "2025-09-01", "2025-09-02", "2025-09-01"]);
        assert_eq!(dates_in_period(&all, 2025, 9).len(), 2);
    }

    #[test]
    fn bucket_by_week_groups_monday_to_sunday() {
        // 2025-09-01 is a Monday, 2025-09-07 the following Sunday
        let all = dates(&["2025-09-01", "2025-09-03", "2025-09-07", "2025-09-08"]);
        let buckets = bucket_by_week(&all);
        assert_eq!(
            buckets.into_iter().collect::<Vec<_>>(),
            vec![
                (WeekOfYear { year: 2025, week: 36 }, 3),
                (WeekOfYear { year: 2025, week: 37 }, 1),
            ]
        );
    }

    #[test]
    fn bucket_by_week_splits_new_year_week_by_iso_year() {
        // Sunday 2024-12-29 closes ISO week 52; Monday 2024-12-30 opens 2025-W01
        let all = dates(&["2024-12-29", "2024-12-30", "2024-12-31"]);
        let buckets = bucket_by_week(&all);
        assert_eq!(buckets.get(&WeekOfYear { year: 2024, week: 52 }), Some(&1));
        assert_eq!(buckets.get(&WeekOfYear { year: 2025, week: 1 }), Some(&2));
    }

    #[test]
    fn max_weekly_count_of_empty_is_zero() {
        assert_eq!(max_weekly_count(&BTreeMap::new()), 0);
        let all = dates(&["2025-09-01", "2025-09-02", "2025-09-10"]);
        assert_eq!(max_weekly_count(&bucket_by_week(&all)), 2);
    }
}
