//! Chart aggregations for the dashboard page.
//!
//! All functions are pure and run over the full normalized record list, not a
//! report page. Date groups come out in ascending order; `NaiveDate` ordering
//! matches the lexical order of the `YYYY-MM-DD` strings the charts show.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::api::{
    DashboardData, DashboardTotals, DemographicBucket, FilterCount, InteractionBucket,
};
use crate::models::{FilterId, Gender, NormalizedRecord};

/// Visitors strictly older than this count as "over 25".
pub const AGE_THRESHOLD: i64 = 25;

/// Bar chart: interacted visitors with demographics, per date, per bucket.
///
/// A record with an unrecognized gender still opens its date group but is not
/// counted in any of the four buckets.
pub fn aggregate_by_date_and_demographic(records: &[NormalizedRecord]) -> Vec<DemographicBucket> {
    let mut groups: BTreeMap<NaiveDate, DemographicBucket> = BTreeMap::new();

    for record in records
        .iter()
        .filter(|r| r.interacted && r.has_demographics())
    {
        let bucket = groups
            .entry(record.date)
            .or_insert_with(|| DemographicBucket::new(record.date));

        let over = record.valid_age().map(|age| age > AGE_THRESHOLD).unwrap_or(false);
        match (record.recognized_gender(), over) {
            (Some(Gender::Male), true) => bucket.over25_male += 1,
            (Some(Gender::Male), false) => bucket.under25_male += 1,
            (Some(Gender::Female), true) => bucket.over25_female += 1,
            (Some(Gender::Female), false) => bucket.under25_female += 1,
            (None, _) => {}
        }
    }

    groups.into_values().collect()
}

/// Pie chart: per filter id, interacted visitors whose filters include it.
///
/// Counts overlap; a visitor with two filters is counted twice.
pub fn aggregate_by_filter(records: &[NormalizedRecord]) -> Vec<FilterCount> {
    let interacted: Vec<&NormalizedRecord> = records
        .iter()
        .filter(|r| r.interacted && !r.filters.is_empty())
        .collect();

    FilterId::ALL
        .iter()
        .map(|filter| FilterCount {
            filter: *filter,
            label: filter.label(),
            count: interacted.iter().filter(|r| r.uses_filter(*filter)).count(),
        })
        .collect()
}

/// Area chart: visitors with demographics per date, interacted vs. not.
pub fn aggregate_by_date_interaction(records: &[NormalizedRecord]) -> Vec<InteractionBucket> {
    let mut groups: BTreeMap<NaiveDate, InteractionBucket> = BTreeMap::new();

    for record in records.iter().filter(|r| r.has_demographics()) {
        let bucket = groups.entry(record.date).or_insert_with(|| InteractionBucket {
            date: record.date,
            interacted: 0,
            not_interacted: 0,
        });
        if record.interacted {
            bucket.interacted += 1;
        } else {
            bucket.not_interacted += 1;
        }
    }

    groups.into_values().collect()
}

/// Headline totals over every record.
pub fn summarize(records: &[NormalizedRecord]) -> DashboardTotals {
    let total_records = records.len();
    let interacted = records.iter().filter(|r| r.interacted).count();
    let hand_gestures = records.iter().filter(|r| r.hand_gestures).count();

    DashboardTotals {
        total_records,
        interacted,
        not_interacted: total_records - interacted,
        hand_gestures,
        average_duration: average_duration(records.iter()),
    }
}

/// Mean duration rounded to two decimals, 0 for no records.
pub(crate) fn average_duration<'a, I>(records: I) -> f64
where
    I: Iterator<Item = &'a NormalizedRecord>,
{
    let (count, sum) = records.fold((0usize, 0.0f64), |(n, s), r| (n + 1, s + r.duration));
    if count == 0 {
        return 0.0;
    }
    ((sum / count as f64) * 100.0).round() / 100.0
}

/// Compute every dashboard chart from the same snapshot.
pub fn build_dashboard(records: &[NormalizedRecord]) -> DashboardData {
    DashboardData {
        demographics: aggregate_by_date_and_demographic(records),
        filter_popularity: aggregate_by_filter(records),
        interactions: aggregate_by_date_interaction(records),
        totals: summarize(records),
    }
}
