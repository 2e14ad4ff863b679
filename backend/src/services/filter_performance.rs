//! Per-filter statistics for the filter performance gallery.

use std::collections::BTreeSet;

use crate::api::FilterStats;
use crate::models::{FilterId, Gender, NormalizedRecord};
use crate::services::dashboard::average_duration;

/// Statistics over every record whose filters include `filter`.
pub fn filter_stats(records: &[NormalizedRecord], filter: FilterId) -> FilterStats {
    let users: Vec<&NormalizedRecord> = records.iter().filter(|r| r.uses_filter(filter)).collect();

    let interacted = users.iter().filter(|r| r.interacted).count();
    let mut male = 0;
    let mut female = 0;
    for record in &users {
        match record.recognized_gender() {
            Some(Gender::Male) => male += 1,
            Some(Gender::Female) => female += 1,
            None => {}
        }
    }
    let dates: BTreeSet<_> = users.iter().map(|r| r.date).collect();

    FilterStats {
        filter,
        label: filter.label(),
        total_users: users.len(),
        average_duration: average_duration(users.iter().copied()),
        interacted,
        not_interacted: users.len() - interacted,
        male,
        female,
        dates: dates.into_iter().collect(),
    }
}

/// Gallery cards whose label or number contains the search term.
///
/// Matching is case-insensitive on the trimmed term; a blank term keeps all.
pub fn filter_gallery(records: &[NormalizedRecord], search: &str) -> Vec<FilterStats> {
    let term = search.trim().to_lowercase();
    FilterId::ALL
        .iter()
        .filter(|id| {
            term.is_empty()
                || id.label().to_lowercase().contains(&term)
                || id.to_string().contains(&term)
        })
        .map(|id| filter_stats(records, *id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_end_time;

    fn record(gender: &str, interacted: bool, duration: f64, end_time: &str, filters: &[FilterId]) -> NormalizedRecord {
        let end_time = parse_end_time(end_time).unwrap();
        NormalizedRecord {
            id: format!("{}-{}", gender, end_time),
            age: Some(30),
            gender: Some(gender.to_string()),
            interacted,
            hand_gestures: false,
            duration,
            end_time,
            date: end_time.date_naive(),
            filters: filters.to_vec(),
        }
    }

    #[test]
    fn test_filter_stats() {
        let records = vec![
            record("Male", true, 100.0, "2024-05-03T10:00:00Z", &[FilterId::ONE, FilterId::TWO]),
            record("female", false, 50.5, "2024-05-01T10:00:00Z", &[FilterId::ONE]),
            record("other", true, 75.25, "2024-05-03T18:00:00Z", &[FilterId::ONE]),
            record("Male", true, 999.0, "2024-05-02T10:00:00Z", &[FilterId::THREE]),
        ];
        let stats = filter_stats(&records, FilterId::ONE);

        assert_eq!(stats.label, "Filter 1");
        assert_eq!(stats.total_users, 3);
        assert_eq!(stats.interacted, 2);
        assert_eq!(stats.not_interacted, 1);
        assert_eq!(stats.male, 1);
        assert_eq!(stats.female, 1);
        assert!((stats.average_duration - 75.25).abs() < 1e-9);
        assert_eq!(
            stats.dates.iter().map(|d| d.to_string()).collect::<Vec<_>>(),
            vec!["2024-05-01", "2024-05-03"]
        );
    }

    #[test]
    fn test_unused_filter_has_zero_average() {
        let stats = filter_stats(&[], FilterId::FOUR);
        assert_eq!(stats.total_users, 0);
        assert_eq!(stats.average_duration, 0.0);
        assert!(stats.dates.is_empty());
    }

    #[test]
    fn test_gallery_search() {
        assert_eq!(filter_gallery(&[], "").len(), 4);
        assert_eq!(filter_gallery(&[], "  FILTER ").len(), 4);

        let hits = filter_gallery(&[], "3");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].filter, FilterId::THREE);

        let hits = filter_gallery(&[], "filter 2");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].filter, FilterId::TWO);

        assert!(filter_gallery(&[], "sparkles").is_empty());
    }
}
