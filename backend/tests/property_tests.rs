//! Property tests for normalization, aggregation and reporting.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use tellar::models::{FilterId, NormalizedRecord, RawRecord, ReportFilter};
use tellar::services::normalizer::{normalize, SeededFallback};
use tellar::services::{
    aggregate_by_date_and_demographic, aggregate_by_filter, count_matching, filter_records,
    page_count, paginate,
};

fn raw_record_strategy() -> impl Strategy<Value = RawRecord> {
    (
        proptest::option::of(-5i64..80),
        proptest::option::of(prop_oneof![
            Just("Male"),
            Just("female"),
            Just("FEMALE"),
            Just("other"),
            Just(""),
        ]),
        any::<bool>(),
        proptest::option::of(prop_oneof![
            0.0..1000.0f64,
            Just(f64::NAN),
            Just(f64::INFINITY),
            -100.0..0.0f64,
        ]),
        1u32..=28,
        0u32..24,
        proptest::option::of(proptest::collection::vec(-2i64..7, 0..6)),
    )
        .prop_map(|(age, gender, interacted, duration, day, hour, filters)| RawRecord {
            id: format!("{}-{}", day, hour),
            age,
            gender: gender.map(str::to_string),
            interacted,
            hand_gestures: false,
            duration,
            end_time: Utc.with_ymd_and_hms(2024, 5, day, hour, 0, 0).unwrap(),
            filters,
        })
}

fn normalized(raw: &[RawRecord], seed: u64) -> Vec<NormalizedRecord> {
    normalize(raw, &mut SeededFallback::new(seed))
}

proptest! {
    #[test]
    fn prop_normalized_records_are_complete(
        raw in proptest::collection::vec(raw_record_strategy(), 0..60),
        seed in any::<u64>(),
    ) {
        let records = normalized(&raw, seed);
        prop_assert_eq!(records.len(), raw.len());
        for (record, source) in records.iter().zip(raw.iter()) {
            prop_assert_eq!(&record.id, &source.id);
            prop_assert!(!record.filters.is_empty());
            let unique: BTreeSet<FilterId> = record.filters.iter().copied().collect();
            prop_assert_eq!(unique.len(), record.filters.len());
            prop_assert!(record.duration.is_finite() && record.duration >= 0.0);
            prop_assert_eq!(record.date, source.end_time.date_naive());
        }
    }

    #[test]
    fn prop_normalizing_complete_records_is_idempotent(
        raw in proptest::collection::vec(raw_record_strategy(), 0..40),
        seed in any::<u64>(),
    ) {
        let once = normalized(&raw, seed);
        let back: Vec<RawRecord> = once.iter().map(RawRecord::from).collect();
        let twice = normalized(&back, seed.wrapping_add(1));
        for (a, b) in once.iter().zip(twice.iter()) {
            prop_assert_eq!(&a.filters, &b.filters);
            prop_assert_eq!(a.duration, b.duration);
        }
    }

    #[test]
    fn prop_filter_counts_bounded_by_interacted(
        raw in proptest::collection::vec(raw_record_strategy(), 0..60),
    ) {
        let records = normalized(&raw, 1);
        let interacted = records.iter().filter(|r| r.interacted).count();
        for slice in aggregate_by_filter(&records) {
            prop_assert!(slice.count <= interacted);
        }
    }

    #[test]
    fn prop_demographic_buckets_sorted_and_bounded(
        raw in proptest::collection::vec(raw_record_strategy(), 0..60),
    ) {
        let records = normalized(&raw, 2);
        let buckets = aggregate_by_date_and_demographic(&records);

        prop_assert!(buckets.windows(2).all(|w| w[0].date < w[1].date));

        let mut population: BTreeMap<_, usize> = BTreeMap::new();
        for record in records.iter().filter(|r| r.interacted && r.has_demographics()) {
            *population.entry(record.date).or_default() += 1;
        }
        prop_assert_eq!(buckets.len(), population.len());
        for bucket in &buckets {
            prop_assert!(bucket.total() <= population[&bucket.date]);
        }
    }

    #[test]
    fn prop_count_matches_filter_for_every_key(
        raw in proptest::collection::vec(raw_record_strategy(), 0..60),
    ) {
        let records = normalized(&raw, 3);
        for filter in ReportFilter::ALL {
            prop_assert_eq!(count_matching(&records, filter), filter_records(&records, filter).len());
        }
        prop_assert_eq!(filter_records(&records, ReportFilter::All).len(), records.len());
    }

    #[test]
    fn prop_pages_cover_every_item_once(total in 0usize..200, page_size in 1usize..50) {
        let items: Vec<usize> = (0..total).collect();
        let pages = page_count(total, page_size);
        let mut seen = Vec::new();
        for page in 1..=pages {
            let slice = paginate(&items, page, page_size);
            prop_assert!(!slice.is_empty() && slice.len() <= page_size);
            seen.extend_from_slice(slice);
        }
        prop_assert_eq!(seen, items);
        prop_assert!(paginate(&(0..total).collect::<Vec<_>>(), pages + 1, page_size).is_empty());
    }
}
