//! End-to-end tests: record source -> normalizer -> views.

mod support;

use support::raw_record;
use tellar::db::repositories::{LocalRepository, SyntheticSource};
use tellar::db::{fetch_records, RecordSource};
use tellar::models::{FilterId, ReportFilter};
use tellar::services::normalizer::{Normalizer, SeededFallback};
use tellar::services::{
    aggregate_by_date_and_demographic, aggregate_by_filter, build_dashboard, build_report_page,
    build_table, filter_gallery, normalize, to_csv, RecordCache,
};

#[tokio::test]
async fn test_demographic_scenario_through_source() {
    let repo = LocalRepository::with_records(vec![
        raw_record("1", Some(30), Some("Male"), true, "2024-05-07T08:00:00Z"),
        raw_record("2", Some(20), Some("female"), true, "2024-05-07T09:00:00Z"),
        raw_record("3", Some(40), Some("Male"), false, "2024-05-07T10:00:00Z"),
    ]);

    let raw = fetch_records(&repo).await;
    let records = normalize(&raw, &mut SeededFallback::new(11));
    let buckets = aggregate_by_date_and_demographic(&records);

    assert_eq!(buckets.len(), 1);
    assert_eq!(buckets[0].date.to_string(), "2024-05-07");
    assert_eq!(buckets[0].over25_male, 1);
    assert_eq!(buckets[0].under25_male, 0);
    assert_eq!(buckets[0].over25_female, 0);
    assert_eq!(buckets[0].under25_female, 1);
}

#[tokio::test]
async fn test_unreachable_source_yields_empty_dashboard() {
    let repo = LocalRepository::with_records(vec![raw_record(
        "1",
        Some(30),
        Some("Male"),
        true,
        "2024-05-07T08:00:00Z",
    )]);
    repo.set_healthy(false);

    let cache = RecordCache::new();
    let snapshot = cache.snapshot(&repo, &Normalizer::default()).await.unwrap();
    let dashboard = build_dashboard(&snapshot.records);

    assert!(dashboard.demographics.is_empty());
    assert!(dashboard.interactions.is_empty());
    assert!(dashboard.filter_popularity.iter().all(|c| c.count == 0));
    assert_eq!(dashboard.totals.total_records, 0);
}

#[tokio::test]
async fn test_synthetic_pipeline_is_deterministic() {
    let anchor = tellar::models::parse_end_time("2024-06-01T00:00:00Z").unwrap();
    let source = SyntheticSource::new(500, Some(42)).with_anchor(anchor);

    let first = build_dashboard(&Normalizer::seeded(Some(1)).normalize(&source.fetch_all().await.unwrap()));
    let second = build_dashboard(&Normalizer::seeded(Some(1)).normalize(&source.fetch_all().await.unwrap()));
    assert_eq!(first, second);
    assert_eq!(first.totals.total_records, 500);
    assert!(!first.demographics.is_empty() && first.demographics.len() <= 11);
}

#[tokio::test]
async fn test_report_export_from_snapshot() {
    let repo = LocalRepository::with_records(
        (0..45)
            .map(|i| {
                raw_record(
                    &i.to_string(),
                    Some(20 + i % 10),
                    Some(if i % 3 == 0 { "Female" } else { "Male" }),
                    i % 4 != 0,
                    &format!("2024-05-{:02}T10:00:00Z", 1 + i % 28),
                )
            })
            .collect(),
    );
    let cache = RecordCache::new();
    let snapshot = cache.snapshot(&repo, &Normalizer::seeded(Some(3))).await.unwrap();

    let pages: Vec<usize> = (1..=4)
        .map(|p| build_report_page(&snapshot.records, ReportFilter::All, p, 20).rows.len())
        .collect();
    assert_eq!(pages, vec![20, 20, 5, 0]);

    let interacted = build_report_page(&snapshot.records, ReportFilter::Interacted, 1, 20);
    let csv = to_csv(&build_table(&snapshot.records, ReportFilter::Interacted));
    assert_eq!(csv.lines().count(), interacted.total_matching + 1);
    assert!(csv.lines().skip(1).all(|line| line.contains(",Yes,")));
}

#[test]
fn test_filter_views_agree_with_pie_counts() {
    let raw: Vec<_> = (0..30)
        .map(|i| {
            raw_record(
                &i.to_string(),
                Some(30),
                Some("Male"),
                true,
                "2024-05-07T08:00:00Z",
            )
        })
        .collect();
    let records = Normalizer::seeded(Some(8)).normalize(&raw);

    let pie = aggregate_by_filter(&records);
    let gallery = filter_gallery(&records, "");
    for (slice, stats) in pie.iter().zip(gallery.iter()) {
        assert_eq!(slice.filter, stats.filter);
        // Every record interacted, so the pie and the gallery count the same users.
        assert_eq!(slice.count, stats.total_users);
    }
    assert_eq!(gallery.len(), FilterId::ALL.len());
}
