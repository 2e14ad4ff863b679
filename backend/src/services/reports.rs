//! Report view: filter, count, sort and paginate normalized records.

use crate::api::{FilterBadge, ReportPage};
use crate::models::NormalizedRecord;

pub use crate::models::ReportFilter;

/// Rows per report page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Records matching `filter`, in input order.
pub fn filter_records(records: &[NormalizedRecord], filter: ReportFilter) -> Vec<&NormalizedRecord> {
    records.iter().filter(|r| filter.matches(r)).collect()
}

pub fn count_matching(records: &[NormalizedRecord], filter: ReportFilter) -> usize {
    records.iter().filter(|r| filter.matches(r)).count()
}

/// Badge counts for every report filter control.
pub fn count_all(records: &[NormalizedRecord]) -> Vec<FilterBadge> {
    ReportFilter::ALL
        .iter()
        .map(|filter| FilterBadge {
            filter: *filter,
            label: filter.label(),
            count: count_matching(records, *filter),
        })
        .collect()
}

/// 1-indexed page of `items`. Page 0, a page past the end, or a zero page
/// size yield an empty slice.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = match (page - 1).checked_mul(page_size) {
        Some(start) if start < items.len() => start,
        _ => return &[],
    };
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// Newest first. Stable, so records with equal end times keep their order.
pub fn sort_for_report(records: &mut [NormalizedRecord]) {
    records.sort_by(|a, b| b.end_time.cmp(&a.end_time));
}

/// Assemble one report page from report-sorted records.
pub fn build_report_page(
    records: &[NormalizedRecord],
    filter: ReportFilter,
    page: usize,
    page_size: usize,
) -> ReportPage {
    let matching = filter_records(records, filter);
    let rows = paginate(&matching, page, page_size)
        .iter()
        .map(|r| (*r).clone())
        .collect();

    ReportPage {
        filter,
        page,
        page_size,
        total_matching: matching.len(),
        total_pages: page_count(matching.len(), page_size),
        rows,
        badges: count_all(records),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{parse_end_time, FilterId};
    use chrono::Duration;

    fn records(n: usize) -> Vec<NormalizedRecord> {
        let base = parse_end_time("2024-05-01T00:00:00Z").unwrap();
        (0..n)
            .map(|i| {
                let end_time = base + Duration::minutes(i as i64 * 7);
                NormalizedRecord {
                    id: i.to_string(),
                    age: Some(18 + (i as i64 % 30)),
                    gender: Some(if i % 2 == 0 { "Male" } else { "female" }.to_string()),
                    interacted: i % 5 != 0,
                    hand_gestures: i % 3 == 0,
                    duration: 60.0 + i as f64,
                    end_time,
                    date: end_time.date_naive(),
                    filters: vec![FilterId::ALL[i % 4]],
                }
            })
            .collect()
    }

    #[test]
    fn test_filter_all_is_identity() {
        let data = records(12);
        let all = filter_records(&data, ReportFilter::All);
        assert_eq!(all.len(), data.len());
        assert!(all.iter().zip(data.iter()).all(|(a, b)| *a == b));
    }

    #[test]
    fn test_count_matches_filter_len() {
        let data = records(37);
        for filter in ReportFilter::ALL {
            assert_eq!(count_matching(&data, filter), filter_records(&data, filter).len());
        }
    }

    #[test]
    fn test_count_all_has_every_control() {
        let badges = count_all(&records(10));
        assert_eq!(badges.len(), 11);
        assert_eq!(badges[0].filter, ReportFilter::All);
        assert_eq!(badges[0].count, 10);
        assert_eq!(badges[3].label, "Male");
        assert_eq!(badges[3].count, 5);
    }

    #[test]
    fn test_paginate_45_by_20() {
        let data = records(45);
        assert_eq!(paginate(&data, 1, 20).len(), 20);
        assert_eq!(paginate(&data, 2, 20).len(), 20);
        assert_eq!(paginate(&data, 3, 20).len(), 5);
        assert!(paginate(&data, 4, 20).is_empty());
        assert_eq!(page_count(45, 20), 3);
        assert_eq!(paginate(&data, 2, 20)[0].id, "20");
    }

    #[test]
    fn test_paginate_edge_cases() {
        let data = records(5);
        assert!(paginate(&data, 0, 20).is_empty());
        assert!(paginate(&data, 1, 0).is_empty());
        assert!(paginate(&data, usize::MAX, usize::MAX).is_empty());
        assert_eq!(page_count(0, 20), 0);
        assert_eq!(page_count(5, 0), 0);
        assert_eq!(page_count(40, 20), 2);
    }

    #[test]
    fn test_sort_for_report_newest_first_and_stable() {
        let mut data = records(6);
        data[4].end_time = data[1].end_time;
        sort_for_report(&mut data);

        let ids: Vec<&str> = data.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["5", "3", "2", "1", "4", "0"]);
    }

    #[test]
    fn test_build_report_page() {
        let mut data = records(45);
        sort_for_report(&mut data);

        let page = build_report_page(&data, ReportFilter::Male, 2, 20);
        assert_eq!(page.total_matching, 23);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.rows.len(), 3);
        assert!(page.rows.iter().all(|r| r.gender.as_deref() == Some("Male")));
        assert!(page.rows.windows(2).all(|w| w[0].end_time >= w[1].end_time));
        assert_eq!(page.badges.len(), ReportFilter::ALL.len());
    }
}
