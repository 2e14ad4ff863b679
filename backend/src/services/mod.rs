//! Service layer: pure computations over normalized records.
//!
//! Services sit between the record source and the HTTP handlers. Apart from
//! [`snapshot`], which owns the fetch, everything here is synchronous and
//! works on an immutable slice.

pub mod dashboard;
pub mod export;
pub mod filter_performance;
pub mod normalizer;
pub mod reports;
pub mod snapshot;


pub use dashboard::{
    aggregate_by_date_and_demographic, aggregate_by_date_interaction, aggregate_by_filter,
    build_dashboard, summarize,
};
pub use export::{build_table, export_file_name, to_csv};
pub use filter_performance::{filter_gallery, filter_stats};
pub use normalizer::{normalize, FallbackGenerator, Normalizer, SeededFallback};
pub use reports::{
    build_report_page, count_all, count_matching, filter_records, page_count, paginate,
    sort_for_report, ReportFilter,
};
pub use snapshot::{RecordCache, RecordSnapshot};
