use serde::{Deserialize, Serialize};

use crate::models::{NormalizedRecord, ReportFilter};

/// Live record count shown on a report filter control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterBadge {
    pub filter: ReportFilter,
    pub label: String,
    pub count: usize,
}

/// One page of the report table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportPage {
    pub filter: ReportFilter,
    /// 1-indexed.
    pub page: usize,
    pub page_size: usize,
    pub total_matching: usize,
    pub total_pages: usize,
    pub rows: Vec<NormalizedRecord>,
    pub badges: Vec<FilterBadge>,
}

/// Header plus string cells; the CSV export and the PDF renderer share it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTable {
    pub filter: ReportFilter,
    pub file_name: String,
    pub head: Vec<String>,
    pub body: Vec<Vec<String>>,
}

pub const GET_REPORT_PAGE: &str = "/reports";
pub const GET_REPORT_CSV: &str = "/reports/export.csv";
pub const GET_REPORT_TABLE: &str = "/reports/table";
