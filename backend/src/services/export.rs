//! Report exports: a string table for the PDF renderer and its CSV rendering.

use crate::api::ReportTable;
use crate::models::{NormalizedRecord, ReportFilter};
use crate::services::reports::filter_records;

pub const REPORT_HEADER: [&str; 9] = [
    "ID",
    "Age",
    "Gender",
    "Duration (s)",
    "Interacted",
    "Hand Gestures",
    "Filters",
    "Date",
    "Time",
];

/// `report_{key}.{ext}`, e.g. `report_filter_2.csv`.
pub fn export_file_name(filter: ReportFilter, ext: &str) -> String {
    format!("report_{}.{}", filter.key(), ext)
}

/// Every record matching `filter`, not just one page.
pub fn build_table(records: &[NormalizedRecord], filter: ReportFilter) -> ReportTable {
    ReportTable {
        filter,
        file_name: export_file_name(filter, "pdf"),
        head: REPORT_HEADER.iter().map(|h| h.to_string()).collect(),
        body: filter_records(records, filter).into_iter().map(table_row).collect(),
    }
}

fn table_row(record: &NormalizedRecord) -> Vec<String> {
    vec![
        record.id.clone(),
        record.age.map(|a| a.to_string()).unwrap_or_default(),
        gender_cell(record),
        format!("{:.2}", record.duration),
        yes_no(record.interacted).to_string(),
        yes_no(record.hand_gestures).to_string(),
        record
            .filters
            .iter()
            .map(|f| f.to_string())
            .collect::<Vec<_>>()
            .join(" | "),
        record.end_time.format("%Y-%m-%d").to_string(),
        record.end_time.format("%H:%M:%S").to_string(),
    ]
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

/// Canonical label for a recognized gender, the capitalized source value
/// otherwise.
fn gender_cell(record: &NormalizedRecord) -> String {
    match record.recognized_gender() {
        Some(gender) => gender.label().to_string(),
        None => record.gender.as_deref().map(capitalize).unwrap_or_default(),
    }
}

/// `oTHER` -> `Other`.
fn capitalize(value: &str) -> String {
    let value = value.trim();
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Comma separated, `\n` line endings, header first.
pub fn to_csv(table: &ReportTable) -> String {
    std::iter::once(&table.head)
        .chain(table.body.iter())
        .map(|row| row.iter().map(|cell| csv_cell(cell)).collect::<Vec<_>>().join(","))
        .collect::<Vec<_>>()
        .join("\n")
}

fn csv_cell(cell: &str) -> String {
    if cell.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}
