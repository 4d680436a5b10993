//! Report model: flat rows plus a path-keyed folder map

use crate::models::{DirectoryRecord, FolderEntry, ReportRow};
use crate::services::format::format_duration;
use serde::Serialize;
use std::collections::HashMap;

/// Everything the report emitters consume
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportModel {
    /// One row per retained directory, in visitation order
    pub rows: Vec<ReportRow>,
    /// Folder contents keyed by root-relative path
    pub folders: HashMap<String, FolderEntry>,
    pub grand_total: u64,
}

impl ReportModel {
    /// Sum of row totals, which must equal `grand_total`
    #[must_use]
    pub fn rows_total(&self) -> u64 {
        self.rows.iter().map(|r| r.total_duration_seconds).sum()
    }

    #[must_use]
    pub fn folder(&self, path: &str) -> Option<&FolderEntry> {
        self.folders.get(path)
    }
}

/// Convert a retained record into its report row
#[must_use]
pub fn to_row(record: &DirectoryRecord) -> ReportRow {
    let total = record.total_duration();
    ReportRow {
        path: record.path.clone(),
        file_count: record.file_count(),
        total_duration_seconds: total,
        formatted_duration: format_duration(total),
    }
}

/// Build the report model from retained records in visitation order
#[must_use]
pub fn build_report(records: &[DirectoryRecord], grand_total: u64) -> ReportModel {
    let rows = records.iter().map(to_row).collect();
    let folders = records
        .iter()
        .map(|record| {
            (
                record.path.clone(),
                FolderEntry {
                    files: record.files.clone(),
                    subfolders_with_video: record.subfolders_with_video.clone(),
                },
            )
        })
        .collect();

    debug_assert_eq!(
        records.iter().map(DirectoryRecord::total_duration).sum::<u64>(),
        grand_total,
        "grand total must equal the sum of retained directory totals"
    );

    ReportModel {
        rows,
        folders,
        grand_total,
    }
}
