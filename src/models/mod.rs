//! Data models for scanned directories, report rows, and probe errors

use serde::{Deserialize, Serialize};

/// Path of the scan root, relative to itself
pub const ROOT_PATH: &str = ".";

/// A recognized video file directly inside a directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoFile {
    /// File name only, not a path
    pub name: String,
    /// Playback duration in whole seconds; 0 when probing failed
    pub duration: u64,
}

/// Aggregated state for one retained directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryRecord {
    /// Path relative to the scan root, `"."` for the root itself
    pub path: String,
    /// Direct video files in listing order
    pub files: Vec<VideoFile>,
    /// Descendants (any depth) with at least one direct video file,
    /// relative to the scan root, in visitation order
    pub subfolders_with_video: Vec<String>,
}

impl DirectoryRecord {
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Sum of this directory's own files; descendants are not rolled up.
    /// Saturates at `u64::MAX`.
    #[must_use]
    pub fn total_duration(&self) -> u64 {
        self.files
            .iter()
            .fold(0u64, |total, f| total.saturating_add(f.duration))
    }
}

/// One line of the tabular report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub path: String,
    pub file_count: usize,
    pub total_duration_seconds: u64,
    pub formatted_duration: String,
}

/// Per-folder payload of the hierarchical report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderEntry {
    pub files: Vec<VideoFile>,
    pub subfolders_with_video: Vec<String>,
}

/// Represents a non-fatal error encountered during scanning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorItem {
    pub path: String,
    pub code: String,
    pub message: String,
}

/// Progress event emitted once per visited directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryProgress {
    pub path: String,
    pub file_count: usize,
    /// Total of this directory's own files
    pub duration_seconds: u64,
    /// Running grand total including this directory
    pub cumulative_seconds: u64,
    /// Whether the directory has a record in the final model
    pub retained: bool,
}
