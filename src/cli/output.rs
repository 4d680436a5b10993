//! Console output formatting for CLI

use crate::models::{DirectoryProgress, ErrorItem};
use crate::services::format::format_duration;
use crate::services::report::ReportModel;

const RESET: &str = "\x1b[0m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const RED: &str = "\x1b[31m";
const MAGENTA: &str = "\x1b[35m";

/// Progress lines for one processed directory
#[must_use]
pub fn format_progress(progress: &DirectoryProgress) -> String {
    if progress.file_count == 0 {
        let suffix = if progress.retained {
            " (only in subfolders)"
        } else {
            ""
        };
        return format!(
            "{YELLOW}Directory \"{}\" has no video files{suffix}.{RESET}",
            progress.path
        );
    }

    format!(
        "{MAGENTA}Directory: {}{RESET}\n{GREEN}  Files found: {}{RESET}\n{CYAN}  Duration: {}{RESET}\n{CYAN}  Running total: {}{RESET}\n---",
        progress.path,
        progress.file_count,
        format_duration(progress.duration_seconds),
        format_duration(progress.cumulative_seconds),
    )
}

/// Final grand-total line
#[must_use]
pub fn format_grand_total(grand_total: u64) -> String {
    format!(
        "{YELLOW}Total duration of all video files: {GREEN}{}{RESET}",
        format_duration(grand_total)
    )
}

/// Closing line with the number of directories visited and the time spent
#[must_use]
pub fn format_scan_time(visited: usize, elapsed: std::time::Duration) -> String {
    format!(
        "{CYAN}Visited {visited} directories in {:.1}s{RESET}",
        elapsed.as_secs_f64()
    )
}

/// Warning block for files whose duration could not be read
#[must_use]
pub fn format_probe_failures(failures: &[ErrorItem]) -> Option<String> {
    if failures.is_empty() {
        return None;
    }

    let mut lines = vec![format!(
        "{RED}{} file(s) could not be probed and were counted as 0 seconds:{RESET}",
        failures.len()
    )];
    for failure in failures.iter().take(5) {
        lines.push(format!("  {}: {}", failure.path, failure.message));
    }
    if failures.len() > 5 {
        lines.push(format!("  ... and {} more", failures.len() - 5));
    }
    Some(lines.join("\n"))
}

/// Confirmation line for a written artifact
#[must_use]
pub fn format_saved(kind: &str, path: &std::path::Path) -> String {
    format!("{GREEN}{kind} saved: {}{RESET}", path.display())
}

/// Format the report model as JSON
#[must_use]
pub fn format_json(root: &str, model: &ReportModel, failures: &[ErrorItem]) -> String {
    let output = serde_json::json!({
        "root": root,
        "rows": model.rows,
        "folders": model.folders,
        "grand_total": model.grand_total,
        "probe_failures": if failures.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::json!(failures)
        }
    });

    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
}
