//! Report artifact writers
//!
//! Every artifact is rendered fully in memory and then written atomically:
//! the bytes go to a temporary file beside the destination which is then
//! renamed over it, so a failed write never leaves a truncated report.

pub mod csv_report;
pub mod html_report;

use crate::services::report::ReportModel;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Write `bytes` to `path` via a temporary sibling file
pub fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))?;
    }

    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

pub(crate) fn write_report(path: PathBuf, bytes: &[u8]) -> Result<PathBuf> {
    match write_atomic(&path, bytes) {
        Ok(()) => {
            log::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
            Ok(path)
        }
        Err(source) => Err(Error::ReportWriteFailed { path, source }),
    }
}

/// Outcome of writing both artifacts; one failing does not stop the other
#[derive(Debug)]
pub struct ReportOutcome {
    pub csv: Result<PathBuf>,
    pub html: Result<PathBuf>,
}

impl ReportOutcome {
    #[must_use]
    pub fn all_written(&self) -> bool {
        self.csv.is_ok() && self.html.is_ok()
    }
}

/// Write the CSV table and the HTML report into `dir`
pub fn write_reports(dir: &Path, model: &ReportModel, generated_at: DateTime<Utc>) -> ReportOutcome {
    let csv = csv_report::write_csv(&dir.join(csv_report::CSV_FILE_NAME), model);
    let html = html_report::write_html(
        &dir.join(html_report::html_file_name(generated_at)),
        model,
        generated_at,
    );

    ReportOutcome { csv, html }
}
