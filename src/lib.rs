//! Video Duration Statistics Library
//!
//! This library finds every recognized video file under a directory tree,
//! probes each one for its playback duration with an external tool, and
//! aggregates counts and durations per directory. The aggregated model feeds
//! a CSV table and a browsable HTML report.

pub mod cli;
pub mod io;
pub mod models;
pub mod services;

pub use models::{DirectoryProgress, DirectoryRecord, ErrorItem, ReportRow, VideoFile};

use services::probe::{DurationProbe, FfmpegProbe};
use std::path::{Path, PathBuf};
use std::result;
use std::sync::Arc;
use std::time::Duration;

/// Custom error type for the library
#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    InvalidInput(String),
    DirectoryUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },
    ReportWriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            Error::DirectoryUnreadable { path, source } => {
                write!(f, "Cannot read directory {}: {source}", path.display())
            }
            Error::ReportWriteFailed { path, source } => {
                write!(f, "Cannot write report {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e)
            | Error::DirectoryUnreadable { source: e, .. }
            | Error::ReportWriteFailed { source: e, .. } => Some(e),
            Error::InvalidInput(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

pub type Result<T> = result::Result<T, Error>;

/// Callback invoked after each directory has been processed
pub type ProgressNotifier = Arc<dyn Fn(&DirectoryProgress) + Send + Sync>;

/// Default upper bound for a single probe invocation
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(60);

/// Options for scanning a directory tree
#[derive(Clone)]
pub struct ScanOptions {
    /// External program used to read durations
    pub probe_program: String,
    /// Upper bound for one probe; `None` waits indefinitely
    pub probe_timeout: Option<Duration>,
    /// Probe the files of a directory concurrently
    pub parallel_probes: bool,
    pub progress_notifier: Option<ProgressNotifier>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            probe_program: "ffmpeg".to_string(),
            probe_timeout: Some(DEFAULT_PROBE_TIMEOUT),
            parallel_probes: true,
            progress_notifier: None,
        }
    }
}

impl std::fmt::Debug for ScanOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanOptions")
            .field("probe_program", &self.probe_program)
            .field("probe_timeout", &self.probe_timeout)
            .field("parallel_probes", &self.parallel_probes)
            .field("progress_notifier", &self.progress_notifier.is_some())
            .finish()
    }
}

/// Summary result from a scan operation
#[derive(Debug)]
pub struct Summary {
    pub root: String,
    /// Retained directories in visitation order, root first
    pub records: Vec<DirectoryRecord>,
    pub grand_total: u64,
    /// Number of directories visited, including the root
    pub visited: usize,
    /// Files whose duration could not be read (counted as 0 seconds)
    pub probe_failures: Vec<ErrorItem>,
    pub started_at: std::time::SystemTime,
    pub finished_at: std::time::SystemTime,
}

impl Summary {
    /// Wall-clock time spent walking and probing
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.finished_at
            .duration_since(self.started_at)
            .unwrap_or_default()
    }
}

/// Scan a directory tree using the external probe configured in `opts`
///
/// # Errors
/// Returns `InvalidInput` when `root` is not an existing directory and
/// `DirectoryUnreadable` when any directory of the tree cannot be listed.
pub fn scan_statistics<P: AsRef<Path>>(root: P, opts: &ScanOptions) -> Result<Summary> {
    let probe = FfmpegProbe::new(opts.probe_program.clone(), opts.probe_timeout);
    scan_with_probe(root, &probe, opts)
}

/// Scan a directory tree with a caller-supplied duration probe
///
/// # Arguments
/// * `root` - The scan root
/// * `probe` - Duration source for each video file
/// * `opts` - Scan options (probe program and timeout are ignored here)
///
/// # Errors
/// See [`scan_statistics`].
pub fn scan_with_probe<P: AsRef<Path>>(
    root: P,
    probe: &dyn DurationProbe,
    opts: &ScanOptions,
) -> Result<Summary> {
    let root = root.as_ref();
    let root_path = root.to_string_lossy().to_string();

    if !root.exists() {
        return Err(Error::InvalidInput(format!(
            "Path does not exist: {root_path}"
        )));
    }

    if !root.is_dir() {
        return Err(Error::InvalidInput(format!(
            "Path is not a directory: {root_path}"
        )));
    }

    let started_at = std::time::SystemTime::now();

    let mut directories = vec![services::traverse::WalkedDirectory::root()];
    directories.extend(services::traverse::list_subdirectories(root, root)?);
    log::debug!("Visiting {} directories under {root_path}", directories.len());

    let aggregation = services::aggregate::aggregate(root, &directories, probe, opts)?;

    let finished_at = std::time::SystemTime::now();

    Ok(Summary {
        root: root_path,
        records: aggregation.records,
        grand_total: aggregation.grand_total,
        visited: directories.len(),
        probe_failures: aggregation.probe_failures,
        started_at,
        finished_at,
    })
}
