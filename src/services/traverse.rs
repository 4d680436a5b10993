//! Directory walking: subdirectory enumeration and video file discovery

use crate::models::ROOT_PATH;
use crate::{Error, Result};
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

/// Recognized video extensions, compared case-insensitively
pub const VIDEO_EXTENSIONS: [&str; 5] = ["mp4", "mkv", "avi", "mov", "webm"];

/// Normalize path for cross-platform storage
/// On Windows: Convert backslashes to forward slashes for consistency
/// On Unix: Use path as-is (backslash is a valid filename character)
#[cfg(windows)]
#[must_use]
pub fn normalize_path(path: &Path) -> String {
    let path_str = path.to_string_lossy();
    if path_str.contains('\\') {
        path_str.replace('\\', "/")
    } else {
        path_str.into_owned()
    }
}

#[cfg(not(windows))]
#[must_use]
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Check whether a file name carries a recognized video extension
#[must_use]
pub fn is_video_file<S: AsRef<OsStr> + ?Sized>(name: &S) -> bool {
    Path::new(name)
        .extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| VIDEO_EXTENSIONS.iter().any(|v| ext.eq_ignore_ascii_case(v)))
}

/// A directory found by the walk
///
/// `relative` is the real on-disk path below the scan root and is used for
/// every filesystem call; `key` is its display form used in reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkedDirectory {
    pub key: String,
    pub relative: PathBuf,
}

impl WalkedDirectory {
    /// The scan root itself, keyed `"."`
    #[must_use]
    pub fn root() -> Self {
        Self {
            key: ROOT_PATH.to_string(),
            relative: PathBuf::new(),
        }
    }

    /// A directory at `relative` below the scan root
    #[must_use]
    pub fn new(relative: PathBuf) -> Self {
        Self {
            key: normalize_path(&relative),
            relative,
        }
    }

    /// Filesystem path of this directory under `root`
    #[must_use]
    pub fn resolve(&self, root: &Path) -> PathBuf {
        if self.relative.as_os_str().is_empty() {
            root.to_path_buf()
        } else {
            root.join(&self.relative)
        }
    }
}

/// A video file directly inside a walked directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoEntry {
    /// Display name used in reports
    pub name: String,
    /// Real file name used to build the probe path
    pub file_name: OsString,
}

fn unreadable(path: &Path, source: std::io::Error) -> Error {
    Error::DirectoryUnreadable {
        path: path.to_path_buf(),
        source,
    }
}

/// Read a directory's children, sorted by name for a stable visitation order
fn read_sorted_entries(dir: &Path) -> Result<Vec<fs::DirEntry>> {
    let mut entries = fs::read_dir(dir)
        .map_err(|e| unreadable(dir, e))?
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| unreadable(dir, e))?;
    entries.sort_by_key(fs::DirEntry::file_name);
    Ok(entries)
}

/// Recursively list every directory strictly inside `root`
///
/// Paths are expressed relative to `relative_to` and emitted depth-first,
/// each directory before its children. Symlinked directories are not
/// descended.
///
/// # Errors
/// Returns `DirectoryUnreadable` for the first directory that cannot be listed.
pub fn list_subdirectories(root: &Path, relative_to: &Path) -> Result<Vec<WalkedDirectory>> {
    let mut results = Vec::new();
    collect_subdirectories(root, relative_to, &mut results)?;
    Ok(results)
}

fn collect_subdirectories(
    dir: &Path,
    relative_to: &Path,
    results: &mut Vec<WalkedDirectory>,
) -> Result<()> {
    for entry in read_sorted_entries(dir)? {
        let full_path = entry.path();
        let file_type = entry
            .file_type()
            .map_err(|e| unreadable(&full_path, e))?;

        if !file_type.is_dir() {
            continue;
        }

        let relative = full_path
            .strip_prefix(relative_to)
            .unwrap_or(&full_path)
            .to_path_buf();
        let walked = WalkedDirectory::new(relative);
        log::trace!("Directory: {}", walked.key);
        results.push(walked);

        collect_subdirectories(&full_path, relative_to, results)?;
    }

    Ok(())
}

/// List the video files directly inside `dir`
///
/// # Errors
/// Returns `DirectoryUnreadable` when `dir` cannot be listed.
pub fn list_video_files(dir: &Path) -> Result<Vec<VideoEntry>> {
    let mut names = Vec::new();

    for entry in read_sorted_entries(dir)? {
        let file_type = entry
            .file_type()
            .map_err(|e| unreadable(&entry.path(), e))?;
        if file_type.is_dir() {
            continue;
        }

        let file_name = entry.file_name();
        if is_video_file(&file_name) {
            names.push(VideoEntry {
                name: file_name.to_string_lossy().into_owned(),
                file_name,
            });
        }
    }

    Ok(names)
}
