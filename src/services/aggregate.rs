//! Per-directory aggregation of video counts and durations

use crate::models::{DirectoryProgress, DirectoryRecord, ErrorItem, VideoFile};
use crate::services::probe::DurationProbe;
use crate::services::traverse::{VideoEntry, WalkedDirectory, list_video_files};
use crate::{Result, ScanOptions};
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::Path;

/// Result of folding a directory walk into retained records
#[derive(Debug, Default)]
pub struct Aggregation {
    /// Retained directories in visitation order
    pub records: Vec<DirectoryRecord>,
    /// Sum of every retained directory's own total
    pub grand_total: u64,
    pub probe_failures: Vec<ErrorItem>,
}

/// Proper ancestors of a root-relative path, nearest first, ending at the
/// root (the empty path)
#[must_use]
pub fn proper_ancestors(relative: &Path) -> Vec<&Path> {
    relative.ancestors().skip(1).collect()
}

/// Map each directory to its descendants that directly hold video files
///
/// `directories` must be in walk order and `video_names` parallel to it.
/// The map is keyed by on-disk relative path; each list is in walk order and
/// holds report keys.
#[must_use]
pub fn subfolders_with_video<'a, T>(
    directories: &'a [WalkedDirectory],
    video_names: &[Vec<T>],
) -> HashMap<&'a Path, Vec<String>> {
    let mut subfolders: HashMap<&Path, Vec<String>> = HashMap::new();

    for (dir, names) in directories.iter().zip(video_names) {
        if names.is_empty() {
            continue;
        }
        for ancestor in proper_ancestors(&dir.relative) {
            subfolders.entry(ancestor).or_default().push(dir.key.clone());
        }
    }

    subfolders
}

fn probe_file(
    probe: &dyn DurationProbe,
    dir: &Path,
    entry: &VideoEntry,
) -> (VideoFile, Option<ErrorItem>) {
    let path = dir.join(&entry.file_name);
    match probe.probe(&path) {
        Ok(duration) => (
            VideoFile {
                name: entry.name.clone(),
                duration,
            },
            None,
        ),
        Err(err) => {
            log::warn!("Cannot read duration of {}: {err}", path.display());
            let failure = ErrorItem {
                path: path.to_string_lossy().to_string(),
                code: err.code().to_string(),
                message: err.to_string(),
            };
            (
                VideoFile {
                    name: entry.name.clone(),
                    duration: 0,
                },
                Some(failure),
            )
        }
    }
}

/// Probe every file of one directory, preserving listing order
fn probe_directory(
    probe: &dyn DurationProbe,
    dir: &Path,
    names: &[VideoEntry],
    parallel: bool,
) -> Vec<(VideoFile, Option<ErrorItem>)> {
    if parallel && names.len() > 1 {
        names
            .par_iter()
            .map(|name| probe_file(probe, dir, name))
            .collect()
    } else {
        names
            .iter()
            .map(|name| probe_file(probe, dir, name))
            .collect()
    }
}

/// Aggregate video files for every directory of a walk
///
/// # Arguments
/// * `root` - The scan root the directory paths are relative to
/// * `directories` - Walk order, root first
/// * `probe` - Duration source for each file
/// * `opts` - Scan options (parallelism and progress notifier)
///
/// # Errors
/// Returns `DirectoryUnreadable` if any directory cannot be listed; no
/// partial aggregation is returned in that case.
pub fn aggregate(
    root: &Path,
    directories: &[WalkedDirectory],
    probe: &dyn DurationProbe,
    opts: &ScanOptions,
) -> Result<Aggregation> {
    // List everything before probing so an unreadable directory aborts the
    // run without spending time on the external tool.
    let video_names = directories
        .iter()
        .map(|dir| list_video_files(&dir.resolve(root)))
        .collect::<Result<Vec<_>>>()?;

    let mut subfolders = subfolders_with_video(directories, &video_names);
    let mut aggregation = Aggregation::default();

    for (dir, names) in directories.iter().zip(&video_names) {
        let subfolders_with_video = subfolders
            .remove(dir.relative.as_path())
            .unwrap_or_default();
        let retained = !names.is_empty() || !subfolders_with_video.is_empty();

        let outcomes = probe_directory(probe, &dir.resolve(root), names, opts.parallel_probes);
        let mut files = Vec::with_capacity(outcomes.len());
        for (file, failure) in outcomes {
            files.push(file);
            aggregation.probe_failures.extend(failure);
        }

        let record = DirectoryRecord {
            path: dir.key.clone(),
            files,
            subfolders_with_video,
        };
        let own_total = record.total_duration();

        if retained {
            aggregation.grand_total = aggregation.grand_total.saturating_add(own_total);
            log::info!(
                "Directory {}: {} files, {own_total}s, {} subfolders with video",
                dir.key,
                record.file_count(),
                record.subfolders_with_video.len()
            );
        } else {
            log::info!("Directory {}: no video files", dir.key);
        }

        if let Some(notifier) = &opts.progress_notifier {
            notifier(&DirectoryProgress {
                path: dir.key.clone(),
                file_count: record.file_count(),
                duration_seconds: own_total,
                cumulative_seconds: aggregation.grand_total,
                retained,
            });
        }

        if retained {
            aggregation.records.push(record);
        }
    }

    Ok(aggregation)
}
