//! End-to-end scan scenarios through the library API

use crate::fixtures::{
    FixtureProbe, create_nested_tree, create_sample_tree, quiet_options, record,
    recording_options, scan,
};
use tempfile::TempDir;

#[test]
fn test_sample_tree_rows_and_total() {
    let temp_dir = TempDir::new().unwrap();
    let root = create_sample_tree(temp_dir.path()).unwrap();

    let summary = scan(&root);

    let paths: Vec<_> = summary.records.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(paths, vec![".", "sub"]);

    let root_record = record(&summary, ".");
    assert_eq!(root_record.file_count(), 1);
    assert_eq!(root_record.total_duration(), 65);
    assert_eq!(root_record.subfolders_with_video, vec!["sub"]);

    let sub = record(&summary, "sub");
    assert_eq!(sub.file_count(), 1);
    assert_eq!(sub.files[0].name, "b.mkv");
    assert_eq!(sub.total_duration(), 5);
    assert!(sub.subfolders_with_video.is_empty());

    assert_eq!(summary.grand_total, 70);
    assert_eq!(summary.visited, 2);
    assert!(summary.probe_failures.is_empty());
    assert!(summary.finished_at >= summary.started_at);
    assert_eq!(
        summary.elapsed(),
        summary.finished_at.duration_since(summary.started_at).unwrap()
    );
}

#[test]
fn test_nested_tree_retention() {
    let temp_dir = TempDir::new().unwrap();
    let root = create_nested_tree(temp_dir.path()).unwrap();

    let summary = scan(&root);

    let paths: Vec<_> = summary.records.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            ".",
            "season1",
            "season2",
            "season2/extras",
            "season2/extras/bonus"
        ]
    );
    assert_eq!(summary.visited, 9);

    assert_eq!(
        record(&summary, ".").subfolders_with_video,
        vec!["season1", "season2/extras/bonus"]
    );
    assert_eq!(
        record(&summary, "season2").subfolders_with_video,
        vec!["season2/extras/bonus"]
    );
    assert_eq!(record(&summary, "season2").file_count(), 0);
    assert_eq!(record(&summary, "season2/extras/bonus").total_duration(), 120);

    // Own files only: the root row does not include descendants.
    assert_eq!(record(&summary, ".").total_duration(), 7);
    assert_eq!(summary.grand_total, 7 + 2500 + 120);
}

#[test]
fn test_probe_failure_counts_as_zero() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    crate::fixtures::write_video(root.join("one.mp4"), 10).unwrap();
    crate::fixtures::write_video(root.join("two.mp4"), 20).unwrap();
    crate::fixtures::write_broken_video(root.join("three.mp4")).unwrap();

    let summary = scan(root);

    let root_record = record(&summary, ".");
    assert_eq!(root_record.file_count(), 3);
    assert_eq!(root_record.total_duration(), 30);
    assert_eq!(summary.probe_failures.len(), 1);
    assert!(summary.probe_failures[0].path.ends_with("three.mp4"));
    assert_eq!(summary.probe_failures[0].code, "PROBE_PARSE");
}

#[test]
fn test_parallel_and_sequential_agree() {
    let temp_dir = TempDir::new().unwrap();
    let root = create_nested_tree(temp_dir.path()).unwrap();
    for i in 0..20 {
        crate::fixtures::write_video(root.join(format!("bulk/clip{i:02}.mp4")), i).unwrap();
    }

    let sequential = vstat::scan_with_probe(&root, &FixtureProbe, &quiet_options()).unwrap();
    let parallel_opts = vstat::ScanOptions {
        parallel_probes: true,
        ..quiet_options()
    };
    let parallel = vstat::scan_with_probe(&root, &FixtureProbe, &parallel_opts).unwrap();

    assert_eq!(sequential.records, parallel.records);
    assert_eq!(sequential.grand_total, parallel.grand_total);
}

#[test]
fn test_progress_reported_for_every_directory() {
    let temp_dir = TempDir::new().unwrap();
    let root = create_nested_tree(temp_dir.path()).unwrap();
    let (opts, events) = recording_options();

    let summary = vstat::scan_with_probe(&root, &FixtureProbe, &opts).unwrap();

    let events = events.lock().unwrap();
    assert_eq!(events.len(), summary.visited);
    assert_eq!(events[0].path, ".");

    let dropped: Vec<_> = events
        .iter()
        .filter(|e| !e.retained)
        .map(|e| e.path.as_str())
        .collect();
    assert_eq!(
        dropped,
        vec!["docs", "empty", "empty/deeper", "empty/deeper/deepest"]
    );

    let cumulative: Vec<_> = events.iter().map(|e| e.cumulative_seconds).collect();
    assert!(cumulative.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(events.last().unwrap().cumulative_seconds, summary.grand_total);
}

#[test]
fn test_root_without_video_is_visited_but_not_retained() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    std::fs::create_dir_all(root.join("a/b")).unwrap();
    std::fs::write(root.join("a/b/readme.txt"), "text").unwrap();

    let (opts, events) = recording_options();
    let summary = vstat::scan_with_probe(root, &FixtureProbe, &opts).unwrap();

    assert!(summary.records.is_empty());
    assert_eq!(summary.grand_total, 0);
    assert_eq!(summary.visited, 3);
    assert_eq!(events.lock().unwrap()[0].path, ".");
}

#[cfg(target_os = "linux")]
#[test]
fn test_non_utf8_directory_is_scanned() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("latin1");
    let odd = root.join(OsStr::from_bytes(b"caf\xe9"));
    crate::fixtures::write_video(root.join("a.mp4"), 65).unwrap();
    crate::fixtures::write_video(odd.join("b.mkv"), 5).unwrap();
    crate::fixtures::write_video(odd.join(OsStr::from_bytes(b"\xff.mp4")), 30).unwrap();

    let summary = scan(&root);

    assert_eq!(summary.grand_total, 100);
    assert!(summary.probe_failures.is_empty());
    let paths: Vec<_> = summary.records.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(paths, vec![".", "caf\u{fffd}"]);
    let odd_record = record(&summary, "caf\u{fffd}");
    assert_eq!(odd_record.total_duration(), 35);
    assert_eq!(record(&summary, ".").subfolders_with_video, vec!["caf\u{fffd}"]);
}
