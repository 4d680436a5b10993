//! Report artifacts written after a completed scan

use crate::fixtures::{create_sample_tree, scan};
use chrono::{TimeZone, Utc};
use std::fs;
use tempfile::TempDir;
use vstat::io::csv_report::CSV_FILE_NAME;
use vstat::io::html_report::html_file_name;
use vstat::io::write_reports;
use vstat::services::report::build_report;

#[test]
fn test_writes_csv_and_timestamped_html() {
    let temp_dir = TempDir::new().unwrap();
    let root = create_sample_tree(temp_dir.path()).unwrap();
    let out = temp_dir.path().join("out");
    fs::create_dir_all(&out).unwrap();

    let summary = scan(&root);
    let model = build_report(&summary.records, summary.grand_total);
    let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();

    let outcome = write_reports(&out, &model, at);
    assert!(outcome.all_written());

    let csv_path = outcome.csv.as_ref().unwrap();
    assert_eq!(csv_path, &out.join(CSV_FILE_NAME));
    let csv = fs::read_to_string(csv_path).unwrap();
    assert_eq!(
        csv,
        "Каталог,Количество файлов,Общая длительность (сек),Форматированная длительность\n\
         \".\",1,65,0 ч 1 мин 5 сек\n\
         \"sub\",1,5,0 ч 0 мин 5 сек\n"
    );

    let html_path = outcome.html.as_ref().unwrap();
    assert_eq!(
        html_path.file_name().unwrap().to_string_lossy(),
        "video_stats_2024-01-02_03-04-05.html"
    );
    let html = fs::read_to_string(html_path).unwrap();
    assert!(html.contains("a.mp4 (0 ч 1 мин 5 сек)"));
    assert!(html.contains("data-folder=\"sub\""));
    assert!(html.contains("0 ч 1 мин 10 сек"));

    // Only the two artifacts remain; no temporary files are left behind.
    let names: Vec<_> = fs::read_dir(&out)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names.len(), 2, "unexpected files: {names:?}");
}

#[test]
fn test_csv_is_overwritten_and_html_is_not() {
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path();
    fs::write(out.join(CSV_FILE_NAME), "stale").unwrap();

    let model = build_report(&[], 0);
    let first = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let second = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 1).unwrap();

    assert!(write_reports(out, &model, first).all_written());
    assert!(write_reports(out, &model, second).all_written());

    let csv = fs::read_to_string(out.join(CSV_FILE_NAME)).unwrap();
    assert!(!csv.contains("stale"));
    assert_eq!(csv.lines().count(), 1);

    assert!(out.join(html_file_name(first)).exists());
    assert!(out.join(html_file_name(second)).exists());
}
