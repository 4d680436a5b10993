//! Contract test for the CSV table shape

use crate::fixtures::{create_nested_tree, scan};
use tempfile::TempDir;
use vstat::io::csv_report::{CSV_HEADER, render_csv};
use vstat::services::report::build_report;

#[test]
fn test_csv_rows_parse_back() {
    let temp_dir = TempDir::new().unwrap();
    let root = create_nested_tree(temp_dir.path()).unwrap();
    let summary = scan(&root);
    let model = build_report(&summary.records, summary.grand_total);

    let bytes = render_csv(&model).unwrap();
    let mut reader = csv::Reader::from_reader(bytes.as_slice());

    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.iter().collect::<Vec<_>>(), CSV_HEADER.to_vec());

    let records: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(records.len(), model.rows.len());

    let mut sum = 0u64;
    for (record, row) in records.iter().zip(&model.rows) {
        assert_eq!(&record[0], row.path);
        assert_eq!(record[1].parse::<usize>().unwrap(), row.file_count);
        let seconds: u64 = record[2].parse().unwrap();
        assert_eq!(seconds, row.total_duration_seconds);
        assert_eq!(&record[3], row.formatted_duration);
        sum += seconds;
    }
    assert_eq!(sum, model.grand_total);
}
