//! CSV table of per-directory totals

use crate::services::report::ReportModel;
use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Fixed file name, overwritten on every run
pub const CSV_FILE_NAME: &str = "video_stats.csv";

pub const CSV_HEADER: [&str; 4] = [
    "Каталог",
    "Количество файлов",
    "Общая длительность (сек)",
    "Форматированная длительность",
];

/// Quote a field unconditionally, doubling embedded quotes
fn quoted(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Render the table as UTF-8 CSV
///
/// The header line is written bare. In data rows the directory path is
/// always quoted and the remaining fields never are; the formatted duration
/// holds no delimiter or quote character.
pub fn render_csv(model: &ReportModel) -> std::io::Result<Vec<u8>> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    wtr.write_record(CSV_HEADER)?;
    for row in &model.rows {
        wtr.write_record([
            quoted(&row.path).as_str(),
            row.file_count.to_string().as_str(),
            row.total_duration_seconds.to_string().as_str(),
            row.formatted_duration.as_str(),
        ])?;
    }

    wtr.into_inner().map_err(|e| e.into_error())
}

/// Render and atomically write the CSV table to `path`
///
/// # Errors
/// Returns `ReportWriteFailed` naming `path`.
pub fn write_csv(path: &Path, model: &ReportModel) -> Result<PathBuf> {
    let bytes = render_csv(model).map_err(|source| Error::ReportWriteFailed {
        path: path.to_path_buf(),
        source,
    })?;
    super::write_report(path.to_path_buf(), &bytes)
}
