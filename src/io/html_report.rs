//! Browsable HTML report with expandable per-folder contents

use crate::services::format::format_duration;
use crate::services::report::ReportModel;
use crate::Result;
use chrono::{DateTime, Local, Utc};
use std::fmt::Write;
use std::path::{Path, PathBuf};

const STYLE: &str = r"
    body { font-family: Arial, sans-serif; max-width: 1200px; margin: 0 auto; padding: 20px; background: #f5f5f5; }
    h1 { color: #333; text-align: center; }
    table { width: 100%; border-collapse: collapse; margin: 20px 0; background: #fff; }
    th, td { padding: 10px; text-align: left; border-bottom: 1px solid #ddd; }
    th { background: #4caf50; color: #fff; }
    .folder { cursor: pointer; color: #2b6cb0; text-decoration: underline; }
    .sub-content { display: none; padding-left: 20px; border-left: 3px solid #4caf50; background: #fafafa; }
    .sub-content.show { display: block; }
    .sub-content ul { list-style: none; padding: 0; }
    .sub-content .file { color: #555; }
    .total { font-weight: bold; font-size: 1.2em; text-align: center; margin-top: 20px; }
    footer { text-align: center; margin-top: 20px; color: #666; }
";

const SCRIPT: &str = r"
    document.querySelectorAll('.folder').forEach(function (link) {
      link.addEventListener('click', function () {
        var name = link.getAttribute('data-folder');
        document.querySelectorAll('.sub-content').forEach(function (block) {
          if (block.getAttribute('data-folder') === name) {
            block.classList.toggle('show');
          }
        });
      });
    });
";

/// Timestamped file name, e.g. `video_stats_2024-05-01_10-30-00.html`
#[must_use]
pub fn html_file_name(generated_at: DateTime<Utc>) -> String {
    format!("video_stats_{}.html", generated_at.format("%Y-%m-%d_%H-%M-%S"))
}

/// Escape text for use in element content and quoted attributes
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the complete document
#[must_use]
pub fn render_html(model: &ReportModel, generated_at: DateTime<Utc>) -> String {
    let mut html = String::new();

    // Writing into a String cannot fail.
    let _ = write_document(&mut html, model, generated_at);
    html
}

fn write_document(
    html: &mut String,
    model: &ReportModel,
    generated_at: DateTime<Utc>,
) -> std::fmt::Result {
    writeln!(html, "<!DOCTYPE html>")?;
    writeln!(html, "<html lang=\"ru\">")?;
    writeln!(html, "<head>")?;
    writeln!(html, "  <meta charset=\"UTF-8\">")?;
    writeln!(
        html,
        "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">"
    )?;
    writeln!(html, "  <title>Отчёт по видеофайлам</title>")?;
    writeln!(html, "  <style>{STYLE}  </style>")?;
    writeln!(html, "</head>")?;
    writeln!(html, "<body>")?;
    writeln!(html, "  <h1>Отчёт по видеофайлам</h1>")?;
    writeln!(html, "  <table>")?;
    writeln!(html, "    <thead>")?;
    writeln!(html, "      <tr>")?;
    for column in crate::io::csv_report::CSV_HEADER {
        writeln!(html, "        <th>{column}</th>")?;
    }
    writeln!(html, "      </tr>")?;
    writeln!(html, "    </thead>")?;
    writeln!(html, "    <tbody>")?;

    for row in &model.rows {
        let path = escape_html(&row.path);
        writeln!(html, "      <tr>")?;
        writeln!(
            html,
            "        <td><span class=\"folder\" data-folder=\"{path}\">{path}</span></td>"
        )?;
        writeln!(html, "        <td>{}</td>", row.file_count)?;
        writeln!(html, "        <td>{}</td>", row.total_duration_seconds)?;
        writeln!(html, "        <td>{}</td>", escape_html(&row.formatted_duration))?;
        writeln!(html, "      </tr>")?;
        writeln!(html, "      <tr>")?;
        writeln!(html, "        <td colspan=\"4\">")?;
        writeln!(
            html,
            "          <div class=\"sub-content\" data-folder=\"{path}\">"
        )?;
        writeln!(html, "            <ul>")?;

        if let Some(folder) = model.folder(&row.path) {
            for file in &folder.files {
                writeln!(
                    html,
                    "              <li class=\"file\">{} ({})</li>",
                    escape_html(&file.name),
                    escape_html(&format_duration(file.duration))
                )?;
            }
            for subfolder in &folder.subfolders_with_video {
                let subfolder = escape_html(subfolder);
                writeln!(
                    html,
                    "              <li><span class=\"folder\" data-folder=\"{subfolder}\">{subfolder}</span></li>"
                )?;
            }
        }

        writeln!(html, "            </ul>")?;
        writeln!(html, "          </div>")?;
        writeln!(html, "        </td>")?;
        writeln!(html, "      </tr>")?;
    }

    writeln!(html, "    </tbody>")?;
    writeln!(html, "  </table>")?;
    writeln!(
        html,
        "  <div class=\"total\">Общая длительность всех видеофайлов: {}</div>",
        escape_html(&format_duration(model.grand_total))
    )?;
    writeln!(
        html,
        "  <footer>Отчёт создан: {}</footer>",
        generated_at
            .with_timezone(&Local)
            .format("%d.%m.%Y, %H:%M:%S")
    )?;
    writeln!(html, "  <script>{SCRIPT}  </script>")?;
    writeln!(html, "</body>")?;
    writeln!(html, "</html>")?;
    Ok(())
}

/// Render and atomically write the document to `path`
///
/// # Errors
/// Returns `ReportWriteFailed` naming `path`.
pub fn write_html(path: &Path, model: &ReportModel, generated_at: DateTime<Utc>) -> Result<PathBuf> {
    let html = render_html(model, generated_at);
    super::write_report(path.to_path_buf(), html.as_bytes())
}
