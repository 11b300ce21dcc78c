pub mod csv;
pub mod html;
pub mod print;

pub use self::csv::{csv_string, write_csv};
pub use html::{render_html, write_html};
pub use print::{print_scale, PrintDocument, PrintScale};

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::ValueEnum;

use crate::error::Result;
use crate::model::FilterSelection;
use crate::report::ReportKind;

/// Output formats a report can be exported to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Html,
    Pdf,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Html => "html",
            ExportFormat::Pdf => "pdf",
        }
    }
}

/// `<Stem>_<Key1>_<Key2>_<YYYY-MM-DD>.<ext>`; absent key filters are skipped.
pub fn export_filename(
    kind: ReportKind,
    selection: &FilterSelection,
    date: NaiveDate,
    format: ExportFormat,
) -> String {
    let mut parts = vec![kind.stem().to_string()];
    for filter in kind.key_filters() {
        if let Some(value) = selection.get(*filter) {
            parts.push(sanitize(&value));
        }
    }
    parts.push(date.format("%Y-%m-%d").to_string());
    format!("{}.{}", parts.join("_"), format.extension())
}

fn sanitize(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '-' })
        .collect()
}

/// Pick the output path: explicit `--output` wins, else the default name in `dir`.
pub fn output_path(explicit: Option<&Path>, dir: &Path, filename: &str) -> PathBuf {
    match explicit {
        Some(p) if p.is_dir() => p.join(filename),
        Some(p) => p.to_path_buf(),
        None => dir.join(filename),
    }
}

pub(crate) fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}
