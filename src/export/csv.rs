use std::path::Path;

use ::csv::{QuoteStyle, WriterBuilder};

use crate::error::{ReportError, Result};
use crate::export::ensure_parent;
use crate::report::Report;

/// CSV text for a report: a quoted metadata preamble, a blank line,
/// then the header and every line with plain (unformatted) numbers.
pub fn csv_string(report: &Report, generated: &str) -> Result<String> {
    let mut preamble = vec![vec!["Report".to_string(), report.kind.title().to_string()]];
    for (label, value) in report.selection.describe() {
        preamble.push(vec![label, value]);
    }
    preamble.push(vec!["Generated".to_string(), generated.to_string()]);

    let mut out = write_records(preamble.iter().map(|r| r.as_slice()), true)?;
    out.push('\n');

    let header: Vec<String> = report.columns.iter().map(|c| c.label.clone()).collect();
    let body = std::iter::once(header.as_slice())
        .chain(report.lines.iter().map(|l| l.raw.as_slice()));
    out.push_str(&write_records(body, false)?);
    Ok(out)
}

fn write_records<'a, I>(records: I, flexible: bool) -> Result<String>
where
    I: IntoIterator<Item = &'a [String]>,
{
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .flexible(flexible)
        .from_writer(Vec::new());
    for record in records {
        writer.write_record(record)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ReportError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| {
        ReportError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}

pub fn write_csv(report: &Report, generated: &str, path: &Path) -> Result<()> {
    let content = csv_string(report, generated)?;
    ensure_parent(path)?;
    std::fs::write(path, content)?;
    log::info!("wrote CSV export to {}", path.display());
    Ok(())
}
