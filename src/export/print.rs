use serde::Serialize;

use crate::report::{Align, Report, ReportLine};

/// Font and cell padding for printed tables, in CSS pixels / Typst points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PrintScale {
    pub font_size: f32,
    pub padding: f32,
}

/// Shrink the type as the column count grows so wide tables still fit a page.
pub fn print_scale(columns: usize) -> PrintScale {
    let (font_size, padding) = match columns {
        n if n > 40 => (5.0, 2.0),
        n if n > 20 => (7.0, 3.0),
        n if n > 12 => (9.0, 4.0),
        _ => (11.0, 6.0),
    };
    PrintScale { font_size, padding }
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterEntry {
    pub label: String,
    pub value: String,
}

/// Everything a print renderer needs, independent of the output format.
#[derive(Debug, Clone, Serialize)]
pub struct PrintDocument {
    pub title: String,
    pub organization: String,
    pub filters: Vec<FilterEntry>,
    pub generated: String,
    pub headers: Vec<String>,
    pub aligns: Vec<Align>,
    pub lines: Vec<ReportLine>,
    pub scale: PrintScale,
    pub landscape: bool,
}

impl PrintDocument {
    pub fn from_report(report: &Report, organization: &str, generated: &str) -> Self {
        let columns = &report.columns;
        Self {
            title: report.kind.title().to_string(),
            organization: organization.to_string(),
            filters: report
                .selection
                .describe()
                .into_iter()
                .map(|(label, value)| FilterEntry { label, value })
                .collect(),
            generated: generated.to_string(),
            headers: columns.iter().map(|c| c.label.clone()).collect(),
            aligns: columns.iter().map(|c| c.align).collect(),
            lines: report.lines.clone(),
            scale: print_scale(columns.len()),
            landscape: columns.len() > 12,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_scale_steps() {
        assert_eq!(print_scale(5).font_size, 11.0);
        assert_eq!(print_scale(12).font_size, 11.0);
        assert_eq!(print_scale(13).font_size, 9.0);
        assert_eq!(print_scale(21), PrintScale { font_size: 7.0, padding: 3.0 });
        assert_eq!(print_scale(41), PrintScale { font_size: 5.0, padding: 2.0 });
    }

    #[test]
    fn test_scale_never_grows_with_more_columns() {
        let mut last = print_scale(0);
        for n in 1..60 {
            let s = print_scale(n);
            assert!(s.font_size <= last.font_size);
            assert!(s.padding <= last.padding);
            last = s;
        }
    }
}
