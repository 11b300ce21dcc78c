use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::{object::Columns, Alignment, Style};

use crate::model::ReportRow;
use crate::report::column::{Align, ColumnSpec};

pub const NO_DATA: &str = "No data found for the selected filters.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Data,
    CategoryHeader,
    Subtotal,
    Total,
}

/// One rendered line of a report. `display` is screen/print text,
/// `raw` the unformatted values used by CSV.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportLine {
    pub kind: LineKind,
    pub display: Vec<String>,
    #[serde(skip)]
    pub raw: Vec<String>,
}

impl ReportLine {
    pub fn data(columns: &[ColumnSpec], row: &ReportRow) -> Self {
        Self {
            kind: LineKind::Data,
            display: columns.iter().map(|c| c.display(row)).collect(),
            raw: columns.iter().map(|c| c.raw(row)).collect(),
        }
    }

    /// A summary line: `label` goes in the first column, sums in the summable ones.
    pub fn summary(kind: LineKind, label: &str, columns: &[ColumnSpec], sums: &[Option<f64>]) -> Self {
        let mut display = Vec::with_capacity(columns.len());
        let mut raw = Vec::with_capacity(columns.len());
        for (i, (col, sum)) in columns.iter().zip(sums).enumerate() {
            match sum {
                Some(v) => {
                    display.push(col.format_number(*v));
                    raw.push(crate::format::format_plain(*v));
                }
                None if i == 0 => {
                    display.push(label.to_string());
                    raw.push(label.to_string());
                }
                None => {
                    display.push(String::new());
                    raw.push(String::new());
                }
            }
        }
        Self { kind, display, raw }
    }

    pub fn header(label: &str, width: usize) -> Self {
        let mut cells = vec![String::new(); width.max(1)];
        cells[0] = label.to_string();
        Self {
            kind: LineKind::CategoryHeader,
            display: cells.clone(),
            raw: cells,
        }
    }
}

/// Sum every summable column across `rows`; label columns stay `None`.
pub fn totals<'a, I>(columns: &[ColumnSpec], rows: I) -> Vec<Option<f64>>
where
    I: IntoIterator<Item = &'a ReportRow>,
{
    let mut sums: Vec<Option<f64>> = columns
        .iter()
        .map(|c| if c.is_summable() { Some(0.0) } else { None })
        .collect();

    for row in rows {
        for (sum, col) in sums.iter_mut().zip(columns) {
            if let (Some(acc), Some(v)) = (sum.as_mut(), col.number(row)) {
                *acc += v;
            }
        }
    }
    sums
}

pub fn add_sums(acc: &mut [Option<f64>], other: &[Option<f64>]) {
    for (a, b) in acc.iter_mut().zip(other) {
        if let (Some(a), Some(b)) = (a.as_mut(), b) {
            *a += b;
        }
    }
}

/// Data lines in fetch order, with a total line appended last when requested.
pub fn build_lines(columns: &[ColumnSpec], rows: &[ReportRow], with_totals: bool) -> Vec<ReportLine> {
    let mut lines: Vec<ReportLine> = rows.iter().map(|r| ReportLine::data(columns, r)).collect();
    if with_totals && !rows.is_empty() {
        let sums = totals(columns, rows);
        lines.push(ReportLine::summary(LineKind::Total, "TOTAL", columns, &sums));
    }
    lines
}

/// Render lines as a terminal table, or the no-data message when there is nothing to show.
pub fn render_table(columns: &[ColumnSpec], lines: &[ReportLine]) -> String {
    if !lines.iter().any(|l| l.kind == LineKind::Data) {
        return NO_DATA.to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(columns.iter().map(|c| c.label.clone()));
    for line in lines {
        builder.push_record(line.display.iter().cloned());
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    for (i, col) in columns.iter().enumerate() {
        if col.align == Align::Right {
            table.modify(Columns::single(i), Alignment::right());
        }
    }
    table.to_string()
}
