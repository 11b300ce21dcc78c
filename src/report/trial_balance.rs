//! Trial balance grouping: accounts bucketed by the first letter of their code,
//! each bucket bracketed by a header line and a subtotal line.

use std::cmp::Ordering;
use std::fmt;

use crate::model::ReportRow;
use crate::report::column::ColumnSpec;
use crate::report::table::{add_sums, totals, LineKind, ReportLine};

pub const ACCOUNT_CODE_FIELD: &str = "AccountCode";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Assets,
    Liabilities,
    Revenue,
    Expenditure,
    Other,
}

impl Category {
    pub fn from_code(code: &str) -> Self {
        match code.trim().chars().next().map(|c| c.to_ascii_uppercase()) {
            Some('A') => Category::Assets,
            Some('L') => Category::Liabilities,
            Some('R') => Category::Revenue,
            Some('E') => Category::Expenditure,
            _ => Category::Other,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Assets => "Assets",
            Category::Liabilities => "Liabilities",
            Category::Revenue => "Revenue",
            Category::Expenditure => "Expenditure",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Compare strings with digit runs ordered by value, so "A9" < "A10".
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut ai = a.chars().peekable();
    let mut bi = b.chars().peekable();

    loop {
        match (ai.peek().copied(), bi.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let na = take_digits(&mut ai);
                let nb = take_digits(&mut bi);
                let ta = na.trim_start_matches('0');
                let tb = nb.trim_start_matches('0');
                let ord = ta
                    .len()
                    .cmp(&tb.len())
                    .then_with(|| ta.cmp(tb))
                    .then_with(|| na.len().cmp(&nb.len()));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(x), Some(y)) => {
                let ord = x
                    .to_ascii_lowercase()
                    .cmp(&y.to_ascii_lowercase())
                    .then_with(|| x.cmp(&y));
                if ord != Ordering::Equal {
                    return ord;
                }
                ai.next();
                bi.next();
            }
        }
    }
}

fn take_digits(it: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut out = String::new();
    while let Some(c) = it.peek().copied().filter(char::is_ascii_digit) {
        out.push(c);
        it.next();
    }
    out
}

/// Sort rows by account code (stable, natural order).
pub fn sort_accounts(rows: &[ReportRow]) -> Vec<&ReportRow> {
    let mut sorted: Vec<&ReportRow> = rows.iter().collect();
    sorted.sort_by(|a, b| natural_cmp(&a.text(ACCOUNT_CODE_FIELD), &b.text(ACCOUNT_CODE_FIELD)));
    sorted
}

/// Build grouped trial balance lines in one pass over the sorted accounts:
/// header, accounts, subtotal per category, then a grand total.
pub fn group_lines(columns: &[ColumnSpec], rows: &[ReportRow]) -> Vec<ReportLine> {
    let sorted = sort_accounts(rows);
    let mut lines = Vec::with_capacity(sorted.len() + 8);
    if sorted.is_empty() {
        return lines;
    }

    let width = columns.len();
    let mut grand = totals(columns, std::iter::empty::<&ReportRow>());
    let mut current: Option<Category> = None;
    let mut group: Vec<&ReportRow> = Vec::new();

    for row in sorted {
        let category = Category::from_code(&row.text(ACCOUNT_CODE_FIELD));
        if let Some(prev) = current.filter(|c| *c != category) {
            close_group(&mut lines, columns, prev, &group, &mut grand);
            group.clear();
        }
        if current != Some(category) {
            lines.push(ReportLine::header(category.name(), width));
            current = Some(category);
        }
        lines.push(ReportLine::data(columns, row));
        group.push(row);
    }
    if let Some(last) = current {
        close_group(&mut lines, columns, last, &group, &mut grand);
    }

    lines.push(ReportLine::summary(LineKind::Total, "GRAND TOTAL", columns, &grand));
    lines
}

fn close_group(
    lines: &mut Vec<ReportLine>,
    columns: &[ColumnSpec],
    category: Category,
    group: &[&ReportRow],
    grand: &mut [Option<f64>],
) {
    let sums = totals(columns, group.iter().copied());
    add_sums(grand, &sums);
    let label = format!("Total {}", category.name());
    lines.push(ReportLine::summary(LineKind::Subtotal, &label, columns, &sums));
}
