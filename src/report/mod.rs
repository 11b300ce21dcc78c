pub mod age;
pub mod catalog;
pub mod column;
pub mod table;
pub mod trial_balance;

pub use age::{age_columns, TimePeriod};
pub use catalog::{Endpoint, LookupKind, ReportKind, TimeoutClass};
pub use column::{Accessor, Align, ColumnSpec, Format};
pub use table::{build_lines, render_table, totals, LineKind, ReportLine, NO_DATA};
pub use trial_balance::{group_lines, natural_cmp, Category};

use crate::error::Result;
use crate::model::{FilterSelection, ReportRow};

/// A fetched report laid out for display and export.
#[derive(Debug, Clone)]
pub struct Report {
    pub kind: ReportKind,
    pub selection: FilterSelection,
    pub columns: Vec<ColumnSpec>,
    pub lines: Vec<ReportLine>,
    pub row_count: usize,
}

impl Report {
    pub fn build(kind: ReportKind, selection: FilterSelection, rows: &[ReportRow]) -> Result<Self> {
        let columns = kind.columns(&selection)?;
        let lines = match kind {
            ReportKind::TrialBalance => group_lines(&columns, rows),
            _ => build_lines(&columns, rows, kind.has_totals()),
        };
        Ok(Self {
            kind,
            selection,
            columns,
            lines,
            row_count: rows.len(),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    pub fn render(&self) -> String {
        render_table(&self.columns, &self.lines)
    }
}
