use serde::Serialize;

use crate::format::{format_currency, format_decimal, format_integer, format_plain};
use crate::model::ReportRow;

/// Where a column's value comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Accessor {
    Field(String),
    /// Sum of several numeric fields, used for aggregated buckets.
    Sum(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Currency,
    Integer,
    Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Right,
}

/// How to render one column of a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub label: String,
    pub accessor: Accessor,
    pub align: Align,
    pub format: Format,
    /// Whether the column takes part in total and subtotal lines.
    pub total: bool,
}

impl ColumnSpec {
    pub fn text(label: &str, field: &str) -> Self {
        Self {
            label: label.to_string(),
            accessor: Accessor::Field(field.to_string()),
            align: Align::Left,
            format: Format::Text,
            total: false,
        }
    }

    pub fn currency(label: &str, field: &str) -> Self {
        Self::numeric(label, Accessor::Field(field.to_string()), Format::Currency)
    }

    pub fn integer(label: &str, field: &str) -> Self {
        Self::numeric(label, Accessor::Field(field.to_string()), Format::Integer)
    }

    pub fn decimal(label: &str, field: &str) -> Self {
        Self::numeric(label, Accessor::Field(field.to_string()), Format::Decimal)
    }

    pub fn currency_sum(label: &str, fields: &[&str]) -> Self {
        let fields = fields.iter().map(|f| f.to_string()).collect();
        Self::numeric(label, Accessor::Sum(fields), Format::Currency)
    }

    fn numeric(label: &str, accessor: Accessor, format: Format) -> Self {
        Self {
            label: label.to_string(),
            accessor,
            align: Align::Right,
            format,
            total: true,
        }
    }

    /// Leave this column blank on total lines (rates, prices).
    pub fn without_total(mut self) -> Self {
        self.total = false;
        self
    }

    pub fn is_numeric(&self) -> bool {
        self.format != Format::Text
    }

    pub fn is_summable(&self) -> bool {
        self.is_numeric() && self.total
    }

    /// Numeric value for this column; `None` for text columns.
    pub fn number(&self, row: &ReportRow) -> Option<f64> {
        if !self.is_numeric() {
            return None;
        }
        Some(match &self.accessor {
            Accessor::Field(key) => row.number(key),
            Accessor::Sum(keys) => keys.iter().map(|k| row.number(k)).sum(),
        })
    }

    pub fn display(&self, row: &ReportRow) -> String {
        match self.number(row) {
            Some(v) => self.format_number(v),
            None => match &self.accessor {
                Accessor::Field(key) => row.text(key),
                Accessor::Sum(keys) => keys
                    .iter()
                    .map(|k| row.text(k))
                    .collect::<Vec<_>>()
                    .join(" "),
            },
        }
    }

    /// Unstyled value for machine-readable exports.
    pub fn raw(&self, row: &ReportRow) -> String {
        match self.number(row) {
            Some(v) => format_plain(v),
            None => self.display(row),
        }
    }

    pub fn format_number(&self, value: f64) -> String {
        match self.format {
            Format::Currency => format_currency(value),
            Format::Integer => format_integer(value),
            Format::Decimal => format_decimal(value),
            Format::Text => format_plain(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sum_accessor() {
        let row = ReportRow::from_value(json!({"a": 1, "b": "2.5", "c": -0.5})).unwrap();
        let col = ColumnSpec::currency_sum("Sum", &["a", "b", "c"]);
        assert_eq!(col.number(&row), Some(3.0));
        assert_eq!(col.display(&row), "3.00");
        assert_eq!(col.raw(&row), "3");
    }

    #[test]
    fn test_text_column_not_summable() {
        let row = ReportRow::from_value(json!({"name": "Silva"})).unwrap();
        let col = ColumnSpec::text("Name", "name");
        assert!(!col.is_summable());
        assert_eq!(col.number(&row), None);
        assert_eq!(col.display(&row), "Silva");
        assert_eq!(col.align, Align::Left);
    }

    #[test]
    fn test_without_total_keeps_formatting() {
        let row = ReportRow::from_value(json!({"price": 12.5})).unwrap();
        let col = ColumnSpec::currency("Unit Price", "price").without_total();
        assert!(!col.is_summable());
        assert_eq!(col.display(&row), "12.50");
    }

    #[test]
    fn test_currency_display_uses_parentheses() {
        let row = ReportRow::from_value(json!({"bal": -1234.5})).unwrap();
        let col = ColumnSpec::currency("Balance", "bal");
        assert_eq!(col.display(&row), "(1,234.50)");
        assert_eq!(col.raw(&row), "-1234.5");
    }
}
