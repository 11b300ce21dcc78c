use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ReportError, Result};

/// Query parameters for one report run. Built from command-line flags,
/// consumed once when the request is issued.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub area: Option<String>,
    pub province: Option<String>,
    pub region: Option<String>,
    pub bill_cycle: Option<String>,
    pub period: Option<String>,
    pub customer_type: Option<String>,
    pub company: Option<String>,
    pub cost_centers: Vec<String>,
    pub year: Option<u32>,
    pub month: Option<u32>,
    pub location: Option<String>,
    pub material: Option<String>,
    pub net_type: Option<String>,
}

/// Filter fields that can be named as required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    Area,
    Province,
    Region,
    BillCycle,
    Period,
    CustomerType,
    Company,
    Year,
    Month,
    Location,
    Material,
    NetType,
}

impl Filter {
    pub fn name(self) -> &'static str {
        match self {
            Filter::Area => "area",
            Filter::Province => "province",
            Filter::Region => "region",
            Filter::BillCycle => "bill-cycle",
            Filter::Period => "period",
            Filter::CustomerType => "customer-type",
            Filter::Company => "company",
            Filter::Year => "year",
            Filter::Month => "month",
            Filter::Location => "location",
            Filter::Material => "material",
            Filter::NetType => "net-type",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Filter::Area => "Area",
            Filter::Province => "Province",
            Filter::Region => "Region",
            Filter::BillCycle => "Bill Cycle",
            Filter::Period => "Time Period",
            Filter::CustomerType => "Customer Type",
            Filter::Company => "Company",
            Filter::Year => "Year",
            Filter::Month => "Month",
            Filter::Location => "Location",
            Filter::Material => "Material",
            Filter::NetType => "Net Type",
        }
    }
}

const DESCRIBED: [Filter; 12] = [
    Filter::Company,
    Filter::Province,
    Filter::Region,
    Filter::Area,
    Filter::Location,
    Filter::Material,
    Filter::BillCycle,
    Filter::Period,
    Filter::CustomerType,
    Filter::NetType,
    Filter::Year,
    Filter::Month,
];

impl FilterSelection {
    /// Current value of a filter as text; blank strings count as absent.
    pub fn get(&self, filter: Filter) -> Option<String> {
        let text = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        match filter {
            Filter::Area => text(&self.area),
            Filter::Province => text(&self.province),
            Filter::Region => text(&self.region),
            Filter::BillCycle => text(&self.bill_cycle),
            Filter::Period => text(&self.period),
            Filter::CustomerType => text(&self.customer_type),
            Filter::Company => text(&self.company),
            Filter::Location => text(&self.location),
            Filter::Material => text(&self.material),
            Filter::NetType => text(&self.net_type),
            Filter::Year => self.year.map(|y| y.to_string()),
            Filter::Month => self.month.map(|m| m.to_string()),
        }
    }

    pub fn require(&self, filter: Filter) -> Result<String> {
        self.get(filter).ok_or(ReportError::MissingFilter(filter.name()))
    }

    /// Check every required filter before any request goes out.
    pub fn validate(&self, required: &[Filter]) -> Result<()> {
        for filter in required {
            self.require(*filter)?;
        }
        if let Some(month) = self.month {
            if !(1..=12).contains(&month) {
                return Err(ReportError::InvalidFilter {
                    field: Filter::Month.name(),
                    value: month.to_string(),
                    reason: "must be between 1 and 12".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Active filters as (label, value) pairs, in a fixed order, for export headers.
    pub fn describe(&self) -> Vec<(String, String)> {
        let mut out: Vec<(String, String)> = DESCRIBED
            .iter()
            .filter_map(|f| self.get(*f).map(|v| (f.label().to_string(), v)))
            .collect();
        if !self.cost_centers.is_empty() {
            out.push(("Cost Centers".to_string(), self.cost_centers.join(", ")));
        }
        out
    }
}

/// One backend record: a flat JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportRow(pub Map<String, Value>);

impl ReportRow {
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(ReportRow(map)),
            _ => None,
        }
    }

    /// Numeric value of `key`. Numeric strings are accepted; anything else is 0.
    pub fn number(&self, key: &str) -> f64 {
        self.lookup_number(key).unwrap_or(0.0)
    }

    pub fn has_number(&self, key: &str) -> bool {
        self.lookup_number(key).is_some()
    }

    fn lookup_number(&self, key: &str) -> Option<f64> {
        match self.0.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().replace(',', "").parse().ok(),
            _ => None,
        }
    }

    pub fn text(&self, key: &str) -> String {
        match self.0.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }
}

/// A code/display pair used to populate filter choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupOption {
    #[serde(alias = "Code", alias = "id", alias = "areaCode", alias = "cycleCode")]
    pub code: String,
    #[serde(alias = "Name", alias = "description", alias = "areaName", alias = "cycleName")]
    pub name: String,
}
