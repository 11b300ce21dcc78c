//! The reports the backend offers: titles, endpoints, required filters,
//! query parameters and column layouts.

use clap::ValueEnum;

use crate::error::Result;
use crate::model::{Filter, FilterSelection};
use crate::report::age::{age_columns, TimePeriod};
use crate::report::column::ColumnSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    AgeAnalysis,
    DebtorsAnalysis,
    TrialBalance,
    MaterialStock,
    SolarAnalytics,
}

/// Which timeout a report's requests run under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutClass {
    Normal,
    Long,
}

/// A named backend path with its default route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub name: &'static str,
    pub default_path: &'static str,
}

pub const DEBTORS_ORDINARY: Endpoint = Endpoint {
    name: "debtors-ordinary",
    default_path: "/api/debtors/ordinary",
};
pub const DEBTORS_BULK: Endpoint = Endpoint {
    name: "debtors-bulk",
    default_path: "/api/debtors/bulk",
};

/// Field set on debtor rows to tell ordinary and bulk summaries apart.
pub const SEGMENT_FIELD: &str = "Segment";

impl ReportKind {
    pub fn title(self) -> &'static str {
        match self {
            ReportKind::AgeAnalysis => "Age Analysis",
            ReportKind::DebtorsAnalysis => "Debtors Analysis",
            ReportKind::TrialBalance => "Trial Balance",
            ReportKind::MaterialStock => "Material Stock Balance",
            ReportKind::SolarAnalytics => "Solar Customer Analytics",
        }
    }

    /// File name stem for exports.
    pub fn stem(self) -> &'static str {
        match self {
            ReportKind::AgeAnalysis => "AgeAnalysis",
            ReportKind::DebtorsAnalysis => "DebtorsAnalysis",
            ReportKind::TrialBalance => "TrialBalance",
            ReportKind::MaterialStock => "MaterialStock",
            ReportKind::SolarAnalytics => "SolarAnalytics",
        }
    }

    pub fn endpoints(self) -> &'static [Endpoint] {
        match self {
            ReportKind::AgeAnalysis => &[Endpoint {
                name: "age-analysis",
                default_path: "/api/age-analysis",
            }],
            ReportKind::DebtorsAnalysis => &[DEBTORS_ORDINARY, DEBTORS_BULK],
            ReportKind::TrialBalance => &[Endpoint {
                name: "trial-balance",
                default_path: "/api/trial-balance",
            }],
            ReportKind::MaterialStock => &[Endpoint {
                name: "material-stock",
                default_path: "/api/material-stock",
            }],
            ReportKind::SolarAnalytics => &[Endpoint {
                name: "solar-analytics",
                default_path: "/api/solar/summary",
            }],
        }
    }

    pub fn required(self) -> &'static [Filter] {
        match self {
            ReportKind::AgeAnalysis => &[Filter::Area, Filter::BillCycle, Filter::Period],
            ReportKind::DebtorsAnalysis => &[Filter::Area, Filter::CustomerType],
            ReportKind::TrialBalance => &[Filter::Company, Filter::Year, Filter::Month],
            ReportKind::MaterialStock => &[Filter::Location],
            ReportKind::SolarAnalytics => &[Filter::Area, Filter::Year, Filter::Month],
        }
    }

    fn optional(self) -> &'static [Filter] {
        match self {
            ReportKind::AgeAnalysis => &[Filter::Province, Filter::Region, Filter::CustomerType],
            ReportKind::DebtorsAnalysis => &[Filter::Province, Filter::Region, Filter::BillCycle],
            ReportKind::TrialBalance => &[],
            ReportKind::MaterialStock => &[Filter::Material],
            ReportKind::SolarAnalytics => &[Filter::NetType],
        }
    }

    /// Filters encoded in export file names, in order.
    pub fn key_filters(self) -> &'static [Filter] {
        match self {
            ReportKind::AgeAnalysis => &[Filter::Area, Filter::BillCycle, Filter::Period],
            ReportKind::DebtorsAnalysis => &[Filter::Area, Filter::CustomerType],
            ReportKind::TrialBalance => &[Filter::Company, Filter::Year, Filter::Month],
            ReportKind::MaterialStock => &[Filter::Location],
            ReportKind::SolarAnalytics => &[Filter::Area, Filter::Year, Filter::Month],
        }
    }

    pub fn timeout_class(self) -> TimeoutClass {
        match self {
            ReportKind::AgeAnalysis | ReportKind::TrialBalance => TimeoutClass::Long,
            _ => TimeoutClass::Normal,
        }
    }

    pub fn has_totals(self) -> bool {
        !matches!(self, ReportKind::AgeAnalysis)
    }

    /// Validate the selection and build query parameters from it.
    pub fn query(self, selection: &FilterSelection) -> Result<Vec<(String, String)>> {
        selection.validate(self.required())?;
        if self.columns_depend_on_period() {
            selection.require(Filter::Period)?.parse::<TimePeriod>()?;
        }

        let mut params = Vec::new();
        for filter in self.required().iter().chain(self.optional()) {
            if let Some(value) = selection.get(*filter) {
                params.push((query_key(*filter).to_string(), value));
            }
        }
        if self == ReportKind::TrialBalance && !selection.cost_centers.is_empty() {
            params.push(("costCenters".to_string(), selection.cost_centers.join(",")));
        }
        Ok(params)
    }

    fn columns_depend_on_period(self) -> bool {
        self == ReportKind::AgeAnalysis
    }

    /// Column layout for this report. Depends on the selection only, never on the rows.
    pub fn columns(self, selection: &FilterSelection) -> Result<Vec<ColumnSpec>> {
        Ok(match self {
            ReportKind::AgeAnalysis => {
                let period = selection.require(Filter::Period)?.parse::<TimePeriod>()?;
                age_columns(period)
            }
            ReportKind::DebtorsAnalysis => vec![
                ColumnSpec::text("Segment", SEGMENT_FIELD),
                ColumnSpec::text("Customer Type", "CustomerType"),
                ColumnSpec::text("Tariff", "TariffCode"),
                ColumnSpec::integer("Accounts", "AccountCount"),
                ColumnSpec::currency("Current Arrears", "CurrentArrears"),
                ColumnSpec::currency("Arrears > 3 Months", "ArrearsOver3Months"),
                ColumnSpec::currency("Total Arrears", "TotalArrears"),
            ],
            ReportKind::TrialBalance => trial_balance_columns(&selection.cost_centers),
            ReportKind::MaterialStock => vec![
                ColumnSpec::text("Material Code", "MaterialCode"),
                ColumnSpec::text("Material", "MaterialName"),
                ColumnSpec::text("Unit", "Unit"),
                ColumnSpec::decimal("Qty On Hand", "QtyOnHand"),
                ColumnSpec::currency("Unit Price", "UnitPrice").without_total(),
                ColumnSpec::currency("Stock Value", "StockValue"),
            ],
            ReportKind::SolarAnalytics => vec![
                ColumnSpec::text("Net Type", "NetType"),
                ColumnSpec::integer("Customers", "CustomerCount"),
                ColumnSpec::decimal("Capacity (kW)", "CapacityKw"),
                ColumnSpec::decimal("Units Exported", "UnitsExported"),
                ColumnSpec::decimal("Units Imported", "UnitsImported"),
            ],
        })
    }
}

fn trial_balance_columns(cost_centers: &[String]) -> Vec<ColumnSpec> {
    let mut cols = vec![
        ColumnSpec::text("Account Code", "AccountCode"),
        ColumnSpec::text("Account", "AccountName"),
    ];
    if cost_centers.is_empty() {
        cols.push(ColumnSpec::currency("Closing Balance", "ClosingBalance"));
        return cols;
    }
    for cc in cost_centers {
        cols.push(ColumnSpec::currency(cc, cc));
    }
    let keys: Vec<&str> = cost_centers.iter().map(String::as_str).collect();
    cols.push(ColumnSpec::currency_sum("Total", &keys));
    cols
}

fn query_key(filter: Filter) -> &'static str {
    match filter {
        Filter::Area => "areaCode",
        Filter::Province => "provinceCode",
        Filter::Region => "region",
        Filter::BillCycle => "billCycle",
        Filter::Period => "timePeriod",
        Filter::CustomerType => "custType",
        Filter::Company => "companyId",
        Filter::Year => "year",
        Filter::Month => "month",
        Filter::Location => "deptId",
        Filter::Material => "matCode",
        Filter::NetType => "netType",
    }
}

/// Lookup lists used to pick filter values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LookupKind {
    Areas,
    Provinces,
    Regions,
    BillCycles,
}

impl LookupKind {
    pub fn endpoint(self) -> Endpoint {
        match self {
            LookupKind::Areas => Endpoint {
                name: "areas",
                default_path: "/api/lookups/areas",
            },
            LookupKind::Provinces => Endpoint {
                name: "provinces",
                default_path: "/api/lookups/provinces",
            },
            LookupKind::Regions => Endpoint {
                name: "regions",
                default_path: "/api/lookups/regions",
            },
            LookupKind::BillCycles => Endpoint {
                name: "bill-cycles",
                default_path: "/api/lookups/bill-cycles",
            },
        }
    }
}
