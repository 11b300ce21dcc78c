//! Age analysis layout: which debt-age columns to show for a time period.

use std::fmt;
use std::str::FromStr;

use crate::error::ReportError;
use crate::report::column::ColumnSpec;

const MONTH_FIELDS: [&str; 7] = [
    "Month0", "Month1", "Month2", "Month3", "Month4", "Month5", "Month6",
];
const MONTH7_12_FIELDS: [&str; 2] = ["Months7_9", "Months10_12"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimePeriod {
    ZeroToSixMonths,
    SevenToTwelveMonths,
    OneToTwoYears,
    TwoToThreeYears,
    ThreeToFourYears,
    FourToFiveYears,
    OverFiveYears,
    All,
}

impl TimePeriod {
    pub fn code(self) -> &'static str {
        match self {
            TimePeriod::ZeroToSixMonths => "0-6",
            TimePeriod::SevenToTwelveMonths => "7-12",
            TimePeriod::OneToTwoYears => "1-2",
            TimePeriod::TwoToThreeYears => "2-3",
            TimePeriod::ThreeToFourYears => "3-4",
            TimePeriod::FourToFiveYears => "4-5",
            TimePeriod::OverFiveYears => ">5",
            TimePeriod::All => "All",
        }
    }
}

impl FromStr for TimePeriod {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0-6" => Ok(TimePeriod::ZeroToSixMonths),
            "7-12" => Ok(TimePeriod::SevenToTwelveMonths),
            "1-2" => Ok(TimePeriod::OneToTwoYears),
            "2-3" => Ok(TimePeriod::TwoToThreeYears),
            "3-4" => Ok(TimePeriod::ThreeToFourYears),
            "4-5" => Ok(TimePeriod::FourToFiveYears),
            ">5" => Ok(TimePeriod::OverFiveYears),
            p if p.eq_ignore_ascii_case("all") => Ok(TimePeriod::All),
            other => Err(ReportError::UnknownPeriod(other.to_string())),
        }
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Columns for an age analysis run. Depends only on the period.
pub fn age_columns(period: TimePeriod) -> Vec<ColumnSpec> {
    let mut cols = vec![
        ColumnSpec::text("Account No", "AccountNumber"),
        ColumnSpec::text("Name", "Name"),
        ColumnSpec::text("Tariff", "TariffCode"),
    ];

    match period {
        TimePeriod::ZeroToSixMonths => {
            for (i, field) in MONTH_FIELDS.iter().enumerate() {
                cols.push(ColumnSpec::currency(&format!("Month {i}"), field));
            }
        }
        TimePeriod::SevenToTwelveMonths => {
            cols.push(ColumnSpec::currency("7-9 Months", MONTH7_12_FIELDS[0]));
            cols.push(ColumnSpec::currency("10-12 Months", MONTH7_12_FIELDS[1]));
        }
        TimePeriod::OneToTwoYears => cols.push(ColumnSpec::currency("1-2 Years", "Years1_2")),
        TimePeriod::TwoToThreeYears => cols.push(ColumnSpec::currency("2-3 Years", "Years2_3")),
        TimePeriod::ThreeToFourYears => cols.push(ColumnSpec::currency("3-4 Years", "Years3_4")),
        TimePeriod::FourToFiveYears => cols.push(ColumnSpec::currency("4-5 Years", "Years4_5")),
        TimePeriod::OverFiveYears => cols.push(ColumnSpec::currency("Over 5 Years", "Years5Plus")),
        TimePeriod::All => {
            cols.push(ColumnSpec::currency_sum("0-6 Months", &MONTH_FIELDS));
            cols.push(ColumnSpec::currency_sum("7-12 Months", &MONTH7_12_FIELDS));
            cols.push(ColumnSpec::currency_sum("1-2 Years", &["Years1_2"]));
            cols.push(ColumnSpec::currency_sum("2-3 Years", &["Years2_3"]));
            cols.push(ColumnSpec::currency_sum("3-4 Years", &["Years3_4"]));
            cols.push(ColumnSpec::currency_sum("4-5 Years", &["Years4_5"]));
            cols.push(ColumnSpec::currency_sum("Over 5 Years", &["Years5Plus"]));
        }
    }

    cols.push(ColumnSpec::currency("Balance", "Balance"));
    cols
}
