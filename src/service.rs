//! Ties configuration, the fetch adapter and report layout together:
//! validate → fetch → lay out.

use std::time::Duration;

use crate::config::Config;
use crate::error::Result;
use crate::fetch::{fetch_pair, Fetcher};
use crate::model::{FilterSelection, LookupOption, ReportRow};
use crate::report::catalog::{DEBTORS_BULK, DEBTORS_ORDINARY, SEGMENT_FIELD};
use crate::report::{Endpoint, LookupKind, Report, ReportKind, TimeoutClass};

pub struct ReportService<'a> {
    config: &'a Config,
    normal: Fetcher,
    long: Fetcher,
}

impl<'a> ReportService<'a> {
    /// `base_url` overrides `api.base_url` from the config when given.
    pub fn new(config: &'a Config, base_url: Option<&str>) -> Self {
        let base = base_url.unwrap_or(&config.api.base_url);
        let normal = Fetcher::new(base, Duration::from_secs(config.api.timeout_secs));
        let long = normal.with_timeout(Duration::from_secs(config.api.long_timeout_secs));
        Self {
            config,
            normal,
            long,
        }
    }

    fn fetcher(&self, class: TimeoutClass) -> &Fetcher {
        match class {
            TimeoutClass::Normal => &self.normal,
            TimeoutClass::Long => &self.long,
        }
    }

    fn path(&self, endpoint: Endpoint) -> &str {
        self.config.endpoint(endpoint.name, endpoint.default_path)
    }

    pub fn lookup(&self, kind: LookupKind) -> Result<Vec<LookupOption>> {
        self.normal.get_lookup(self.path(kind.endpoint()))
    }

    /// Validate the selection, fetch the rows and lay them out.
    /// Nothing is fetched when a required filter is missing.
    pub fn run(&self, kind: ReportKind, selection: FilterSelection) -> Result<Report> {
        let query = kind.query(&selection)?;
        // Column layout errors surface before the network call too.
        kind.columns(&selection)?;

        let fetcher = self.fetcher(kind.timeout_class());
        let rows = match kind {
            ReportKind::DebtorsAnalysis => self.fetch_debtors(fetcher, &query)?,
            _ => {
                let endpoint = kind.endpoints()[0];
                fetcher.get_rows(self.path(endpoint), &query)?
            }
        };
        log::debug!("{}: {} rows", kind.title(), rows.len());

        Report::build(kind, selection, &rows)
    }

    /// Ordinary and bulk summaries are fetched together; ordinary rows come first.
    fn fetch_debtors(&self, fetcher: &Fetcher, query: &[(String, String)]) -> Result<Vec<ReportRow>> {
        let ordinary_path = self.path(DEBTORS_ORDINARY);
        let bulk_path = self.path(DEBTORS_BULK);

        let (ordinary, bulk) = fetch_pair(
            || fetcher.get_rows(ordinary_path, query),
            || fetcher.get_rows(bulk_path, query),
        );

        let mut rows = tag_segment(ordinary?, "Ordinary");
        rows.extend(tag_segment(bulk?, "Bulk"));
        Ok(rows)
    }
}

fn tag_segment(rows: Vec<ReportRow>, segment: &str) -> Vec<ReportRow> {
    rows.into_iter()
        .map(|mut row| {
            row.insert(SEGMENT_FIELD, segment);
            row
        })
        .collect()
}
