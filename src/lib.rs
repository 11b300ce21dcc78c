pub mod config;
pub mod error;
pub mod export;
pub mod fetch;
pub mod format;
pub mod model;
pub mod pdf;
pub mod report;
pub mod service;

pub use config::Config;
pub use error::{ReportError, Result};
pub use fetch::Fetcher;
pub use model::{FilterSelection, LookupOption, ReportRow};
pub use report::{ColumnSpec, Report, ReportKind};
pub use service::ReportService;
