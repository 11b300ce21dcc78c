use std::path::PathBuf;
use thiserror::Error;

const TIMEOUT_HINT: &str =
    "The report took too long to produce. Try a smaller area or a narrower filter.";

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Config directory not found at {0}. Run 'reportdesk init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid config file {path}: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Missing required filter '{0}'")]
    MissingFilter(&'static str),

    #[error("Invalid value '{value}' for filter '{field}': {reason}")]
    InvalidFilter {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Unknown time period '{0}'. Use one of: 0-6, 7-12, 1-2, 2-3, 3-4, 4-5, >5, All")]
    UnknownPeriod(String),

    /// Non-2xx response. `message` is the backend's `errorMessage` when it sent one.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// A 2xx response whose envelope still reports a failure.
    #[error("{0}")]
    Application(String),

    #[error("Request to {url} timed out after {seconds}s")]
    Timeout { url: String, seconds: u64 },

    #[error("Network error calling {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: ureq::Error,
    },

    #[error("Unexpected content type '{0}', expected application/json")]
    UnexpectedContentType(String),

    #[error("Malformed JSON in response: {source}")]
    MalformedJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Typst not found. Install it from https://typst.app/ or run: cargo install typst-cli")]
    TypstNotFound,

    #[error("Failed to generate PDF: {0}")]
    PdfGeneration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReportError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ReportError::Timeout { .. })
    }

    /// Extra guidance shown under the error message, if any.
    pub fn hint(&self) -> Option<&'static str> {
        if self.is_timeout() {
            Some(TIMEOUT_HINT)
        } else {
            None
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
