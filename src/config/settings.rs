use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub api: ApiSettings,
    #[serde(default)]
    pub report: ReportSettings,
    pub export: ExportSettings,
    /// Per-report endpoint overrides, keyed by report or lookup name
    /// (e.g. `age-analysis = "/proxy/age"`).
    #[serde(default)]
    pub endpoints: HashMap<String, String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_long_timeout_secs")]
    pub long_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ReportSettings {
    #[serde(default)]
    pub organization: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ExportSettings {
    pub output_dir: String,
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_long_timeout_secs() -> u64 {
    120
}

impl Config {
    /// Reject settings that would make every request fail.
    pub fn check(&self) -> std::result::Result<(), String> {
        if self.api.base_url.trim().is_empty() {
            return Err("api.base_url must not be empty".to_string());
        }
        if self.api.timeout_secs == 0 {
            return Err("api.timeout_secs must be at least 1".to_string());
        }
        if self.api.long_timeout_secs == 0 {
            return Err("api.long_timeout_secs must be at least 1".to_string());
        }
        Ok(())
    }

    /// Endpoint path for `name`, honouring the `[endpoints]` overrides.
    pub fn endpoint<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.endpoints.get(name).map(String::as_str).unwrap_or(default)
    }
}
