mod settings;

pub use settings::{ApiSettings, Config, ExportSettings, ReportSettings};

use crate::error::{ReportError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (XDG config dir, falling back to ~/.reportdesk/)
pub fn config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "reportdesk") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    let home = dirs_home().ok_or_else(|| {
        ReportError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".reportdesk"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Expand ~ in paths
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_home() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Resolve the export directory; relative paths are taken from the config dir.
pub fn resolve_output_dir(output_dir: &str, cfg_dir: &Path) -> PathBuf {
    let expanded = expand_path(output_dir);
    if expanded.is_absolute() {
        expanded
    } else {
        cfg_dir.join(expanded)
    }
}

/// Load the main config.toml
pub fn load_config(cfg_dir: &Path) -> Result<Config> {
    if !cfg_dir.exists() {
        return Err(ReportError::ConfigNotFound(cfg_dir.to_path_buf()));
    }
    let path = cfg_dir.join("config.toml");
    if !path.exists() {
        return Err(ReportError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    let config = parse_config(&content).map_err(|source| ReportError::ConfigParse {
        path: path.clone(),
        source,
    })?;
    config
        .check()
        .map_err(|reason| ReportError::InvalidConfig { path, reason })?;
    Ok(config)
}

pub fn parse_config(content: &str) -> std::result::Result<Config, toml::de::Error> {
    toml::from_str(content)
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[api]
base_url = "http://localhost:8080"   # backend or proxy root; all report paths hang off it
timeout_secs = 60                    # ordinary reports
long_timeout_secs = 120              # age analysis, trial balance

[report]
organization = "Electricity Board - Finance Branch"

[export]
output_dir = "output"                # relative to this directory, or absolute / ~/...

# Override backend paths when the proxy routes differ from the defaults.
[endpoints]
# age-analysis = "/api/age-analysis"
# debtors-ordinary = "/api/debtors/ordinary"
# debtors-bulk = "/api/debtors/bulk"
# trial-balance = "/api/trial-balance"
# material-stock = "/api/material-stock"
# solar-analytics = "/api/solar/summary"
# areas = "/api/lookups/areas"
"#;
