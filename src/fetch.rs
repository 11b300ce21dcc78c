//! HTTP access to the reporting backend.
//!
//! Every endpoint speaks JSON, usually wrapped as `{ "data": ..., "errorMessage": ... }`.
//! A request is tried once; failures surface straight to the caller.

use std::thread;
use std::time::Duration;

use serde_json::Value;
use ureq::Agent;

use crate::error::{ReportError, Result};
use crate::model::{LookupOption, ReportRow};

/// Province-wide age analysis responses run to tens of megabytes.
const MAX_BODY_BYTES: u64 = 256 * 1024 * 1024;

pub struct Fetcher {
    base_url: String,
    timeout: Duration,
    agent: Agent,
}

impl Fetcher {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            agent: build_agent(timeout),
        }
    }

    /// Same backend, different timeout.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self::new(&self.base_url, timeout)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET `path` and return the envelope's `data`, or the whole body when unwrapped.
    pub fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value> {
        let url = self.url(path);
        log::debug!("GET {url} {query:?} (timeout {}s)", self.timeout.as_secs());

        let mut request = self.agent.get(&url).header("Accept", "application/json");
        for (key, value) in query {
            request = request.query(key, value);
        }

        let mut response = request.call().map_err(|e| self.transport_error(&url, e))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        log::debug!("{url} -> {} ({content_type})", status.as_u16());

        let body = response
            .body_mut()
            .with_config()
            .limit(MAX_BODY_BYTES)
            .read_to_string()
            .map_err(|e| self.transport_error(&url, e))?;

        interpret_response(
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown status"),
            &content_type,
            &body,
        )
    }

    pub fn get_rows(&self, path: &str, query: &[(String, String)]) -> Result<Vec<ReportRow>> {
        rows_from_value(self.get(path, query)?)
    }

    pub fn get_lookup(&self, path: &str) -> Result<Vec<LookupOption>> {
        let value = self.get(path, &[])?;
        serde_json::from_value(value).map_err(|source| ReportError::MalformedJson { source })
    }

    fn transport_error(&self, url: &str, err: ureq::Error) -> ReportError {
        match err {
            ureq::Error::Timeout(_) => {
                log::warn!("{url} timed out after {}s", self.timeout.as_secs());
                ReportError::Timeout {
                    url: url.to_string(),
                    seconds: self.timeout.as_secs(),
                }
            }
            source => {
                log::warn!("request to {url} failed: {source}");
                ReportError::Network {
                    url: url.to_string(),
                    source,
                }
            }
        }
    }
}

fn build_agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build()
        .into()
}

/// Turn a raw response into the payload or a typed error. No I/O.
pub fn interpret_response(
    status: u16,
    reason: &str,
    content_type: &str,
    body: &str,
) -> Result<Value> {
    let is_json = content_type.to_ascii_lowercase().contains("application/json");

    if !(200..300).contains(&status) {
        // Proxies sometimes relabel JSON error bodies, so parse regardless of content type.
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .as_ref()
            .and_then(error_message);
        return Err(ReportError::Http {
            status,
            message: message.unwrap_or_else(|| format!("{status} {reason}")),
        });
    }

    if !is_json {
        let shown = if content_type.is_empty() { "(none)" } else { content_type };
        return Err(ReportError::UnexpectedContentType(shown.to_string()));
    }

    let parsed: Value =
        serde_json::from_str(body).map_err(|source| ReportError::MalformedJson { source })?;

    match parsed {
        Value::Object(mut map) if map.contains_key("data") || map.contains_key("errorMessage") => {
            if let Some(message) = message_text(map.get("errorMessage")) {
                log::warn!("backend reported an error: {message}");
                return Err(ReportError::Application(message));
            }
            Ok(map.remove("data").unwrap_or(Value::Null))
        }
        other => Ok(other),
    }
}

fn error_message(body: &Value) -> Option<String> {
    message_text(body.get("errorMessage"))
}

fn message_text(field: Option<&Value>) -> Option<String> {
    field
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

/// Accept a bare array of records, an object holding one under `data`, or a single record.
pub fn rows_from_value(value: Value) -> Result<Vec<ReportRow>> {
    let items = match value {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => items,
            Some(other) => {
                map.insert("data".to_string(), other);
                vec![Value::Object(map)]
            }
            None => vec![Value::Object(map)],
        },
        other => {
            return Err(ReportError::UnexpectedShape(format!(
                "expected a list of records, got {other}"
            )))
        }
    };

    items
        .into_iter()
        .map(|item| {
            ReportRow::from_value(item).ok_or_else(|| {
                ReportError::UnexpectedShape("report record is not an object".to_string())
            })
        })
        .collect()
}

/// Run two independent requests at once and wait for both.
pub fn fetch_pair<A, B, FA, FB>(first: FA, second: FB) -> (Result<A>, Result<B>)
where
    FA: FnOnce() -> Result<A> + Send,
    FB: FnOnce() -> Result<B> + Send,
    A: Send,
    B: Send,
{
    thread::scope(|s| {
        let handle = s.spawn(second);
        let a = first();
        let b = handle.join().unwrap_or_else(|_| {
            Err(ReportError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "request thread panicked",
            )))
        });
        (a, b)
    })
}
