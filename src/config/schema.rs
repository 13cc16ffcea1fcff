use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::filters::Mode;
use crate::scoring::{validate_categories, CategoryOverride, CategoryTable};
use crate::tui::Theme;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT: &str = "10s";

/// Main configuration file.
///
/// Example YAML:
/// ```yaml
/// api_url: "https://smartbuy.example.com"
/// request_timeout: "15s"
/// defaults:
///   mode: budget
///   brand: Samsung
///   max_price: 800
/// categories:
///   camera:
///     great: 8.5
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Base URL of the recommendation service
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Per-request timeout, humantime format ("10s", "1m")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<String>,

    /// Search filters used when the command line doesn't give one
    #[serde(default)]
    pub defaults: SearchDefaults,

    /// Overrides for the tier thresholds and copy, keyed by category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<HashMap<String, CategoryOverride>>,

    /// Brand picker list (the TUI always adds "Any" at the top)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brands: Option<Vec<String>>,

    #[serde(default)]
    pub theme: Theme,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SearchDefaults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_ram: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<u32>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout: None,
            defaults: SearchDefaults::default(),
            categories: None,
            brands: None,
            theme: Theme::default(),
        }
    }
}

impl Config {
    /// Effective request timeout. Invalid strings are caught by `validate`.
    pub fn request_timeout(&self) -> Duration {
        let raw = self
            .request_timeout
            .as_deref()
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);
        humantime::parse_duration(raw).unwrap_or(Duration::from_secs(10))
    }

    /// Category table with any configured overrides merged in
    pub fn category_table(&self) -> CategoryTable {
        match self.categories {
            Some(ref overrides) => CategoryTable::with_overrides(overrides),
            None => CategoryTable::default(),
        }
    }

    /// Validate the whole config at startup, collecting every error
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        match reqwest::Url::parse(&self.api_url) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => errors.push(format!(
                "api_url: unsupported scheme '{}' (expected http or https)",
                url.scheme()
            )),
            Err(e) => errors.push(format!("api_url: invalid URL '{}' - {}", self.api_url, e)),
        }

        if let Some(ref timeout) = self.request_timeout {
            match humantime::parse_duration(timeout) {
                Ok(d) if d.is_zero() => {
                    errors.push("request_timeout: must be greater than zero".to_string())
                }
                Ok(_) => {}
                Err(e) => errors.push(format!(
                    "request_timeout: invalid duration '{}' - {}",
                    timeout, e
                )),
            }
        }

        if let Some(min_ram) = self.defaults.min_ram {
            if !min_ram.is_finite() || min_ram < 0.0 {
                errors.push("defaults.min_ram: must be non-negative".to_string());
            }
        }

        if let Some(ref overrides) = self.categories {
            if let Err(category_errors) = validate_categories(overrides) {
                errors.extend(category_errors);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
