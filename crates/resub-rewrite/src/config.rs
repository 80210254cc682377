//! Configuration for the rewrite middleware

use resub_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// One pattern/replacement pair, as configured.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSpec {
    /// Regular expression source string.
    pub regex: String,

    /// Replacement text; may reference capture groups with `$1` or
    /// `${name}`.
    pub replacement: String,
}

/// Rewrite middleware configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RewriteConfig {
    /// Keep the Last-Modified response header. Off by default: the
    /// body changes, so the original timestamp is usually stale.
    pub last_modified: bool,

    /// Substitutions, applied in declaration order.
    pub filters: Vec<FilterSpec>,
}

impl RewriteConfig {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Deserialize from the raw JSON value hosts hand to plugins.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| Error::config(format!("invalid configuration: {e}")))
    }

    /// Append a filter.
    pub fn with_filter(mut self, regex: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.filters.push(FilterSpec {
            regex: regex.into(),
            replacement: replacement.into(),
        });
        self
    }

    /// Keep the Last-Modified header on rewritten responses.
    pub fn keep_last_modified(mut self) -> Self {
        self.last_modified = true;
        self
    }
}
