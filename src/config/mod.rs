//! Configuration loading and management

use crate::core::error::{ConfigError, WaitlistError, WaitlistResult};
use crate::core::export::DEFAULT_EXPORT_FIELDS;
use crate::core::query::ListQuery;
use crate::core::schedule::LatestOnly;
use crate::core::selection::ResolveOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Runtime configuration for the waitlist service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaitlistConfig {
    /// Address the HTTP server binds to
    pub bind_addr: String,

    /// Rows per page when the request does not ask for a size
    pub page_size: usize,

    /// Upper bound on the page size a request may ask for
    pub max_page_size: usize,

    /// Select the first visible row when nothing else is selected
    pub auto_select: bool,

    /// Quiet period before a search recompute runs
    pub search_debounce_ms: u64,

    /// Columns exported when a request does not name any
    pub export_fields: Vec<String>,
}

impl Default for WaitlistConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            page_size: 20,
            max_page_size: 200,
            auto_select: true,
            search_debounce_ms: 150,
            export_fields: DEFAULT_EXPORT_FIELDS
                .iter()
                .map(|f| f.to_string())
                .collect(),
        }
    }
}

impl WaitlistConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> WaitlistResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ConfigError::IoError {
                message: e.to_string(),
            },
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.display().to_string()),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> WaitlistResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the list view cannot work with
    pub fn validate(&self) -> WaitlistResult<()> {
        if self.page_size == 0 {
            return Err(invalid("page_size", "must be at least 1"));
        }
        if self.max_page_size < self.page_size {
            return Err(invalid("max_page_size", "must not be smaller than page_size"));
        }
        if self.export_fields.iter().all(|f| f.trim().is_empty()) {
            return Err(invalid("export_fields", "must name at least one field"));
        }
        Ok(())
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Spawn a latest-wins recompute worker using the configured debounce
    pub fn spawn_search_worker<S, V, F>(&self, compute: F) -> LatestOnly<S, V>
    where
        S: Clone + Send + Sync + 'static,
        V: Send + Sync + 'static,
        F: Fn(&S) -> V + Send + 'static,
    {
        LatestOnly::spawn(self.search_debounce(), compute)
    }

    /// Resolve options for a request; the request may override the defaults
    pub fn resolve_options(&self, query: &ListQuery) -> ResolveOptions {
        ResolveOptions {
            page_size: query.limit(self.page_size, self.max_page_size),
            auto_select: query.auto_select.unwrap_or(self.auto_select),
            sort: query.sort_order(),
        }
    }
}

fn invalid(field: &str, message: &str) -> WaitlistError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
    .into()
}
