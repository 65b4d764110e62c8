//! # Configuration
//!
//! Route tables can be declared in a file instead of code. The file format is
//! picked from the extension: `.toml`, `.yaml`/`.yml`, anything else is JSON.
//!
//! ```toml
//! base = "/app"
//! initial = "/"
//! history_limit = 50
//! case_sensitive = false
//! strict = false
//!
//! [[routes]]
//! path = "/"
//! view = "landing"
//! name = "landing"
//!
//! [[routes]]
//! path = "/listen/:id"
//! view = "public"
//! name = "listen"
//! ```
//!
//! ## Environment Variables
//!
//! Applied on top of the file by [`RouterConfig::with_env_overrides`]:
//!
//! - `KEEPSAKE_ROUTER_BASE` - base path the app is mounted under
//! - `KEEPSAKE_ROUTER_HISTORY_LIMIT` - maximum history entries kept in memory
//! - `KEEPSAKE_ROUTER_STRICT` - `true`/`false`, trailing slash handling
//! - `KEEPSAKE_ROUTER_CASE_SENSITIVE` - `true`/`false`

use crate::error::TableError;
use crate::history::MemoryHistory;
use crate::keepsake;
use crate::router::{MatchOptions, Route, RouteTable, Router};
use crate::view::ViewId;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// One declared route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Pattern, e.g. `/listen/:id`
    pub path: String,
    /// View identifier handed to the host on a match
    pub view: ViewId,
    /// Optional route name for reverse lookups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Router configuration as loaded from a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Base path the app is mounted under (used for `href`s only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    /// Location the history starts at
    pub initial: String,
    /// Maximum number of history entries kept
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_limit: Option<usize>,
    /// Matching options for the whole table
    #[serde(flatten)]
    pub matching: MatchOptions,
    /// Routes in match order
    pub routes: Vec<RouteConfig>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            base: None,
            initial: "/".to_string(),
            history_limit: None,
            matching: MatchOptions::default(),
            routes: Vec::new(),
        }
    }
}

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml`, parsed with `toml`
    Toml,
    /// `.yaml` or `.yml`, parsed with `serde_yaml`
    Yaml,
    /// Any other extension, parsed with `serde_json`
    Json,
}

impl ConfigFormat {
    /// Pick the format from a file extension (JSON when unknown)
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => ConfigFormat::Toml,
            Some("yaml" | "yml") => ConfigFormat::Yaml,
            _ => ConfigFormat::Json,
        }
    }
}

impl RouterConfig {
    /// The shipped keepsake route table as a configuration
    #[must_use]
    pub fn keepsake() -> Self {
        let routes = keepsake::routes()
            .into_iter()
            .map(|r| RouteConfig {
                path: r.pattern,
                view: ViewId::from(r.view),
                name: r.name,
            })
            .collect();
        Self {
            routes,
            ..Self::default()
        }
    }

    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read router config {}", path.display()))?;
        let config = Self::parse(&content, ConfigFormat::from_path(path))
            .with_context(|| format!("Failed to parse router config {}", path.display()))?;
        info!(
            path = %path.display(),
            routes_count = config.routes.len(),
            "Router config loaded"
        );
        Ok(config)
    }

    /// Parse and validate configuration text
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self> {
        let config: RouterConfig = match format {
            ConfigFormat::Toml => toml::from_str(content)?,
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Json => serde_json::from_str(content)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the settings that the route table itself does not cover
    pub fn validate(&self) -> Result<()> {
        if let Some(base) = &self.base {
            if !base.starts_with('/') {
                bail!("base '{base}' must start with '/'");
            }
        }
        if !self.initial.starts_with('/') {
            bail!("initial location '{}' must start with '/'", self.initial);
        }
        if self.history_limit == Some(0) {
            bail!("history_limit must be at least 1");
        }
        Ok(())
    }

    /// Apply `KEEPSAKE_ROUTER_*` environment variables
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| env::var(key).ok())
    }

    /// Apply overrides from any key lookup (the environment in production)
    #[must_use]
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(base) = lookup("KEEPSAKE_ROUTER_BASE") {
            self.base = (!base.is_empty()).then_some(base);
        }
        if let Some(val) = lookup("KEEPSAKE_ROUTER_HISTORY_LIMIT") {
            match val.parse::<usize>() {
                Ok(limit) if limit > 0 => self.history_limit = Some(limit),
                _ => warn!(value = %val, "Ignoring invalid KEEPSAKE_ROUTER_HISTORY_LIMIT"),
            }
        }
        if let Some(strict) =
            lookup("KEEPSAKE_ROUTER_STRICT").and_then(|v| parse_flag("KEEPSAKE_ROUTER_STRICT", &v))
        {
            self.matching.strict = strict;
        }
        if let Some(case_sensitive) = lookup("KEEPSAKE_ROUTER_CASE_SENSITIVE")
            .and_then(|v| parse_flag("KEEPSAKE_ROUTER_CASE_SENSITIVE", &v))
        {
            self.matching.case_sensitive = case_sensitive;
        }
        self
    }

    /// Build the route table
    pub fn build_table(&self) -> Result<RouteTable<ViewId>, TableError> {
        let routes = self
            .routes
            .iter()
            .map(|r| Route {
                pattern: r.path.clone(),
                view: r.view.clone(),
                name: r.name.clone(),
            })
            .collect();
        RouteTable::new(routes, self.matching)
    }

    /// Build the history described by `base`, `initial` and `history_limit`
    #[must_use]
    pub fn build_history(&self) -> MemoryHistory {
        let mut history = MemoryHistory::with_initial_path(self.initial.clone());
        if let Some(base) = &self.base {
            history = history.with_base(base.clone());
        }
        if let Some(limit) = self.history_limit {
            history = history.with_limit(limit);
        }
        history
    }

    /// Build a router over an in-memory history
    pub fn build_router(&self) -> Result<Router<ViewId, MemoryHistory>> {
        let table = self.build_table().context("Invalid route table")?;
        let router = Router::new(Arc::new(table), self.build_history())
            .context("Invalid initial location")?;
        Ok(router)
    }
}

fn parse_flag(key: &str, value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => {
            warn!(key, value, "Ignoring invalid boolean override");
            None
        }
    }
}
