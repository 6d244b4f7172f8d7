//! Service configuration.
//!
//! Handles loading, validating, and merging `catalog.toml`. Stock defaults are
//! overridden by whatever keys the user file sets; everything else keeps its
//! default.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [sources]
//! catalog_url = "https://api.door43.org/v3/catalog.json"
//! language_names_url = "https://td.unfoldingword.org/exports/langnames.json"
//! # legacy_catalog_url = "https://api.unfoldingword.org/uw/txt/2/catalog.json"
//! supplemental = []          # Files or http(s) URLs, merged in order
//! # supplemental_dir = "data/supplemental"
//! timeout_secs = 30
//!
//! [server]
//! bind = "0.0.0.0"
//! port = 8081
//! export_path = "data.json"
//!
//! [catalog.content_order]
//! reg = 1
//! ulb = 2
//! # ...
//!
//! [catalog.title_overrides]
//! [catalog.subject_aliases]
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Top-level configuration loaded from `catalog.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Where the pipeline inputs come from.
    pub sources: SourcesConfig,
    /// HTTP listener and export settings.
    pub server: ServerConfig,
    /// Lookup tables consulted by the pipeline.
    pub catalog: CatalogConfig,
}

impl AppConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sources.catalog_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "sources.catalog_url must not be empty".into(),
            ));
        }
        if self.sources.language_names_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "sources.language_names_url must not be empty".into(),
            ));
        }
        if self.sources.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "sources.timeout_secs must be greater than 0".into(),
            ));
        }
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

/// Upstream documents and supplemental data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourcesConfig {
    /// The v3 resource catalog.
    pub catalog_url: String,
    /// Language names export (`lc`, `ln`, `ang`, `ld` rows).
    pub language_names_url: String,
    /// Older v2 catalog, merged as a supplemental source when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legacy_catalog_url: Option<String>,
    /// Pre-normalized supplemental sources, as file paths or http(s) URLs.
    pub supplemental: Vec<String>,
    /// Directory of `*.json` supplemental sources, loaded after `supplemental`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplemental_dir: Option<PathBuf>,
    /// Per-request timeout for upstream fetches.
    pub timeout_secs: u64,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            catalog_url: "https://api.door43.org/v3/catalog.json".to_string(),
            language_names_url: "https://td.unfoldingword.org/exports/langnames.json"
                .to_string(),
            legacy_catalog_url: None,
            supplemental: Vec::new(),
            supplemental_dir: None,
            timeout_secs: 30,
        }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    /// File written by the export endpoint before it is sent as a download.
    pub export_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 8081,
            export_path: PathBuf::from("data.json"),
        }
    }
}

impl ServerConfig {
    /// `bind:port` for the listener.
    pub fn address(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

/// Static tables the pipeline consults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Content code → priority. Lower sorts first; missing codes get
    /// [`UNRANKED_PRIORITY`].
    pub content_order: BTreeMap<String, u32>,
    /// Upstream resource title → canonical title.
    pub title_overrides: BTreeMap<String, String>,
    /// Upstream subject → canonical subject.
    pub subject_aliases: BTreeMap<String, String>,
}

/// Priority given to content codes absent from `content_order`.
pub const UNRANKED_PRIORITY: u32 = 100;

impl Default for CatalogConfig {
    fn default() -> Self {
        let content_order = [
            "reg", "ulb", "udb", "ult", "ust", "obs", "tn", "tq", "tw", "ta", "obs-tn", "obs-tq",
        ]
        .iter()
        .zip(1..)
        .map(|(code, rank)| (code.to_string(), rank))
        .collect();

        let title_overrides = [
            ("Open Bible Stories Translation Notes", "OBS Translation Notes"),
            (
                "Open Bible Stories Translation Questions",
                "OBS Translation Questions",
            ),
        ]
        .iter()
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect();

        let subject_aliases = [
            ("Aligned Bible", "Bible"),
            ("Greek New Testament", "Bible"),
            ("Hebrew Old Testament", "Bible"),
        ]
        .iter()
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect();

        Self {
            content_order,
            title_overrides,
            subject_aliases,
        }
    }
}

impl CatalogConfig {
    /// Priority of a content code.
    pub fn content_priority(&self, code: &str) -> u32 {
        self.content_order
            .get(code)
            .copied()
            .unwrap_or(UNRANKED_PRIORITY)
    }

    /// Canonical title for an upstream resource title.
    pub fn content_title<'a>(&'a self, title: &'a str) -> &'a str {
        self.title_overrides
            .get(title)
            .map(String::as_str)
            .unwrap_or(title)
    }

    /// Canonical subject for an upstream subject.
    pub fn subject<'a>(&'a self, subject: &'a str) -> &'a str {
        self.subject_aliases
            .get(subject)
            .map(String::as_str)
            .unwrap_or(subject)
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(AppConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file doesn't exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<AppConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: AppConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`, falling back to stock defaults when it's absent.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `catalog.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# BIEL Catalog Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Upstream sources
# ---------------------------------------------------------------------------
[sources]
# The v3 resource catalog (languages -> resources -> projects -> formats).
catalog_url = "https://api.door43.org/v3/catalog.json"

# Language names export, used for English display names and for languages
# that only appear in supplemental data.
language_names_url = "https://td.unfoldingword.org/exports/langnames.json"

# Older v2 catalog. When set, it is converted and merged like any other
# supplemental source.
# legacy_catalog_url = "https://api.unfoldingword.org/uw/txt/2/catalog.json"

# Hand-maintained data already in output form. Files or http(s) URLs,
# merged in the order listed. Earlier sources win over later ones.
supplemental = []

# Every *.json file in this directory is merged after the list above,
# in sorted file name order.
# supplemental_dir = "data/supplemental"

# Timeout in seconds for each upstream request.
timeout_secs = 30

# ---------------------------------------------------------------------------
# HTTP server
# ---------------------------------------------------------------------------
[server]
bind = "0.0.0.0"
port = 8081

# Where /catalog/export writes the file it sends back.
export_path = "data.json"

# ---------------------------------------------------------------------------
# Catalog tables
# ---------------------------------------------------------------------------
[catalog]

# Display order of contents within a language. Lower comes first; codes
# not listed here sort after all listed ones, keeping their upstream order.
[catalog.content_order]
reg = 1
ulb = 2
udb = 3
ult = 4
ust = 5
obs = 6
tn = 7
tq = 8
tw = 9
ta = 10
obs-tn = 11
obs-tq = 12

# Upstream resource titles that are renamed in the output.
[catalog.title_overrides]
"Open Bible Stories Translation Notes" = "OBS Translation Notes"
"Open Bible Stories Translation Questions" = "OBS Translation Questions"

# Upstream subjects folded into a canonical subject.
[catalog.subject_aliases]
"Aligned Bible" = "Bible"
"Greek New Testament" = "Bible"
"Hebrew Old Testament" = "Bible"
"##
}
