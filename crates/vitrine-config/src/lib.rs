//! Configuration for the vitrine catalog browser.
//!
//! A TOML file under the platform config directory, overlaid with
//! `VITRINE_`-prefixed environment variables, translated into
//! `vitrine_core::CatalogConfig`. The CLI applies its own flag overrides
//! on top.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use vitrine_core::{CatalogConfig, DEFAULT_ENDPOINT, DEFAULT_LIMIT};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl ConfigError {
    fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogSection,

    #[serde(default)]
    pub defaults: Defaults,
}

/// Where the catalog comes from and how long it is kept.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CatalogSection {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Result-size limit; `0` fetches the whole catalog.
    #[serde(default = "default_limit")]
    pub limit: u32,

    /// Fetch timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Cache lifetime in seconds; `0` disables caching.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl: u64,

    #[serde(default)]
    pub offline: bool,
}

impl Default for CatalogSection {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            limit: default_limit(),
            timeout: default_timeout(),
            cache_ttl: default_cache_ttl(),
            offline: false,
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.into()
}
fn default_limit() -> u32 {
    DEFAULT_LIMIT
}
fn default_timeout() -> u64 {
    10
}
fn default_cache_ttl() -> u64 {
    300
}

/// Output preferences.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

/// Keys accepted by [`Config::set`].
pub const SETTABLE_KEYS: &[&str] = &[
    "endpoint",
    "limit",
    "timeout",
    "cache_ttl",
    "offline",
    "output",
    "color",
];

impl Config {
    /// Set one value by key, validating it first.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "endpoint" => {
                parse_endpoint(value)?;
                self.catalog.endpoint = value.into();
            }
            "limit" => {
                self.catalog.limit = value
                    .parse()
                    .map_err(|_| ConfigError::invalid("limit", "must be a whole number (0 = no limit)"))?;
            }
            "timeout" => {
                let secs: u64 = value
                    .parse()
                    .map_err(|_| ConfigError::invalid("timeout", "must be a number (seconds)"))?;
                if secs == 0 {
                    return Err(ConfigError::invalid("timeout", "must be at least 1 second"));
                }
                self.catalog.timeout = secs;
            }
            "cache_ttl" | "cache-ttl" => {
                self.catalog.cache_ttl = value
                    .parse()
                    .map_err(|_| ConfigError::invalid("cache_ttl", "must be a number (seconds)"))?;
            }
            "offline" => {
                self.catalog.offline = value
                    .parse()
                    .map_err(|_| ConfigError::invalid("offline", "must be 'true' or 'false'"))?;
            }
            "output" => {
                if !["table", "json", "json-compact", "yaml", "plain"].contains(&value) {
                    return Err(ConfigError::invalid(
                        "output",
                        "must be one of: table, json, json-compact, yaml, plain",
                    ));
                }
                self.defaults.output = value.into();
            }
            "color" => {
                if !["auto", "always", "never"].contains(&value) {
                    return Err(ConfigError::invalid("color", "must be one of: auto, always, never"));
                }
                self.defaults.color = value.into();
            }
            other => {
                return Err(ConfigError::invalid(
                    other,
                    format!("unknown config key. Valid keys: {}", SETTABLE_KEYS.join(", ")),
                ));
            }
        }
        Ok(())
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("rs", "vitrine", "vitrine").map_or_else(
        || dirs_fallback().join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("vitrine");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file + environment. A missing file is not an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("VITRINE_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation ─────────────────────────────────────────────────────

/// Parse an endpoint, accepting only http and https URLs.
pub fn parse_endpoint(raw: &str) -> Result<Url, ConfigError> {
    let url: Url = raw
        .parse()
        .map_err(|e| ConfigError::invalid("endpoint", format!("invalid URL '{raw}': {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::invalid(
            "endpoint",
            format!("expected an http(s) URL, got '{raw}'"),
        ));
    }
    Ok(url)
}

/// Build a `CatalogConfig` from the file/env values alone.
pub fn to_catalog_config(cfg: &Config) -> Result<CatalogConfig, ConfigError> {
    let section = &cfg.catalog;
    if section.timeout == 0 {
        return Err(ConfigError::invalid("timeout", "must be at least 1 second"));
    }

    let mut catalog = CatalogConfig::new(parse_endpoint(&section.endpoint)?);
    catalog.limit = (section.limit > 0).then_some(section.limit);
    catalog.timeout = Duration::from_secs(section.timeout);
    catalog.cache_ttl = Duration::from_secs(section.cache_ttl);
    catalog.offline = section.offline;
    Ok(catalog)
}
