//! CLI configuration: thin wrapper around `vitrine_config`.
//!
//! Adds the resolution step that lets `GlobalOpts` flags (--endpoint,
//! --limit, --timeout, --offline) override file and environment values.

use std::time::Duration;

use clap::ValueEnum;
use tracing::warn;

use vitrine_core::CatalogConfig;

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use vitrine_config::{Config, config_path, load_config, save_config};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Load the config file, falling back to defaults when it cannot be read.
pub fn load_config_or_warn() -> Config {
    load_config().unwrap_or_else(|err| {
        warn!(error = %err, path = %config_path().display(), "ignoring unreadable config");
        Config::default()
    })
}

/// Fill `--output` / `--color` from config when not given on the command line.
pub fn apply_defaults(global: &mut GlobalOpts, config: &Config) {
    if global.output.is_none() {
        global.output = OutputFormat::from_str(&config.defaults.output, true).ok();
    }
    if global.color.is_none() {
        global.color = ColorMode::from_str(&config.defaults.color, true).ok();
    }
}

/// Translate config + global flags into a `CatalogConfig`.
///
/// CLI flag overrides take priority over file and environment values.
pub fn resolve_catalog_config(global: &GlobalOpts, config: &Config) -> Result<CatalogConfig, CliError> {
    let mut catalog = vitrine_config::to_catalog_config(config)?;

    if let Some(ref raw) = global.endpoint {
        catalog.endpoint = vitrine_config::parse_endpoint(raw)?;
    }

    if let Some(limit) = global.limit {
        catalog.limit = (limit > 0).then_some(limit);
    }

    if let Some(secs) = global.timeout {
        if secs == 0 {
            return Err(CliError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }
        catalog.timeout = Duration::from_secs(secs);
    }

    catalog.offline |= global.offline;
    Ok(catalog)
}
