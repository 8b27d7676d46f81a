//! CLI error types with miette diagnostics.
//!
//! Maps core and config errors into user-facing errors with actionable
//! help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use vitrine_config::ConfigError;
use vitrine_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(vitrine::not_found),
        help("Run: vitrine {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Catalog ──────────────────────────────────────────────────────
    #[error("Catalog client error: {message}")]
    #[diagnostic(code(vitrine::catalog))]
    Catalog { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(vitrine::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(vitrine::config),
        help(
            "Inspect the file with: vitrine config show\n\
             Expected at: {path}"
        )
    )]
    Config { message: String, path: String },

    // ── Interactive ──────────────────────────────────────────────────
    #[error("'{command}' needs an interactive terminal")]
    #[diagnostic(
        code(vitrine::not_interactive),
        help("Use `vitrine products list` with filter flags for scripted use.")
    )]
    NotInteractive { command: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(vitrine::render))]
    Render(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::NotInteractive { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound { id } => CliError::NotFound {
                resource_type: "product".into(),
                identifier: id.to_string(),
                list_command: "products list".into(),
            },
            CoreError::Config { message } => CliError::Validation {
                field: "endpoint".into(),
                reason: message,
            },
            CoreError::Api { message, status: _ } => CliError::Catalog { message },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Io(e) => CliError::Io(e),
            other => CliError::Config {
                message: other.to_string(),
                path: vitrine_config::config_path().display().to_string(),
            },
        }
    }
}
