//! # CLI Error Types
//!
//! Everything that can go wrong between reading a file and printing a
//! summary.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       CLI Error Categories                              │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Document      │  │     Underlying          │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  InDocument     │  │  Io                     │ │
//! │  │  ConfigExists   │  │  Core           │  │  Json                   │ │
//! │  │  NoConfigPath   │  │                 │  │  TomlDe / TomlSer       │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use freightdesk_core::CoreError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Configuration values failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// `config init` would overwrite an existing file.
    #[error("Config file already exists: {} (use --force to overwrite)", .0.display())]
    ConfigExists(PathBuf),

    /// No platform config directory and no `--config` given.
    #[error("No config path available")]
    NoConfigPath,

    // =========================================================================
    // Document Errors
    // =========================================================================
    /// A category or line in the quotation document was rejected.
    #[error("{location}: {source}")]
    InDocument {
        location: String,
        #[source]
        source: CoreError,
    },

    /// Quotation-level failure (tax rate, other charges).
    #[error(transparent)]
    Core(#[from] CoreError),

    // =========================================================================
    // Underlying Errors
    // =========================================================================
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse config: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Failed to write config: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

impl CliError {
    /// Attaches a document location to a core error.
    pub fn in_document(location: impl Into<String>, source: CoreError) -> Self {
        CliError::InDocument {
            location: location.into(),
            source,
        }
    }
}
