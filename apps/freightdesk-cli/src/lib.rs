//! # freightdesk-cli
//!
//! Command-line host for the quotation engine: configuration, quotation
//! documents, and summary reports. The binary in `main.rs` only parses
//! arguments, sets up logging, and dispatches here.
//!
//! ## Modules
//!
//! - [`config`] - `FreightDeskConfig` (TOML + environment)
//! - [`input`] - Quotation JSON documents
//! - [`report`] - Text and JSON summary rendering
//! - [`commands`] - Subcommand handlers
//! - [`error`] - CLI error types

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod report;

pub use config::FreightDeskConfig;
pub use error::{CliError, CliResult};
