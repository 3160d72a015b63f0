//! LifeOS CLI library.
//!
//! This library provides the core functionality for the `lifeos` command-line
//! interface, including configuration loading, store selection, command
//! execution, and output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::{Config, Overrides, StoreSettings};
pub use error::{CliError, Result};
pub use output::Formatter;
