//! Argument processing for the spectacle presentation tool.
//!
//! Command-line tokens become [`cli::Args`], which [`validation::Validator`] checks
//! in a fixed order before producing a [`validation::ValidatedConfig`] for
//! [`actions::ActionRegistry::dispatch`].

pub mod actions;
pub mod app;
pub mod cli;
pub mod config;
pub mod display;
pub mod logging;
pub mod validation;

pub use actions::{Action, ActionCatalog, ActionRegistry};
pub use cli::{Args, CliError};
pub use validation::{FileRole, ValidatedConfig, ValidationError, Validator};
