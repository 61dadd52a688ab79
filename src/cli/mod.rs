//! CLI module containing flag declaration and related functionality

pub mod args;
pub mod error;
pub mod suggestion;

pub use args::{parse_args, try_parse_args_from, Args};
pub use error::{CliError, CliResult};
