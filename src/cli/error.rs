//! Errors raised while turning command-line tokens into [`Args`](super::Args).

use clap::error::{ContextKind, ContextValue, ErrorKind};
use std::io::Write;
use thiserror::Error;

/// Result type for flag parsing
pub type CliResult<T> = Result<T, CliError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    /// The tokens do not form a valid invocation (unknown flag, bad number, missing value)
    #[error("{message}")]
    Usage {
        message: String,
        /// Offending flag or value as reported by the parser, when known
        argument: Option<String>,
    },

    /// Help or version output was requested; `text` is what should be printed
    #[error("{text}")]
    DisplayRequested { text: String },
}

impl CliError {
    /// Exit status a process should use after reporting this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage { .. } => 2,
            CliError::DisplayRequested { .. } => 0,
        }
    }

    pub fn is_usage(&self) -> bool {
        matches!(self, CliError::Usage { .. })
    }

    /// Print the rendered text where clap would and exit with [`Self::exit_code`]
    pub fn exit(&self) -> ! {
        match self {
            CliError::Usage { message, .. } => eprint!("{}", message),
            CliError::DisplayRequested { text } => {
                print!("{}", text);
                let _ = std::io::stdout().flush();
            }
        }
        std::process::exit(self.exit_code())
    }
}

impl From<clap::Error> for CliError {
    fn from(err: clap::Error) -> Self {
        let text = err.render().to_string();
        match err.kind() {
            ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                CliError::DisplayRequested { text }
            }
            _ => {
                let argument = match err.get(ContextKind::InvalidArg) {
                    Some(ContextValue::String(arg)) => Some(arg.clone()),
                    _ => None,
                };
                CliError::Usage { message: text, argument }
            }
        }
    }
}
