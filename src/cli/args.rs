use clap::{ArgAction, Parser};
use std::ffi::OsString;

use super::error::{CliError, CliResult};
use crate::actions::BUILTIN_ACTIONS;

pub const DEFAULT_ACTION: &str = "server";
pub const DEFAULT_SRC: &str = "slides.mdx";
pub const DEFAULT_TITLE: &str = "Presentation";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_OUTPUT: &str = "dist";

/// Raw command-line arguments, before any semantic checks.
///
/// Every flag carries a single-character alias; unknown flags are rejected by the
/// parser rather than ignored.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "spectacle")]
#[command(about = "Generate a presentation from a Markdown or MDX file")]
#[command(override_usage = "spectacle -s <file>")]
#[command(version, disable_version_flag = true)]
pub struct Args {
    #[arg(short = 'a', long, value_name = "ACTION", default_value = DEFAULT_ACTION, help = action_help())]
    pub action: String,

    /// Path to a file from which a presentation will be generated
    #[arg(short = 's', long, value_name = "FILE", default_value = DEFAULT_SRC)]
    pub src: String,

    /// Path to a JS/JSON file with theme overrides
    #[arg(short = 't', long, value_name = "FILE")]
    pub theme: Option<String>,

    /// Title for the generated HTML file
    #[arg(short = 'l', long, value_name = "TITLE", default_value = DEFAULT_TITLE)]
    pub title: String,

    /// Path to a template file that gets included on each slide
    #[arg(short = 'q', long, value_name = "FILE")]
    pub template: Option<String>,

    /// Port for running the development server
    #[arg(short = 'p', long, value_name = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Output directory for built files
    #[arg(short = 'o', long, value_name = "DIR", default_value = DEFAULT_OUTPUT)]
    pub output: String,

    /// Show version number
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            action: DEFAULT_ACTION.to_string(),
            src: DEFAULT_SRC.to_string(),
            theme: None,
            title: DEFAULT_TITLE.to_string(),
            template: None,
            port: DEFAULT_PORT,
            output: DEFAULT_OUTPUT.to_string(),
            version: None,
        }
    }
}

impl Args {
    /// Theme path, treating an empty value the same as an absent flag
    pub fn theme(&self) -> Option<&str> {
        self.theme.as_deref().filter(|value| !value.is_empty())
    }

    /// Template path, treating an empty value the same as an absent flag
    pub fn template(&self) -> Option<&str> {
        self.template.as_deref().filter(|value| !value.is_empty())
    }
}

fn action_help() -> String {
    let names: Vec<&str> = BUILTIN_ACTIONS.iter().map(|(name, _)| *name).collect();
    format!("CLI action to run ({})", names.join(", "))
}

/// Parse the process arguments.
///
/// Help and version requests print and exit with status 0; usage errors print and
/// exit with status 2. Nothing here touches the filesystem.
pub fn parse_args() -> Args {
    match try_parse_args_from(std::env::args_os()) {
        Ok(args) => args,
        Err(err) => err.exit(),
    }
}

/// Parse an explicit token list (the first token is the program name)
pub fn try_parse_args_from<I, T>(tokens: I) -> CliResult<Args>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Args::try_parse_from(tokens).map_err(CliError::from)
}
