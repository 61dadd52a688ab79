//! Colour handling for messages written to stderr
//!
//! Colours are used only when stderr is a terminal, `NO_COLOR` is unset and the
//! configuration file does not turn them off.

use colored::{ColoredString, Colorize};
use std::io::IsTerminal;

#[derive(Debug, Clone)]
pub struct ColourManager {
    enabled: bool,
}

impl ColourManager {
    pub fn with_colours(enabled: bool) -> Self {
        if enabled {
            // `colored` otherwise decides from stdout, but these messages go to stderr
            colored::control::set_override(true);
        }
        Self { enabled }
    }

    /// Decide from the environment, honouring an explicit preference from the config file
    pub fn from_environment(preference: Option<bool>) -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty());
        Self::with_colours(should_use_colours(preference, no_color, std::io::stderr().is_terminal()))
    }

    pub fn colours_enabled(&self) -> bool {
        self.enabled
    }

    pub fn error(&self, text: &str) -> ColoredString {
        if self.enabled {
            text.red().bold()
        } else {
            text.normal()
        }
    }

    pub fn hint(&self, text: &str) -> ColoredString {
        if self.enabled {
            text.yellow()
        } else {
            text.normal()
        }
    }

    pub fn highlight(&self, text: &str) -> ColoredString {
        if self.enabled {
            text.cyan().bold()
        } else {
            text.normal()
        }
    }
}

impl Default for ColourManager {
    fn default() -> Self {
        Self::from_environment(None)
    }
}

/// `NO_COLOR` always wins, then the configured preference, then terminal detection
fn should_use_colours(preference: Option<bool>, no_color: bool, is_terminal: bool) -> bool {
    if no_color {
        return false;
    }
    preference.unwrap_or(is_terminal)
}
