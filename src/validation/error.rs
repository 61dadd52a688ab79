//! Validation error types

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for argument validation
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Which file flag a missing path came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileRole {
    Source,
    Theme,
    Template,
}

impl FileRole {
    /// Long flag the path was supplied through
    pub fn flag(&self) -> &'static str {
        match self {
            FileRole::Source => "--src",
            FileRole::Theme => "--theme",
            FileRole::Template => "--template",
        }
    }
}

impl fmt::Display for FileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FileRole::Source => "Source",
            FileRole::Theme => "Theme",
            FileRole::Template => "Template",
        };
        f.write_str(label)
    }
}

/// First failed check of a validation run. Later checks never run once one of these is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// `--action` names nothing in the catalog
    #[error("Unknown action: \"{action}\"")]
    UnknownAction {
        action: String,
        /// Catalog names at the time of the check, sorted
        available: Vec<String>,
    },

    /// `--src` does not end in `.md` or `.mdx`
    #[error("Only .md,.mdx files are supported for --src. Found: \"{src}\"")]
    InvalidExtension { src: String },

    #[error("{role} file \"{}\" not found.", .path.display())]
    FileNotFound { role: FileRole, path: PathBuf },
}
