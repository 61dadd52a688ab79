//! Semantic validation of parsed arguments
//!
//! [`Validator::validate`] walks a fixed sequence of stages:
//!
//! ```text
//! Start -> ActionChecked -> ExtensionChecked -> SourceResolved
//!       -> ThemeResolved -> TemplateResolved -> Done
//! ```
//!
//! Each transition is one fallible check. The first failure ends the run, so only
//! one error is ever reported and later checks (including their I/O) never start.
//! Theme and template transitions only touch the filesystem when the flag was given.

pub mod error;
pub mod paths;
pub mod probe;

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Serialize;

use crate::actions::ActionCatalog;
use crate::cli::Args;

pub use error::{FileRole, ValidationError, ValidationResult};
pub use paths::resolve_path;
pub use probe::{FsProbe, PathProbe};

/// Extensions accepted for `--src`, compared case-sensitively
pub const SUPPORTED_EXTENSIONS: [&str; 2] = [".md", ".mdx"];

/// Fully checked configuration handed to action dispatch.
///
/// Only [`Validator::validate`] can build one, so holding a value means every check
/// passed: the action is known, the source ends in `.md`/`.mdx` and every set path
/// existed when checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedConfig {
    action: String,
    port: u16,
    title: String,
    src_file_path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    theme_file_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    template_file_path: Option<PathBuf>,
}

impl ValidatedConfig {
    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn src_file_path(&self) -> &Path {
        &self.src_file_path
    }

    pub fn theme_file_path(&self) -> Option<&Path> {
        self.theme_file_path.as_deref()
    }

    pub fn template_file_path(&self) -> Option<&Path> {
        self.template_file_path.as_deref()
    }
}

/// Lexical `--src` check, no filesystem access
pub fn has_supported_extension(src: &str) -> bool {
    SUPPORTED_EXTENSIONS.iter().any(|ext| src.ends_with(ext))
}

/// Progress of one validation run. Each variant carries what the passed checks produced.
#[derive(Debug)]
enum Stage {
    Start,
    ActionChecked {
        action: String,
    },
    ExtensionChecked {
        action: String,
    },
    SourceResolved {
        action: String,
        src: PathBuf,
    },
    ThemeResolved {
        action: String,
        src: PathBuf,
        theme: Option<PathBuf>,
    },
    TemplateResolved {
        action: String,
        src: PathBuf,
        theme: Option<PathBuf>,
        template: Option<PathBuf>,
    },
    Done(ValidatedConfig),
}

impl Stage {
    fn name(&self) -> &'static str {
        match self {
            Stage::Start => "Start",
            Stage::ActionChecked { .. } => "ActionChecked",
            Stage::ExtensionChecked { .. } => "ExtensionChecked",
            Stage::SourceResolved { .. } => "SourceResolved",
            Stage::ThemeResolved { .. } => "ThemeResolved",
            Stage::TemplateResolved { .. } => "TemplateResolved",
            Stage::Done(_) => "Done",
        }
    }
}

/// Runs the ordered checks against an injected action catalog and path probe
pub struct Validator<'a, C: ?Sized, P: ?Sized> {
    catalog: &'a C,
    probe: &'a P,
    base_dir: PathBuf,
}

impl<'a, C, P> Validator<'a, C, P>
where
    C: ActionCatalog + ?Sized,
    P: PathProbe + ?Sized,
{
    /// Validator resolving relative paths against the current working directory
    pub fn new(catalog: &'a C, probe: &'a P) -> io::Result<Self> {
        Ok(Self::with_base_dir(catalog, probe, env::current_dir()?))
    }

    /// Validator resolving relative paths against `base_dir`, which should be absolute
    pub fn with_base_dir(catalog: &'a C, probe: &'a P, base_dir: impl Into<PathBuf>) -> Self {
        Self { catalog, probe, base_dir: base_dir.into() }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Run every check in order and build the configuration, or stop at the first failure
    pub async fn validate(&self, raw: &Args) -> ValidationResult<ValidatedConfig> {
        let mut stage = Stage::Start;
        loop {
            if let Stage::Done(config) = stage {
                info!(
                    "Arguments validated: action '{}', source {}",
                    config.action(),
                    config.src_file_path().display()
                );
                return Ok(config);
            }

            let from = stage.name();
            stage = match self.advance(stage, raw).await {
                Ok(next) => next,
                Err(e) => {
                    debug!("Validation failed after {}: {}", from, e);
                    return Err(e);
                }
            };
            debug!("Validation stage {} -> {}", from, stage.name());
        }
    }

    async fn advance(&self, stage: Stage, raw: &Args) -> ValidationResult<Stage> {
        let next = match stage {
            Stage::Start => {
                self.check_action(&raw.action)?;
                Stage::ActionChecked { action: raw.action.clone() }
            }
            Stage::ActionChecked { action } => {
                check_extension(&raw.src)?;
                Stage::ExtensionChecked { action }
            }
            Stage::ExtensionChecked { action } => {
                let src = self.require_file(FileRole::Source, &raw.src).await?;
                Stage::SourceResolved { action, src }
            }
            Stage::SourceResolved { action, src } => {
                let theme = self.optional_file(FileRole::Theme, raw.theme()).await?;
                Stage::ThemeResolved { action, src, theme }
            }
            Stage::ThemeResolved { action, src, theme } => {
                let template = self.optional_file(FileRole::Template, raw.template()).await?;
                Stage::TemplateResolved { action, src, theme, template }
            }
            Stage::TemplateResolved { action, src, theme, template } => {
                Stage::Done(ValidatedConfig {
                    action,
                    port: raw.port,
                    title: raw.title.clone(),
                    src_file_path: src,
                    theme_file_path: theme,
                    template_file_path: template,
                })
            }
            done @ Stage::Done(_) => done,
        };
        Ok(next)
    }

    fn check_action(&self, action: &str) -> ValidationResult<()> {
        if self.catalog.contains(action) {
            return Ok(());
        }
        Err(ValidationError::UnknownAction {
            action: action.to_string(),
            available: self.catalog.names(),
        })
    }

    async fn require_file(&self, role: FileRole, input: &str) -> ValidationResult<PathBuf> {
        let path = resolve_path(&self.base_dir, input);
        debug!("Checking {} file {}", role, path.display());
        if self.probe.exists(&path).await {
            Ok(path)
        } else {
            Err(ValidationError::FileNotFound { role, path })
        }
    }

    async fn optional_file(&self, role: FileRole, input: Option<&str>) -> ValidationResult<Option<PathBuf>> {
        match input {
            Some(input) => self.require_file(role, input).await.map(Some),
            None => {
                debug!("No {} flag given, skipping check", role.flag());
                Ok(None)
            }
        }
    }
}

fn check_extension(src: &str) -> ValidationResult<()> {
    if has_supported_extension(src) {
        Ok(())
    } else {
        Err(ValidationError::InvalidExtension { src: src.to_string() })
    }
}

#[cfg(test)]
mod tests;
