//! Action registry and dispatch
//!
//! An action is the operation selected with `--action` and run once the arguments
//! have been validated. The validator only needs to know which names exist, so it
//! sees actions through [`ActionCatalog`]; the registry is what actually holds and
//! runs the implementations.

use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Write};

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info};
use thiserror::Error;

use crate::validation::ValidatedConfig;

/// Name and description of the actions shipped with the binary
pub const BUILTIN_ACTIONS: [(&str, &str); 2] = [
    ("build", "Build the presentation into a static bundle"),
    ("server", "Run the presentation development server"),
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("Action already registered: {name}")]
    AlreadyRegistered { name: String },

    #[error("Action not found: {name}")]
    NotFound { name: String },
}

/// The set of valid action names
pub trait ActionCatalog {
    fn contains(&self, name: &str) -> bool;

    /// Known names in a stable (sorted) order
    fn names(&self) -> Vec<String>;
}

impl ActionCatalog for BTreeSet<String> {
    fn contains(&self, name: &str) -> bool {
        BTreeSet::contains(self, name)
    }

    fn names(&self) -> Vec<String> {
        self.iter().cloned().collect()
    }
}

/// An operation that consumes a validated configuration
#[async_trait]
pub trait Action: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    async fn run(&self, config: &ValidatedConfig) -> Result<()>;
}

/// Built-in action that hands the validated configuration to the external tool.
///
/// Serving and bundling live outside this crate; the hand-off is the configuration
/// rendered as JSON on stdout.
pub struct HandoffAction {
    name: &'static str,
    description: &'static str,
}

impl HandoffAction {
    pub fn new(name: &'static str, description: &'static str) -> Self {
        Self { name, description }
    }

    pub fn render(&self, config: &ValidatedConfig) -> Result<String> {
        serde_json::to_string_pretty(config)
            .with_context(|| format!("Failed to serialise configuration for '{}'", self.name))
    }
}

#[async_trait]
impl Action for HandoffAction {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    async fn run(&self, config: &ValidatedConfig) -> Result<()> {
        info!(
            "Handing off '{}' for {} (port {}, title \"{}\")",
            self.name,
            config.src_file_path().display(),
            config.port(),
            config.title()
        );
        let rendered = self.render(config)?;

        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", rendered).context("Failed to write hand-off to stdout")?;
        stdout.flush().context("Failed to flush stdout")
    }
}

/// Name-to-implementation mapping used for dispatch
#[derive(Default)]
pub struct ActionRegistry {
    actions: BTreeMap<String, Box<dyn Action>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every entry of [`BUILTIN_ACTIONS`]
    pub fn with_builtin_actions() -> Self {
        let mut registry = Self::new();
        for (name, description) in BUILTIN_ACTIONS {
            registry.actions.insert(
                name.to_string(),
                Box::new(HandoffAction::new(name, description)),
            );
        }
        registry
    }

    pub fn register(&mut self, action: Box<dyn Action>) -> Result<(), ActionError> {
        let name = action.name().to_string();
        if self.actions.contains_key(&name) {
            return Err(ActionError::AlreadyRegistered { name });
        }
        debug!("Registering action: {}", name);
        self.actions.insert(name, action);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&dyn Action> {
        self.actions.get(name).map(|action| &**action)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Look up the configuration's action and run it. The configuration is consumed.
    pub async fn dispatch(&self, config: ValidatedConfig) -> Result<()> {
        let action = self
            .get(config.action())
            .ok_or_else(|| ActionError::NotFound { name: config.action().to_string() })?;

        debug!("Dispatching action '{}': {}", action.name(), action.description());
        action
            .run(&config)
            .await
            .with_context(|| format!("Action '{}' failed", action.name()))
    }
}

impl ActionCatalog for ActionRegistry {
    fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    fn names(&self) -> Vec<String> {
        self.actions.keys().cloned().collect()
    }
}
