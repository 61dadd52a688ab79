//! Validation and dispatch of a parsed invocation

use anyhow::{Context, Result};
use log::debug;

use crate::actions::ActionRegistry;
use crate::cli::Args;
use crate::validation::{FsProbe, PathProbe, Validator};

/// Validate `args` against the working directory and hand the result to the registry
pub async fn run_action(args: Args, registry: &ActionRegistry) -> Result<()> {
    run_action_with(args, registry, &FsProbe).await
}

pub async fn run_action_with<P>(args: Args, registry: &ActionRegistry, probe: &P) -> Result<()>
where
    P: PathProbe + ?Sized,
{
    let validator = Validator::new(registry, probe)
        .context("Failed to determine the current working directory")?;
    debug!("Resolving paths relative to {}", validator.base_dir().display());

    let config = validator.validate(&args).await?;
    registry.dispatch(config).await
}
