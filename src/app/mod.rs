//! Application orchestration module

pub mod execution;
pub mod initialization;

pub use execution::{run_action, run_action_with};
pub use initialization::{configure_logging, create_colour_manager, load_configuration};
