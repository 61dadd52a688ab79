//! Display module for terminal colour handling

pub mod colours;

pub use colours::ColourManager;
