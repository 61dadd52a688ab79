//! Application initialization and configuration

use anyhow::Result;
use log::LevelFilter;
use std::env;
use std::str::FromStr;

use crate::{config, display, logging};

pub fn load_configuration() -> Result<config::ConfigManager> {
    config::ConfigManager::load()
}

/// Build the logging setup.
///
/// Console level precedence: `SPECTACLE_LOG` > `console-level` in the config file > warn.
pub fn configure_logging(config: &config::ConfigManager) -> Result<logging::LogConfig> {
    let env_level = env::var(logging::LOG_LEVEL_ENV).ok();
    configure_logging_with(config, env_level.as_deref())
}

pub(crate) fn configure_logging_with(
    config: &config::ConfigManager,
    env_level: Option<&str>,
) -> Result<logging::LogConfig> {
    let console_level = match env_level {
        Some(level) => logging::parse_log_level(level)?,
        None => config
            .get_log_level("logging", "console-level")?
            .unwrap_or(LevelFilter::Warn),
    };

    let format = match config.get_value("logging", "log-format") {
        Some(format) => logging::LogFormat::from_str(format).map_err(|e| anyhow::anyhow!(e))?,
        None => logging::LogFormat::Text,
    };

    let file_level = config.get_log_level("logging", "file-log-level")?;
    let (destination, file_level) = match config.get_path("logging", "log-file") {
        Some(path) => {
            (logging::LogDestination::Both(path), Some(file_level.unwrap_or(console_level)))
        }
        None if file_level.is_some() => {
            return Err(anyhow::anyhow!("file-log-level requires log-file to be configured"));
        }
        None => (logging::LogDestination::Console, None),
    };

    Ok(logging::LogConfig { console_level, file_level, format, destination })
}

pub fn create_colour_manager(config: &config::ConfigManager) -> display::ColourManager {
    let preference = config.get_bool("display", "color").ok().flatten();
    display::ColourManager::from_environment(preference)
}
