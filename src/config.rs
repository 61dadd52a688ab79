use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;
use anyhow::{Context, Result};
use toml::Value;

/// Environment variable naming an explicit configuration file
pub const CONFIG_ENV: &str = "SPECTACLE_CONFIG";

/// Section every lookup falls back to
pub const BASE_SECTION: &str = "base";

/// Configuration storage - section_name -> key -> value
pub type Configuration = HashMap<String, HashMap<String, String>>;

/// Ambient settings (logging, colour) read from an optional TOML file.
///
/// Flag defaults are deliberately not configurable here.
pub struct ConfigManager {
    config: Configuration,
    config_file_path: Option<PathBuf>,
}

impl ConfigManager {
    pub fn from_config(config: Configuration) -> Self {
        Self { config, config_file_path: None }
    }

    /// Load the configuration for this process.
    ///
    /// `$SPECTACLE_CONFIG`, when set, names the one file to use and must exist.
    /// Otherwise the first existing file among the XDG config dir, `~/.spectacle.toml`
    /// and `./.spectacle.toml` wins, and finding none yields an empty configuration.
    pub fn load() -> Result<Self> {
        let explicit = env::var_os(CONFIG_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        Self::discover(explicit, default_config_paths())
    }

    fn discover(explicit: Option<PathBuf>, candidates: Vec<PathBuf>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_file(path)
                .with_context(|| format!("{} names a configuration file that cannot be loaded", CONFIG_ENV));
        }

        match candidates.into_iter().find(|path| path.is_file()) {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::from_config(Configuration::new())),
        }
    }

    pub fn load_from_file(path: PathBuf) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = parse_toml_config(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(Self { config, config_file_path: Some(path) })
    }

    pub fn config_file_path(&self) -> Option<&PathBuf> {
        self.config_file_path.as_ref()
    }

    /// Value from `section`, falling back to `[base]`
    pub fn get_value(&self, section: &str, key: &str) -> Option<&String> {
        self.config
            .get(section)
            .and_then(|s| s.get(key))
            .or_else(|| self.config.get(BASE_SECTION).and_then(|s| s.get(key)))
    }

    pub fn get_bool(&self, section: &str, key: &str) -> Result<Option<bool>> {
        match self.get_value(section, key) {
            Some(value) => match value.to_lowercase().as_str() {
                "true" => Ok(Some(true)),
                "false" => Ok(Some(false)),
                _ => Err(anyhow::anyhow!("Invalid boolean value for {}.{}: {}", section, key, value)),
            },
            None => Ok(None),
        }
    }

    pub fn get_log_level(&self, section: &str, key: &str) -> Result<Option<log::LevelFilter>> {
        match self.get_value(section, key) {
            Some(value) => Ok(Some(crate::logging::parse_log_level(value)?)),
            None => Ok(None),
        }
    }

    pub fn get_path(&self, section: &str, key: &str) -> Option<PathBuf> {
        self.get_value(section, key).map(PathBuf::from)
    }
}

/// Fallback configuration files in order of precedence
fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("spectacle").join("config.toml"));
    }

    if let Some(home_dir) = dirs::home_dir() {
        paths.push(home_dir.join(".spectacle.toml"));
    }

    paths.push(PathBuf::from("./.spectacle.toml"));
    paths
}

/// Parse TOML content to string-based configuration.
///
/// Top-level scalars land in `[base]`; nested tables are flattened to dotted section names.
fn parse_toml_config(content: &str) -> Result<Configuration> {
    let table: toml::Table = content.parse().context("Failed to parse TOML content")?;

    let mut config = Configuration::new();
    flatten_toml_table(&table, String::new(), &mut config);
    Ok(config)
}

fn flatten_toml_table(table: &toml::Table, prefix: String, config: &mut Configuration) {
    let section_name = if prefix.is_empty() { BASE_SECTION.to_string() } else { prefix.clone() };

    for (key, value) in table {
        match value {
            Value::Table(subtable) => {
                let nested = if prefix.is_empty() { key.clone() } else { format!("{}.{}", prefix, key) };
                flatten_toml_table(subtable, nested, config);
            }
            _ => {
                config
                    .entry(section_name.clone())
                    .or_default()
                    .insert(key.clone(), toml_value_to_string(value));
            }
        }
    }
}

fn toml_value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Integer(i) => i.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Boolean(b) => b.to_string(),
        other => other.to_string(),
    }
}
