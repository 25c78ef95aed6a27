use crate::config::types::Config;
use crate::config::validation::validate;
use crate::config::{CONFIG_PATH_ENV, DEFAULT_CONFIG_FILE};
use crate::ConfigError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use crowl::config::load_config;
///
/// let config = load_config(Path::new("crowl.toml")).unwrap();
/// println!("Report: {}", config.output.report_path);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    // Read the configuration file
    let content = std::fs::read_to_string(path)?;

    // Parse TOML
    let config: Config = toml::from_str(&content)?;

    // Validate the configuration
    validate(&config)?;

    Ok(config)
}

/// Loads the configuration file if it exists, falling back to defaults
///
/// Only a missing file falls back. A file that exists but cannot be read,
/// parsed, or validated is still an error.
pub fn load_config_or_default(path: &Path) -> Result<Config, ConfigError> {
    match load_config(path) {
        Ok(config) => Ok(config),
        Err(ConfigError::Io(e)) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Ok(Config::default())
        }
        Err(e) => Err(e),
    }
}

/// Resolves the config file path from `CROWL_CONFIG`, or `crowl.toml`
pub fn config_path_from_env() -> PathBuf {
    std::env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}
