//! Configuration file discovery and loading.
//!
//! Resolution order (later overrides earlier):
//! 1. Built-in defaults
//! 2. Config file: `--config <path>` if given, else `~/.recents/config.yml`
//! 3. Environment: `RECENTS_DIR`, `RECENTS_MAX_ITEMS`, `RECENTS_DEBOUNCE_MS`

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::schema::RecentsConfig;
use crate::error::{RecentsError, Result};

/// Environment variable overriding the storage directory.
pub const ENV_DIR: &str = "RECENTS_DIR";

/// Environment variable overriding the history capacity.
pub const ENV_MAX_ITEMS: &str = "RECENTS_MAX_ITEMS";

/// Environment variable overriding the debounce quiet period.
pub const ENV_DEBOUNCE_MS: &str = "RECENTS_DEBOUNCE_MS";

/// Find the user's config at ~/.recents/config.yml.
pub fn user_config_path() -> Option<PathBuf> {
    let path = dirs::home_dir()?.join(".recents").join("config.yml");
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

/// Load and parse a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<RecentsConfig> {
    if !path.exists() {
        return Err(RecentsError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    parse_config(&content, path)
}

/// Parse config YAML. An empty document yields the defaults.
pub fn parse_config(content: &str, path: &Path) -> Result<RecentsConfig> {
    if content.trim().is_empty() {
        return Ok(RecentsConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| RecentsError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Apply environment overrides from `vars`.
pub fn apply_env_overrides<I, K, V>(config: &mut RecentsConfig, vars: I) -> Result<()>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    for (key, value) in vars {
        let value = value.as_ref();
        match key.as_ref() {
            ENV_DIR if !value.is_empty() => {
                config.storage_dir = Some(PathBuf::from(value));
            }
            ENV_MAX_ITEMS => {
                config.max_items = parse_env(ENV_MAX_ITEMS, value)?;
            }
            ENV_DEBOUNCE_MS => {
                config.debounce_ms = parse_env(ENV_DEBOUNCE_MS, value)?;
            }
            _ => {}
        }
    }
    Ok(())
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| RecentsError::ConfigValidationError {
            message: format!("{} must be a non-negative integer, got {:?}", name, value),
        })
}

/// Check config values.
pub fn validate(config: &RecentsConfig) -> Result<()> {
    if config.max_items == 0 {
        return Err(RecentsError::ConfigValidationError {
            message: "max_items must be at least 1".to_string(),
        });
    }
    Ok(())
}

/// Load the full configuration: file, then environment, then validation.
///
/// An explicit `path` must exist; the default user config is optional.
pub fn load_config(path: Option<&Path>) -> Result<RecentsConfig> {
    load_config_with_env(path, std::env::vars())
}

/// Like [`load_config`] with an explicit environment.
pub fn load_config_with_env<I, K, V>(path: Option<&Path>, vars: I) -> Result<RecentsConfig>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut config = match path {
        Some(p) => load_config_file(p)?,
        None => match user_config_path() {
            Some(p) => load_config_file(&p)?,
            None => RecentsConfig::default(),
        },
    };

    apply_env_overrides(&mut config, vars)?;
    validate(&config)?;

    debug!("Resolved config: {:?}", config);
    Ok(config)
}
