//! Configuration loading and validation.
//!
//! - Schema and defaults in [`schema`]
//! - File discovery, environment overrides and validation in [`loader`]
//!
//! # Example
//!
//! ```
//! use recents::config::load_config_with_env;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join("config.yml");
//! fs::write(&path, "max_items: 5").unwrap();
//!
//! let env = [("RECENTS_DEBOUNCE_MS", "750")];
//! let config = load_config_with_env(Some(path.as_path()), env).unwrap();
//! assert_eq!(config.max_items, 5);
//! assert_eq!(config.debounce_ms, 750);
//! ```

pub mod loader;
pub mod schema;

pub use loader::{
    apply_env_overrides, load_config, load_config_file, load_config_with_env, parse_config,
    user_config_path, validate, ENV_DEBOUNCE_MS, ENV_DIR, ENV_MAX_ITEMS,
};
pub use schema::{default_storage_dir, RecentsConfig};
