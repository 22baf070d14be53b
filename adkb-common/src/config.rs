//! Configuration loading and database path resolution

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable consulted for the database location
pub const DATABASE_ENV_VAR: &str = "ADKB_DATABASE";

/// Default knowledge-base document location (relative to the working directory)
pub const DEFAULT_INPUT_PATH: &str = "knowledge_base/knowledge_base.json";

/// Optional TOML configuration file contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    /// SQLite database file to import into
    pub database_path: Option<PathBuf>,
    /// Knowledge-base JSON document to read
    pub input_path: Option<PathBuf>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging section of the TOML configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// tracing filter directive used when RUST_LOG is unset (e.g. "info", "adkb_import=debug")
    pub level: Option<String>,
}

impl TomlConfig {
    /// Load the config file from the platform location, or defaults if none exists
    ///
    /// A file that exists but fails to parse is an error; a missing file is not.
    pub fn load_default() -> Result<Self> {
        match locate_config_file() {
            Some(path) => load_toml_config(&path),
            None => Ok(Self::default()),
        }
    }
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}

/// Database path resolution, in priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_database_path(
    cli_arg: Option<&Path>,
    env_var_name: &str,
    toml_config: &TomlConfig,
) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(env_var_name) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = &toml_config.database_path {
        return path.clone();
    }

    default_database_path()
}

/// Find the config file for the platform, if any
fn locate_config_file() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("adkb").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/adkb/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// OS-dependent default database location
fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("adkb"))
        .unwrap_or_else(|| PathBuf::from("./adkb_data"))
        .join("knowledge_base.db")
}
