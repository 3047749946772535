//! Configuration loading and root folder resolution
//!
//! Bootstrap settings come from a small TOML file. Every field has a
//! built-in default, and a missing file is not an error.
//!
//! # Priority
//!
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables (`MINIRIG_ROOT_FOLDER`, `MINIRIG_PORT`, `MINIRIG_CATALOG`)
//! 3. TOML configuration file
//! 4. Built-in defaults (OS-dependent root folder)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ROOT_FOLDER_ENV: &str = "MINIRIG_ROOT_FOLDER";
pub const PORT_ENV: &str = "MINIRIG_PORT";
pub const CATALOG_ENV: &str = "MINIRIG_CATALOG";

pub const DEFAULT_PORT: u16 = 5750;
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
/// Database file name inside the root folder
pub const DATABASE_FILE: &str = "minirig.db";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Address the HTTP server binds to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Data folder holding the database (optional)
    #[serde(default)]
    pub root_folder: Option<PathBuf>,

    /// JSON catalog file; the built-in seed catalog is used when unset
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// SQLite database file, relative paths resolve against the root folder
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind_address: default_bind_address(),
            root_folder: None,
            catalog_path: None,
            database_path: None,
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_bind_address() -> String {
    DEFAULT_BIND_ADDRESS.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Read the TOML bootstrap file, `None` when it does not exist.
///
/// Does not log, so it can run before the tracing subscriber is installed.
pub fn read_toml_config(path: &Path) -> Result<Option<TomlConfig>> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(Error::Io(e)),
    };

    toml::from_str(&contents)
        .map(Some)
        .map_err(|e| Error::Config(format!("Failed to parse {:?}: {}", path, e)))
}

/// Platform config file location (`<config dir>/minirig/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("minirig").join("config.toml"))
}

/// Get OS-dependent default root folder path
pub fn get_default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/minirig
        dirs::data_local_dir()
            .map(|d| d.join("minirig"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/minirig"))
    } else if cfg!(target_os = "macos") {
        // ~/Library/Application Support/minirig
        dirs::data_dir()
            .map(|d| d.join("minirig"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/minirig"))
    } else if cfg!(target_os = "windows") {
        // %LOCALAPPDATA%\minirig
        dirs::data_local_dir()
            .map(|d| d.join("minirig"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\minirig"))
    } else {
        PathBuf::from("./minirig_data")
    }
}

/// Non-empty environment variable
fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Root folder: CLI > `MINIRIG_ROOT_FOLDER` > TOML > OS default
pub fn resolve_root_folder(cli_arg: Option<&Path>, toml: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }
    if let Some(path) = env_value(ROOT_FOLDER_ENV) {
        return PathBuf::from(path);
    }
    if let Some(path) = &toml.root_folder {
        return path.clone();
    }
    get_default_root_folder()
}

/// Command-line configuration overrides
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub port: Option<u16>,
    pub root_folder: Option<PathBuf>,
    pub catalog_path: Option<PathBuf>,
    pub database_path: Option<PathBuf>,
}

/// Final configuration after applying every source
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub port: u16,
    pub bind_address: String,
    pub root_folder: PathBuf,
    pub catalog_path: Option<PathBuf>,
    pub database_path: PathBuf,
    pub logging: LoggingConfig,
}

impl ResolvedConfig {
    /// Merge CLI overrides, environment and TOML settings.
    ///
    /// Fails only when `MINIRIG_PORT` is set to something that is not a port.
    pub fn resolve(toml: TomlConfig, overrides: ConfigOverrides) -> Result<Self> {
        let root_folder = resolve_root_folder(overrides.root_folder.as_deref(), &toml);

        let env_port = env_value(PORT_ENV)
            .map(|raw| {
                raw.trim().parse::<u16>().map_err(|e| {
                    Error::Config(format!("Invalid {} value '{}': {}", PORT_ENV, raw, e))
                })
            })
            .transpose()?;
        let port = overrides.port.or(env_port).unwrap_or(toml.port);

        let catalog_path = overrides
            .catalog_path
            .or_else(|| env_value(CATALOG_ENV).map(PathBuf::from))
            .or(toml.catalog_path);

        let database_path = overrides
            .database_path
            .or(toml.database_path)
            .map(|p| if p.is_relative() { root_folder.join(p) } else { p })
            .unwrap_or_else(|| root_folder.join(DATABASE_FILE));

        Ok(Self {
            port,
            bind_address: toml.bind_address,
            root_folder,
            catalog_path,
            database_path,
            logging: toml.logging,
        })
    }
}
