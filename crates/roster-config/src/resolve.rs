//! Configuration resolution and path discovery.
//!
//! Resolution order: CLI argument → environment variables → XDG paths → defaults.

use std::path::{Path, PathBuf};

use crate::settings::Settings;
use crate::validate::{ConfigError, ConfigResult};

/// Where the configuration file was found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly provided via CLI argument.
    CliArgument,

    /// Set via environment variable.
    Environment,

    /// Found in XDG config directory.
    XdgConfig,

    /// Using built-in defaults.
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::CliArgument => write!(f, "CLI argument"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::XdgConfig => write!(f, "XDG config"),
            ConfigSource::BuiltinDefault => write!(f, "builtin default"),
        }
    }
}

/// Environment variable names.
pub const ENV_CONFIG_PATH: &str = "ROSTER_CONFIG";
pub const ENV_CONFIG_DIR: &str = "ROSTER_CONFIG_DIR";

/// Standard config file name.
pub const CONFIG_FILENAME: &str = "roster.toml";

/// Application name for XDG directories.
const APP_NAME: &str = "roster";

/// Settings together with where they came from.
#[derive(Debug, Clone)]
pub struct LoadedSettings {
    pub settings: Settings,
    pub path: Option<PathBuf>,
    pub source: ConfigSource,
}

/// Resolve the config file path using the standard resolution order.
///
/// Resolution order:
/// 1. Explicit CLI path (if provided)
/// 2. `ROSTER_CONFIG` environment variable
/// 3. `ROSTER_CONFIG_DIR` environment variable + `roster.toml`
/// 4. XDG config directory (`~/.config/roster/roster.toml`)
/// 5. Built-in defaults (None)
///
/// A CLI path is returned even if it does not exist so the caller can report
/// it; the other candidates are skipped when absent.
pub fn resolve_config_path(cli_path: Option<&Path>) -> (Option<PathBuf>, ConfigSource) {
    // 1. CLI argument
    if let Some(path) = cli_path {
        return (Some(path.to_path_buf()), ConfigSource::CliArgument);
    }

    // 2. Environment variable (direct path)
    if let Ok(env_path) = std::env::var(ENV_CONFIG_PATH) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return (Some(path), ConfigSource::Environment);
        }
    }

    // 3. Environment variable (config dir)
    if let Ok(config_dir) = std::env::var(ENV_CONFIG_DIR) {
        let path = PathBuf::from(config_dir).join(CONFIG_FILENAME);
        if path.exists() {
            return (Some(path), ConfigSource::Environment);
        }
    }

    // 4. XDG config directory
    if let Some(path) = xdg_config_dir().map(|d| d.join(CONFIG_FILENAME)) {
        if path.exists() {
            return (Some(path), ConfigSource::XdgConfig);
        }
    }

    (None, ConfigSource::BuiltinDefault)
}

/// Resolve and read settings.
///
/// Values are not validated here; callers apply command-line overrides first
/// and then run `validate_settings` on the result.
pub fn load_settings(cli_path: Option<&Path>) -> ConfigResult<LoadedSettings> {
    let (path, source) = resolve_config_path(cli_path);

    let settings = match &path {
        Some(p) => {
            if !p.exists() {
                return Err(ConfigError::NotFound { path: p.clone() });
            }
            Settings::from_file(p)?
        }
        None => Settings::default(),
    };

    tracing::debug!(
        target: "roster.config",
        source = %source,
        path = ?path,
        page_size = settings.page_size,
        "settings loaded"
    );

    Ok(LoadedSettings {
        settings,
        path,
        source,
    })
}

/// Get the XDG config directory for roster.
pub fn xdg_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME))
}
