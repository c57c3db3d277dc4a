//! Roster configuration loading and validation.
//!
//! This crate provides:
//! - The typed `roster.toml` settings model
//! - Config resolution (CLI → env → XDG → defaults)
//! - Semantic validation of loaded values

pub mod resolve;
pub mod settings;
pub mod validate;

pub use resolve::{load_settings, resolve_config_path, ConfigSource, LoadedSettings};
pub use settings::{
    EditPolicy, SelectAllScope, Settings, ThemeName, DEFAULT_PAGE_SIZE, DEFAULT_SOURCE,
};
pub use validate::{validate_settings, ConfigError, ConfigResult, MAX_PAGE_SIZE};
