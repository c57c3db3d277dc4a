//! Typed model for `roster.toml`.
//!
//! Every key is optional; a missing file and an empty file both yield
//! [`Settings::default`].

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use crate::validate::{ConfigError, ConfigResult};

/// Members feed used when neither the config file nor the CLI names one.
pub const DEFAULT_SOURCE: &str =
    "https://geektrust.s3-ap-southeast-1.amazonaws.com/adminui-problem/members.json";

/// Rows per page when unset.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Which rows "select all" marks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectAllScope {
    /// Only the rows on the current page.
    #[default]
    Page,
    /// Every row matching the current search, across all pages.
    Filtered,
}

impl FromStr for SelectAllScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "page" => Ok(SelectAllScope::Page),
            "filtered" => Ok(SelectAllScope::Filtered),
            _ => Err(format!("unknown select-all scope: {} (expected page, filtered)", s)),
        }
    }
}

/// How many rows may be in edit mode at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditPolicy {
    /// Any number of rows may be editing simultaneously.
    #[default]
    Concurrent,
    /// Beginning an edit is refused while another row is editing.
    Exclusive,
}

impl FromStr for EditPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "concurrent" => Ok(EditPolicy::Concurrent),
            "exclusive" => Ok(EditPolicy::Exclusive),
            _ => Err(format!("unknown edit policy: {} (expected concurrent, exclusive)", s)),
        }
    }
}

/// Named TUI theme. Unset means auto-detect from the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeName {
    Dark,
    Light,
    HighContrast,
    NoColor,
}

impl FromStr for ThemeName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "dark" => Ok(ThemeName::Dark),
            "light" => Ok(ThemeName::Light),
            "high_contrast" => Ok(ThemeName::HighContrast),
            "no_color" => Ok(ThemeName::NoColor),
            _ => Err(format!(
                "unknown theme: {} (expected dark, light, high_contrast, no_color)",
                s
            )),
        }
    }
}

/// Contents of `roster.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// URL or file path of the JSON record feed.
    pub source: String,
    /// Rows per page.
    pub page_size: usize,
    pub select_all_scope: SelectAllScope,
    pub edit_policy: EditPolicy,
    pub theme: Option<ThemeName>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            select_all_scope: SelectAllScope::default(),
            edit_policy: EditPolicy::default(),
            theme: None,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse settings from a TOML string.
    pub fn parse_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_theme(mut self, theme: ThemeName) -> Self {
        self.theme = Some(theme);
        self
    }
}
