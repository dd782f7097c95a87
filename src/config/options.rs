// src/config/options.rs
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::consts::*;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("invalid config {}: {source}", .path.display())]
    Toml { path: PathBuf, source: toml::de::Error },
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppOptions {
    pub source: SourceOptions,
    pub render: RenderOptions,
    pub fetch: FetchOptions,
}

impl AppOptions {
    /// Load options from a TOML file. Missing sections fall back to defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_toml(&text)
            .map_err(|source| ConfigError::Toml { path: path.to_path_buf(), source })
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Explicit path, else `sheet_tabs.toml` in the working dir if present,
    /// else defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None if Path::new(CONFIG_FILE).is_file() => Self::load(Path::new(CONFIG_FILE)),
            None => Ok(Self::default()),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    /// One plain table
    #[default]
    Table,
    /// One tab per distinct first-column value
    Tabs,
}

impl WidgetKind {
    pub fn label(&self) -> &'static str {
        match self { WidgetKind::Table => "Table", WidgetKind::Tabs => "Tabs" }
    }
}

/// Which sheet to fetch. Carries no meaning past the fetcher.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SourceOptions {
    /// Publish-to-web id (`2PACX-…`) or a raw file id
    pub sheet_id: String,
    /// Optional sheet/tab id inside the spreadsheet
    pub gid: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub widget: WidgetKind,
    /// Emit only the widget markup, without the page wrapper
    pub fragment: bool,
    pub title: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            widget: WidgetKind::Table,
            fragment: false,
            title: s!(DEFAULT_TITLE),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FetchOptions {
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Save fetched CSV and fall back to it when every URL fails
    pub use_cache: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout_secs: FETCH_TIMEOUT_SECS,
            user_agent: s!(USER_AGENT),
            use_cache: true,
        }
    }
}
