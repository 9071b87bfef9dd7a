use crate::checker::PositionMode;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const LOCAL_CONFIG_FILE: &str = ".grammarguard.toml";

/// Language used for labels and messages in human-readable output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ru,
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" => Ok(Language::En),
            "ru" => Ok(Language::Ru),
            _ => Err(format!("Unknown language: {} (expected en or ru)", s)),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::En => write!(f, "en"),
            Language::Ru => write!(f, "ru"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    pub language: Language,
    pub auto_apply_corrections: bool,
    pub position_mode: PositionMode,
    pub max_file_size: u64,
    pub history_enabled: bool,
    pub max_history_entries: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: Language::default(),
            auto_apply_corrections: false,
            position_mode: PositionMode::default(),
            max_file_size: 10 * 1024 * 1024,
            history_enabled: true,
            max_history_entries: 10,
        }
    }
}

/// One source of settings: a config file or the command line. Unset keys
/// leave the value from the layers below.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConfigLayer {
    pub language: Option<Language>,
    pub auto_apply_corrections: Option<bool>,
    pub position_mode: Option<PositionMode>,
    pub max_file_size: Option<u64>,
    pub history_enabled: Option<bool>,
    pub max_history_entries: Option<usize>,
}

impl ConfigLayer {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let layer = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(layer)
    }
}

impl Config {
    /// Load configuration with priority: CLI args > local config > global config > defaults
    pub fn load(cli: ConfigLayer) -> Result<Self> {
        let mut config = Self::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                config = config.merge(ConfigLayer::from_file(&global_path)?);
            }
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            config = config.merge(ConfigLayer::from_file(&local_path)?);
        }

        Ok(config.merge(cli))
    }

    fn merge(mut self, layer: ConfigLayer) -> Self {
        if let Some(language) = layer.language {
            self.language = language;
        }
        if let Some(auto) = layer.auto_apply_corrections {
            self.auto_apply_corrections = auto;
        }
        if let Some(mode) = layer.position_mode {
            self.position_mode = mode;
        }
        if let Some(size) = layer.max_file_size {
            self.max_file_size = size;
        }
        if let Some(enabled) = layer.history_enabled {
            self.history_enabled = enabled;
        }
        if let Some(max) = layer.max_history_entries {
            self.max_history_entries = max;
        }
        self
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "grammarguard").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "grammarguard").map(|dirs| dirs.data_dir().to_path_buf())
    }
}
