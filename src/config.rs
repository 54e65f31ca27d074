use crate::api::DEFAULT_API_URL;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

pub const ACCESS_KEY_VAR: &str = "UNSPLASH_ACCESS_KEY";
pub const API_URL_VAR: &str = "UNSPLASH_API_URL";
const CONFIG_FILE: &str = "config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    pub fn user_message(&self) -> String {
        match self {
            ConfigError::Io { path, .. } => {
                format!("Cannot read configuration file {}", path.display())
            }
            ConfigError::Parse { path, source } => format!(
                "Configuration file {} is not valid JSON ({})",
                path.display(),
                source
            ),
        }
    }
}

/// On-disk configuration. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub access_key: Option<String>,
    pub api_url: Option<String>,
}

/// Values given on the command line. Highest precedence.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub access_key: Option<String>,
    pub api_url: Option<String>,
}

/// Resolved runtime configuration. Read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub access_key: String,
    pub api_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            access_key: String::new(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl Config {
    /// Load from flags, environment, then the config file in the platform
    /// config directory.
    pub fn load(overrides: Overrides) -> Result<Self, ConfigError> {
        let file = match default_path() {
            Some(path) => load_file(&path)?,
            None => {
                warn!("Could not determine config directory");
                None
            }
        };
        Ok(Self::resolve(overrides, |name| std::env::var(name).ok(), file))
    }

    /// Merge the sources. Blank values count as unset.
    pub fn resolve(
        overrides: Overrides,
        env: impl Fn(&str) -> Option<String>,
        file: Option<FileConfig>,
    ) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Config::default();

        let access_key = first_set([overrides.access_key, env(ACCESS_KEY_VAR), file.access_key])
            .unwrap_or(defaults.access_key);
        let api_url = first_set([overrides.api_url, env(API_URL_VAR), file.api_url])
            .unwrap_or(defaults.api_url);

        if access_key.is_empty() {
            warn!("No access key set; pass --access-key or set {}", ACCESS_KEY_VAR);
        }
        Self { access_key, api_url }
    }
}

fn first_set<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}

pub fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "unsplash", "wallpaper-explorer")
}

pub fn default_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// Read a config file. A missing file is not an error.
pub fn load_file(path: &Path) -> Result<Option<FileConfig>, ConfigError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No config file");
            return Ok(None);
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let parsed = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(parsed))
}
