// src/config.rs
//! Persisted configuration for typofix (API key and model).

#![deny(missing_docs)]

use crate::error::TypofixResult;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path, path::PathBuf};
use tracing::{debug, warn};

/// Models known to work well with the bundled prompts. The first one is the default.
pub const RECOMMENDED_MODELS: &[&str] = &["gpt-4o-mini", "gpt-4o", "gpt-4.1-mini", "gpt-4.1"];

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "TYPOFIX_CONFIG";

/// Config struct for typofix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API key for the hosted model, if configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Model name sent with every request.
    pub model: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: RECOMMENDED_MODELS[0].into(),
        }
    }
}

impl Config {
    /// Location of the config file: `$TYPOFIX_CONFIG`, else `<config dir>/typofix/config.toml`.
    pub fn path() -> PathBuf {
        if let Some(p) = env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
            return PathBuf::from(p);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("typofix")
            .join("config.toml")
    }

    /// Load the config from its well-known location. Never fails.
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    /// Load `path`. Missing or unreadable files yield defaults, and empty
    /// values are replaced by their defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Self::default();
        }
        let parsed = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))
            .and_then(|s| toml::from_str::<Config>(&s).map_err(Into::into));
        let mut cfg = match parsed {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!(path = %path.display(), "ignoring unusable config file: {e:#}");
                return Self::default();
            }
        };
        if cfg.api_key.as_deref().is_some_and(|k| k.trim().is_empty()) {
            cfg.api_key = None;
        }
        if cfg.model.trim().is_empty() {
            cfg.model = Config::default().model;
        }
        debug!(path = %path.display(), model = %cfg.model, "loaded config");
        cfg
    }

    /// Write the config to its well-known location and return that path.
    pub fn save(&self) -> TypofixResult<PathBuf> {
        let path = Self::path();
        self.save_to(&path)?;
        Ok(path)
    }

    /// Write the config to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> TypofixResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let s = toml::to_string_pretty(self)?;
        write_private(path, &s).with_context(|| format!("writing {}", path.display()))?;
        debug!(path = %path.display(), "saved config");
        Ok(())
    }

    /// The API key, if one is set.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }

    /// The API key for display: eight asterisks and its last four characters.
    pub fn masked_api_key(&self) -> String {
        match self.api_key() {
            Some(key) => {
                let tail: String = {
                    let chars: Vec<char> = key.chars().collect();
                    chars[chars.len().saturating_sub(4)..].iter().collect()
                };
                format!("{}{}", "*".repeat(8), tail)
            }
            None => "Not set".into(),
        }
    }
}

/// Write `contents` readable by the owner only; the file holds the API key.
#[cfg(unix)]
fn write_private(path: &Path, contents: &str) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // `mode` only applies on creation.
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    file.write_all(contents.as_bytes())
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &str) -> std::io::Result<()> {
    fs::write(path, contents)
}

/// True if `model` is one of [`RECOMMENDED_MODELS`].
pub fn is_recommended_model(model: &str) -> bool {
    RECOMMENDED_MODELS.contains(&model)
}

/// The configured API key.
pub fn get_api_key() -> Option<String> {
    Config::load().api_key
}

/// The configured model.
pub fn get_model() -> String {
    Config::load().model
}
