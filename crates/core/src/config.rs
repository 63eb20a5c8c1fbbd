//! Configuration loading utilities
//!
//! Settings are resolved in priority order:
//! 1. CLI arguments (highest priority)
//! 2. Environment variables
//! 3. Config file (searched in standard locations)
//! 4. Built-in defaults (lowest priority)

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::de::DeserializeOwned;

use crate::APP_NAME;

/// Where a configuration file was found
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// Path given via CLI flag or environment variable
    Explicit(PathBuf),
    /// Found in the current working directory
    CurrentDir(PathBuf),
    /// Found under the XDG config home (~/.config/hawaii-climate/)
    XdgConfig(PathBuf),
    /// Found under /etc/hawaii-climate/
    System(PathBuf),
    /// No file found, built-in defaults apply
    Defaults,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::Explicit(p)
            | ConfigSource::CurrentDir(p)
            | ConfigSource::XdgConfig(p)
            | ConfigSource::System(p) => Some(p.as_path()),
            ConfigSource::Defaults => None,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.path() {
            Some(p) => write!(f, "{}", p.display()),
            None => write!(f, "(defaults)"),
        }
    }
}

/// Find a configuration file in the standard locations
///
/// Search order:
/// 1. The file named by `env_var` (e.g. `CLIMATE_API_CONFIG`)
/// 2. `filename` in the current directory
/// 3. `$XDG_CONFIG_HOME/hawaii-climate/filename`, or `~/.config/hawaii-climate/filename`
/// 4. `/etc/hawaii-climate/filename`
pub fn find_config_file(env_var: &str, filename: &str) -> ConfigSource {
    let explicit = env::var(env_var).ok().map(PathBuf::from);
    let candidates = [
        explicit.map(ConfigSource::Explicit),
        Some(ConfigSource::CurrentDir(PathBuf::from(filename))),
        xdg_config_path(filename).map(ConfigSource::XdgConfig),
        Some(ConfigSource::System(
            PathBuf::from("/etc").join(APP_NAME).join(filename),
        )),
    ];

    candidates
        .into_iter()
        .flatten()
        .find(|source| source.path().is_some_and(Path::exists))
        .unwrap_or(ConfigSource::Defaults)
}

fn xdg_config_path(filename: &str) -> Option<PathBuf> {
    let base = match env::var("XDG_CONFIG_HOME") {
        Ok(xdg_config) => PathBuf::from(xdg_config),
        Err(_) => PathBuf::from(env::var("HOME").ok()?).join(".config"),
    };
    Some(base.join(APP_NAME).join(filename))
}

/// Load and parse a TOML configuration file
///
/// Returns `T::default()` when `source` is [`ConfigSource::Defaults`].
pub fn load_config<T: DeserializeOwned + Default>(source: &ConfigSource) -> anyhow::Result<T> {
    let Some(path) = source.path() else {
        return Ok(T::default());
    };

    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}
