//! Configuration loading.
//!
//! Reads an optional TOML file, by default `<config dir>/zcalc/config.toml`.
//! Every key is optional:
//!
//! ```toml
//! degree_mode = true
//! scientific_mode = false
//! show_history = false
//! session_file = "/home/me/.local/state/zcalc/session.json"
//! ```

use crate::calculator::CalculatorState;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// User configuration for the terminal front end.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Start sessions with trig functions in degrees.
    pub degree_mode: bool,
    /// Start sessions with scientific keys shown.
    pub scientific_mode: bool,
    /// Print the history log after each result.
    pub show_history: bool,
    /// Where to keep the session state between runs.
    pub session_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            degree_mode: true,
            scientific_mode: false,
            show_history: false,
            session_file: None,
        }
    }
}

impl Config {
    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// State a fresh session starts in. Only the mode flags are taken from
    /// the configuration; `clear` still returns to the fixed initial state.
    pub fn initial_state(&self) -> CalculatorState {
        CalculatorState {
            is_degree_mode: self.degree_mode,
            is_scientific_mode: self.scientific_mode,
            ..CalculatorState::initial()
        }
    }
}

/// Default configuration file location.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("zcalc").join("config.toml"))
}

/// Load configuration.
///
/// An explicit `path` must exist. Without one, the default location is
/// tried and defaults are used when nothing is there.
pub fn load(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => {
                debug!("No config file found, using defaults");
                return Ok(Config::default());
            }
        },
    };

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config = Config::from_toml(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;

    info!("Loaded configuration from: {}", path.display());
    Ok(config)
}
