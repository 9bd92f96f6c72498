//! Configuration for keyprompt.
//!
//! Loaded from `~/.keyprompt/config.toml`. Every field is optional:
//!
//! ```toml
//! # Prompt marker printed at the start of each line
//! prompt = "> "
//!
//! # History file name, looked up in ./, ../ and the executable directory
//! history_file = ".history"
//! history_limit = 100
//!
//! # Exit after this many seconds without a key press
//! idle_timeout_secs = 300
//!
//! # Log filter (overridden by KEYPROMPT_LOG) and optional log file
//! log_level = "info"
//! log_file = "/tmp/keyprompt.log"
//!
//! [aliases]
//! sws = "set workspace settings"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::history::{HISTORY_FILE, HISTORY_LIMIT};
use crate::ui::PROMPT;

/// Default idle timeout
pub const IDLE_TIMEOUT_SECS: u64 = 300;

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prompt marker
    pub prompt: String,
    /// History file name
    pub history_file: String,
    /// Maximum history entries
    pub history_limit: usize,
    /// Idle timeout in seconds
    pub idle_timeout_secs: u64,
    /// Log filter directive
    pub log_level: String,
    /// Append logs here instead of stderr
    pub log_file: Option<PathBuf>,
    /// Extra aliases registered at startup
    pub aliases: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: PROMPT.to_string(),
            history_file: HISTORY_FILE.to_string(),
            history_limit: HISTORY_LIMIT,
            idle_timeout_secs: IDLE_TIMEOUT_SECS,
            log_level: "info".to_string(),
            log_file: None,
            aliases: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Load configuration from the default path, falling back to defaults
    pub fn load() -> Self {
        Self::get_config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Load configuration from a file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|content| Self::from_toml(&content).ok())
            .unwrap_or_default()
    }

    /// Parse configuration text
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Get config file path
    fn get_config_path() -> Option<PathBuf> {
        home_dir().map(|home| home.join(".keyprompt").join("config.toml"))
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}

/// Get home directory
pub fn home_dir() -> Option<PathBuf> {
    std::env::var_os("USERPROFILE")
        .or_else(|| std::env::var_os("HOME"))
        .map(PathBuf::from)
}
