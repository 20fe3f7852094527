//! Configuration management with TOML, environment variables, and CLI overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Delay after a variant selection before dependent reads, in milliseconds
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,

    /// Bound on the wait for the page-embedded JSON globals, in milliseconds
    #[serde(default = "default_globals_timeout_ms")]
    pub globals_timeout_ms: u64,

    /// Bound on waits for interactive elements, in milliseconds
    #[serde(default = "default_selector_timeout_ms")]
    pub selector_timeout_ms: u64,

    /// Browser viewport width in pixels
    #[serde(default = "default_window_width")]
    pub window_width: u32,

    /// Browser viewport height in pixels
    #[serde(default = "default_window_height")]
    pub window_height: u32,

    /// Path to a Chrome/Chromium executable (None for auto-detection)
    #[serde(default)]
    pub chrome_path: Option<String>,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Directory for captured page screenshots (None disables persistence)
    #[serde(default)]
    pub screenshot_dir: Option<PathBuf>,
}

fn default_settle_ms() -> u64 {
    500
}

fn default_globals_timeout_ms() -> u64 {
    10_000
}

fn default_selector_timeout_ms() -> u64 {
    5_000
}

fn default_window_width() -> u32 {
    1280
}

fn default_window_height() -> u32 {
    800
}

impl Default for Config {
    fn default() -> Self {
        Self {
            settle_ms: default_settle_ms(),
            globals_timeout_ms: default_globals_timeout_ms(),
            selector_timeout_ms: default_selector_timeout_ms(),
            window_width: default_window_width(),
            window_height: default_window_height(),
            chrome_path: None,
            format: OutputFormat::Table,
            screenshot_dir: None,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("cirque-crawler").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        // 4. Return default config
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(chrome) = std::env::var("CIRQUE_CHROME") {
            self.chrome_path = Some(chrome);
        }

        if let Ok(settle) = std::env::var("CIRQUE_SETTLE_MS") {
            if let Ok(ms) = settle.parse() {
                self.settle_ms = ms;
            }
        }

        self
    }

    /// Settle delay after a variant selection.
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    /// Bound on the page-global waits.
    pub fn globals_timeout(&self) -> Duration {
        Duration::from_millis(self.globals_timeout_ms)
    }

    /// Bound on interactive-element waits.
    pub fn selector_timeout(&self) -> Duration {
        Duration::from_millis(self.selector_timeout_ms)
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}
