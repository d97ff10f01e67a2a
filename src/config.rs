//! User configuration, loaded from `config.toml`

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::round::{HoleCount, RoundConfig, DEFAULT_PLAYERS};
use crate::storage::DEFAULT_SNAPSHOT_KEY;

pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub setup: SetupConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub display: DisplayConfig,
}

/// Choices pre-filled on the setup screen.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SetupConfig {
    pub players: u32,
    pub holes: u32,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            players: DEFAULT_PLAYERS,
            holes: HoleCount::default().count(),
        }
    }
}

impl SetupConfig {
    /// The setup choices, pulled into the supported range.
    pub fn round_config(&self) -> RoundConfig {
        RoundConfig::new(self.players, HoleCount::nearest(self.holes))
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Overrides the OS data directory
    pub data_dir: Option<PathBuf>,
    /// Row key for the saved round
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            key: DEFAULT_SNAPSHOT_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` wins over it
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Ask the platform to keep the display on during a round
    pub keep_awake: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { keep_awake: true }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                write!(f, "failed to parse {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Where the running configuration came from.
#[derive(Debug)]
pub enum ConfigSource {
    File(PathBuf),
    Missing(PathBuf),
    NoConfigDir,
    /// The file exists but could not be used; defaults apply
    Invalid(ConfigError),
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "loaded {}", path.display()),
            ConfigSource::Missing(path) => write!(f, "{} not found; using defaults", path.display()),
            ConfigSource::NoConfigDir => write!(f, "no config directory; using defaults"),
            ConfigSource::Invalid(e) => write!(f, "{}; using defaults", e),
        }
    }
}

impl Config {
    /// Parse a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from the default location, falling back to defaults.
    pub fn load_default() -> (Self, ConfigSource) {
        match Self::default_path() {
            Some(path) => Self::load_or_default(&path),
            None => (Config::default(), ConfigSource::NoConfigDir),
        }
    }

    /// Load `path` if it exists and parses; defaults otherwise.
    ///
    /// The source is returned for logging once the subscriber is up.
    pub fn load_or_default(path: &Path) -> (Self, ConfigSource) {
        if !path.exists() {
            return (Config::default(), ConfigSource::Missing(path.to_path_buf()));
        }
        match Config::load(path) {
            Ok(cfg) => (cfg, ConfigSource::File(path.to_path_buf())),
            Err(e) => (Config::default(), ConfigSource::Invalid(e)),
        }
    }

    /// `config.toml` in the OS config directory
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "fairway").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}
