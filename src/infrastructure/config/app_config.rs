//! Application configuration.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use super::args::CliArgs;

const APP_NAME: &str = "photofeed";
const APP_QUALIFIER: &str = "com";
const APP_ORGANIZATION: &str = "tecknian";

const DEFAULT_BASE_URL: &str = "https://ile-api.essentialdeveloper.com/essential-feed/v1";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Converts to tracing level.
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Errors raised while loading the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file could not be parsed as TOML.
    #[error("invalid config file {path}: {source}")]
    Parse {
        /// Path that failed.
        path: PathBuf,
        /// Underlying parse error.
        source: toml::de::Error,
    },
}

/// HTTP client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Image pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Maximum blobs held in the memory cache.
    #[serde(default = "default_memory_cache_size")]
    pub memory_cache_size: usize,

    /// Maximum disk usage for image blobs, in bytes.
    #[serde(default = "default_disk_cache_size")]
    pub disk_cache_size: u64,

    /// Maximum concurrent downloads.
    #[serde(default = "default_max_concurrent_downloads")]
    pub max_concurrent_downloads: usize,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            memory_cache_size: default_memory_cache_size(),
            disk_cache_size: default_disk_cache_size(),
            max_concurrent_downloads: default_max_concurrent_downloads(),
        }
    }
}

/// Application configuration, from file plus CLI overrides.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Base URL of the feed service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Cache directory override.
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,

    /// HTTP client settings.
    #[serde(default)]
    pub http: HttpConfig,

    /// Image pipeline settings.
    #[serde(default)]
    pub image: ImageConfig,
}

impl AppConfig {
    /// Loads the config file at `path`, or defaults when it does not exist.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed.
    pub fn load(path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.or_else(Self::default_config_path);
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        toml::from_str(&contents).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(config) = &args.config {
            self.config = Some(config.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(base_url) = &args.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(cache_dir) = &args.cache_dir {
            self.cache_dir = Some(cache_dir.clone());
        }
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default config file path.
    #[must_use]
    pub fn default_config_path() -> Option<PathBuf> {
        Self::default_config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("photofeed.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }

    /// Returns the cache directory to use, honoring the override.
    #[must_use]
    pub fn effective_cache_dir(&self) -> PathBuf {
        self.cache_dir.clone().unwrap_or_else(|| {
            ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME).map_or_else(
                || std::env::temp_dir().join(APP_NAME).join("cache"),
                |dirs| dirs.cache_dir().to_path_buf(),
            )
        })
    }

    /// Directory for cached image blobs.
    #[must_use]
    pub fn image_cache_dir(&self) -> PathBuf {
        self.effective_cache_dir().join("images")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            base_url: default_base_url(),
            cache_dir: None,
            http: HttpConfig::default(),
            image: ImageConfig::default(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_memory_cache_size() -> usize {
    crate::infrastructure::image::DEFAULT_MEMORY_CACHE_SIZE
}

fn default_disk_cache_size() -> u64 {
    crate::infrastructure::image::DEFAULT_MAX_DISK_CACHE_SIZE
}

fn default_max_concurrent_downloads() -> usize {
    4
}
