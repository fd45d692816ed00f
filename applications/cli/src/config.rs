/// CLI configuration
use cadenza_storage::StoreOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "cadenza.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_playback")]
    pub playback: PlaybackSettings,

    #[serde(default = "default_logging")]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_busy_timeout_secs")]
    pub busy_timeout_secs: u64,
}

impl StorageSettings {
    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            max_connections: self.max_connections,
            busy_timeout: Duration::from_secs(self.busy_timeout_secs),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaybackSettings {
    #[serde(default)]
    pub output: OutputKind,

    /// Hold the null output to real-time speed
    #[serde(default = "default_paced")]
    pub paced: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    /// Decode and discard
    #[default]
    Null,

    /// System default audio device
    Device,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    #[serde(default = "default_level")]
    pub level: String,
}

impl AppConfig {
    /// Load configuration from defaults, a TOML file and the environment
    ///
    /// `path` must exist when given; otherwise `cadenza.toml` is read if it is
    /// present. Variables such as `CADENZA_STORAGE__DATABASE_URL` override
    /// both.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("CADENZA")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.storage.database_url.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "storage.database_url must not be empty".to_string(),
            ));
        }

        if self.storage.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "storage.max_connections must be at least 1".to_string(),
            ));
        }

        if self.playback.output == OutputKind::Device && !cfg!(feature = "device-output") {
            return Err(ConfigError::Invalid(
                "playback.output = \"device\" needs a build with the device-output feature"
                    .to_string(),
            ));
        }

        Ok(())
    }

    /// Filter directive used when `RUST_LOG` is unset
    pub fn log_directive(&self) -> String {
        format!("{},sqlx=warn", self.logging.level)
    }
}

// Default values
fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
        max_connections: default_max_connections(),
        busy_timeout_secs: default_busy_timeout_secs(),
    }
}

fn default_database_url() -> String {
    "sqlite://cadenza.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_busy_timeout_secs() -> u64 {
    30
}

fn default_playback() -> PlaybackSettings {
    PlaybackSettings {
        output: OutputKind::default(),
        paced: default_paced(),
    }
}

fn default_paced() -> bool {
    true
}

fn default_logging() -> LoggingSettings {
    LoggingSettings {
        level: default_level(),
    }
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: default_storage(),
            playback: default_playback(),
            logging: default_logging(),
        }
    }
}
