//! Service configuration.
//!
//! Layers, lowest to highest: built-in defaults, an optional YAML file, then
//! `BATCHSORT_*` environment variables with `__` between section and key
//! (`BATCHSORT_SERVER__PORT=9000`, `BATCHSORT_SORTER__CONCURRENT_ORDER=input`).
//!
//! ```yaml
//! server:
//!   host: 0.0.0.0
//!   port: 8000
//!   max_body_bytes: 4194304   # omit for no cap
//! logging:
//!   level: info
//!   json: false
//! metrics:
//!   enabled: true
//! sorter:
//!   concurrent_order: completion   # or "input"
//! ```

use std::net::SocketAddr;
use std::path::Path;

use batchsort_domain::CollectionOrder;
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

const ENV_PREFIX: &str = "BATCHSORT";

/// Levels accepted by `logging.level`, compared without regard to case.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    pub metrics: MetricsSettings,
    pub sorter: SorterSettings,
}

/// Listener settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Request body cap in bytes; `None` accepts bodies of any size.
    pub max_body_bytes: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            max_body_bytes: None,
        }
    }
}

impl ServerSettings {
    /// The socket address to bind, from `host` and `port`.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigLoadError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigLoadError::Invalid {
                message: format!("server.host is not an IP address: {}", self.host),
            })
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter when `RUST_LOG` is unset. One of [`LOG_LEVELS`].
    pub level: String,
    /// One JSON object per line instead of human-readable text.
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct MetricsSettings {
    /// Serve Prometheus text at `/metrics`.
    pub enabled: bool,
}

impl Default for MetricsSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SorterSettings {
    /// How `/process-concurrent` gathers results. `completion` returns arrays
    /// in the order their units finished, `input` in request order.
    pub concurrent_order: CollectionOrder,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] ConfigError),

    #[error("configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("invalid configuration: {message}")]
    Invalid { message: String },
}

impl ServerConfig {
    /// Defaults, then the YAML file at `path`, then the environment.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ConfigLoadError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        Self::build(Some(path))
    }

    /// Defaults, then the environment.
    pub fn from_env() -> Result<Self, ConfigLoadError> {
        Self::build(None)
    }

    fn build(file: Option<&Path>) -> Result<Self, ConfigLoadError> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);
        if let Some(path) = file {
            builder = builder.add_source(File::from(path).format(FileFormat::Yaml));
        }
        let environment = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__");

        let config: Self = builder.add_source(environment).build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the server could not start with.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        let invalid = |message: String| Err(ConfigLoadError::Invalid { message });

        if self.server.port == 0 {
            return invalid("server.port must be greater than 0".to_string());
        }
        self.server.bind_addr()?;
        if self.server.max_body_bytes == Some(0) {
            return invalid("server.max_body_bytes must be greater than 0 when set".to_string());
        }
        let level = self.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return invalid(format!(
                "logging.level must be one of {}, got {}",
                LOG_LEVELS.join("/"),
                self.logging.level
            ));
        }
        Ok(())
    }
}
