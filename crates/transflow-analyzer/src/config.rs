//! Configuration loading for the analyzer.
//!
//! Configuration comes from an optional YAML file (`transflow-config.yaml`
//! in the working directory, or the path named by `TRANSFLOW_CONFIG`),
//! then environment variables override individual fields:
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `NATS_URL` | `bus.url` | `nats://localhost:4222` |
//! | `ANALYZER_CLIENT_ID` | `bus.client_id` | `transflow-analyzer` |
//! | `SUBSCRIPTIONS` | `bus.subscriptions` (comma-separated) | `>` |
//! | `TOPIC_ROOT` | `topics.root` | `sim` |
//! | `TOPIC_METRICS` | `topics.metrics` | `metrics` |
//! | `API_HOST` | `api.host` | `0.0.0.0` |
//! | `API_PORT` | `api.port` | `8080` |
//!
//! The merged result is validated before anything connects.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use transflow_api::ServerConfig;
use transflow_store::TopicLayout;
use transflow_store::topic::{DEFAULT_METRICS, DEFAULT_ROOT};

/// Default config file, relative to the working directory.
const DEFAULT_CONFIG_FILE: &str = "transflow-config.yaml";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        #[from]
        source: serde_yml::Error,
    },

    /// A field holds a value the analyzer cannot run with.
    #[error("invalid {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// Top-level analyzer configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AnalyzerConfig {
    /// Message bus connection and subscriptions.
    #[serde(default)]
    pub bus: BusConfig,

    /// Topic layout the dispatcher parses against.
    #[serde(default)]
    pub topics: TopicConfig,

    /// HTTP API bind address.
    #[serde(default)]
    pub api: ServerConfig,
}

/// NATS connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BusConfig {
    /// NATS server URL.
    #[serde(default = "default_nats_url")]
    pub url: String,

    /// Client name announced to the server.
    #[serde(default = "default_client_id")]
    pub client_id: String,

    /// Subject patterns to subscribe to, one consumer task each.
    #[serde(default = "default_subscriptions")]
    pub subscriptions: Vec<String>,
}

/// Literal segments of `<root>/<simulationId>/<metrics>/<domain>/<timeStep>`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TopicConfig {
    /// First topic segment.
    #[serde(default = "default_root")]
    pub root: String,

    /// Third topic segment.
    #[serde(default = "default_metrics")]
    pub metrics: String,
}

fn default_nats_url() -> String {
    String::from("nats://localhost:4222")
}

fn default_client_id() -> String {
    String::from("transflow-analyzer")
}

fn default_subscriptions() -> Vec<String> {
    vec![String::from(">")]
}

fn default_root() -> String {
    String::from(DEFAULT_ROOT)
}

fn default_metrics() -> String {
    String::from(DEFAULT_METRICS)
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            url: default_nats_url(),
            client_id: default_client_id(),
            subscriptions: default_subscriptions(),
        }
    }
}

impl Default for TopicConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            metrics: default_metrics(),
        }
    }
}

impl TopicConfig {
    /// The parser layout these segments describe.
    pub fn layout(&self) -> TopicLayout {
        TopicLayout::new(self.root.clone(), self.metrics.clone())
    }
}

impl AnalyzerConfig {
    /// Load configuration the way the service binary does.
    ///
    /// Reads `TRANSFLOW_CONFIG` if set (the file must then exist), else
    /// `transflow-config.yaml` if present, else starts from defaults.
    /// Environment overrides are applied and the result validated.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed, or if
    /// any merged value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var_os("TRANSFLOW_CONFIG") {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::from_file(path)?
                } else {
                    tracing::info!("config file not found, using defaults");
                    Self::default()
                }
            }
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a YAML file, without env overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, without env overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Override fields from variables visible through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `API_PORT` is not a port number.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup("NATS_URL") {
            self.bus.url = val;
        }
        if let Some(val) = lookup("ANALYZER_CLIENT_ID") {
            self.bus.client_id = val;
        }
        if let Some(val) = lookup("SUBSCRIPTIONS") {
            self.bus.subscriptions = val
                .split(',')
                .map(str::trim)
                .filter(|pattern| !pattern.is_empty())
                .map(str::to_owned)
                .collect();
        }
        if let Some(val) = lookup("TOPIC_ROOT") {
            self.topics.root = val;
        }
        if let Some(val) = lookup("TOPIC_METRICS") {
            self.topics.metrics = val;
        }
        if let Some(val) = lookup("API_HOST") {
            self.api.host = val;
        }
        if let Some(val) = lookup("API_PORT") {
            self.api.port = val.trim().parse().map_err(|e| ConfigError::Invalid {
                field: "api.port",
                reason: format!("{val:?} is not a port number: {e}"),
            })?;
        }
        Ok(())
    }

    /// Check every field the analyzer depends on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bus.url.trim().is_empty() {
            return Err(invalid("bus.url", "must not be empty"));
        }
        if self.bus.client_id.trim().is_empty() {
            return Err(invalid("bus.client_id", "must not be empty"));
        }
        if self.bus.subscriptions.is_empty() {
            return Err(invalid("bus.subscriptions", "at least one pattern is required"));
        }
        if self.bus.subscriptions.iter().any(|p| p.trim().is_empty()) {
            return Err(invalid("bus.subscriptions", "patterns must not be empty"));
        }
        validate_segment("topics.root", &self.topics.root)?;
        validate_segment("topics.metrics", &self.topics.metrics)?;
        if self.api.host.trim().is_empty() {
            return Err(invalid("api.host", "must not be empty"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_owned(),
    }
}

/// A topic segment must be non-empty and contain no separator.
fn validate_segment(field: &'static str, segment: &str) -> Result<(), ConfigError> {
    if segment.is_empty() {
        return Err(invalid(field, "must not be empty"));
    }
    if segment.contains('/') {
        return Err(invalid(field, "must be a single topic segment"));
    }
    Ok(())
}
