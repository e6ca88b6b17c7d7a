use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::resolution::{LookupBackend, ResolutionConfig};

pub const DEFAULT_CONFIG_FILE: &str = "revdns.toml";

/// Main configuration structure for revdns
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Input files, worker count, backend and timeouts
    #[serde(default)]
    pub resolution: ResolutionConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. revdns.toml in current directory
    /// 3. Default configuration
    ///
    /// Command-line overrides are applied last.
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(DEFAULT_CONFIG_FILE).exists() {
            Self::from_file(DEFAULT_CONFIG_FILE)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(ip_file) = overrides.ip_file {
            self.resolution.ip_file = ip_file;
        }
        if let Some(resolver_file) = overrides.resolver_file {
            self.resolution.resolver_file = resolver_file;
        }
        if let Some(threads) = overrides.threads {
            self.resolution.threads = threads;
        }
        if let Some(backend) = overrides.backend {
            self.resolution.backend = backend;
        }
        if let Some(ms) = overrides.idle_timeout_ms {
            self.resolution.idle_timeout_ms = ms;
        }
        if let Some(ms) = overrides.lookup_timeout_ms {
            self.resolution.lookup_timeout_ms = ms;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolution.threads == 0 {
            return Err(ConfigError::Validation(
                "Thread count must be a positive integer".to_string(),
            ));
        }

        if self.resolution.idle_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Idle timeout cannot be 0".to_string(),
            ));
        }

        if self.resolution.lookup_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Lookup timeout cannot be 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub ip_file: Option<String>,
    pub resolver_file: Option<String>,
    pub threads: Option<usize>,
    pub backend: Option<LookupBackend>,
    pub idle_timeout_ms: Option<u64>,
    pub lookup_timeout_ms: Option<u64>,
    pub log_level: Option<String>,
}
