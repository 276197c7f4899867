use serde::{Deserialize, Serialize};
use std::path::Path;

use super::account::AccountConfig;
use super::errors::ConfigError;
use super::feed::FeedConfig;
use super::logging::LoggingConfig;
use super::monitor::MonitorConfig;
use super::probe::ProbeConfig;
use super::provider::ProviderConfig;
use super::schedule::ScheduleConfig;
use crate::target::DomainTarget;

const DEFAULT_PATHS: [&str; 2] = ["ferrous-failover.toml", "/etc/ferrous-failover/config.toml"];

/// Main configuration structure for Ferrous Failover
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// DNS provider credentials
    pub account: AccountConfig,

    /// DNS provider API settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Candidate list download
    #[serde(default)]
    pub feed: FeedConfig,

    /// Latency measurement
    #[serde(default)]
    pub probe: ProbeConfig,

    /// Post-publish verification
    #[serde(default)]
    pub monitor: MonitorConfig,

    /// Watch mode
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Hostnames to keep healthy
    #[serde(default)]
    pub targets: Vec<DomainTarget>,
}

/// `{email, key, domainInfos}` layout of older JSON configuration files.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyJsonConfig {
    email: String,
    key: String,
    #[serde(default)]
    domain_infos: Vec<DomainTarget>,
}

impl From<LegacyJsonConfig> for Config {
    fn from(legacy: LegacyJsonConfig) -> Self {
        Self {
            account: AccountConfig {
                email: legacy.email,
                key: legacy.key,
            },
            targets: legacy.domain_infos,
            ..Self::default()
        }
    }
}

impl Config {
    /// Load configuration from file
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. ferrous-failover.toml in current directory
    /// 3. /etc/ferrous-failover/config.toml
    ///
    /// There is no built-in default: credentials and targets are mandatory.
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_string(),
            None => Self::get_config_path()
                .ok_or_else(|| ConfigError::NotFound(DEFAULT_PATHS.join(", ")))?,
        };

        let mut config = Self::from_file(&path)?;
        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Load configuration from a specific file; `.json` files use the
    /// legacy layout, everything else is TOML.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;

        let is_json = Path::new(path)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&contents)
        } else {
            Self::from_toml_str(&contents)
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn from_json_str(contents: &str) -> Result<Self, ConfigError> {
        serde_json::from_str::<LegacyJsonConfig>(contents)
            .map(Self::from)
            .map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if overrides.watch {
            self.schedule.watch = true;
        }
        if let Some(interval) = overrides.interval_secs {
            self.schedule.interval_secs = interval;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.account.email.trim().is_empty() || self.account.key.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Account email and key are required".to_string(),
            ));
        }

        if self.targets.is_empty() {
            return Err(ConfigError::Validation("No targets configured".to_string()));
        }

        for target in &self.targets {
            target
                .validate()
                .map_err(|e| ConfigError::Validation(e.to_string()))?;
        }

        if self.probe.samples == 0 || self.probe.host_samples == 0 {
            return Err(ConfigError::Validation(
                "Probe sample counts must be at least 1".to_string(),
            ));
        }

        if self.probe.max_parallel == Some(0) {
            return Err(ConfigError::Validation(
                "probe.max_parallel cannot be 0".to_string(),
            ));
        }

        if self.provider.max_attempts == 0 {
            return Err(ConfigError::Validation(
                "provider.max_attempts must be at least 1".to_string(),
            ));
        }

        if self.monitor.tick_secs == 0 || self.monitor.max_ticks == 0 {
            return Err(ConfigError::Validation(
                "monitor.tick_secs and monitor.max_ticks must be at least 1".to_string(),
            ));
        }

        if self.monitor.max_episode_retries == 0 {
            return Err(ConfigError::Validation(
                "monitor.max_episode_retries must be at least 1".to_string(),
            ));
        }

        if self.schedule.watch && self.schedule.interval_secs == 0 {
            return Err(ConfigError::Validation(
                "schedule.interval_secs cannot be 0 in watch mode".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        DEFAULT_PATHS
            .iter()
            .find(|p| Path::new(p).exists())
            .map(|p| p.to_string())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub log_level: Option<String>,
    pub watch: bool,
    pub interval_secs: Option<u64>,
}
