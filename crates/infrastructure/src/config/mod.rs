//! Deployment configuration

use std::time::Duration;

use application::EngineConfig;
use serde::{Deserialize, Serialize};

const fn default_false() -> bool {
    false
}

const fn default_max_latency_ms() -> u64 {
    5000
}

const fn default_fetch_timeout_ms() -> u64 {
    1000
}

const fn default_refresh_interval_secs() -> u64 {
    30
}

/// Experiment source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Base URL of the experiment control plane; `None` means no remote
    /// source is configured and only statically registered experiments apply
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Hard bound on a single fetch, in milliseconds
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,

    /// How long a cached experiment set stays fresh, in seconds
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            fetch_timeout_ms: default_fetch_timeout_ms(),
            refresh_interval_secs: default_refresh_interval_secs(),
        }
    }
}

impl SourceConfig {
    /// Fetch bound as a [`Duration`]
    #[must_use]
    pub const fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    /// Cache freshness window as a [`Duration`]
    #[must_use]
    pub const fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}

/// Main configuration
///
/// Injection defaults to off in a deployment: an operator opts a service in
/// explicitly (`FAULTGATE_ENABLED=true`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaultGateConfig {
    /// Master switch for the whole engine
    #[serde(default = "default_false")]
    pub enabled: bool,

    /// Upper bound any latency effect is clamped to, in milliseconds
    #[serde(default = "default_max_latency_ms")]
    pub max_latency_ms: u64,

    /// Experiment source configuration
    #[serde(default)]
    pub source: SourceConfig,
}

impl Default for FaultGateConfig {
    fn default() -> Self {
        Self {
            enabled: default_false(),
            max_latency_ms: default_max_latency_ms(),
            source: SourceConfig::default(),
        }
    }
}

impl FaultGateConfig {
    /// Load configuration from environment and optional file
    ///
    /// # Errors
    ///
    /// Returns an error when a source value cannot be parsed into the
    /// expected shape.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("faultgate").required(false))
            // Override with environment variables (e.g., FAULTGATE_ENABLED)
            .add_source(
                config::Environment::with_prefix("FAULTGATE")
                    .separator("_")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Derive the engine configuration from this deployment configuration
    #[must_use]
    pub const fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            enabled: self.enabled,
            max_latency: Duration::from_millis(self.max_latency_ms),
        }
    }
}
