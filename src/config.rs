//! Configuration management for the limiter.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::error::{LimiterError, Result};
use crate::ratelimit::{LimiterConfig, DEFAULT_LIMIT, DEFAULT_WINDOW};

/// Top-level settings document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LimiterSettings {
    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limiting: RateLimitSettings,
}

/// Raw rate limiting settings, validated by [`RateLimitSettings::limiter_config`].
///
/// Values are kept signed so that a negative limit or window in a settings
/// file is reported as a configuration error rather than a parse failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitSettings {
    /// Maximum admitted requests per key within the window
    #[serde(default = "default_limit")]
    pub limit: i64,

    /// Window length in seconds (fractional values allowed)
    #[serde(default = "default_window_secs")]
    pub window_secs: f64,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            window_secs: default_window_secs(),
        }
    }
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT as i64
}

fn default_window_secs() -> f64 {
    DEFAULT_WINDOW.as_secs_f64()
}

impl RateLimitSettings {
    /// Validate these settings into a limiter configuration.
    pub fn limiter_config(&self) -> Result<LimiterConfig> {
        LimiterConfig::from_secs(self.limit, self.window_secs)
    }
}

impl LimiterSettings {
    /// Load settings from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading limiter settings");

        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load settings from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| LimiterError::Config(format!("Failed to parse limiter settings: {}", e)))
    }

    /// Validate the rate limiting section into a limiter configuration.
    pub fn limiter_config(&self) -> Result<LimiterConfig> {
        self.rate_limiting.limiter_config()
    }
}
