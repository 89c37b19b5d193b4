//! Harness configuration
//!
//! Layered loading: built-in defaults, then an optional `pagepilot.toml`,
//! then `PAGEPILOT_`-prefixed environment overrides
//! (e.g. `PAGEPILOT_FUZZY__THRESHOLD=0.9`).

use crate::errors::HarnessError;
use action_facade::FacadeConfig;
use locator_engine::ResolverConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Which backing store the locator cache uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// In-process map, cleared at exit
    Memory,

    /// Flat JSON document, survives restarts
    File,
}

/// Fuzzy fallback tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FuzzySettings {
    pub enabled: bool,
    pub threshold: f64,
    pub length_slack: usize,
}

impl Default for FuzzySettings {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: 0.8,
            length_slack: 15,
        }
    }
}

/// Cache selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub backend: CacheBackend,
    pub path: PathBuf,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Memory,
            path: PathBuf::from("locators.json"),
        }
    }
}

/// Operation timeouts, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutSettings {
    pub visible_ms: u64,
    pub text_ms: u64,
    pub action_ms: u64,
    pub nav_ms: u64,
    pub url_ms: u64,
}

impl Default for TimeoutSettings {
    fn default() -> Self {
        Self {
            visible_ms: 15_000,
            text_ms: 5_000,
            action_ms: 30_000,
            nav_ms: 30_000,
            url_ms: 5_000,
        }
    }
}

/// Complete harness configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    pub fuzzy: FuzzySettings,
    pub cache: CacheSettings,
    pub timeouts: TimeoutSettings,
}

impl HarnessConfig {
    /// Load configuration from file and environment over the defaults.
    pub fn load() -> Result<Self, HarnessError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("pagepilot").required(false))
            .add_source(config::Environment::with_prefix("PAGEPILOT").separator("__"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Resolver view of this configuration.
    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            fuzzy_enabled: self.fuzzy.enabled,
            default_threshold: self.fuzzy.threshold,
            length_slack: self.fuzzy.length_slack,
            ..ResolverConfig::default()
        }
    }

    /// Facade view of this configuration.
    pub fn facade_config(&self) -> FacadeConfig {
        FacadeConfig {
            visible_timeout: Duration::from_millis(self.timeouts.visible_ms),
            text_timeout: Duration::from_millis(self.timeouts.text_ms),
            action_timeout: Duration::from_millis(self.timeouts.action_ms),
            nav_timeout: Duration::from_millis(self.timeouts.nav_ms),
            url_timeout: Duration::from_millis(self.timeouts.url_ms),
        }
    }
}
