use std::env;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Gateway configuration, loaded from a camelCase `config.json` or, when the
/// file does not exist, from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub hostname: String,
    pub port: u16,
    pub rate_limit_enabled: bool,
    /// Seconds between an admission and its decrement.
    pub rate_limit_expires: u64,
    /// Inclusive counter ceiling; a request is rejected once the counter has
    /// reached this value.
    pub rate_limit_cap: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hostname: "localhost".to_string(),
            port: 9753,
            rate_limit_enabled: false,
            rate_limit_expires: 10,
            rate_limit_cap: 10,
        }
    }
}

impl Config {
    pub const DEFAULT_PATH: &'static str = "config.json";

    /// Load from `path` when it exists, otherwise from the environment.
    pub fn load(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            Self::from_file(path)
        } else {
            Ok(Self::from_env())
        }
    }

    /// Load from a JSON file. Absent keys keep their defaults; unknown keys
    /// are ignored.
    pub fn from_file(path: &str) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Load from environment variables. Names are the config keys in
    /// UPPER_SNAKE_CASE (e.g. rateLimitEnabled -> RATE_LIMIT_ENABLED).
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(hostname) = env::var("HOSTNAME") {
            config.hostname = hostname;
        }
        if let Some(port) = parse_var("PORT") {
            config.port = port;
        }
        if let Ok(enabled) = env::var("RATE_LIMIT_ENABLED") {
            config.rate_limit_enabled = enabled == "true";
        }
        if let Some(expires) = parse_var("RATE_LIMIT_EXPIRES") {
            config.rate_limit_expires = expires;
        }
        if let Some(cap) = parse_var("RATE_LIMIT_CAP") {
            config.rate_limit_cap = cap;
        }
        config
    }

    /// Write the active configuration back to disk as JSON.
    pub fn save(&self, path: &str) -> Result<()> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn decay(&self) -> Duration {
        Duration::from_secs(self.rate_limit_expires)
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|value| value.parse().ok())
}
