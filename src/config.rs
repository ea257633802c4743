use std::fmt;
use std::time::Duration;

use crate::dashboard::GuestPolicy;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_AVAILABLE_LIMIT: i64 = 20;

/// Runtime settings, read from the process environment (and `.env` via dotenvy).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    /// Raw `SESSION_KEY`; `None` means a random key is generated at startup.
    pub session_key: Option<String>,
    pub dashboard_timeout: Duration,
    pub available_limit: i64,
    pub guest_policy: GuestPolicy,
    pub seed_demo: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{key} must be set"),
            ConfigError::Invalid { key, value } => write!(f, "Invalid value for {key}: {value:?}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup so tests don't have to touch the process env.
    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = get("DATABASE_URL")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let bind_addr = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let session_key = get("SESSION_KEY").filter(|v| !v.is_empty());

        let timeout_ms = match get("DASHBOARD_TIMEOUT_MS") {
            Some(v) => v
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or(ConfigError::Invalid { key: "DASHBOARD_TIMEOUT_MS", value: v })?,
            None => DEFAULT_TIMEOUT_MS,
        };

        let available_limit = match get("DASHBOARD_AVAILABLE_LIMIT") {
            Some(v) => v
                .parse::<i64>()
                .ok()
                .filter(|n| (1..=100).contains(n))
                .ok_or(ConfigError::Invalid { key: "DASHBOARD_AVAILABLE_LIMIT", value: v })?,
            None => DEFAULT_AVAILABLE_LIMIT,
        };

        let guest_policy = match get("DASHBOARD_GUEST_POLICY") {
            Some(v) => GuestPolicy::parse(&v)
                .ok_or(ConfigError::Invalid { key: "DASHBOARD_GUEST_POLICY", value: v })?,
            None => GuestPolicy::default(),
        };

        let seed_demo = matches!(get("SEED_DEMO").as_deref(), Some("1") | Some("true"));

        Ok(Self {
            database_url,
            bind_addr,
            session_key,
            dashboard_timeout: Duration::from_millis(timeout_ms),
            available_limit,
            guest_policy,
            seed_demo,
        })
    }
}
