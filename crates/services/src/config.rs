//! Environment-driven settings for the API client and the test itself.

use std::env;
use std::time::Duration;

use mock_core::Countdown;
use mock_core::countdown::DEFAULT_DURATION_SECS;
use storage::http::HttpConfig;

use crate::error::ConfigError;

pub const API_URL_VAR: &str = "MOCKTEST_API_URL";
pub const TIMEOUT_VAR: &str = "MOCKTEST_TIMEOUT_SECS";
pub const DURATION_VAR: &str = "MOCKTEST_DURATION_SECS";

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ApiConfig {
    /// Read `MOCKTEST_API_URL` and `MOCKTEST_TIMEOUT_SECS`, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but unusable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ApiConfig::from_env`] over an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but unusable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = match lookup(API_URL_VAR) {
            Some(url) if url.trim().is_empty() => {
                return Err(ConfigError::Empty { key: API_URL_VAR });
            }
            Some(url) => url.trim().to_string(),
            None => DEFAULT_API_URL.into(),
        };
        let timeout = match lookup(TIMEOUT_VAR) {
            Some(raw) => Duration::from_secs(parse_positive(TIMEOUT_VAR, &raw)?),
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };
        Ok(Self { base_url, timeout })
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn http(&self) -> HttpConfig {
        HttpConfig {
            base_url: self.base_url.clone(),
            timeout: self.timeout,
        }
    }
}

/// Settings for a single test attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct TestSettings {
    countdown: Countdown,
}

impl TestSettings {
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidNumber` for a zero duration.
    pub fn with_duration_secs(secs: u32) -> Result<Self, ConfigError> {
        let countdown = Countdown::new(secs).map_err(|_| ConfigError::InvalidNumber {
            key: DURATION_VAR,
            value: secs.to_string(),
        })?;
        Ok(Self { countdown })
    }

    /// Read `MOCKTEST_DURATION_SECS`, defaulting to one hour.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the variable is set but not a positive number.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// # Errors
    ///
    /// Returns `ConfigError` if the variable is set but not a positive number.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let Some(raw) = lookup(DURATION_VAR) else {
            return Ok(Self::default());
        };
        let secs = parse_positive(DURATION_VAR, &raw)?;
        let secs = u32::try_from(secs).map_err(|_| ConfigError::InvalidNumber {
            key: DURATION_VAR,
            value: raw.clone(),
        })?;
        Self::with_duration_secs(secs)
    }

    /// Fresh countdown for a new session.
    #[must_use]
    pub fn countdown(&self) -> Countdown {
        self.countdown
    }

    #[must_use]
    pub fn duration_secs(&self) -> u32 {
        self.countdown.initial()
    }

    #[must_use]
    pub fn is_default(&self) -> bool {
        self.duration_secs() == DEFAULT_DURATION_SECS
    }
}

fn parse_positive(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ConfigError::InvalidNumber {
            key,
            value: raw.to_string(),
        }),
    }
}
