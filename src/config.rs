use crate::error::{Result, StudioError};
use std::env;
use std::ops::RangeInclusive;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8090";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Accepted ranges for the numeric generation controls.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterLimits {
    pub count: RangeInclusive<u32>,
    pub steps: RangeInclusive<u32>,
    pub guidance: RangeInclusive<f32>,
    pub lora_weight: RangeInclusive<f32>,
    /// Smallest explicit seed; `-1` always means "random".
    pub min_seed: i64,
}

impl Default for ParameterLimits {
    fn default() -> Self {
        ParameterLimits {
            count: 1..=4,
            steps: 1..=60,
            guidance: 1.0..=20.0,
            lora_weight: 0.0..=1.0,
            min_seed: 0,
        }
    }
}

impl ParameterLimits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_count(mut self, count: RangeInclusive<u32>) -> Self {
        self.count = count;
        self
    }

    pub fn with_steps(mut self, steps: RangeInclusive<u32>) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_guidance(mut self, guidance: RangeInclusive<f32>) -> Self {
        self.guidance = guidance;
        self
    }

    pub fn with_lora_weight(mut self, lora_weight: RangeInclusive<f32>) -> Self {
        self.lora_weight = lora_weight;
        self
    }

    pub fn with_min_seed(mut self, min_seed: i64) -> Self {
        self.min_seed = min_seed;
        self
    }
}

#[derive(Debug, Clone)]
pub struct StudioConfig {
    pub base_url: String,
    pub request_timeout: Duration,
    pub limits: ParameterLimits,
}

impl Default for StudioConfig {
    fn default() -> Self {
        StudioConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            limits: ParameterLimits::default(),
        }
    }
}

impl StudioConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let base_url = env::var("STUDIO_BASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let request_timeout = env::var("STUDIO_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|secs| secs.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));

        StudioConfig {
            base_url,
            request_timeout,
            limits: ParameterLimits::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_limits(mut self, limits: ParameterLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let base = self.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(StudioError::Config(format!(
                "base URL must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        if self.request_timeout.is_zero() {
            return Err(StudioError::Config(
                "request timeout must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Joins an API path onto the base URL without doubling slashes.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
