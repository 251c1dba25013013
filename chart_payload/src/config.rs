//! Configuration for payload building.
//!
//! `PayloadConfig` centralizes the truncation budgets so chart hosts with
//! different rendering capacity can tune how much data a payload carries.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use insight_core::error_codes;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayloadConfig {
    pub max_series: usize,
    pub max_points_per_series: usize,
    pub max_total_points: usize,
    /// Keep null points in series (hosts that connect gaps drop them).
    pub include_null_points: bool,
}

impl Default for PayloadConfig {
    fn default() -> Self {
        Self {
            max_series: 500,
            max_points_per_series: 5_000,
            max_total_points: 100_000,
            include_null_points: true,
        }
    }
}

impl PayloadConfig {
    pub fn compact() -> Self {
        Self {
            max_series: 50,
            max_points_per_series: 500,
            max_total_points: 10_000,
            ..Default::default()
        }
    }

    pub fn balanced() -> Self {
        Self::default()
    }

    pub fn complete() -> Self {
        Self {
            max_series: 2_000,
            max_points_per_series: 50_000,
            max_total_points: 1_000_000,
            ..Default::default()
        }
    }

    pub fn builder() -> PayloadConfigBuilder {
        PayloadConfigBuilder {
            inner: PayloadConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_non_zero(self.max_series, "max_series")?;
        ensure_non_zero(self.max_points_per_series, "max_points_per_series")?;
        ensure_non_zero(self.max_total_points, "max_total_points")?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("[INSIGHT_CONFIG_001] {field} must be greater than zero")]
    NonPositiveLimit { field: &'static str },
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::NonPositiveLimit { .. } => error_codes::CONFIG_NON_POSITIVE_LIMIT,
        }
    }
}

fn ensure_non_zero(value: usize, field: &'static str) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::NonPositiveLimit { field });
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct PayloadConfigBuilder {
    inner: PayloadConfig,
}

impl Default for PayloadConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PayloadConfigBuilder {
    pub fn new() -> Self {
        PayloadConfig::builder()
    }

    pub fn max_series(mut self, value: usize) -> Self {
        self.inner.max_series = value;
        self
    }

    pub fn max_points_per_series(mut self, value: usize) -> Self {
        self.inner.max_points_per_series = value;
        self
    }

    pub fn max_total_points(mut self, value: usize) -> Self {
        self.inner.max_total_points = value;
        self
    }

    pub fn include_null_points(mut self, value: bool) -> Self {
        self.inner.include_null_points = value;
        self
    }

    pub fn build(self) -> Result<PayloadConfig, ConfigError> {
        self.inner.validate()?;
        Ok(self.inner)
    }
}
