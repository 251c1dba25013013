use serde::{Deserialize, Serialize};

use crate::config::PayloadConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadPreset {
    Compact,
    Balanced,
    Complete,
}

impl PayloadPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayloadPreset::Compact => "compact",
            PayloadPreset::Balanced => "balanced",
            PayloadPreset::Complete => "complete",
        }
    }

    pub fn to_config(self) -> PayloadConfig {
        match self {
            PayloadPreset::Compact => PayloadConfig::compact(),
            PayloadPreset::Balanced => PayloadConfig::balanced(),
            PayloadPreset::Complete => PayloadConfig::complete(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadLimits {
    pub max_series: Option<usize>,
    pub max_points_per_series: Option<usize>,
    pub max_total_points: Option<usize>,
}

impl PayloadLimits {
    pub fn apply_to(&self, cfg: &mut PayloadConfig) {
        if let Some(value) = self.max_series {
            cfg.max_series = value;
        }
        if let Some(value) = self.max_points_per_series {
            cfg.max_points_per_series = value;
        }
        if let Some(value) = self.max_total_points {
            cfg.max_total_points = value;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<PayloadPreset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limits: Option<PayloadLimits>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_json: Option<String>,
}

impl PayloadOptions {
    pub fn effective_config(&self, default_config: PayloadConfig) -> Result<PayloadConfig, String> {
        let mut cfg = if let Some(config_json) = self
            .config_json
            .as_ref()
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
        {
            serde_json::from_str::<PayloadConfig>(config_json)
                .map_err(|e| format!("Invalid configJson: {e}"))?
        } else if let Some(preset) = self.preset {
            preset.to_config()
        } else {
            default_config
        };

        if let Some(limits) = &self.limits {
            limits.apply_to(&mut cfg);
        }

        cfg.validate().map_err(|e| e.to_string())?;
        Ok(cfg)
    }
}

pub fn limits_from_config(cfg: &PayloadConfig) -> PayloadLimits {
    PayloadLimits {
        max_series: Some(cfg.max_series),
        max_points_per_series: Some(cfg.max_points_per_series),
        max_total_points: Some(cfg.max_total_points),
    }
}
