//! Payload outcome: either the full payload or a summary when the data is
//! too large to ship to the host.

use serde::{Deserialize, Serialize};

use crate::options::{PayloadLimits, PayloadPreset};
use crate::{ChartPayload, PayloadConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadOutcomeMode {
    Payload,
    Large,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadOutcomeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<PayloadPreset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limits: Option<PayloadLimits>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesSummary {
    pub name: String,
    pub point_count: usize,
    pub null_count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadSummary {
    pub series_count: usize,
    pub point_count: usize,
    pub truncated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub series: Vec<SeriesSummary>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadOutcome {
    pub mode: PayloadOutcomeMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<ChartPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<PayloadSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<PayloadOutcomeConfig>,
}

pub fn summarize_payload(payload: &ChartPayload) -> PayloadSummary {
    PayloadSummary {
        series_count: payload.series.len(),
        point_count: payload.included_points,
        truncated: payload.truncated,
        note: payload.note.clone(),
        series: payload
            .series
            .iter()
            .map(|series| SeriesSummary {
                name: series.name.clone(),
                point_count: series.points.len(),
                null_count: series.points.iter().filter(|p| p.y.is_none()).count(),
            })
            .collect(),
    }
}

impl PayloadOutcome {
    /// Full payload when its point count fits the configured budget, a
    /// summary otherwise.
    pub fn from_payload(payload: ChartPayload, cfg: &PayloadConfig) -> PayloadOutcome {
        if payload.total_points > cfg.max_total_points {
            PayloadOutcome {
                mode: PayloadOutcomeMode::Large,
                summary: Some(summarize_payload(&payload)),
                payload: None,
                config: None,
            }
        } else {
            PayloadOutcome {
                mode: PayloadOutcomeMode::Payload,
                summary: None,
                payload: Some(payload),
                config: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChartSeries, SeriesPoint};

    fn payload(points: usize) -> ChartPayload {
        ChartPayload {
            series: vec![ChartSeries {
                name: "Revenue".to_string(),
                format: None,
                points: (0..points)
                    .map(|i| SeriesPoint {
                        y: if i % 2 == 0 { Some(i as f64) } else { None },
                        name: None,
                    })
                    .collect(),
            }],
            categories: Vec::new(),
            truncated: false,
            included_points: points,
            total_points: points,
            note: None,
        }
    }

    #[test]
    fn summary_counts_nulls_per_series() {
        let summary = summarize_payload(&payload(4));
        assert_eq!(summary.series_count, 1);
        assert_eq!(summary.series[0].point_count, 4);
        assert_eq!(summary.series[0].null_count, 2);
    }

    #[test]
    fn oversized_payload_degrades_to_summary() {
        let cfg = PayloadConfig {
            max_total_points: 2,
            ..Default::default()
        };
        let outcome = PayloadOutcome::from_payload(payload(4), &cfg);
        assert_eq!(outcome.mode, PayloadOutcomeMode::Large);
        assert!(outcome.payload.is_none());
        assert!(outcome.summary.is_some());
    }
}
