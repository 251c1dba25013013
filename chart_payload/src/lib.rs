//! Chart-ready projections of executed insight results.
//!
//! Takes a [`DataView`] (execution request + result) and produces the
//! structures a chart library consumes directly: named series with numeric
//! points, category labels, headline values and drill event contexts.
//! Budgets cap how much data a payload carries; when data is dropped the
//! payload says so instead of silently truncating.

use serde::Serialize;

use insight_core::{DataView, Dimension, DimensionHeader};

mod config;
mod drill_context;
mod headline;
mod options;
mod outcome;

pub use config::{ConfigError, PayloadConfig, PayloadConfigBuilder};
pub use drill_context::{
    build_drill_event, element_type, DrillContext, DrillEventPayload, DrillIntersectionElement,
};
pub use headline::{
    build_headline, format_value, FormattedValue, HeadlineData, HeadlineDataItem, EMPTY_VALUE,
};
pub use options::{limits_from_config, PayloadLimits, PayloadOptions, PayloadPreset};
pub use outcome::{
    summarize_payload, PayloadOutcome, PayloadOutcomeConfig, PayloadOutcomeMode, PayloadSummary,
    SeriesSummary,
};

/// How measures and attribute elements map onto the two result dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesLayout {
    /// `[measureGroup, view attributes]`: one series per measure, points
    /// run along the second dimension.
    MeasuresInRows,
    /// `[attributes, measureGroup]`: one series per measure, points run
    /// along the first dimension.
    MeasuresInColumns,
    /// `[stack attribute, view attributes + measureGroup]`: one series per
    /// stack element.
    StackedRows,
}

/// Determines the layout from the request's dimensions.
pub fn series_layout(dimensions: &[Dimension]) -> Option<SeriesLayout> {
    let first = dimensions.first()?;
    if first.contains_measure_group() {
        return Some(SeriesLayout::MeasuresInRows);
    }
    let second = dimensions.get(1)?;
    if !second.contains_measure_group() {
        return None;
    }
    if second.item_identifiers.len() == 1 {
        Some(SeriesLayout::MeasuresInColumns)
    } else {
        Some(SeriesLayout::StackedRows)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    pub points: Vec<SeriesPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPayload {
    pub series: Vec<ChartSeries>,
    pub categories: Vec<String>,
    pub truncated: bool,
    pub included_points: usize,
    pub total_points: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Builds the chart payload under the default configuration.
pub fn build_chart_payload(view: &DataView) -> ChartPayload {
    build_chart_payload_with_config(view, &PayloadConfig::default())
}

pub fn build_chart_payload_with_config(view: &DataView, cfg: &PayloadConfig) -> ChartPayload {
    let layout = series_layout(&view.request.result_spec.dimensions);
    let (mut series, categories) = match layout {
        Some(SeriesLayout::MeasuresInRows) => measures_in_rows(view),
        Some(SeriesLayout::MeasuresInColumns) => measures_in_columns(view),
        Some(SeriesLayout::StackedRows) => stacked_rows(view),
        None => (Vec::new(), Vec::new()),
    };

    if !cfg.include_null_points {
        for entry in &mut series {
            entry.points.retain(|p| p.y.is_some());
        }
    }

    let total_points: usize = series.iter().map(|s| s.points.len()).sum();
    let mut included = 0usize;
    let mut budget = cfg.max_total_points;
    let mut truncated = false;

    if series.len() > cfg.max_series {
        series.truncate(cfg.max_series);
        truncated = true;
    }
    for entry in &mut series {
        let cap = cfg.max_points_per_series.min(budget);
        if entry.points.len() > cap {
            entry.points.truncate(cap);
            truncated = true;
        }
        included += entry.points.len();
        budget -= entry.points.len().min(budget);
    }

    let note = if truncated {
        log::warn!(
            "chart payload truncated: showing {included} of {total_points} points"
        );
        Some(format!(
            "Payload limited: showing {included} of {total_points} points."
        ))
    } else {
        None
    };

    ChartPayload {
        series,
        categories,
        truncated,
        included_points: included,
        total_points,
        note,
    }
}

fn parse_point(value: &insight_core::DataValue) -> Option<f64> {
    value.as_deref().and_then(|v| v.trim().parse::<f64>().ok())
}

fn measures_in_rows(view: &DataView) -> (Vec<ChartSeries>, Vec<String>) {
    let measures = view.result.measure_header_items();
    let categories: Vec<String> = view
        .result
        .attribute_elements(1)
        .iter()
        .map(|item| item.name.clone())
        .collect();

    let series = view
        .result
        .raw_data
        .iter()
        .enumerate()
        .map(|(row, values)| {
            let header = measures.get(row);
            ChartSeries {
                name: header
                    .map(|h| h.name.clone())
                    .unwrap_or_else(|| format!("Series {}", row + 1)),
                format: header.and_then(|h| h.format.clone()),
                points: values
                    .iter()
                    .map(|value| SeriesPoint {
                        y: parse_point(value),
                        name: None,
                    })
                    .collect(),
            }
        })
        .collect();
    (series, categories)
}

fn measures_in_columns(view: &DataView) -> (Vec<ChartSeries>, Vec<String>) {
    let measures = view.result.measure_header_items();
    let categories: Vec<String> = view
        .result
        .attribute_elements(0)
        .iter()
        .map(|item| item.name.clone())
        .collect();

    let series = measures
        .iter()
        .enumerate()
        .map(|(column, header)| ChartSeries {
            name: header.name.clone(),
            format: header.format.clone(),
            points: view
                .result
                .raw_data
                .iter()
                .map(|row| SeriesPoint {
                    y: row.get(column).and_then(parse_point),
                    name: None,
                })
                .collect(),
        })
        .collect();
    (series, categories)
}

fn stacked_rows(view: &DataView) -> (Vec<ChartSeries>, Vec<String>) {
    let stack_elements = view.result.attribute_elements(0);
    let categories: Vec<String> = view
        .result
        .attribute_elements(1)
        .iter()
        .map(|item| item.name.clone())
        .collect();
    let format = view
        .result
        .measure_header_items()
        .first()
        .and_then(|h| h.format.clone());

    let series = view
        .result
        .raw_data
        .iter()
        .enumerate()
        .map(|(row, values)| ChartSeries {
            name: stack_elements
                .get(row)
                .map(|item| item.name.clone())
                .unwrap_or_else(|| format!("Series {}", row + 1)),
            format: format.clone(),
            points: values
                .iter()
                .map(|value| SeriesPoint {
                    y: parse_point(value),
                    name: None,
                })
                .collect(),
        })
        .collect();
    (series, categories)
}

/// Headers of the measure-group dimension, if any, as a convenience for
/// hosts inspecting payload provenance.
pub fn measure_group_header(view: &DataView) -> Option<&DimensionHeader> {
    view.result
        .headers
        .iter()
        .flatten()
        .find(|h| matches!(h, DimensionHeader::MeasureGroup { .. }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_core::{
        Afm, Dimension, ExecutionRequest, ExecutionResult, MeasureHeaderItem, ResultSpec,
        MEASURE_GROUP,
    };

    fn measure_header(id: &str, name: &str) -> MeasureHeaderItem {
        MeasureHeaderItem {
            local_identifier: id.to_string(),
            name: name.to_string(),
            format: None,
        }
    }

    fn view_with_rows(dimensions: Vec<Dimension>, raw_data: Vec<Vec<Option<String>>>) -> DataView {
        DataView {
            request: ExecutionRequest {
                afm: Afm::default(),
                result_spec: ResultSpec {
                    dimensions,
                    sorts: Vec::new(),
                },
            },
            result: ExecutionResult {
                raw_data,
                headers: vec![vec![DimensionHeader::MeasureGroup {
                    items: vec![measure_header("m1", "Revenue"), measure_header("m2", "Cost")],
                }]],
                header_items: Vec::new(),
                is_empty: false,
                warnings: Vec::new(),
            },
        }
    }

    #[test]
    fn layout_detection_matches_dimension_shapes() {
        assert_eq!(
            series_layout(&[Dimension::measure_group(), Dimension::new(["a1"])]),
            Some(SeriesLayout::MeasuresInRows)
        );
        assert_eq!(
            series_layout(&[Dimension::new(["a1"]), Dimension::measure_group()]),
            Some(SeriesLayout::MeasuresInColumns)
        );
        assert_eq!(
            series_layout(&[
                Dimension::new(["s1"]),
                Dimension::new(["a1", MEASURE_GROUP])
            ]),
            Some(SeriesLayout::StackedRows)
        );
        assert_eq!(series_layout(&[Dimension::new(["a1"])]), None);
    }

    #[test]
    fn measures_in_rows_yield_one_series_per_measure() {
        let view = view_with_rows(
            vec![Dimension::measure_group(), Dimension::new(["a1"])],
            vec![
                vec![Some("1".to_string()), Some("2".to_string())],
                vec![Some("3".to_string()), None],
            ],
        );
        let payload = build_chart_payload(&view);
        assert_eq!(payload.series.len(), 2);
        assert_eq!(payload.series[0].name, "Revenue");
        assert_eq!(payload.series[0].points[1].y, Some(2.0));
        assert_eq!(payload.series[1].points[1].y, None);
        assert!(!payload.truncated);
    }

    #[test]
    fn non_numeric_values_become_null_points() {
        let view = view_with_rows(
            vec![Dimension::measure_group(), Dimension::new(["a1"])],
            vec![vec![Some("n/a".to_string()), Some("7".to_string())]],
        );
        let payload = build_chart_payload(&view);
        assert_eq!(payload.series[0].points[0].y, None);
        assert_eq!(payload.series[0].points[1].y, Some(7.0));
    }

    #[test]
    fn truncation_respects_total_budget_and_notes_it() {
        let view = view_with_rows(
            vec![Dimension::measure_group(), Dimension::new(["a1"])],
            vec![
                (0..10).map(|i| Some(i.to_string())).collect(),
                (0..10).map(|i| Some(i.to_string())).collect(),
            ],
        );
        let cfg = PayloadConfig::builder()
            .max_total_points(12)
            .build()
            .expect("valid config");
        let payload = build_chart_payload_with_config(&view, &cfg);
        assert!(payload.truncated);
        assert_eq!(payload.included_points, 12);
        assert_eq!(payload.total_points, 20);
        assert!(payload.note.as_deref().unwrap_or("").contains("12 of 20"));
    }
}
