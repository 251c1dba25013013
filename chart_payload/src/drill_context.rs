//! Drill event payloads emitted to host applications on click.

use serde::Serialize;

use insight_core::{
    AttributeHeader, AttributeHeaderItem, DataView, MeasureHeaderItem, VisType,
};

use crate::{series_layout, SeriesLayout};

/// Chart element kind carried in the drill context, per visualization type.
pub fn element_type(vis_type: VisType) -> &'static str {
    match vis_type {
        VisType::Column | VisType::Bar | VisType::Combo => "bar",
        VisType::Line | VisType::Area | VisType::Scatter | VisType::Bubble => "point",
        VisType::Pie | VisType::Donut | VisType::Funnel => "slice",
        VisType::Treemap | VisType::Heatmap => "cell",
        VisType::Table | VisType::PivotTable => "cell",
        VisType::Headline => "primaryValue",
    }
}

/// One element of the click intersection: the measure behind the point or
/// an attribute header with the clicked element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DrillIntersectionElement {
    Measure {
        item: MeasureHeaderItem,
    },
    Attribute {
        header: AttributeHeader,
        item: AttributeHeaderItem,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrillContext {
    pub element: String,
    #[serde(rename = "type")]
    pub vis_type: VisType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub intersection: Vec<DrillIntersectionElement>,
}

/// The payload handed to host applications: click context plus the data
/// view it happened on.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrillEventPayload {
    pub drill_context: DrillContext,
    pub data_view: DataView,
}

/// Builds the drill event for a clicked point, addressed by series and
/// point index. Returns `None` when the coordinates fall outside the data.
pub fn build_drill_event(
    view: &DataView,
    vis_type: VisType,
    series_index: usize,
    point_index: usize,
) -> Option<DrillEventPayload> {
    let layout = series_layout(&view.request.result_spec.dimensions)?;
    let (row, column) = match layout {
        SeriesLayout::MeasuresInRows | SeriesLayout::StackedRows => (series_index, point_index),
        SeriesLayout::MeasuresInColumns => (point_index, series_index),
    };
    let value = view.result.raw_data.get(row)?.get(column)?.clone();

    let measures = view.result.measure_header_items();
    let measure = match layout {
        SeriesLayout::MeasuresInRows => measures.get(series_index),
        SeriesLayout::MeasuresInColumns => measures.get(series_index),
        // A stacked layout carries a single measure.
        SeriesLayout::StackedRows => measures.first(),
    };

    let mut intersection: Vec<DrillIntersectionElement> = Vec::new();
    if let Some(measure) = measure {
        intersection.push(DrillIntersectionElement::Measure {
            item: measure.clone(),
        });
    }
    for (dimension, element_index) in intersection_coordinates(layout, series_index, point_index) {
        let header = view
            .result
            .headers
            .get(dimension)
            .and_then(|headers| headers.iter().find_map(|h| h.as_attribute()));
        let item = view.result.attribute_elements(dimension).get(element_index);
        if let (Some(header), Some(item)) = (header, item) {
            intersection.push(DrillIntersectionElement::Attribute {
                header: header.clone(),
                item: item.clone(),
            });
        }
    }

    Some(DrillEventPayload {
        drill_context: DrillContext {
            element: element_type(vis_type).to_string(),
            vis_type,
            value,
            intersection,
        },
        data_view: view.clone(),
    })
}

/// Which (dimension, element) pairs the clicked point crosses.
fn intersection_coordinates(
    layout: SeriesLayout,
    series_index: usize,
    point_index: usize,
) -> Vec<(usize, usize)> {
    match layout {
        SeriesLayout::MeasuresInRows => vec![(1, point_index)],
        SeriesLayout::MeasuresInColumns => vec![(0, point_index)],
        SeriesLayout::StackedRows => vec![(0, series_index), (1, point_index)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_core::{
        uri_ref, Afm, AttributeHeaderItem, AttributeOf, Dimension, DimensionHeader,
        ExecutionRequest, ExecutionResult, MeasureHeaderItem, ResultSpec,
    };

    fn column_view() -> DataView {
        DataView {
            request: ExecutionRequest {
                afm: Afm::default(),
                result_spec: ResultSpec {
                    dimensions: vec![Dimension::measure_group(), Dimension::new(["a1"])],
                    sorts: Vec::new(),
                },
            },
            result: ExecutionResult {
                raw_data: vec![vec![Some("11".to_string()), Some("12".to_string())]],
                headers: vec![
                    vec![DimensionHeader::MeasureGroup {
                        items: vec![MeasureHeaderItem {
                            local_identifier: "m1".to_string(),
                            name: "Revenue".to_string(),
                            format: None,
                        }],
                    }],
                    vec![DimensionHeader::Attribute(AttributeHeader {
                        local_identifier: "a1".to_string(),
                        name: "City".to_string(),
                        uri: "/gdc/md/p/obj/400".to_string(),
                        obj_ref: uri_ref("/gdc/md/p/obj/400"),
                        identifier: "attr.city".to_string(),
                        form_of: AttributeOf {
                            uri: "/gdc/md/p/obj/401".to_string(),
                            obj_ref: uri_ref("/gdc/md/p/obj/401"),
                            identifier: "attr.city.form".to_string(),
                            name: "City".to_string(),
                        },
                    })],
                ],
                header_items: vec![
                    Vec::new(),
                    vec![vec![
                        AttributeHeaderItem {
                            name: "Berlin".to_string(),
                            uri: "/gdc/md/p/obj/400?id=1".to_string(),
                        },
                        AttributeHeaderItem {
                            name: "Prague".to_string(),
                            uri: "/gdc/md/p/obj/400?id=2".to_string(),
                        },
                    ]],
                ],
                is_empty: false,
                warnings: Vec::new(),
            },
        }
    }

    #[test]
    fn event_carries_value_measure_and_attribute_element() {
        let view = column_view();
        let event = build_drill_event(&view, VisType::Column, 0, 1).expect("point exists");
        assert_eq!(event.drill_context.element, "bar");
        assert_eq!(event.drill_context.value.as_deref(), Some("12"));
        assert_eq!(event.drill_context.intersection.len(), 2);
        match &event.drill_context.intersection[1] {
            DrillIntersectionElement::Attribute { item, .. } => assert_eq!(item.name, "Prague"),
            other => panic!("unexpected intersection element: {other:?}"),
        }
    }

    #[test]
    fn out_of_range_coordinates_yield_nothing() {
        let view = column_view();
        assert!(build_drill_event(&view, VisType::Column, 0, 9).is_none());
        assert!(build_drill_event(&view, VisType::Column, 3, 0).is_none());
    }

    #[test]
    fn element_types_cover_every_visualization() {
        for vis_type in VisType::ALL {
            assert!(!element_type(vis_type).is_empty());
        }
    }
}
