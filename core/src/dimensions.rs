//! Result-spec dimension generation.
//!
//! Maps a visualization's buckets and its chart type to the dimension list
//! the execution must use. Pure and deterministic; every supported type has
//! a fixed placement rule for attributes and the synthetic `measureGroup`
//! item. Totals live on the row-attribute bucket and travel with the row
//! dimension of tables.

use crate::afm::{Afm, Dimension, TotalItem, MEASURE_GROUP};
use crate::bucket::{
    bucket_attribute_identifiers, bucket_by_name, bucket_is_populated, names, Bucket,
};
use crate::visualization::{VisType, VisualizationObject};

/// Generates the dimension list for the given visualization type.
pub fn generate_dimensions(vis: &VisualizationObject, vis_type: VisType) -> Vec<Dimension> {
    let buckets = &vis.buckets;
    match vis_type {
        VisType::Headline => vec![Dimension::measure_group()],
        VisType::Table => table_dimensions(buckets),
        VisType::PivotTable => pivot_table_dimensions(buckets),
        VisType::Pie | VisType::Donut | VisType::Funnel => round_chart_dimensions(buckets),
        VisType::Treemap => treemap_dimensions(buckets),
        VisType::Line => stacking_dimensions(buckets, names::TREND, names::SEGMENT),
        VisType::Column | VisType::Bar | VisType::Area | VisType::Combo => {
            stacking_dimensions(buckets, names::VIEW, names::STACK)
        }
        VisType::Scatter => scatter_dimensions(buckets),
        VisType::Heatmap => heatmap_dimensions(buckets),
        VisType::Bubble => bubble_dimensions(buckets),
    }
}

fn has_measures(buckets: &[Bucket]) -> bool {
    buckets.iter().any(|b| b.measures().next().is_some())
}

/// Totals declared on a bucket, in result-spec form. The alias is a
/// presentation concern and does not travel to the execution.
fn dimension_totals(buckets: &[Bucket], bucket_name: &str) -> Vec<TotalItem> {
    bucket_by_name(buckets, bucket_name)
        .map(|bucket| {
            bucket
                .totals
                .iter()
                .map(|total| TotalItem {
                    measure_identifier: total.measure_identifier.clone(),
                    total_type: total.total_type,
                    attribute_identifier: total.attribute_identifier.clone(),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn table_dimensions(buckets: &[Bucket]) -> Vec<Dimension> {
    let attributes = bucket_attribute_identifiers(buckets, names::ATTRIBUTE);
    let second = if has_measures(buckets) {
        Dimension::measure_group()
    } else {
        Dimension::empty()
    };
    vec![
        Dimension::new(attributes).with_totals(dimension_totals(buckets, names::ATTRIBUTE)),
        second,
    ]
}

fn pivot_table_dimensions(buckets: &[Bucket]) -> Vec<Dimension> {
    let rows = bucket_attribute_identifiers(buckets, names::ATTRIBUTE);
    let mut columns: Vec<&str> = bucket_attribute_identifiers(buckets, names::COLUMNS);
    if has_measures(buckets) {
        columns.push(MEASURE_GROUP);
    }
    vec![
        Dimension::new(rows).with_totals(dimension_totals(buckets, names::ATTRIBUTE)),
        Dimension::new(columns),
    ]
}

fn round_chart_dimensions(buckets: &[Bucket]) -> Vec<Dimension> {
    if bucket_is_populated(buckets, names::VIEW) {
        let view = bucket_attribute_identifiers(buckets, names::VIEW);
        vec![Dimension::measure_group(), Dimension::new(view)]
    } else {
        vec![Dimension::empty(), Dimension::measure_group()]
    }
}

fn treemap_dimensions(buckets: &[Bucket]) -> Vec<Dimension> {
    let attributes: Vec<&str> = buckets
        .iter()
        .flat_map(|b| b.attributes())
        .map(|a| a.local_identifier.as_str())
        .collect();
    if attributes.len() == 1 {
        vec![Dimension::measure_group(), Dimension::new(attributes)]
    } else {
        vec![Dimension::new(attributes), Dimension::measure_group()]
    }
}

/// Column/bar/area/combo (view+stack) and line (trend+segment) share the
/// same placement rule: without a stacking attribute the measure group is
/// the first dimension; with one, the stacking attributes claim the first
/// dimension and the measure group moves next to the view attributes.
fn stacking_dimensions(buckets: &[Bucket], view_bucket: &str, stack_bucket: &str) -> Vec<Dimension> {
    let view = bucket_attribute_identifiers(buckets, view_bucket);
    if !bucket_is_populated(buckets, stack_bucket) {
        vec![Dimension::measure_group(), Dimension::new(view)]
    } else {
        let stack = bucket_attribute_identifiers(buckets, stack_bucket);
        let mut second: Vec<&str> = view;
        second.push(MEASURE_GROUP);
        vec![Dimension::new(stack), Dimension::new(second)]
    }
}

fn scatter_dimensions(buckets: &[Bucket]) -> Vec<Dimension> {
    let attributes = bucket_attribute_identifiers(buckets, names::ATTRIBUTE);
    vec![Dimension::new(attributes), Dimension::measure_group()]
}

fn heatmap_dimensions(buckets: &[Bucket]) -> Vec<Dimension> {
    let view = bucket_attribute_identifiers(buckets, names::VIEW);
    if !bucket_is_populated(buckets, names::STACK) {
        vec![Dimension::new(view), Dimension::measure_group()]
    } else {
        let mut second = bucket_attribute_identifiers(buckets, names::STACK);
        second.push(MEASURE_GROUP);
        vec![Dimension::new(view), Dimension::new(second)]
    }
}

fn bubble_dimensions(buckets: &[Bucket]) -> Vec<Dimension> {
    let mut first = bucket_attribute_identifiers(buckets, names::VIEW);
    if bucket_is_populated(buckets, names::STACK) {
        first.extend(bucket_attribute_identifiers(buckets, names::STACK));
    }
    vec![Dimension::new(first), Dimension::measure_group()]
}

/// Default dimensions for line/area/bar/column executions built directly
/// from an AFM (no buckets available).
pub fn default_dimensions(afm: &Afm) -> Vec<Dimension> {
    vec![
        Dimension::measure_group(),
        Dimension::new(afm.attributes.iter().map(|a| a.local_identifier.clone())),
    ]
}

/// Default dimensions for scatter/bubble executions built from an AFM.
pub fn default_dimensions_for_points_charts(afm: &Afm) -> Vec<Dimension> {
    vec![
        Dimension::new(afm.attributes.iter().map(|a| a.local_identifier.clone())),
        Dimension::measure_group(),
    ]
}

/// Default dimensions for pie/donut executions built from an AFM.
pub fn default_dimensions_for_round_charts(afm: &Afm) -> Vec<Dimension> {
    if afm.attributes.is_empty() {
        vec![Dimension::empty(), Dimension::measure_group()]
    } else {
        vec![
            Dimension::measure_group(),
            Dimension::new(afm.attributes.iter().map(|a| a.local_identifier.clone())),
        ]
    }
}

/// General fallback: an attributes dimension when the AFM has attributes,
/// then a measure-group dimension when it has measures.
pub fn general_dimensions(afm: &Afm) -> Vec<Dimension> {
    let mut dimensions = Vec::with_capacity(2);
    if !afm.attributes.is_empty() {
        dimensions.push(Dimension::new(
            afm.attributes.iter().map(|a| a.local_identifier.clone()),
        ));
    }
    if !afm.measures.is_empty() {
        dimensions.push(Dimension::measure_group());
    }
    dimensions
}
