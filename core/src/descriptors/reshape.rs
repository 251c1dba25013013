//! Mechanical reshaping helpers shared by the descriptor rule tables.

use rustc_hash::FxHashSet;

use crate::bucket::{names, Bucket, BucketItem, VisAttribute};
use crate::measure::Measure;
use crate::sort::SortItem;

use super::sort_config::remove_invalid_sorts;
use super::{ExtendedReferencePoint, ReferencePoint, UiConfig};

/// All measures of a reference point, in bucket order.
pub fn collect_measures(reference_point: &ReferencePoint) -> Vec<Measure> {
    reference_point
        .buckets
        .iter()
        .flat_map(Bucket::measures)
        .cloned()
        .collect()
}

/// Attributes split by incoming role: view-like buckets (view, trend, rows)
/// versus stack-like buckets (stack, segment, columns). Attributes parked
/// in the measures bucket count as view-like.
pub fn collect_attributes_by_role(
    reference_point: &ReferencePoint,
) -> (Vec<VisAttribute>, Vec<VisAttribute>) {
    let mut view = Vec::new();
    let mut stack = Vec::new();
    for bucket in &reference_point.buckets {
        let target = match bucket.local_identifier.as_str() {
            names::STACK | names::SEGMENT | names::COLUMNS => &mut stack,
            _ => &mut view,
        };
        target.extend(bucket.attributes().cloned());
    }
    (view, stack)
}

/// Truncates `attributes` to `max` items while keeping at most
/// `max_dates` date attributes.
pub fn cap_attributes(
    reference_point: &ReferencePoint,
    attributes: Vec<VisAttribute>,
    max: usize,
    max_dates: usize,
) -> Vec<VisAttribute> {
    let mut kept = Vec::with_capacity(max.min(attributes.len()));
    let mut dates = 0usize;
    for attribute in attributes {
        if kept.len() == max {
            break;
        }
        if reference_point.is_date_attribute(&attribute.display_form) {
            if dates == max_dates {
                continue;
            }
            dates += 1;
        }
        kept.push(attribute);
    }
    kept
}

/// Drops derived and arithmetic measures whose masters were cut. Runs to a
/// fixed point because dropping a master can orphan another dependent.
pub fn prune_orphan_measures(mut measures: Vec<Measure>) -> Vec<Measure> {
    loop {
        let present: FxHashSet<String> = measures
            .iter()
            .map(|m| m.local_identifier.clone())
            .collect();
        let before = measures.len();
        measures.retain(|measure| {
            if let Some(master) = measure.master_identifier() {
                return present.contains(master);
            }
            if let Some(operands) = measure.arithmetic_operands() {
                return operands.iter().all(|op| present.contains(op));
            }
            true
        });
        if measures.len() == before {
            return measures;
        }
    }
}

pub fn measure_bucket(name: &str, measures: Vec<Measure>) -> Bucket {
    Bucket {
        local_identifier: name.to_string(),
        items: measures.into_iter().map(BucketItem::Measure).collect(),
        totals: Vec::new(),
    }
}

pub fn attribute_bucket(name: &str, attributes: Vec<VisAttribute>) -> Bucket {
    Bucket {
        local_identifier: name.to_string(),
        items: attributes.into_iter().map(BucketItem::Attribute).collect(),
        totals: Vec::new(),
    }
}

/// Assembles the extended reference point: buckets as given, sorts pruned
/// to items still present, filters passed through.
pub fn assemble(
    reference_point: &ReferencePoint,
    buckets: Vec<Bucket>,
    ui_config: UiConfig,
) -> ExtendedReferencePoint {
    let valid: Vec<&str> = buckets
        .iter()
        .flat_map(|b| b.items.iter())
        .map(BucketItem::local_identifier)
        .collect();
    let sorts: Vec<SortItem> = remove_invalid_sorts(&reference_point.sorts, &valid);
    if sorts.len() < reference_point.sorts.len() {
        log::debug!(
            "dropped {} sort item(s) referencing removed bucket items",
            reference_point.sorts.len() - sorts.len()
        );
    }
    ExtendedReferencePoint {
        buckets,
        filters: reference_point.filters.clone(),
        sorts,
        ui_config,
    }
}
