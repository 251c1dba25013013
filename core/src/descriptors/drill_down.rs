//! Drill-down application: rewriting an insight for one hierarchy step.

use rustc_hash::FxHashSet;

use crate::bucket::BucketItem;
use crate::filter::Filter;
use crate::objref::ObjRef;
use crate::visualization::VisualizationObject;

use super::sort_config::remove_invalid_sorts;

/// One drill-down step: the clicked attribute and the display form of the
/// next hierarchy level.
#[derive(Debug, Clone, PartialEq)]
pub struct DrillDownStep {
    pub drilled_local_identifier: String,
    pub target_display_form: ObjRef,
}

/// Rewrites a visualization for a drill-down step:
///
/// - the drilled attribute's display form is replaced with the target form,
/// - attributes that now duplicate another's display form are removed,
/// - sorts referencing removed items are pruned,
/// - ranking filters are stripped (their measure scope no longer matches
///   the narrowed data).
pub fn apply_drill_down(
    vis: &VisualizationObject,
    step: &DrillDownStep,
) -> VisualizationObject {
    let mut drilled = vis.clone();

    for bucket in &mut drilled.buckets {
        for item in &mut bucket.items {
            if let BucketItem::Attribute(attribute) = item {
                if attribute.local_identifier == step.drilled_local_identifier {
                    attribute.display_form = step.target_display_form.clone();
                    attribute.alias = None;
                }
            }
        }
    }

    // Dedupe attributes by display form; the first occurrence wins so the
    // drilled attribute keeps its bucket position.
    let mut seen_forms: FxHashSet<String> = FxHashSet::default();
    for bucket in &mut drilled.buckets {
        bucket.items.retain(|item| match item {
            BucketItem::Attribute(attribute) => {
                seen_forms.insert(display_form_key(&attribute.display_form))
            }
            BucketItem::Measure(_) => true,
        });
    }

    let valid: Vec<String> = drilled
        .item_identifiers()
        .into_iter()
        .map(str::to_string)
        .collect();
    let valid: Vec<&str> = valid.iter().map(String::as_str).collect();
    drilled.sorts = remove_invalid_sorts(&vis.sorts, &valid);
    drilled.filters = vis
        .filters
        .iter()
        .filter(|f| !matches!(f, Filter::Ranking(_)))
        .cloned()
        .collect();

    drilled
}

fn display_form_key(display_form: &ObjRef) -> String {
    match display_form {
        ObjRef::Uri { uri } => format!("uri:{uri}"),
        ObjRef::Identifier { identifier } => format!("id:{identifier}"),
    }
}
