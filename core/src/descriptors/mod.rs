//! Pluggable visualization descriptors.
//!
//! Each visualization type has a descriptor that knows its bucket
//! capacities, reshapes an incoming reference point to fit them, proposes
//! sort configuration, and rewrites an insight for a drill-down step.
//! These are per-type rule tables; the shared helpers in [`reshape`] only
//! cover the mechanical parts (collecting items, capping, pruning orphaned
//! derived measures).

mod drill_down;
mod families;
mod reshape;
mod sort_config;

pub use drill_down::{apply_drill_down, DrillDownStep};
pub use sort_config::{remove_invalid_sorts, SortConfig};

use crate::bucket::Bucket;
use crate::filter::Filter;
use crate::objref::ObjRef;
use crate::sort::SortItem;
use crate::visualization::VisType;

/// Bucket capacities of a visualization type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiConfig {
    pub max_measures: usize,
    pub max_view_attributes: usize,
    pub max_stack_attributes: usize,
    /// Date attributes allowed in the view bucket.
    pub max_date_attributes: usize,
    /// When the stack bucket is populated, measures are capped to one.
    pub stack_caps_measures: bool,
}

/// A descriptor's working snapshot of bucket/property state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReferencePoint {
    pub buckets: Vec<Bucket>,
    pub filters: Vec<Filter>,
    pub sorts: Vec<SortItem>,
    /// Display forms known to belong to date attributes; reshaping uses
    /// this to enforce date caps.
    pub date_display_forms: Vec<ObjRef>,
}

impl ReferencePoint {
    pub fn is_date_attribute(&self, display_form: &ObjRef) -> bool {
        self.date_display_forms.contains(display_form)
    }
}

/// Reference point reshaped to a type's capacities, with the capacities
/// attached for the configuration UI.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtendedReferencePoint {
    pub buckets: Vec<Bucket>,
    pub filters: Vec<Filter>,
    pub sorts: Vec<SortItem>,
    pub ui_config: UiConfig,
}

pub trait VisDescriptor {
    fn vis_type(&self) -> VisType;

    fn ui_config(&self) -> UiConfig;

    /// Reshapes the incoming buckets to this type's capacities. Items that
    /// do not fit are dropped, never reordered; sorts referencing dropped
    /// items are pruned.
    fn extended_reference_point(&self, reference_point: &ReferencePoint)
        -> ExtendedReferencePoint;

    fn sort_config(&self, reference_point: &ReferencePoint) -> SortConfig;
}

/// Descriptor lookup. Total over [`VisType`].
pub fn descriptor(vis_type: VisType) -> &'static dyn VisDescriptor {
    match vis_type {
        VisType::Column => &families::COLUMN,
        VisType::Bar => &families::BAR,
        VisType::Combo => &families::COMBO,
        VisType::Area => &families::AREA,
        VisType::Line => &families::LINE,
        VisType::Pie => &families::PIE,
        VisType::Donut => &families::DONUT,
        VisType::Funnel => &families::FUNNEL,
        VisType::Treemap => &families::TREEMAP,
        VisType::Table => &families::TABLE,
        VisType::PivotTable => &families::PIVOT_TABLE,
        VisType::Headline => &families::HEADLINE,
        VisType::Scatter => &families::SCATTER,
        VisType::Bubble => &families::BUBBLE,
        VisType::Heatmap => &families::HEATMAP,
    }
}
