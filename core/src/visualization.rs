//! The visualization object: buckets, filters, sorts and the visualization
//! class, plus the reader helpers the rest of the crate leans on.

use serde::{Deserialize, Serialize};

use crate::bucket::{bucket_by_name, Bucket, BucketItem, VisAttribute};
use crate::filter::Filter;
use crate::measure::Measure;
use crate::objref::ObjRef;
use crate::sort::SortItem;

/// Supported visualization types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisType {
    Table,
    PivotTable,
    Column,
    Bar,
    Line,
    Area,
    Combo,
    Pie,
    Donut,
    Funnel,
    Treemap,
    Scatter,
    Bubble,
    Heatmap,
    Headline,
}

impl VisType {
    pub const ALL: [VisType; 15] = [
        VisType::Table,
        VisType::PivotTable,
        VisType::Column,
        VisType::Bar,
        VisType::Line,
        VisType::Area,
        VisType::Combo,
        VisType::Pie,
        VisType::Donut,
        VisType::Funnel,
        VisType::Treemap,
        VisType::Scatter,
        VisType::Bubble,
        VisType::Heatmap,
        VisType::Headline,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VisType::Table => "table",
            VisType::PivotTable => "pivot_table",
            VisType::Column => "column",
            VisType::Bar => "bar",
            VisType::Line => "line",
            VisType::Area => "area",
            VisType::Combo => "combo",
            VisType::Pie => "pie",
            VisType::Donut => "donut",
            VisType::Funnel => "funnel",
            VisType::Treemap => "treemap",
            VisType::Scatter => "scatter",
            VisType::Bubble => "bubble",
            VisType::Heatmap => "heatmap",
            VisType::Headline => "headline",
        }
    }

    pub fn from_name(name: &str) -> Option<VisType> {
        VisType::ALL.iter().copied().find(|t| t.as_str() == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualizationClass {
    pub uri: String,
}

impl VisualizationClass {
    /// Visualization type encoded in the class URI's last path segment
    /// (`.../obj/column` is a column chart, `local:bar` a bar chart).
    pub fn vis_type(&self) -> Option<VisType> {
        let tail = self
            .uri
            .rsplit(|c| c == '/' || c == ':')
            .next()
            .unwrap_or("");
        VisType::from_name(tail)
    }
}

/// The declarative description of a visualization: what to compute (buckets,
/// filters) and how to present it (sorts, free-form properties).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualizationObject {
    pub visualization_class: VisualizationClass,
    pub buckets: Vec<Bucket>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<Filter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sorts: Vec<SortItem>,
    /// Free-form presentation properties serialized by the host (controls,
    /// stored sort items, ...). Opaque to this crate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<String>,
}

impl VisualizationObject {
    pub fn vis_type(&self) -> Option<VisType> {
        self.visualization_class.vis_type()
    }

    pub fn bucket(&self, name: &str) -> Option<&Bucket> {
        bucket_by_name(&self.buckets, name)
    }

    /// All measures across buckets, in bucket order.
    pub fn measures(&self) -> impl Iterator<Item = &Measure> {
        self.buckets.iter().flat_map(Bucket::measures)
    }

    /// All attributes across buckets, in bucket order.
    pub fn attributes(&self) -> impl Iterator<Item = &VisAttribute> {
        self.buckets.iter().flat_map(Bucket::attributes)
    }

    pub fn measure_by_local_identifier(&self, local_id: &str) -> Option<&Measure> {
        self.measures().find(|m| m.local_identifier == local_id)
    }

    pub fn has_derived_measure(&self) -> bool {
        self.measures().any(Measure::is_derived)
    }

    /// Local identifiers of every bucket item, used to prune sorts that
    /// reference items no longer present.
    pub fn item_identifiers(&self) -> Vec<&str> {
        self.buckets
            .iter()
            .flat_map(|b| b.items.iter())
            .map(BucketItem::local_identifier)
            .collect()
    }
}
