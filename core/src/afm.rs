//! AFM (Attributes-Filters-Measures) and result-spec wire types.
//!
//! This is the execution request format owned by the backend; the structs
//! here mirror it field for field and carry no behavior beyond construction
//! helpers. [`crate::conversion`] produces the AFM from buckets and
//! [`crate::dimensions`] produces the result-spec dimensions.

use serde::{Deserialize, Serialize};

use crate::bucket::TotalType;
use crate::filter::Filter;
use crate::measure::MeasureDefinition;
use crate::objref::ObjRef;
use crate::sort::SortItem;

/// Identifier of the synthetic measure-group dimension item.
pub const MEASURE_GROUP: &str = "measureGroup";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AfmMeasure {
    pub local_identifier: String,
    pub definition: MeasureDefinition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AfmAttribute {
    pub local_identifier: String,
    pub display_form: ObjRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeTotal {
    pub measure_identifier: String,
    pub attribute_identifiers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Afm {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub measures: Vec<AfmMeasure>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AfmAttribute>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<Filter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub native_totals: Vec<NativeTotal>,
}

impl Afm {
    pub fn is_empty(&self) -> bool {
        self.measures.is_empty() && self.attributes.is_empty()
    }

    pub fn has_attribute(&self, local_id: &str) -> bool {
        self.attributes.iter().any(|a| a.local_identifier == local_id)
    }

    pub fn has_measure(&self, local_id: &str) -> bool {
        self.measures.iter().any(|m| m.local_identifier == local_id)
    }

    /// Local identifiers of all measures and attributes in the AFM.
    pub fn item_identifiers(&self) -> Vec<&str> {
        self.attributes
            .iter()
            .map(|a| a.local_identifier.as_str())
            .chain(self.measures.iter().map(|m| m.local_identifier.as_str()))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalItem {
    pub measure_identifier: String,
    #[serde(rename = "type")]
    pub total_type: TotalType,
    pub attribute_identifier: String,
}

/// One result dimension: ordered attribute local identifiers, optionally
/// with the synthetic `measureGroup` item, plus totals owned by this
/// dimension.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimension {
    pub item_identifiers: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub totals: Vec<TotalItem>,
}

impl Dimension {
    pub fn new<I, S>(items: I) -> Dimension
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Dimension {
            item_identifiers: items.into_iter().map(Into::into).collect(),
            totals: Vec::new(),
        }
    }

    pub fn measure_group() -> Dimension {
        Dimension::new([MEASURE_GROUP])
    }

    pub fn empty() -> Dimension {
        Dimension::default()
    }

    pub fn with_totals(mut self, totals: Vec<TotalItem>) -> Dimension {
        self.totals = totals;
        self
    }

    pub fn contains_measure_group(&self) -> bool {
        self.item_identifiers.iter().any(|id| id == MEASURE_GROUP)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSpec {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dimensions: Vec<Dimension>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sorts: Vec<SortItem>,
}
