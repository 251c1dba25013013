//! Result header descriptors pushed back by the execution backend.
//!
//! Headers describe what each dimension slot of a result contains: the
//! measure group with one header item per measure, and one attribute header
//! per attribute, including the display form (`form_of`) it was computed
//! from. Drill availability is derived from these.

use serde::{Deserialize, Serialize};

use crate::objref::ObjRef;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasureHeaderItem {
    pub local_identifier: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// The attribute the display form belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeOf {
    pub uri: String,
    #[serde(rename = "ref")]
    pub obj_ref: ObjRef,
    pub identifier: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeHeader {
    pub local_identifier: String,
    pub name: String,
    pub uri: String,
    #[serde(rename = "ref")]
    pub obj_ref: ObjRef,
    pub identifier: String,
    pub form_of: AttributeOf,
}

/// One element of an attribute dimension in the result (a row label).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeHeaderItem {
    pub name: String,
    pub uri: String,
}

/// Header of one dimension slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DimensionHeader {
    #[serde(rename = "measureGroupHeader")]
    MeasureGroup { items: Vec<MeasureHeaderItem> },
    #[serde(rename = "attributeHeader")]
    Attribute(AttributeHeader),
}

impl DimensionHeader {
    pub fn measure_items(&self) -> &[MeasureHeaderItem] {
        match self {
            DimensionHeader::MeasureGroup { items } => items,
            DimensionHeader::Attribute(_) => &[],
        }
    }

    pub fn as_attribute(&self) -> Option<&AttributeHeader> {
        match self {
            DimensionHeader::Attribute(header) => Some(header),
            DimensionHeader::MeasureGroup { .. } => None,
        }
    }
}
