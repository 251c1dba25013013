//! Buckets: named groups of measures and attributes that determine an
//! item's chart role (view, stack, rows, columns, ...).

use serde::{Deserialize, Serialize};

use crate::measure::Measure;
use crate::objref::ObjRef;

/// Well-known bucket local identifiers.
pub mod names {
    pub const MEASURES: &str = "measures";
    pub const SECONDARY_MEASURES: &str = "secondary_measures";
    pub const TERTIARY_MEASURES: &str = "tertiary_measures";
    /// Row attributes. Named `attribute` for backwards compatibility with
    /// the plain table component.
    pub const ATTRIBUTE: &str = "attribute";
    pub const COLUMNS: &str = "columns";
    pub const VIEW: &str = "view";
    pub const STACK: &str = "stack";
    pub const TREND: &str = "trend";
    pub const SEGMENT: &str = "segment";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisAttribute {
    pub local_identifier: String,
    pub display_form: ObjRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

/// A bucket item is a measure or an attribute. Externally tagged, matching
/// the `{"measure": ...}` / `{"visualizationAttribute": ...}` wire shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BucketItem {
    #[serde(rename = "measure")]
    Measure(Measure),
    #[serde(rename = "visualizationAttribute")]
    Attribute(VisAttribute),
}

impl BucketItem {
    pub fn local_identifier(&self) -> &str {
        match self {
            BucketItem::Measure(m) => &m.local_identifier,
            BucketItem::Attribute(a) => &a.local_identifier,
        }
    }

    pub fn as_measure(&self) -> Option<&Measure> {
        match self {
            BucketItem::Measure(m) => Some(m),
            BucketItem::Attribute(_) => None,
        }
    }

    pub fn as_attribute(&self) -> Option<&VisAttribute> {
        match self {
            BucketItem::Measure(_) => None,
            BucketItem::Attribute(a) => Some(a),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TotalType {
    Sum,
    Avg,
    Max,
    Min,
    Median,
    Nat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Total {
    pub measure_identifier: String,
    #[serde(rename = "type")]
    pub total_type: TotalType,
    pub attribute_identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    pub local_identifier: String,
    #[serde(default)]
    pub items: Vec<BucketItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub totals: Vec<Total>,
}

impl Bucket {
    pub fn new(local_identifier: impl Into<String>) -> Bucket {
        Bucket {
            local_identifier: local_identifier.into(),
            items: Vec::new(),
            totals: Vec::new(),
        }
    }

    pub fn measures(&self) -> impl Iterator<Item = &Measure> {
        self.items.iter().filter_map(BucketItem::as_measure)
    }

    pub fn attributes(&self) -> impl Iterator<Item = &VisAttribute> {
        self.items.iter().filter_map(BucketItem::as_attribute)
    }

    pub fn attribute_identifiers(&self) -> Vec<&str> {
        self.attributes()
            .map(|a| a.local_identifier.as_str())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Finds a bucket by its local identifier.
pub fn bucket_by_name<'a>(buckets: &'a [Bucket], name: &str) -> Option<&'a Bucket> {
    buckets.iter().find(|b| b.local_identifier == name)
}

/// Attribute local identifiers of a bucket, empty when the bucket is absent.
pub fn bucket_attribute_identifiers<'a>(buckets: &'a [Bucket], name: &str) -> Vec<&'a str> {
    bucket_by_name(buckets, name)
        .map(Bucket::attribute_identifiers)
        .unwrap_or_default()
}

/// Whether the named bucket exists and holds at least one item.
pub fn bucket_is_populated(buckets: &[Bucket], name: &str) -> bool {
    bucket_by_name(buckets, name).is_some_and(|b| !b.is_empty())
}
