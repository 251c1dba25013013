//! Filter unions used by visualizations, measures and the AFM.

use serde::{Deserialize, Serialize};

use crate::objref::{ObjRef, ObjRefInScope};

/// Date granularities understood by the backend.
pub mod granularity {
    pub const DATE: &str = "GDC.time.date";
    pub const WEEK: &str = "GDC.time.week_us";
    pub const MONTH: &str = "GDC.time.month";
    pub const QUARTER: &str = "GDC.time.quarter";
    pub const YEAR: &str = "GDC.time.year";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbsoluteDateFilter {
    pub data_set: ObjRef,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelativeDateFilter {
    pub data_set: ObjRef,
    pub granularity: String,
    pub from: i32,
    pub to: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositiveAttributeFilter {
    pub display_form: ObjRef,
    #[serde(rename = "in")]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NegativeAttributeFilter {
    pub display_form: ObjRef,
    #[serde(rename = "notIn")]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparisonOperator {
    #[serde(rename = "GREATER_THAN")]
    GreaterThan,
    #[serde(rename = "GREATER_THAN_OR_EQUAL_TO")]
    GreaterThanOrEqualTo,
    #[serde(rename = "LESS_THAN")]
    LessThan,
    #[serde(rename = "LESS_THAN_OR_EQUAL_TO")]
    LessThanOrEqualTo,
    #[serde(rename = "EQUAL_TO")]
    EqualTo,
    #[serde(rename = "NOT_EQUAL_TO")]
    NotEqualTo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonCondition {
    pub operator: ComparisonOperator,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeOperator {
    #[serde(rename = "BETWEEN")]
    Between,
    #[serde(rename = "NOT_BETWEEN")]
    NotBetween,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeCondition {
    pub operator: RangeOperator,
    pub from: f64,
    pub to: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MeasureValueCondition {
    #[serde(rename = "comparison")]
    Comparison(ComparisonCondition),
    #[serde(rename = "range")]
    Range(RangeCondition),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasureValueFilter {
    pub measure: ObjRefInScope,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<MeasureValueCondition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RankingOperator {
    Top,
    Bottom,
}

/// Keeps only the top/bottom N values of a measure, optionally scoped to
/// specific attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingFilter {
    pub measure: ObjRefInScope,
    pub operator: RankingOperator,
    pub value: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<ObjRefInScope>,
}

/// Filters attachable to a visualization or an AFM. Externally tagged to
/// match the wire shape (`{"relativeDateFilter": ...}` etc.).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Filter {
    #[serde(rename = "absoluteDateFilter")]
    AbsoluteDate(AbsoluteDateFilter),
    #[serde(rename = "relativeDateFilter")]
    RelativeDate(RelativeDateFilter),
    #[serde(rename = "positiveAttributeFilter")]
    PositiveAttribute(PositiveAttributeFilter),
    #[serde(rename = "negativeAttributeFilter")]
    NegativeAttribute(NegativeAttributeFilter),
    #[serde(rename = "measureValueFilter")]
    MeasureValue(MeasureValueFilter),
    #[serde(rename = "rankingFilter")]
    Ranking(RankingFilter),
}

impl Filter {
    pub fn is_date_filter(&self) -> bool {
        matches!(self, Filter::AbsoluteDate(_) | Filter::RelativeDate(_))
    }

    pub fn is_attribute_filter(&self) -> bool {
        matches!(
            self,
            Filter::PositiveAttribute(_) | Filter::NegativeAttribute(_)
        )
    }

    /// Date data set the filter applies to; `None` for non-date filters.
    pub fn date_data_set(&self) -> Option<&ObjRef> {
        match self {
            Filter::AbsoluteDate(f) => Some(&f.data_set),
            Filter::RelativeDate(f) => Some(&f.data_set),
            _ => None,
        }
    }

    /// A negative attribute filter with an empty selection filters nothing
    /// out; the AFM conversion drops it.
    pub fn is_noop(&self) -> bool {
        matches!(self, Filter::NegativeAttribute(f) if f.values.is_empty())
    }
}

/// Filters applicable in the scope of a single measure's definition: date
/// and attribute filters only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MeasureFilter {
    #[serde(rename = "absoluteDateFilter")]
    AbsoluteDate(AbsoluteDateFilter),
    #[serde(rename = "relativeDateFilter")]
    RelativeDate(RelativeDateFilter),
    #[serde(rename = "positiveAttributeFilter")]
    PositiveAttribute(PositiveAttributeFilter),
    #[serde(rename = "negativeAttributeFilter")]
    NegativeAttribute(NegativeAttributeFilter),
}
