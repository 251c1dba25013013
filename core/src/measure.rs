//! Measures and their definition union.
//!
//! A measure is either simple (references a catalog metric or fact),
//! arithmetic (composes sibling measures by operator), or derived for
//! over-time comparison (period-over-period / previous period). Derived and
//! arithmetic measures reference their masters by local identifier; those
//! identifiers must resolve to another measure in the same visualization.

use serde::{Deserialize, Serialize};

use crate::filter::MeasureFilter;
use crate::objref::ObjRef;

/// Aggregation functions applicable when a simple measure is built from a
/// logical-data-model fact. Ignored by the backend for MAQL metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasureAggregation {
    Sum,
    Count,
    Avg,
    Min,
    Max,
    Median,
    Runsum,
}

/// Operators available to arithmetic measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArithmeticOperator {
    Sum,
    Difference,
    Multiplication,
    Ratio,
    Change,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleMeasureDefinition {
    /// Reference to a MAQL metric or LDM fact object.
    pub item: ObjRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<MeasureAggregation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<MeasureFilter>,
    /// Compute as % of total instead of actual values.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub compute_ratio: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArithmeticMeasureDefinition {
    pub measure_identifiers: Vec<String>,
    pub operator: ArithmeticOperator,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopMeasureDefinition {
    pub measure_identifier: String,
    pub pop_attribute: ObjRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviousPeriodDateDataSet {
    pub data_set: ObjRef,
    pub periods_ago: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviousPeriodMeasureDefinition {
    pub measure_identifier: String,
    pub date_data_sets: Vec<PreviousPeriodDateDataSet>,
}

/// Measure definition union. Externally tagged so it reproduces the wire
/// shape exactly (`{"measureDefinition": ...}`, `{"popMeasureDefinition":
/// ...}`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MeasureDefinition {
    #[serde(rename = "measureDefinition")]
    Simple(SimpleMeasureDefinition),
    #[serde(rename = "arithmeticMeasure")]
    Arithmetic(ArithmeticMeasureDefinition),
    #[serde(rename = "popMeasureDefinition")]
    Pop(PopMeasureDefinition),
    #[serde(rename = "previousPeriodMeasure")]
    PreviousPeriod(PreviousPeriodMeasureDefinition),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measure {
    pub local_identifier: String,
    pub definition: MeasureDefinition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl Measure {
    pub fn is_simple(&self) -> bool {
        matches!(self.definition, MeasureDefinition::Simple(_))
    }

    pub fn is_arithmetic(&self) -> bool {
        matches!(self.definition, MeasureDefinition::Arithmetic(_))
    }

    pub fn is_pop(&self) -> bool {
        matches!(self.definition, MeasureDefinition::Pop(_))
    }

    pub fn is_previous_period(&self) -> bool {
        matches!(self.definition, MeasureDefinition::PreviousPeriod(_))
    }

    /// Derived measures are the over-time comparison kinds: PoP and
    /// previous period. Arithmetic measures are composed, not derived.
    pub fn is_derived(&self) -> bool {
        self.is_pop() || self.is_previous_period()
    }

    /// The display name users see: alias wins over title.
    pub fn effective_title(&self) -> Option<&str> {
        self.alias.as_deref().or(self.title.as_deref())
    }

    /// Catalog reference of a simple measure; `None` for composed/derived.
    pub fn item(&self) -> Option<&ObjRef> {
        match &self.definition {
            MeasureDefinition::Simple(def) => Some(&def.item),
            _ => None,
        }
    }

    pub fn aggregation(&self) -> Option<MeasureAggregation> {
        match &self.definition {
            MeasureDefinition::Simple(def) => def.aggregation,
            _ => None,
        }
    }

    pub fn filters(&self) -> &[MeasureFilter] {
        match &self.definition {
            MeasureDefinition::Simple(def) => &def.filters,
            _ => &[],
        }
    }

    /// Master measure local identifier of a derived (PoP/previous period)
    /// measure.
    pub fn master_identifier(&self) -> Option<&str> {
        match &self.definition {
            MeasureDefinition::Pop(def) => Some(&def.measure_identifier),
            MeasureDefinition::PreviousPeriod(def) => Some(&def.measure_identifier),
            _ => None,
        }
    }

    pub fn arithmetic_operands(&self) -> Option<&[String]> {
        match &self.definition {
            MeasureDefinition::Arithmetic(def) => Some(&def.measure_identifiers),
            _ => None,
        }
    }

    pub fn arithmetic_operator(&self) -> Option<ArithmeticOperator> {
        match &self.definition {
            MeasureDefinition::Arithmetic(def) => Some(def.operator),
            _ => None,
        }
    }

    pub fn pop_attribute(&self) -> Option<&ObjRef> {
        match &self.definition {
            MeasureDefinition::Pop(def) => Some(&def.pop_attribute),
            _ => None,
        }
    }

    pub fn previous_period_date_data_sets(&self) -> Option<&[PreviousPeriodDateDataSet]> {
        match &self.definition {
            MeasureDefinition::PreviousPeriod(def) => Some(&def.date_data_sets),
            _ => None,
        }
    }

    pub fn computes_ratio(&self) -> bool {
        match &self.definition {
            MeasureDefinition::Simple(def) => def.compute_ratio,
            _ => false,
        }
    }

    /// Returns a copy with compute-ratio disabled; returns `self` unchanged
    /// when it was not enabled in the first place.
    pub fn without_compute_ratio(&self) -> Measure {
        match &self.definition {
            MeasureDefinition::Simple(def) if def.compute_ratio => {
                let mut disabled = self.clone();
                disabled.definition = MeasureDefinition::Simple(SimpleMeasureDefinition {
                    compute_ratio: false,
                    ..def.clone()
                });
                disabled
            }
            _ => self.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objref::uri_ref;

    fn simple(local_id: &str) -> Measure {
        Measure {
            local_identifier: local_id.to_string(),
            definition: MeasureDefinition::Simple(SimpleMeasureDefinition {
                item: uri_ref("/gdc/md/p/obj/1"),
                aggregation: None,
                filters: Vec::new(),
                compute_ratio: false,
            }),
            title: Some("Revenue".to_string()),
            alias: None,
            format: None,
        }
    }

    #[test]
    fn definition_roundtrips_through_wire_tags() {
        let measure = Measure {
            local_identifier: "m1_pop".to_string(),
            definition: MeasureDefinition::Pop(PopMeasureDefinition {
                measure_identifier: "m1".to_string(),
                pop_attribute: uri_ref("/gdc/md/p/obj/1514"),
            }),
            title: None,
            alias: None,
            format: None,
        };

        let json = serde_json::to_value(&measure).expect("serialize pop measure");
        assert!(json["definition"]["popMeasureDefinition"].is_object());

        let parsed: Measure = serde_json::from_value(json).expect("deserialize pop measure");
        assert_eq!(parsed.master_identifier(), Some("m1"));
        assert!(parsed.is_derived());
    }

    #[test]
    fn effective_title_prefers_alias() {
        let mut measure = simple("m1");
        assert_eq!(measure.effective_title(), Some("Revenue"));
        measure.alias = Some("Net revenue".to_string());
        assert_eq!(measure.effective_title(), Some("Net revenue"));
    }

    #[test]
    fn without_compute_ratio_is_identity_when_disabled() {
        let measure = simple("m1");
        assert_eq!(measure.without_compute_ratio(), measure);
    }

    #[test]
    fn without_compute_ratio_strips_the_flag() {
        let mut measure = simple("m1");
        if let MeasureDefinition::Simple(def) = &mut measure.definition {
            def.compute_ratio = true;
        }
        let disabled = measure.without_compute_ratio();
        assert!(!disabled.computes_ratio());
        assert!(measure.computes_ratio(), "original stays untouched");
    }
}
