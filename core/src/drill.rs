//! Drill definitions and the targets they resolve against.
//!
//! A drill definition is configured on a widget or insight at load time and
//! describes where a click on a measure or attribute leads: another
//! insight, another dashboard, a URL, or one step down an attribute
//! hierarchy. Definitions are never mutated, only matched and filtered
//! against the drill targets the last execution made available.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error_codes;
use crate::headers::{AttributeHeader, MeasureHeaderItem};
use crate::objref::{ObjRef, ObjRefInScope};

/// Display-form type marking hyperlink display forms.
pub const HYPERLINK_DISPLAY_FORM_TYPE: &str = "GDC.link";

#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum DrillError {
    #[error(
        "[INSIGHT_MODEL_001] drill origin must reference a local identifier, got {origin:?}"
    )]
    OriginNotLocal { origin: ObjRefInScope },
}

impl DrillError {
    pub fn code(&self) -> &'static str {
        match self {
            DrillError::OriginNotLocal { .. } => error_codes::MODEL_NOT_LOCAL_REF,
        }
    }
}

/// What the user clicked to start the drill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrillOrigin {
    #[serde(rename = "drillFromMeasure")]
    Measure { measure: ObjRefInScope },
    #[serde(rename = "drillFromAttribute")]
    Attribute { attribute: ObjRefInScope },
}

impl DrillOrigin {
    pub fn from_measure(local_id: impl Into<String>) -> DrillOrigin {
        DrillOrigin::Measure {
            measure: ObjRefInScope::LocalId {
                local_identifier: local_id.into(),
            },
        }
    }

    pub fn from_attribute(local_id: impl Into<String>) -> DrillOrigin {
        DrillOrigin::Attribute {
            attribute: ObjRefInScope::LocalId {
                local_identifier: local_id.into(),
            },
        }
    }

    pub fn reference(&self) -> &ObjRefInScope {
        match self {
            DrillOrigin::Measure { measure } => measure,
            DrillOrigin::Attribute { attribute } => attribute,
        }
    }

    /// Local identifier of the origin. Non-local origins are a
    /// configuration error, reported explicitly.
    pub fn local_identifier(&self) -> Result<&str, DrillError> {
        self.reference()
            .local_identifier()
            .ok_or_else(|| DrillError::OriginNotLocal {
                origin: self.reference().clone(),
            })
    }

    pub fn is_measure(&self) -> bool {
        matches!(self, DrillOrigin::Measure { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeUrlTarget {
    /// Display form shown in the insight.
    pub display_form: ObjRef,
    /// Hyperlink display form supplying the URL values.
    pub hyperlink_display_form: ObjRef,
}

/// Where a drill leads. Internally tagged with `type`, matching the widget
/// configuration wire shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DrillDefinition {
    #[serde(rename_all = "camelCase")]
    DrillToInsight { origin: DrillOrigin, target: ObjRef },
    #[serde(rename_all = "camelCase")]
    DrillToDashboard {
        origin: DrillOrigin,
        /// `None` drills within the current dashboard.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<ObjRef>,
    },
    #[serde(rename_all = "camelCase")]
    DrillToCustomUrl { origin: DrillOrigin, url: String },
    #[serde(rename_all = "camelCase")]
    DrillToAttributeUrl {
        origin: DrillOrigin,
        target: AttributeUrlTarget,
    },
    #[serde(rename_all = "camelCase")]
    DrillDown {
        origin: DrillOrigin,
        /// Display form of the next hierarchy step.
        target: ObjRef,
    },
}

impl DrillDefinition {
    pub fn origin(&self) -> &DrillOrigin {
        match self {
            DrillDefinition::DrillToInsight { origin, .. }
            | DrillDefinition::DrillToDashboard { origin, .. }
            | DrillDefinition::DrillToCustomUrl { origin, .. }
            | DrillDefinition::DrillToAttributeUrl { origin, .. }
            | DrillDefinition::DrillDown { origin, .. } => origin,
        }
    }

    pub fn origin_local_identifier(&self) -> Result<&str, DrillError> {
        self.origin().local_identifier()
    }
}

/// A measure the last execution exposed as drillable, with the attributes
/// that slice it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableDrillTargetMeasure {
    pub measure: MeasureHeaderItem,
    #[serde(default)]
    pub attributes: Vec<AttributeHeader>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableDrillTargetAttribute {
    pub attribute: AttributeHeader,
}

/// Drill targets computed from the last execution's pushed metadata.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableDrillTargets {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub measures: Vec<AvailableDrillTargetMeasure>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AvailableDrillTargetAttribute>,
}

impl AvailableDrillTargets {
    pub fn measure(&self, local_id: &str) -> Option<&AvailableDrillTargetMeasure> {
        self.measures
            .iter()
            .find(|m| m.measure.local_identifier == local_id)
    }

    pub fn attribute(&self, local_id: &str) -> Option<&AvailableDrillTargetAttribute> {
        self.attributes
            .iter()
            .find(|a| a.attribute.local_identifier == local_id)
    }
}

/// Dashboard listed for drill-target validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMeta {
    #[serde(rename = "ref")]
    pub obj_ref: ObjRef,
    pub identifier: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

/// Attribute display form listed for drill-target validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDisplayFormMeta {
    #[serde(rename = "ref")]
    pub obj_ref: ObjRef,
    pub identifier: String,
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// `GDC.link` marks hyperlink display forms; plain forms carry nothing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_form_type: Option<String>,
}

impl AttributeDisplayFormMeta {
    pub fn is_hyperlink(&self) -> bool {
        self.display_form_type.as_deref() == Some(HYPERLINK_DISPLAY_FORM_TYPE)
    }
}

/// Everything a drill definition is validated against.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationData {
    pub dashboards: Vec<DashboardMeta>,
    pub available_targets: AvailableDrillTargets,
    /// `None` when display forms were not loaded; URL parameter checks are
    /// then skipped for custom URLs and fail for attribute URLs.
    pub display_forms: Option<Vec<AttributeDisplayFormMeta>>,
}
