//! Drill classification, validation and the UI-facing config projection.
//!
//! The match over [`DrillDefinition`] is exhaustive: every configured drill
//! classifies to a target type, and structurally broken definitions surface
//! as [`DrillError`] instead of disappearing. A drill is valid only when
//! its origin is among the available drill targets and its target-specific
//! checks hold.

use serde::{Deserialize, Serialize};

use crate::drill::{
    AttributeUrlTarget, AvailableDrillTargets, DrillDefinition, DrillError, ValidationData,
};
use crate::headers::AttributeHeader;
use crate::objref::ObjRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DrillTargetType {
    DrillToInsight,
    DrillToDashboard,
    DrillToUrl,
    DrillDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrillOriginKind {
    Measure,
    Attribute,
}

/// Target payload of a validated drill config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DrillConfigTarget {
    Insight {
        insight: ObjRef,
    },
    Dashboard {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        dashboard: Option<ObjRef>,
    },
    CustomUrl {
        url: String,
    },
    AttributeUrl(AttributeUrlTarget),
    DrillDown {
        display_form: ObjRef,
    },
}

/// UI-ready projection of a drill definition: resolved title, origin kind,
/// attribute list and the classified target. Built on demand, not
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrillConfigItem {
    pub local_identifier: String,
    pub title: String,
    pub origin_kind: DrillOriginKind,
    pub drill_target_type: DrillTargetType,
    pub attributes: Vec<AttributeHeader>,
    /// False when the origin is not among the available drill targets; the
    /// UI renders such items greyed out.
    pub complete: bool,
    pub target: DrillConfigTarget,
}

/// Classifies a definition to its target type. Total over the union.
pub fn drill_target_type(definition: &DrillDefinition) -> DrillTargetType {
    match definition {
        DrillDefinition::DrillToInsight { .. } => DrillTargetType::DrillToInsight,
        DrillDefinition::DrillToDashboard { .. } => DrillTargetType::DrillToDashboard,
        DrillDefinition::DrillToCustomUrl { .. } | DrillDefinition::DrillToAttributeUrl { .. } => {
            DrillTargetType::DrillToUrl
        }
        DrillDefinition::DrillDown { .. } => DrillTargetType::DrillDown,
    }
}

/// Builds the UI config for a definition against the available targets.
pub fn create_config(
    definition: &DrillDefinition,
    targets: &AvailableDrillTargets,
) -> Result<DrillConfigItem, DrillError> {
    let local_identifier = definition.origin_local_identifier()?.to_string();
    let origin_kind = if definition.origin().is_measure() {
        DrillOriginKind::Measure
    } else {
        DrillOriginKind::Attribute
    };

    let (title, attributes, complete) = match origin_kind {
        DrillOriginKind::Measure => match targets.measure(&local_identifier) {
            Some(target) => (
                target.measure.name.clone(),
                target.attributes.clone(),
                true,
            ),
            None => (local_identifier.clone(), Vec::new(), false),
        },
        DrillOriginKind::Attribute => match targets.attribute(&local_identifier) {
            Some(target) => (target.attribute.name.clone(), Vec::new(), true),
            None => (local_identifier.clone(), Vec::new(), false),
        },
    };

    let target = match definition {
        DrillDefinition::DrillToInsight { target, .. } => DrillConfigTarget::Insight {
            insight: target.clone(),
        },
        DrillDefinition::DrillToDashboard { target, .. } => DrillConfigTarget::Dashboard {
            dashboard: target.clone(),
        },
        DrillDefinition::DrillToCustomUrl { url, .. } => {
            DrillConfigTarget::CustomUrl { url: url.clone() }
        }
        DrillDefinition::DrillToAttributeUrl { target, .. } => {
            DrillConfigTarget::AttributeUrl(target.clone())
        }
        DrillDefinition::DrillDown { target, .. } => DrillConfigTarget::DrillDown {
            display_form: target.clone(),
        },
    };

    Ok(DrillConfigItem {
        local_identifier,
        title,
        origin_kind,
        drill_target_type: drill_target_type(definition),
        attributes,
        complete,
        target,
    })
}

/// Validates a definition against targets, dashboards and display forms.
///
/// Validity is monotonic in the available targets: adding the origin to the
/// supported set never invalidates a previously valid drill.
pub fn is_valid(definition: &DrillDefinition, data: &ValidationData) -> Result<bool, DrillError> {
    let local_identifier = definition.origin_local_identifier()?;
    let origin_supported = if definition.origin().is_measure() {
        data.available_targets.measure(local_identifier).is_some()
    } else {
        data.available_targets.attribute(local_identifier).is_some()
    };
    if !origin_supported {
        return Ok(false);
    }

    let valid = match definition {
        DrillDefinition::DrillToInsight { .. } => true,
        DrillDefinition::DrillToDashboard { target, .. } => match target {
            // No target drills within the current dashboard.
            None => true,
            Some(target_ref) => data.dashboards.iter().any(|d| &d.obj_ref == target_ref),
        },
        DrillDefinition::DrillToCustomUrl { url, .. } => is_custom_url_valid(url, data),
        DrillDefinition::DrillToAttributeUrl { target, .. } => {
            is_attribute_url_valid(target, data)
        }
        DrillDefinition::DrillDown { .. } => true,
    };
    Ok(valid)
}

/// Every `{attribute_title(identifier)}` parameter of a custom URL must
/// name a known display form. With no display forms loaded the URL is not
/// verifiable and passes.
pub fn is_custom_url_valid(url: &str, data: &ValidationData) -> bool {
    let Some(display_forms) = &data.display_forms else {
        return true;
    };
    custom_url_parameters(url)
        .iter()
        .all(|param| display_forms.iter().any(|df| df.identifier == *param))
}

fn is_attribute_url_valid(target: &AttributeUrlTarget, data: &ValidationData) -> bool {
    let Some(display_forms) = &data.display_forms else {
        return false;
    };
    let insight_form = display_forms
        .iter()
        .find(|df| df.obj_ref == target.display_form);
    let hyperlink_form = display_forms
        .iter()
        .find(|df| df.obj_ref == target.hyperlink_display_form);

    match (insight_form, hyperlink_form) {
        (Some(_), Some(hyperlink)) => hyperlink.is_hyperlink(),
        _ => false,
    }
}

/// Display-form identifiers referenced by `{attribute_title(...)}`
/// placeholders in a custom URL template.
pub fn custom_url_parameters(url: &str) -> Vec<&str> {
    const OPEN: &str = "{attribute_title(";
    const CLOSE: &str = ")}";

    let mut parameters = Vec::new();
    let mut rest = url;
    while let Some(start) = rest.find(OPEN) {
        rest = &rest[start + OPEN.len()..];
        match rest.find(CLOSE) {
            Some(end) => {
                parameters.push(&rest[..end]);
                rest = &rest[end + CLOSE.len()..];
            }
            None => break,
        }
    }
    parameters
}
