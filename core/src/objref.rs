//! References to catalog objects.
//!
//! Backend objects (metrics, display forms, insights, dashboards) are
//! addressed either by workspace URI or by textual identifier. Within a
//! single visualization, measures and attributes additionally address each
//! other by local identifier; [`ObjRefInScope`] covers that wider union.

use serde::{Deserialize, Serialize};

/// Reference to a catalog object, by URI or by identifier.
///
/// Serializes to the wire shape the backend owns: `{"uri": ...}` or
/// `{"identifier": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObjRef {
    Uri { uri: String },
    Identifier { identifier: String },
}

impl ObjRef {
    pub fn uri(&self) -> Option<&str> {
        match self {
            ObjRef::Uri { uri } => Some(uri),
            ObjRef::Identifier { .. } => None,
        }
    }

    pub fn identifier(&self) -> Option<&str> {
        match self {
            ObjRef::Uri { .. } => None,
            ObjRef::Identifier { identifier } => Some(identifier),
        }
    }
}

/// Reference usable inside a visualization: a catalog object or a sibling
/// item addressed by its local identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObjRefInScope {
    Obj(ObjRef),
    LocalId {
        #[serde(rename = "localIdentifier")]
        local_identifier: String,
    },
}

impl ObjRefInScope {
    pub fn local_identifier(&self) -> Option<&str> {
        match self {
            ObjRefInScope::LocalId { local_identifier } => Some(local_identifier),
            ObjRefInScope::Obj(_) => None,
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, ObjRefInScope::LocalId { .. })
    }
}

pub fn uri_ref(uri: impl Into<String>) -> ObjRef {
    ObjRef::Uri { uri: uri.into() }
}

pub fn id_ref(identifier: impl Into<String>) -> ObjRef {
    ObjRef::Identifier {
        identifier: identifier.into(),
    }
}

pub fn local_id_ref(local_identifier: impl Into<String>) -> ObjRefInScope {
    ObjRefInScope::LocalId {
        local_identifier: local_identifier.into(),
    }
}
