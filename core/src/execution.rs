//! Execution: request envelope, result model and the backend client.
//!
//! The backend contract is `execute(project, request) -> result` where the
//! result carries raw data rows, dimension headers, an emptiness flag and
//! warnings. Backend failures surface as [`ExecuteError`]; HTTP 400 maps to
//! a bad-request kind and 413 to a too-large kind so hosts can present
//! them distinctly. No retry logic lives here.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::afm::{Afm, ResultSpec};
use crate::drill::{AvailableDrillTargetAttribute, AvailableDrillTargetMeasure, AvailableDrillTargets};
use crate::error_codes;
use crate::headers::{AttributeHeader, AttributeHeaderItem, DimensionHeader, MeasureHeaderItem};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionRequest {
    pub afm: Afm,
    pub result_spec: ResultSpec,
}

/// One data cell. The backend sends numbers as strings; missing values are
/// nulls. Parsing happens at presentation time so non-numeric values can
/// render as placeholders instead of failing the whole result.
pub type DataValue = Option<String>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    /// Row-major data, one row per element of the first dimension. Older
    /// backends send this under `data`.
    #[serde(default, alias = "data")]
    pub raw_data: Vec<Vec<DataValue>>,
    /// Headers per dimension slot, in dimension order.
    #[serde(default)]
    pub headers: Vec<Vec<DimensionHeader>>,
    /// Attribute elements per dimension and attribute header, addressed as
    /// `header_items[dimension][header][element]`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub header_items: Vec<Vec<Vec<AttributeHeaderItem>>>,
    #[serde(default)]
    pub is_empty: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl ExecutionResult {
    /// Measure header items of the first measure-group header found.
    pub fn measure_header_items(&self) -> &[MeasureHeaderItem] {
        self.headers
            .iter()
            .flatten()
            .find_map(|h| match h {
                DimensionHeader::MeasureGroup { items } => Some(items.as_slice()),
                DimensionHeader::Attribute(_) => None,
            })
            .unwrap_or(&[])
    }

    /// All attribute headers across dimensions, in dimension order.
    pub fn attribute_headers(&self) -> Vec<&AttributeHeader> {
        self.headers
            .iter()
            .flatten()
            .filter_map(DimensionHeader::as_attribute)
            .collect()
    }

    /// Attribute elements of the given dimension's first attribute header.
    pub fn attribute_elements(&self, dimension: usize) -> &[AttributeHeaderItem] {
        self.header_items
            .get(dimension)
            .and_then(|headers| headers.first())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Execution request and result travelling together; drill payloads embed
/// this so hosts can correlate a click with the data behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataView {
    pub request: ExecutionRequest,
    pub result: ExecutionResult,
}

/// Drill targets this execution makes available: every measure header item,
/// each sliceable by all attribute headers, plus the attributes themselves.
pub fn available_drill_targets(result: &ExecutionResult) -> AvailableDrillTargets {
    let attributes: Vec<AttributeHeader> =
        result.attribute_headers().into_iter().cloned().collect();

    AvailableDrillTargets {
        measures: result
            .measure_header_items()
            .iter()
            .map(|item| AvailableDrillTargetMeasure {
                measure: item.clone(),
                attributes: attributes.clone(),
            })
            .collect(),
        attributes: attributes
            .into_iter()
            .map(|attribute| AvailableDrillTargetAttribute { attribute })
            .collect(),
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExecuteError {
    #[error("[INSIGHT_EXEC_001] bad execution request: {message}. Suggestion: check measure and attribute references in the AFM.")]
    BadRequest { message: String },

    #[error("[INSIGHT_EXEC_002] result too large. Suggestion: reduce attributes or add filters.")]
    TooLarge,

    #[error("[INSIGHT_EXEC_003] backend returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("[INSIGHT_EXEC_004] transport error: {0}")]
    Transport(String),

    #[error("[INSIGHT_EXEC_005] malformed execution response: {0}")]
    Decode(String),
}

impl ExecuteError {
    pub fn code(&self) -> &'static str {
        match self {
            ExecuteError::BadRequest { .. } => error_codes::EXEC_BAD_REQUEST,
            ExecuteError::TooLarge => error_codes::EXEC_TOO_LARGE,
            ExecuteError::Http { .. } => error_codes::EXEC_HTTP,
            ExecuteError::Transport(_) => error_codes::EXEC_TRANSPORT,
            ExecuteError::Decode(_) => error_codes::EXEC_DECODE,
        }
    }
}

/// Backend execution collaborator.
pub trait ExecutionClient {
    fn execute(
        &self,
        project: &str,
        request: &ExecutionRequest,
    ) -> Result<ExecutionResult, ExecuteError>;
}

#[derive(Debug, Clone)]
pub struct ExecutionConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ExecutionConfig {
    pub fn from_env() -> Self {
        let base_url = std::env::var("INSIGHT_BACKEND_URL")
            .unwrap_or_else(|_| "https://localhost:8443".to_string());
        let timeout = std::env::var("INSIGHT_BACKEND_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(30));
        Self { base_url, timeout }
    }
}

/// Blocking HTTP execution client.
pub struct HttpExecutionClient {
    config: ExecutionConfig,
    http: ureq::Agent,
}

impl HttpExecutionClient {
    pub fn from_env() -> Self {
        Self::new(ExecutionConfig::from_env())
    }

    pub fn new(config: ExecutionConfig) -> Self {
        let http = ureq::AgentBuilder::new()
            .timeout_read(config.timeout)
            .timeout_write(config.timeout)
            .timeout_connect(config.timeout)
            .build();
        Self { config, http }
    }
}

impl ExecutionClient for HttpExecutionClient {
    fn execute(
        &self,
        project: &str,
        request: &ExecutionRequest,
    ) -> Result<ExecutionResult, ExecuteError> {
        let url = format!(
            "{}/gdc/app/projects/{}/executeAfm",
            self.config.base_url.trim_end_matches('/'),
            project
        );

        let response = self
            .http
            .post(&url)
            .set("Content-Type", "application/json")
            .send_json(serde_json::json!({ "execution": request }));

        match response {
            Ok(response) => response
                .into_json::<ExecutionResult>()
                .map_err(|err| ExecuteError::Decode(err.to_string())),
            Err(ureq::Error::Status(400, response)) => Err(ExecuteError::BadRequest {
                message: response.into_string().unwrap_or_default().trim().to_string(),
            }),
            Err(ureq::Error::Status(413, _)) => Err(ExecuteError::TooLarge),
            Err(ureq::Error::Status(status, response)) => Err(ExecuteError::Http {
                status,
                message: response.into_string().unwrap_or_default().trim().to_string(),
            }),
            Err(err) => Err(ExecuteError::Transport(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objref::uri_ref;

    fn result_with_headers() -> ExecutionResult {
        ExecutionResult {
            raw_data: vec![vec![Some("42".to_string())]],
            headers: vec![
                vec![DimensionHeader::MeasureGroup {
                    items: vec![MeasureHeaderItem {
                        local_identifier: "m1".to_string(),
                        name: "Revenue".to_string(),
                        format: Some("#,##0".to_string()),
                    }],
                }],
                vec![DimensionHeader::Attribute(AttributeHeader {
                    local_identifier: "a1".to_string(),
                    name: "City".to_string(),
                    uri: "/gdc/md/p/obj/400".to_string(),
                    obj_ref: uri_ref("/gdc/md/p/obj/400"),
                    identifier: "attr.city".to_string(),
                    form_of: crate::headers::AttributeOf {
                        uri: "/gdc/md/p/obj/401".to_string(),
                        obj_ref: uri_ref("/gdc/md/p/obj/401"),
                        identifier: "attr.city.form".to_string(),
                        name: "City".to_string(),
                    },
                })],
            ],
            header_items: Vec::new(),
            is_empty: false,
            warnings: Vec::new(),
        }
    }

    #[test]
    fn header_readers_find_measures_and_attributes() {
        let result = result_with_headers();
        assert_eq!(result.measure_header_items().len(), 1);
        assert_eq!(result.attribute_headers().len(), 1);
        assert_eq!(result.attribute_headers()[0].name, "City");
    }

    #[test]
    fn drill_targets_pair_every_measure_with_all_attributes() {
        let targets = available_drill_targets(&result_with_headers());
        assert_eq!(targets.measures.len(), 1);
        assert_eq!(targets.measures[0].attributes.len(), 1);
        assert!(targets.measure("m1").is_some());
        assert!(targets.attribute("a1").is_some());
        assert!(targets.measure("m2").is_none());
    }

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(ExecuteError::TooLarge.code(), "INSIGHT_EXEC_002");
        assert_eq!(
            ExecuteError::BadRequest {
                message: String::new()
            }
            .code(),
            "INSIGHT_EXEC_001"
        );
    }
}
