//! Stable error codes surfaced through the `code()` accessors on error enums.
//!
//! Codes are part of the public contract: host applications match on them
//! when deciding how to present a failure, so existing values must never be
//! renumbered.

pub const MODEL_NOT_LOCAL_REF: &str = "INSIGHT_MODEL_001";
pub const MODEL_UNKNOWN_LOCAL_ID: &str = "INSIGHT_MODEL_002";

pub const TITLE_CYCLIC_DERIVATION: &str = "INSIGHT_TITLE_001";
pub const TITLE_DUPLICATE_LOCAL_ID: &str = "INSIGHT_TITLE_002";

pub const EXEC_BAD_REQUEST: &str = "INSIGHT_EXEC_001";
pub const EXEC_TOO_LARGE: &str = "INSIGHT_EXEC_002";
pub const EXEC_HTTP: &str = "INSIGHT_EXEC_003";
pub const EXEC_TRANSPORT: &str = "INSIGHT_EXEC_004";
pub const EXEC_DECODE: &str = "INSIGHT_EXEC_005";

pub const CONFIG_NON_POSITIVE_LIMIT: &str = "INSIGHT_CONFIG_001";
