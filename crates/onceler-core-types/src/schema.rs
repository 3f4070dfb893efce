//! Canonical schema constants for structured logging
//!
//! Log consumers key off these names; changing one is a breaking change.

pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_BATCH_ID: &str = "batch_id";

// Migration identifiers
pub const FIELD_MIGRATION: &str = "migration";
pub const FIELD_HASH: &str = "hash";

// Batch sizes
pub const FIELD_BATCH_LEN: &str = "batch_len";
pub const FIELD_APPLIED: &str = "applied";
pub const FIELD_VERIFIED: &str = "verified";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
