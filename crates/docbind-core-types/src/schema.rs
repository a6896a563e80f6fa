//! Canonical schema constants for structured logging and events
//!
//! Every log line emitted by the lifecycle and store layers uses these
//! field keys, so events can be filtered and joined downstream.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";
pub const FIELD_TRACE_ID: &str = "trace_id";

// Persistence identifiers
pub const FIELD_MODEL: &str = "model";
pub const FIELD_TABLE: &str = "table";
pub const FIELD_KEY: &str = "key";
pub const FIELD_API: &str = "api";
pub const FIELD_PRIMARY_KEY: &str = "primary_key";

// Store bootstrap
pub const FIELD_REGION: &str = "region";
pub const FIELD_ACCESS_KEY_ID: &str = "access_key_id";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
