//! Correlation types for request tracking
//!
//! Every load/save against the store can carry a correlation context so
//! that errors and log events from one logical operation can be joined
//! across layers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a single load/save operation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a new random RequestId using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for RequestId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trace identifier propagated from whatever service layer sits above
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TraceId(String);

impl TraceId {
    /// Generate a new random TraceId using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TraceId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for TraceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Context carried through operation boundaries for correlation
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: RequestId,
    pub trace_id: Option<TraceId>,
}

impl RequestContext {
    /// Create a new context with a fresh RequestId
    pub fn new() -> Self {
        Self {
            request_id: RequestId::new(),
            trace_id: None,
        }
    }

    /// Add a TraceId to the context
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_generation() {
        let id1 = RequestId::new();
        let id2 = RequestId::new();

        assert_ne!(id1, id2);
        assert!(!id1.as_str().is_empty());
    }

    #[test]
    fn test_request_id_display_matches_str() {
        let id = RequestId::new();
        assert_eq!(format!("{}", id), id.as_str());
    }

    #[test]
    fn test_request_context_defaults() {
        let ctx = RequestContext::new();
        assert!(!ctx.request_id.as_str().is_empty());
        assert!(ctx.trace_id.is_none());
    }

    #[test]
    fn test_request_context_with_trace_id() {
        let trace_id = TraceId::new();
        let ctx = RequestContext::new().with_trace_id(trace_id.clone());
        assert_eq!(ctx.trace_id, Some(trace_id));
    }

    #[test]
    fn test_serialization_round_trip() {
        let id = RequestId::new();
        let json = serde_json::to_string(&id).unwrap();
        let back: RequestId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
