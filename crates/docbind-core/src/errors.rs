use docbind_core_types::{RequestId, TraceId};
use thiserror::Error;

/// Result type alias using DocBindError
pub type Result<T> = std::result::Result<T, DocBindError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// A stable, structured classification of every error the mapping layer
/// can surface. Each kind maps to a stable error code used for
/// programmatic handling, testing, and log filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbErrorKind {
    // Binding / catalogue setup
    Configuration,
    UnknownModel,

    // Normalization
    SchemaMismatch,
    NotImplemented,

    // Lifecycle
    NotFound,

    // Integration/IO
    Persistence,
    Serialization,
    Io,
    Concurrency,

    // Internal
    Internal,
}

impl DbErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            DbErrorKind::Configuration => "ERR_CONFIGURATION",
            DbErrorKind::UnknownModel => "ERR_UNKNOWN_MODEL",
            DbErrorKind::SchemaMismatch => "ERR_SCHEMA_MISMATCH",
            DbErrorKind::NotImplemented => "ERR_NOT_IMPLEMENTED",
            DbErrorKind::NotFound => "ERR_NOT_FOUND",
            DbErrorKind::Persistence => "ERR_PERSISTENCE",
            DbErrorKind::Serialization => "ERR_SERIALIZATION",
            DbErrorKind::Io => "ERR_IO",
            DbErrorKind::Concurrency => "ERR_CONCURRENCY",
            DbErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries the kind classification plus operation and persistence context
/// (model, table, key) for debugging and structured logging.
#[derive(Debug, Clone)]
pub struct DbError {
    kind: DbErrorKind,
    op: Option<String>,
    model: Option<String>,
    table: Option<String>,
    key: Option<String>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
    source: Option<Box<DbError>>,
}

impl DbError {
    /// Create a new error with the specified kind
    pub fn new(kind: DbErrorKind) -> Self {
        Self {
            kind,
            op: None,
            model: None,
            table: None,
            key: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add model name context
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Add table name context
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Add primary key context
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add trace ID context
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: DbError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> DbErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the model name context, if any
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// Get the table name context, if any
    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    /// Get the primary key context, if any
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Get the trace ID context, if any
    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&DbError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for DbError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(model) = &self.model {
            write!(f, " (model: {})", model)?;
        }
        if let Some(table) = &self.table {
            write!(f, " (table: {})", table)?;
        }
        if let Some(key) = &self.key {
            write!(f, " (key: {})", key)?;
        }
        Ok(())
    }
}

impl std::error::Error for DbError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for DocBind operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocBindError {
    // ===== Binding / catalogue setup =====
    /// Required static binding attribute is missing or empty
    #[error("Binding for model {model} is missing required attribute '{attribute}'")]
    MissingBindingAttribute { model: String, attribute: String },

    /// Binding configuration declared twice for the same model
    #[error("Binding already declared for model: {model}")]
    DuplicateBinding { model: String },

    /// Model registered twice in the schema catalogue
    #[error("Model already registered in catalogue: {model}")]
    DuplicateModel { model: String },

    /// Model name has no entry in the schema catalogue
    #[error("Unknown model: {model}")]
    UnknownModel { model: String },

    /// Binding requested for a model with no declared configuration
    #[error("No binding configuration declared for model: {model}")]
    UndeclaredBinding { model: String },

    /// Table identifier is not a valid store identifier
    #[error("Invalid table identifier: {table}")]
    InvalidTableIdentifier { table: String },

    /// Required store configuration value is absent
    #[error("Missing required configuration value: {name}")]
    MissingConfigValue { name: String },

    // ===== Normalization =====
    /// Raw field has no matching property in the model schema
    #[error("Field '{field}' is not declared in the schema of model {model}")]
    UnknownField { model: String, field: String },

    /// Raw value shape disagrees with its schema descriptor
    #[error("Schema mismatch for field '{field}': expected {expected}, got {actual}")]
    SchemaMismatch {
        field: String,
        expected: String,
        actual: String,
    },

    /// Schema shape the normalizer does not support
    #[error("Unsupported schema shape for field '{field}': {reason}")]
    NotImplemented { field: String, reason: String },

    // ===== Lifecycle =====
    /// No record exists in the store for the given key
    #[error("Table {table} has no item with {primary_key}={key}")]
    ItemNotFound {
        table: String,
        primary_key: String,
        key: String,
    },

    // ===== Integration/IO =====
    /// Store transport failure (network, auth, throttling, SQL)
    #[error("Store operation '{op}' failed: {reason}")]
    Persistence { op: String, reason: String },

    /// Record could not be serialized or deserialized at the store boundary
    #[error("Serialization failed: {reason}")]
    Serialization { reason: String },

    /// Filesystem failure while opening or managing the store
    #[error("IO failure in '{op}': {reason}")]
    Io { op: String, reason: String },

    /// A shared resource lock was poisoned by a panicking holder
    #[error("Lock poisoned for shared resource: {resource}")]
    LockPoisoned { resource: String },

    /// Invariant violation inside the mapping layer
    #[error("Internal error: {reason}")]
    Internal { reason: String },
}

impl DocBindError {
    /// Classify this error into the canonical kind taxonomy
    pub fn kind(&self) -> DbErrorKind {
        match self {
            DocBindError::MissingBindingAttribute { .. }
            | DocBindError::DuplicateBinding { .. }
            | DocBindError::DuplicateModel { .. }
            | DocBindError::UndeclaredBinding { .. }
            | DocBindError::InvalidTableIdentifier { .. }
            | DocBindError::MissingConfigValue { .. } => DbErrorKind::Configuration,
            DocBindError::UnknownModel { .. } => DbErrorKind::UnknownModel,
            DocBindError::UnknownField { .. } | DocBindError::SchemaMismatch { .. } => {
                DbErrorKind::SchemaMismatch
            }
            DocBindError::NotImplemented { .. } => DbErrorKind::NotImplemented,
            DocBindError::ItemNotFound { .. } => DbErrorKind::NotFound,
            DocBindError::Persistence { .. } => DbErrorKind::Persistence,
            DocBindError::Serialization { .. } => DbErrorKind::Serialization,
            DocBindError::Io { .. } => DbErrorKind::Io,
            DocBindError::LockPoisoned { .. } => DbErrorKind::Concurrency,
            DocBindError::Internal { .. } => DbErrorKind::Internal,
        }
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }
}

impl From<DocBindError> for DbError {
    fn from(err: DocBindError) -> Self {
        let canonical = DbError::new(err.kind()).with_message(err.to_string());
        match err {
            DocBindError::MissingBindingAttribute { model, .. }
            | DocBindError::DuplicateBinding { model }
            | DocBindError::DuplicateModel { model }
            | DocBindError::UndeclaredBinding { model }
            | DocBindError::UnknownModel { model }
            | DocBindError::UnknownField { model, .. } => canonical.with_model(model),
            DocBindError::ItemNotFound { table, key, .. } => {
                canonical.with_table(table).with_key(key)
            }
            DocBindError::Persistence { op, .. } | DocBindError::Io { op, .. } => {
                canonical.with_op(op)
            }
            _ => canonical,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes_are_stable() {
        assert_eq!(DbErrorKind::Configuration.code(), "ERR_CONFIGURATION");
        assert_eq!(DbErrorKind::NotFound.code(), "ERR_NOT_FOUND");
        assert_eq!(DbErrorKind::SchemaMismatch.code(), "ERR_SCHEMA_MISMATCH");
        assert_eq!(DbErrorKind::NotImplemented.code(), "ERR_NOT_IMPLEMENTED");
    }

    #[test]
    fn test_not_found_message_names_table_and_key() {
        let err = DocBindError::ItemNotFound {
            table: "users".to_string(),
            primary_key: "user_id".to_string(),
            key: "u-1".to_string(),
        };
        assert_eq!(err.to_string(), "Table users has no item with user_id=u-1");
        assert_eq!(err.kind(), DbErrorKind::NotFound);
    }

    #[test]
    fn test_canonical_conversion_carries_context() {
        let err = DocBindError::ItemNotFound {
            table: "users".to_string(),
            primary_key: "user_id".to_string(),
            key: "u-1".to_string(),
        };
        let canonical: DbError = err.into();
        assert_eq!(canonical.kind(), DbErrorKind::NotFound);
        assert_eq!(canonical.table(), Some("users"));
        assert_eq!(canonical.key(), Some("u-1"));
    }

    #[test]
    fn test_builder_context_roundtrip() {
        let err = DbError::new(DbErrorKind::Persistence)
            .with_op("put_item")
            .with_model("Order")
            .with_table("orders")
            .with_message("connection refused");

        assert_eq!(err.op(), Some("put_item"));
        assert_eq!(err.model(), Some("Order"));
        assert_eq!(err.table(), Some("orders"));
        let rendered = err.to_string();
        assert!(rendered.contains("ERR_PERSISTENCE"));
        assert!(rendered.contains("put_item"));
        assert!(rendered.contains("connection refused"));
    }

    #[test]
    fn test_schema_mismatch_classification() {
        let err = DocBindError::SchemaMismatch {
            field: "customer".to_string(),
            expected: "mapping".to_string(),
            actual: "scalar".to_string(),
        };
        assert_eq!(err.kind(), DbErrorKind::SchemaMismatch);
        assert!(err.to_string().contains("expected mapping"));
    }
}
