//! Error handling for docbind-store
//!
//! Wraps docbind-core DocBindError with store-specific helpers

use docbind_core::errors::DocBindError;

/// Result type alias using DocBindError
pub type Result<T> = std::result::Result<T, DocBindError>;

/// Create a persistence error from rusqlite::Error
pub fn from_rusqlite(op: &str, err: rusqlite::Error) -> DocBindError {
    DocBindError::Persistence {
        op: op.to_string(),
        reason: err.to_string(),
    }
}

/// Create an IO error
pub fn io_error(op: &str, err: std::io::Error) -> DocBindError {
    DocBindError::Io {
        op: op.to_string(),
        reason: err.to_string(),
    }
}

/// Create a serialization error for a stored document
pub fn doc_error(err: serde_json::Error) -> DocBindError {
    DocBindError::Serialization {
        reason: err.to_string(),
    }
}

/// Create an invalid-table-identifier error
pub fn invalid_table(table: &str) -> DocBindError {
    DocBindError::InvalidTableIdentifier {
        table: table.to_string(),
    }
}

/// Create an error for a table the store has never seen
pub fn unknown_table(op: &str, table: &str) -> DocBindError {
    DocBindError::Persistence {
        op: op.to_string(),
        reason: format!("table '{}' has not been created in this store", table),
    }
}

/// Create an error for a record missing its primary key value
pub fn missing_key_value(table: &str, primary_key: &str) -> DocBindError {
    DocBindError::Persistence {
        op: "put_item".to_string(),
        reason: format!(
            "record for table '{}' has no usable primary key value in field '{}'",
            table, primary_key
        ),
    }
}

/// Create a lock-poisoned error for a store resource
pub fn poisoned(resource: &str) -> DocBindError {
    DocBindError::LockPoisoned {
        resource: resource.to_string(),
    }
}
