//! Canonical logging macros
//!
//! These macros provide a structured, consistent way to log load/save
//! operations and binding setup.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use docbind_core::log_op_start;
/// log_op_start!("load");
/// log_op_start!("load", model = "User", key = "u-1");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = docbind_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = docbind_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use docbind_core::log_op_end;
/// log_op_end!("load", duration_ms = 3);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = docbind_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = docbind_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// # Example
///
/// ```ignore
/// # use docbind_core::{log_op_error, errors::DocBindError};
/// let err = DocBindError::UnknownModel { model: "User".to_string() };
/// log_op_error!("load", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        use $crate::errors::DbError;
        let db_err: DbError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = docbind_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?db_err.kind(),
            err_code = db_err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        use $crate::errors::DbError;
        let db_err: DbError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = docbind_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?db_err.kind(),
            err_code = db_err.code(),
            $($field)*
        );
    }};
}
