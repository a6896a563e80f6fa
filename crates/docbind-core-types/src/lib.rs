//! Core types shared across DocBind facilities
//!
//! This crate provides foundational vocabulary used by the error and
//! logging facilities and by the store bootstrap:
//!
//! - **Correlation types**: RequestId, TraceId, RequestContext
//! - **Sensitive data**: Sensitive<T> marker for automatic redaction
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;
pub mod sensitive;

pub use correlation::{RequestContext, RequestId, TraceId};
pub use sensitive::Sensitive;
