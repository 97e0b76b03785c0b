//! Error types for the crate.
//!
//! Arithmetic on well-formed inputs is total; the only failures are operations that are
//! undefined for their arguments (e.g. inverting zero) and parameter tables that are
//! missing, inconsistent, or not supported.
//! Membership tests never fail: they simply return `false`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BWError {
    /// Operation undefined for the given input.
    #[error("domain error: {0}")]
    Domain(&'static str),
    /// Selected curve family unsupported, or its parameter table is missing or inconsistent.
    #[error("invalid curve parameters: {0}")]
    InvalidCurveParameters(String),
}
