//! Tween error types

use thiserror::Error;

use crate::registry::TweenId;
use crate::value::ValueShape;

/// Errors reported by scheduler operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TweenError {
    /// The handle is stale (its slot was reused) or was never issued
    #[error("tween handle not found: {0:?}")]
    HandleNotFound(TweenId),

    /// The requested composition or setting is not allowed
    #[error("invalid tween configuration: {0}")]
    Configuration(String),

    /// The operation expected a different value shape
    #[error("value shape mismatch: expected {expected}, found {found}")]
    ValueType {
        expected: ValueShape,
        found: ValueShape,
    },
}

/// Result type for tween operations
pub type Result<T> = std::result::Result<T, TweenError>;
