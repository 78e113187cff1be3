//! Error types for zone validation, storage and geometry reads.
//!
//! Validation and lookup failures are reported back to whoever submitted the
//! request. Geometry read failures never escape the evaluator: a zone whose
//! stored boundary cannot be read is skipped and logged.

use std::path::PathBuf;
use thiserror::Error;

/// Reason a submitted zone was rejected before entering the store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("boundary is empty")]
    EmptyBoundary,

    #[error("boundary is malformed: {reason}")]
    MalformedBoundary { reason: String },

    #[error("too few points: boundary has {count}, minimum {minimum} required")]
    TooFewPoints { count: usize, minimum: usize },

    #[error("boundary is not closed: first and last point differ")]
    NotClosed,

    #[error("vertex {index} is not a numeric [lng, lat] pair")]
    MalformedVertex { index: usize },

    #[error("vertex {index} is out of range: ({lng}, {lat})")]
    OutOfRange { index: usize, lng: f64, lat: f64 },

    #[error("boundary has only {distinct} distinct vertices, at least 3 required")]
    Degenerate { distinct: usize },

    #[error("unknown zone type '{value}'")]
    UnknownType { value: String },

    #[error("zone name must not be empty")]
    EmptyName,
}

/// A stored boundary that cannot be turned into a ring at evaluation time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryReadError {
    #[error("polygon has no rings")]
    NoRing,

    #[error("ring has {count} points, at least 4 required")]
    TooFewPoints { count: usize },

    #[error("vertex {index} is not a numeric [lng, lat] pair")]
    MalformedVertex { index: usize },

    #[error("ring is not closed")]
    NotClosed,
}

/// Failure reading or writing a persisted zone store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access zone store {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("zone store {} is not valid: {source}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Error returned by zone-management operations.
#[derive(Debug, Error)]
pub enum ZoneError {
    #[error("invalid zone: {0}")]
    Validation(#[from] ValidationError),

    #[error("zone '{id}' not found")]
    NotFound { id: String },

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl ZoneError {
    pub fn not_found(id: &str) -> Self {
        ZoneError::NotFound { id: id.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        let err = ValidationError::TooFewPoints {
            count: 3,
            minimum: 4,
        };
        assert!(err.to_string().contains("too few points"));
        assert!(ValidationError::NotClosed.to_string().contains("not closed"));

        let err = ValidationError::UnknownType {
            value: "swamp".to_string(),
        };
        assert!(err.to_string().contains("swamp"));
    }

    #[test]
    fn test_zone_error_from_validation() {
        let err: ZoneError = ValidationError::NotClosed.into();
        assert!(matches!(err, ZoneError::Validation(ValidationError::NotClosed)));
        assert!(ZoneError::not_found("z-1").to_string().contains("z-1"));
    }
}
