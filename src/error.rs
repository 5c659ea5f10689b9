//! Error types for tessellation construction

use thiserror::Error;

/// Errors that can occur while configuring or seeding a diagram
///
/// Degenerate geometry is never an error: cells that cannot be resolved are
/// dropped and the diagram simply ends up with fewer cells.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VoronoiError {
    /// Configuration validation failed
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// The bounding rectangle has a non-positive or non-finite side
    #[error("invalid bounds: {width} x {height}")]
    InvalidBounds { width: f64, height: f64 },
    /// A generator point has a NaN or infinite coordinate
    #[error("generator point {0} has a non-finite coordinate")]
    NonFinitePoint(usize),
}

/// Result type alias for tessellation operations
pub type Result<T> = std::result::Result<T, VoronoiError>;
