use crate::types::Vector2;

/// Errors produced while generating bolts and strikes.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum BoltError {
    /// A zero-length vector was normalized.
    #[error("cannot normalize a zero-length vector")]
    DegenerateVector,
    /// A bolt was requested between two identical points.
    #[error("bolt origin and tail coincide at {origin}")]
    DegenerateBolt { origin: Vector2 },
    /// A configuration value cannot be clamped into a usable one.
    #[error("invalid generator configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, BoltError>;
