//! Core error types
use thiserror::Error;

/// Errors raised by shape tessellation.
///
/// The math core itself never fails; degenerate numeric input degrades
/// silently per the caller contracts documented on each method.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    #[error("a cylinder needs at least 3 sides, got {0}")]
    TooFewSides(u16),

    #[error("cylinder with {got} sides exceeds the maximum of {max}")]
    TooManySides { got: u16, max: u16 },

    #[error("sphere subdivision depth {got} exceeds the maximum of {max}")]
    SubdivisionTooDeep { got: u8, max: u8 },
}
