//! Error types shared across the Tephra workspace.
//!
//! Hand-rolled enums implementing [`std::error::Error`], organized by
//! subsystem: grid construction and external collaborators (providers).
//! Configuration errors live in the engine crate next to the config they
//! validate.

use std::error::Error;
use std::fmt;

/// Errors from [`AshGrid`](crate::AshGrid) construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// A grid dimension is zero.
    EmptyGrid,
    /// The backing buffer does not match the declared dimensions.
    ShapeMismatch {
        /// Declared `(rows, cols)`.
        expected: (u32, u32),
        /// Length of the buffer that was supplied.
        got: usize,
    },
    /// Paired component grids disagree on shape.
    ComponentShapeMismatch {
        /// Shape of the u component.
        u: (u32, u32),
        /// Shape of the v component.
        v: (u32, u32),
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "grid dimensions must be non-zero"),
            Self::ShapeMismatch { expected, got } => write!(
                f,
                "buffer of length {got} does not match {}x{} grid",
                expected.0, expected.1
            ),
            Self::ComponentShapeMismatch { u, v } => write!(
                f,
                "wind components disagree on shape: u is {}x{}, v is {}x{}",
                u.0, u.1, v.0, v.1
            ),
        }
    }
}

impl Error for GridError {}

/// Errors from an external collaborator (wind provider).
///
/// Returned by [`WindFieldProvider::sample`](crate::WindFieldProvider::sample)
/// and wrapped by the engine's step error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProviderError {
    /// The requested timestep index is outside the provider's range.
    SampleOutOfRange {
        /// The requested index.
        index: u64,
        /// Number of samples the provider holds.
        len: u64,
    },
    /// The provider failed for a reason of its own.
    ExecutionFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SampleOutOfRange { index, len } => {
                write!(f, "sample index {index} out of range (provider holds {len})")
            }
            Self::ExecutionFailed { reason } => write!(f, "provider failed: {reason}"),
        }
    }
}

impl Error for ProviderError {}
