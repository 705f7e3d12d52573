//! Error types for cloth construction, configuration and stepping.

use core::fmt;

/// Errors reported at the boundary of the cloth engine.
///
/// Degenerate geometry inside a step (coincident endpoints, infeasible
/// constraints between two pinned particles) is never reported here; those
/// cases are skipped locally.
#[derive(Debug, Clone, PartialEq)]
pub enum ClothError {
    /// Grid must have at least one row and one column.
    InvalidDimensions { rows: usize, cols: usize },
    /// Particle spacing must be positive and finite.
    InvalidSpacing,
    /// Particle mass must be positive and finite.
    InvalidMass,
    /// Time step must be positive and finite.
    InvalidTimeStep,
    /// A tunable parameter is negative or not finite.
    InvalidParameter(&'static str),
    /// Compression factor must be positive and not exceed the stretch factor.
    InvalidStretchBand,
    /// Grid coordinate is out of bounds.
    OutOfBounds { row: usize, col: usize, rows: usize, cols: usize },
    /// A particle left the configured sanity bound or became non-finite.
    Diverged { index: usize },
}

impl fmt::Display for ClothError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClothError::InvalidDimensions { rows, cols } => {
                write!(f, "grid must be at least 1x1 (got {}x{})", rows, cols)
            }
            ClothError::InvalidSpacing => write!(f, "spacing must be positive and finite"),
            ClothError::InvalidMass => write!(f, "mass must be positive and finite"),
            ClothError::InvalidTimeStep => write!(f, "time step must be positive and finite"),
            ClothError::InvalidParameter(name) => {
                write!(f, "parameter `{}` must be finite and non-negative", name)
            }
            ClothError::InvalidStretchBand => {
                write!(f, "compress factor must be in (0, max_stretch]")
            }
            ClothError::OutOfBounds { row, col, rows, cols } => {
                write!(f, "grid cell ({}, {}) out of bounds ({}x{})", row, col, rows, cols)
            }
            ClothError::Diverged { index } => write!(f, "particle {} diverged", index),
        }
    }
}
