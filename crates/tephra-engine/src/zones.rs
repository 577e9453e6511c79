//! Flight-zone classification.
//!
//! Maps a concentration grid to the Civil Aviation Authority ash
//! contamination zones used for airspace decisions.

use std::fmt;

use tephra_core::AshGrid;

/// Concentration at which enhanced-procedure operation begins
/// (g/m³, inclusive). The CAA "medium contamination" boundary.
pub const ENHANCED_PROCEDURE_THRESHOLD: f64 = 2e-4;

/// Concentration at which airspace closure begins (g/m³, inclusive).
/// The CAA "high contamination" boundary.
pub const NO_FLY_THRESHOLD: f64 = 2e-3;

/// Aviation status of a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlightZone {
    /// Below the enhanced-procedure threshold; no restriction.
    Open,
    /// Medium contamination; flight only under enhanced procedures.
    EnhancedProcedure,
    /// High contamination; airspace closed.
    NoFly,
}

impl FlightZone {
    /// Classify one concentration value. Each zone begins at its
    /// threshold, so a cell exactly on a boundary takes the more
    /// restrictive zone.
    pub fn from_concentration(value: f64) -> Self {
        if value >= NO_FLY_THRESHOLD {
            Self::NoFly
        } else if value >= ENHANCED_PROCEDURE_THRESHOLD {
            Self::EnhancedProcedure
        } else {
            Self::Open
        }
    }
}

impl fmt::Display for FlightZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Open => "open",
            Self::EnhancedProcedure => "enhanced procedure",
            Self::NoFly => "no-fly",
        };
        f.write_str(s)
    }
}

/// Classify every cell of a snapshot, row-major like the grid itself.
pub fn classify_zones(grid: &AshGrid) -> Vec<FlightZone> {
    grid.as_slice()
        .iter()
        .map(|&v| FlightZone::from_concentration(v))
        .collect()
}
