//! Collaborator traits consumed by the engine.
//!
//! The engine owns its grid buffers and configuration; everything else —
//! where the wind comes from, how much mass the eruption injects, who
//! receives the per-tick snapshots — arrives through these traits as
//! boxed trait objects.

use crate::error::{GridError, ProviderError};
use crate::grid::AshGrid;
use crate::id::TickId;

/// One timestep's wind field: u (eastward) and v (northward) components
/// in m/s, each the same shape as the concentration grid.
#[derive(Clone, Debug)]
pub struct WindSlice {
    u: AshGrid,
    v: AshGrid,
}

impl WindSlice {
    /// Pair two component grids.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ComponentShapeMismatch`] if the components
    /// disagree on dimensions.
    pub fn new(u: AshGrid, v: AshGrid) -> Result<Self, GridError> {
        if !u.same_shape(&v) {
            return Err(GridError::ComponentShapeMismatch {
                u: u.shape(),
                v: v.shape(),
            });
        }
        Ok(Self { u, v })
    }

    /// Eastward component grid (m/s).
    pub fn u(&self) -> &AshGrid {
        &self.u
    }

    /// Northward component grid (m/s).
    pub fn v(&self) -> &AshGrid {
        &self.v
    }

    /// `(rows, cols)` of both components.
    pub fn shape(&self) -> (u32, u32) {
        self.u.shape()
    }
}

/// Supplies the wind field for a given timestep index.
///
/// Implementations are read-only per tick; the engine calls `sample`
/// once per wind timestep and reuses the slice across sub-ticks.
pub trait WindFieldProvider {
    /// The wind field at timestep `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the index is out of range or the
    /// underlying source fails.
    fn sample(&self, index: u64) -> Result<WindSlice, ProviderError>;
}

/// Supplies the mass-concentration to inject at the source cell.
///
/// `elapsed_ticks` counts wind timesteps since run start. `None` means
/// the eruption has ended; the engine injects nothing and stops asking
/// only when the run itself ends.
pub trait SourceSchedule {
    /// Concentration (g/m³) to add at the source cell, or `None` once
    /// the eruption schedule is exhausted.
    fn amount(&self, elapsed_ticks: u64) -> Option<f64>;
}

/// Receives a copy of the grid after every completed tick.
///
/// The grid reference is only valid for the duration of the call; a
/// sink that keeps frames must clone them. The engine never hands out
/// a mutable alias of its working buffer.
pub trait SnapshotSink {
    /// Accept the post-tick grid state.
    fn accept(&mut self, tick: TickId, grid: &AshGrid);
}
