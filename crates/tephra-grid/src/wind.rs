//! Per-cell wind samples and derived speeds.

use crate::octant::Octant;
use crate::MS_TO_KMH;

/// The wind at one cell for one timestep: signed u (eastward) and v
/// (northward) components in m/s, plus the derived quantities the
/// transport step needs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindSample {
    u: f64,
    v: f64,
}

impl WindSample {
    /// Wrap raw component values (m/s).
    pub fn new(u: f64, v: f64) -> Self {
        Self { u, v }
    }

    /// Eastward component (m/s, signed).
    pub fn u(&self) -> f64 {
        self.u
    }

    /// Northward component (m/s, signed).
    pub fn v(&self) -> f64 {
        self.v
    }

    /// Vector magnitude `sqrt(u² + v²)` (m/s).
    pub fn diagonal(&self) -> f64 {
        self.u.hypot(self.v)
    }

    /// Largest of |u|, |v| and the diagonal, converted to km/h.
    pub fn max_wind_kmh(&self) -> f64 {
        let speed = self.u.abs().max(self.v.abs()).max(self.diagonal());
        speed * MS_TO_KMH
    }

    /// Destination octant, or `None` for a calm cell.
    pub fn octant(&self) -> Option<Octant> {
        Octant::classify(self.u, self.v)
    }
}
