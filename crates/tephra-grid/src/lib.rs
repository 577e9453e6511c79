//! Spatial layer for the Tephra ash-dispersion model.
//!
//! Provides the geographic coordinate axes with nearest-cell lookup,
//! the 8-octant wind-direction classification, per-cell wind samples,
//! and bounds-checked neighbour resolution over the row-major raster.
//!
//! Row 0 is the southernmost latitude; row indices ascend northward,
//! column indices ascend eastward. All neighbour lookups are explicit
//! bounds checks — an out-of-bounds destination is simply absent, and
//! the engine treats the corresponding mass as dropped at the boundary.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod axes;
mod neighbours;
mod octant;
mod wind;

pub use axes::{AxesError, GeoAxes};
pub use neighbours::{in_bounds_flat, neighbours_flat, offset_flat};
pub use octant::Octant;
pub use wind::WindSample;

/// km/h per m/s.
pub const MS_TO_KMH: f64 = 3.6;
