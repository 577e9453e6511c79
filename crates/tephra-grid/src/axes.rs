//! Geographic coordinate axes and nearest-cell lookup.

use std::error::Error;
use std::fmt;

/// Errors from [`GeoAxes`] construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AxesError {
    /// An axis has no entries.
    EmptyAxis {
        /// "latitude" or "longitude".
        axis: &'static str,
    },
    /// An axis contains a NaN or infinite coordinate.
    NonFinite {
        /// "latitude" or "longitude".
        axis: &'static str,
    },
}

impl fmt::Display for AxesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyAxis { axis } => write!(f, "{axis} axis is empty"),
            Self::NonFinite { axis } => write!(f, "{axis} axis contains non-finite values"),
        }
    }
}

impl Error for AxesError {}

/// The grid's coordinate axes: one latitude value per row, one
/// longitude value per column, both in decimal degrees.
///
/// Latitudes ascend with row index (row 0 is southernmost). The source
/// cell of a run is found once at setup with [`nearest_cell`], and the
/// grid is indexed by plain `(row, col)` from then on.
///
/// [`nearest_cell`]: GeoAxes::nearest_cell
#[derive(Clone, Debug, PartialEq)]
pub struct GeoAxes {
    lat: Vec<f64>,
    lon: Vec<f64>,
}

impl GeoAxes {
    /// Wrap explicit axis vectors.
    ///
    /// # Errors
    ///
    /// Returns [`AxesError`] if either axis is empty or non-finite.
    pub fn new(lat: Vec<f64>, lon: Vec<f64>) -> Result<Self, AxesError> {
        if lat.is_empty() {
            return Err(AxesError::EmptyAxis { axis: "latitude" });
        }
        if lon.is_empty() {
            return Err(AxesError::EmptyAxis { axis: "longitude" });
        }
        if lat.iter().any(|v| !v.is_finite()) {
            return Err(AxesError::NonFinite { axis: "latitude" });
        }
        if lon.iter().any(|v| !v.is_finite()) {
            return Err(AxesError::NonFinite { axis: "longitude" });
        }
        Ok(Self { lat, lon })
    }

    /// Uniform global axes at `degree_res` degrees per cell, as used by
    /// test runs: longitudes cover [−180, 180) and latitudes [−90, 90].
    ///
    /// # Errors
    ///
    /// Returns [`AxesError`] if `degree_res` is not a positive finite
    /// number (reported as a non-finite axis).
    pub fn uniform(degree_res: f64) -> Result<Self, AxesError> {
        if !degree_res.is_finite() || degree_res <= 0.0 {
            return Err(AxesError::NonFinite { axis: "longitude" });
        }
        let lon = arange(0.0, 360.0, degree_res)
            .into_iter()
            .map(|v| v - 180.0)
            .collect();
        let lat = arange(-90.0, 90.25, degree_res);
        Self::new(lat, lon)
    }

    /// Correct a degrees-east longitude axis (0..360) to [−180, 180) by
    /// subtracting 180, matching the wind-dataset convention.
    pub fn from_degrees_east(lat: Vec<f64>, lon_east: Vec<f64>) -> Result<Self, AxesError> {
        let lon = lon_east.into_iter().map(|v| v - 180.0).collect();
        Self::new(lat, lon)
    }

    /// Number of rows (latitude cells).
    pub fn rows(&self) -> u32 {
        self.lat.len() as u32
    }

    /// Number of columns (longitude cells).
    pub fn cols(&self) -> u32 {
        self.lon.len() as u32
    }

    /// Latitude values, one per row.
    pub fn lat(&self) -> &[f64] {
        &self.lat
    }

    /// Longitude values, one per column.
    pub fn lon(&self) -> &[f64] {
        &self.lon
    }

    /// `(row, col)` of the cell whose coordinates are closest to the
    /// requested point, by independent nearest-neighbour lookup on each
    /// axis. Ties resolve to the first (lowest-index) match.
    pub fn nearest_cell(&self, lat: f64, lon: f64) -> (u32, u32) {
        (nearest_index(&self.lat, lat), nearest_index(&self.lon, lon))
    }
}

/// Index of the axis value with minimum absolute difference to `target`.
fn nearest_index(axis: &[f64], target: f64) -> u32 {
    let mut best = 0usize;
    let mut best_dist = (axis[0] - target).abs();
    for (i, &v) in axis.iter().enumerate().skip(1) {
        let d = (v - target).abs();
        if d < best_dist {
            best = i;
            best_dist = d;
        }
    }
    best as u32
}

/// Half-open range [start, stop) stepped by `step`.
fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    let n = ((stop - start) / step).ceil().max(0.0) as usize;
    (0..n).map(|i| start + i as f64 * step).collect()
}
