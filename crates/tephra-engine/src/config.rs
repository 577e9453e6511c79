//! Simulation configuration, validation, and error types.
//!
//! [`SimulationConfig`] collects everything the timestep driver needs
//! before the loop starts. [`validate()`](SimulationConfig::validate)
//! fails fast on every invalid input; nothing is checked again inside
//! the hot loop.

use std::error::Error;
use std::fmt;

/// How the reserved diffusion share is redistributed each tick.
///
/// Legacy run configurations select the policy with an integer code;
/// [`from_code`](DiffusionPolicy::from_code) maps it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiffusionPolicy {
    /// Code 0: only neighbours at strictly lower concentration receive
    /// a share (diffusion flows downhill).
    GradientDependent,
    /// Code 1: each of the 8 neighbours receives an eighth.
    AllDirections,
    /// Any other code: the diffusion pass is a no-op.
    NoDiffusion,
}

impl DiffusionPolicy {
    /// Map the model's integer selector to a policy (0 gradient,
    /// 1 all-directions, anything else no diffusion).
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::GradientDependent,
            1 => Self::AllDirections,
            _ => Self::NoDiffusion,
        }
    }
}

impl fmt::Display for DiffusionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::GradientDependent => "gradients",
            Self::AllDirections => "all directions",
            Self::NoDiffusion => "none",
        };
        f.write_str(s)
    }
}

/// Errors detected during [`SimulationConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A grid dimension is zero.
    EmptyGrid,
    /// `resolution_km` is NaN, infinite, zero, or negative.
    InvalidResolution {
        /// The invalid value.
        value: f64,
    },
    /// `hourly_res` is zero.
    HourlyResZero,
    /// `diffusion_percent` is outside [0, 1] or non-finite.
    InvalidDiffusionPercent {
        /// The invalid value.
        value: f64,
    },
    /// `fall_out` is outside (0, 1] or non-finite.
    InvalidFallOut {
        /// The invalid value.
        value: f64,
    },
    /// The source cell lies outside the grid.
    SourceOutOfBounds {
        /// The configured `(row, col)`.
        cell: (u32, u32),
        /// The grid shape.
        shape: (u32, u32),
    },
    /// The sample range runs backwards (`start > end`).
    InvalidSampleRange {
        /// Configured start index.
        start: u64,
        /// Configured end index.
        end: u64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "grid dimensions must be non-zero"),
            Self::InvalidResolution { value } => {
                write!(f, "resolution_km must be finite and positive, got {value}")
            }
            Self::HourlyResZero => write!(f, "hourly_res must be at least 1"),
            Self::InvalidDiffusionPercent { value } => {
                write!(f, "diffusion_percent must be in [0, 1], got {value}")
            }
            Self::InvalidFallOut { value } => {
                write!(f, "fall_out must be in (0, 1], got {value}")
            }
            Self::SourceOutOfBounds { cell, shape } => write!(
                f,
                "source cell ({}, {}) outside {}x{} grid",
                cell.0, cell.1, shape.0, shape.1
            ),
            Self::InvalidSampleRange { start, end } => {
                write!(f, "sample range start {start} exceeds end {end}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Configuration consumed by the timestep driver.
///
/// `rows`/`cols` fix the raster shape; every wind slice the provider
/// returns must match it. The sample range `[start, end)` indexes the
/// wind provider; with `hourly_res > 1` each wind sample drives that
/// many internal ticks.
#[derive(Clone, Debug)]
pub struct SimulationConfig {
    /// Latitude cells.
    pub rows: u32,
    /// Longitude cells.
    pub cols: u32,
    /// Spatial model resolution in km — the distance one cell spans,
    /// and therefore the wind speed (km/h) that crosses a cell in one
    /// hour.
    pub resolution_km: f64,
    /// Internal ticks per wind sample (≥ 1).
    pub hourly_res: u32,
    /// Fraction of each cell's mass reserved for diffusion, [0, 1].
    pub diffusion_percent: f64,
    /// Diffusion redistribution policy.
    pub diffusion: DiffusionPolicy,
    /// Retention factor applied to the whole grid once per wind sample,
    /// (0, 1]. `1.0` disables fallout.
    pub fall_out: f64,
    /// The eruption source cell, `(row, col)`.
    pub source_cell: (u32, u32),
    /// First wind-sample index (inclusive).
    pub start: u64,
    /// Last wind-sample index (exclusive).
    pub end: u64,
}

impl SimulationConfig {
    /// Check every structural invariant; called once before the loop.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if !self.resolution_km.is_finite() || self.resolution_km <= 0.0 {
            return Err(ConfigError::InvalidResolution {
                value: self.resolution_km,
            });
        }
        if self.hourly_res == 0 {
            return Err(ConfigError::HourlyResZero);
        }
        if !self.diffusion_percent.is_finite()
            || !(0.0..=1.0).contains(&self.diffusion_percent)
        {
            return Err(ConfigError::InvalidDiffusionPercent {
                value: self.diffusion_percent,
            });
        }
        if !self.fall_out.is_finite() || self.fall_out <= 0.0 || self.fall_out > 1.0 {
            return Err(ConfigError::InvalidFallOut {
                value: self.fall_out,
            });
        }
        if self.source_cell.0 >= self.rows || self.source_cell.1 >= self.cols {
            return Err(ConfigError::SourceOutOfBounds {
                cell: self.source_cell,
                shape: (self.rows, self.cols),
            });
        }
        if self.start > self.end {
            return Err(ConfigError::InvalidSampleRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// Number of wind samples the run covers.
    pub fn sample_count(&self) -> u64 {
        self.end - self.start
    }

    /// Default retention factor: fine ash persists roughly six days
    /// airborne, so per sample `1 − 1/(24/hourly_res × 6)`.
    pub fn default_fall_out(hourly_res: u32) -> f64 {
        1.0 - 1.0 / (24.0 / hourly_res as f64 * 6.0)
    }

    /// Default diffusion percentage from the Gaussian-plume horizontal
    /// diffusion coefficient for a neutrally stable atmosphere,
    /// `D = 68 × resolution_km^0.894` (Cimbala 2018).
    pub fn default_diffusion_percent(resolution_km: f64) -> f64 {
        let diff_coeff = 68.0 * resolution_km.powf(0.894);
        100.0 / (resolution_km * 1000.0) * (diff_coeff / 100.0)
    }
}
