//! Eruption source scenarios.
//!
//! A scenario resolves to a per-hour concentration series injected at
//! the volcano's cell: either the bundled 2010 Eyjafjallajökull record
//! or a [`ManualEruption`] with constant parameters. The conversion
//! from eruption rates to a cell concentration is
//! `mass_rate × ash_fraction / volume_rate / resolution²`, with rates
//! in g/s and m³/s and the resolution in km.

use std::error::Error;
use std::fmt;

use tephra_core::SourceSchedule;

/// Fraction of erupted mass finer than 63 µm for the 2010
/// Eyjafjallajökull event, the fraction that stays airborne long
/// enough to disperse.
pub const EYJAFJALLAJOKULL_ASH_FRACTION: f64 = 0.5;

/// Eyjafjallajökull summit latitude (decimal degrees north).
pub const EYJAFJALLAJOKULL_LAT: f64 = 63.625;

/// Eyjafjallajökull summit longitude (decimal degrees east).
pub const EYJAFJALLAJOKULL_LON: f64 = -19.625;

/// Observed plume heights (km above the vent), one per hour from the
/// 14 April 2010 onset.
const EYJA_PLUME_HEIGHT_KM: [f64; 156] = [
    0.0, 0.0, 5.0, 7.5, 5.5, 5.5, 5.5, 3.0, 4.0, 3.5, //
    5.0, 5.0, 6.0, 7.0, 6.0, 5.0, 5.5, 5.0, 3.0, 2.5, //
    2.5, 2.5, 2.5, 2.5, 3.0, 2.5, 2.5, 2.5, 3.0, 2.5, //
    2.5, 2.5, 2.5, 2.5, 2.5, 3.0, 3.0, 2.5, 2.5, 2.5, //
    2.5, 2.5, 2.5, 3.5, 3.0, 2.0, 3.0, 5.0, 5.0, 5.0, //
    4.5, 4.5, 4.0, 3.5, 3.5, 3.0, 2.5, 2.5, 7.5, 4.5, //
    5.0, 5.5, 4.0, 3.0, 2.5, 2.5, 2.5, 2.5, 2.5, 2.5, //
    2.5, 2.5, 2.5, 2.5, 2.5, 2.5, 2.5, 2.5, 2.5, 4.5, //
    3.5, 3.0, 4.0, 5.0, 5.5, 5.5, 5.5, 6.0, 6.0, 5.0, //
    5.0, 5.5, 5.0, 5.0, 5.0, 5.0, 5.0, 4.0, 4.5, 4.0, //
    4.5, 4.5, 4.0, 4.5, 4.5, 4.5, 4.0, 3.0, 4.0, 5.0, //
    4.5, 4.5, 4.0, 4.5, 5.0, 5.0, 5.0, 5.5, 8.0, 8.0, //
    5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.5, 5.5, 6.0, //
    7.0, 7.0, 6.0, 5.5, 7.0, 5.5, 5.0, 4.5, 5.0, 5.0, //
    4.5, 4.5, 4.5, 3.5, 3.0, 4.0, 3.5, 4.0, 4.0, 3.0, //
    3.0, 2.5, 2.5, 2.5, 2.5, 2.5,
];

/// Estimated mass eruption rates (g/s), one per hour.
const EYJA_MASS_RATE_G_S: [f64; 156] = [
    0.0, 0.0, 550e6, 1000e6, 700e6, 100e6, 100e6, 50e6, 50e6, 100e6, //
    500e6, 550e6, 550e6, 550e6, 500e6, 100e6, 400e6, 400e6, 50e6, 50e6, //
    50e6, 0.0, 50e6, 50e6, 50e6, 0.0, 50e6, 50e6, 50e6, 0.0, //
    50e6, 0.0, 50e6, 50e6, 50e6, 0.0, 50e6, 50e6, 0.0, 0.0, //
    50e6, 50e6, 0.0, 0.0, 100e6, 100e6, 100e6, 100e6, 50e6, 0.0, //
    0.0, 50e6, 0.0, 0.0, 500e6, 100e6, 100e6, 300e6, 50e6, 0.0, //
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 50e6, 0.0, //
    0.0, 0.0, 0.0, 0.0, 0.0, 50e6, 50e6, 50e6, 50e6, 50e6, //
    200e6, 100e6, 150e6, 350e6, 850e6, 50e6, 50e6, 150e6, 50e6, 50e6, //
    50e6, 50e6, 50e6, 50e6, 50e6, 50e6, 50e6, 50e6, 50e6, 50e6, //
    50e6, 50e6, 50e6, 50e6, 50e6, 50e6, 50e6, 50e6, 50e6, 50e6, //
    50e6, 250e6, 150e6, 50e6, 50e6, 50e6, 50e6, 50e6, 250e6, 300e6, //
    550e6, 500e6, 250e6, 50e6, 250e6, 50e6, 250e6, 300e6, 300e6, 350e6, //
    400e6, 450e6, 300e6, 300e6, 400e6, 300e6, 50e6, 50e6, 100e6, 50e6, //
    50e6, 50e6, 50e6, 50e6, 0.0, 50e6, 0.0, 50e6, 50e6, 50e6, //
    50e6, 0.0, 0.0, 0.0, 0.0, 0.0,
];

/// Estimated volume eruption rates (m³/s), one per hour.
const EYJA_VOLUME_RATE_M3_S: [f64; 156] = [
    100.0, 100.0, 300.0, 400.0, 300.0, 100.0, 100.0, 100.0, 100.0, 100.0, //
    200.0, 300.0, 300.0, 300.0, 200.0, 100.0, 200.0, 200.0, 100.0, 100.0, //
    100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, //
    100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, //
    100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, //
    100.0, 100.0, 100.0, 100.0, 200.0, 100.0, 100.0, 200.0, 100.0, 100.0, //
    100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, //
    100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, //
    100.0, 100.0, 100.0, 200.0, 400.0, 100.0, 100.0, 100.0, 100.0, 100.0, //
    100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, //
    100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, //
    100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 200.0, //
    300.0, 200.0, 100.0, 100.0, 100.0, 100.0, 100.0, 200.0, 200.0, 200.0, //
    200.0, 200.0, 200.0, 200.0, 200.0, 200.0, 100.0, 100.0, 100.0, 100.0, //
    100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, //
    100.0, 100.0, 100.0, 100.0, 100.0, 100.0,
];

/// Errors from manual eruption parametrisation.
#[derive(Clone, Debug, PartialEq)]
pub enum ScenarioError {
    /// Latitude outside [-90, 90].
    InvalidLatitude {
        /// The invalid value.
        value: f64,
    },
    /// Longitude outside [-180, 180].
    InvalidLongitude {
        /// The invalid value.
        value: f64,
    },
    /// Plume height outside [0, 15000] m.
    InvalidPlumeHeight {
        /// The invalid value.
        value: f64,
    },
    /// Eruption duration of zero hours.
    ZeroDuration,
    /// Ash fraction outside [0, 1].
    InvalidAshFraction {
        /// The invalid value.
        value: f64,
    },
    /// Mass rate not strictly positive.
    InvalidMassRate {
        /// The invalid value.
        value: f64,
    },
    /// Volume rate not strictly positive.
    InvalidVolumeRate {
        /// The invalid value.
        value: f64,
    },
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLatitude { value } => {
                write!(f, "latitude must be in [-90, 90], got {value}")
            }
            Self::InvalidLongitude { value } => {
                write!(f, "longitude must be in [-180, 180], got {value}")
            }
            Self::InvalidPlumeHeight { value } => {
                write!(f, "plume height must be in [0, 15000] m, got {value}")
            }
            Self::ZeroDuration => write!(f, "eruption duration must be at least one hour"),
            Self::InvalidAshFraction { value } => {
                write!(f, "ash fraction must be in [0, 1], got {value}")
            }
            Self::InvalidMassRate { value } => {
                write!(f, "mass rate must be positive, got {value}")
            }
            Self::InvalidVolumeRate { value } => {
                write!(f, "volume rate must be positive, got {value}")
            }
        }
    }
}

impl Error for ScenarioError {}

/// A located eruption with its resolved hourly concentration series.
///
/// Implements [`SourceSchedule`]: hour `n` of the run injects entry
/// `n` of the series, and the schedule is exhausted once the series
/// runs out.
#[derive(Clone, Debug)]
pub struct EruptionScenario {
    /// Volcano latitude (decimal degrees north).
    pub latitude: f64,
    /// Volcano longitude (decimal degrees east).
    pub longitude: f64,
    /// Concentration to inject per hour (g/m³ per cell).
    pub concentrations: Vec<f64>,
    /// Plume height per hour (km), where the record provides one.
    pub plume_heights_km: Vec<f64>,
}

impl EruptionScenario {
    /// Eruption length in hours.
    pub fn duration_hours(&self) -> usize {
        self.concentrations.len()
    }
}

impl SourceSchedule for EruptionScenario {
    fn amount(&self, elapsed_ticks: u64) -> Option<f64> {
        usize::try_from(elapsed_ticks)
            .ok()
            .and_then(|i| self.concentrations.get(i))
            .copied()
    }
}

/// The 2010 Eyjafjallajökull eruption: 156 hours of observed mass and
/// volume rates resolved against the given model resolution.
pub fn eyjafjallajokull_2010(resolution_km: f64) -> EruptionScenario {
    let concentrations = EYJA_MASS_RATE_G_S
        .iter()
        .zip(EYJA_VOLUME_RATE_M3_S.iter())
        .map(|(&mass, &volume)| {
            mass * EYJAFJALLAJOKULL_ASH_FRACTION / volume / (resolution_km * resolution_km)
        })
        .collect();
    EruptionScenario {
        latitude: EYJAFJALLAJOKULL_LAT,
        longitude: EYJAFJALLAJOKULL_LON,
        concentrations,
        plume_heights_km: EYJA_PLUME_HEIGHT_KM.to_vec(),
    }
}

/// User-specified eruption with constant parameters and fail-fast
/// range validation.
#[derive(Clone, Copy, Debug)]
pub struct ManualEruption {
    /// Volcano latitude (decimal degrees north, [-90, 90]).
    pub latitude: f64,
    /// Volcano longitude (decimal degrees east, [-180, 180]).
    pub longitude: f64,
    /// Plume height above the vent (m, [0, 15000]).
    pub plume_height_m: f64,
    /// Eruption length in hours (> 0).
    pub duration_hours: u32,
    /// Fraction of erupted mass finer than 63 µm ([0, 1]).
    pub ash_fraction: f64,
    /// Mass eruption rate (g/s, > 0).
    pub mass_rate: f64,
    /// Volume eruption rate (m³/s, > 0).
    pub volume_rate: f64,
}

impl ManualEruption {
    /// Check all parameter ranges.
    ///
    /// # Errors
    ///
    /// Returns the first [`ScenarioError`] found.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ScenarioError::InvalidLatitude {
                value: self.latitude,
            });
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ScenarioError::InvalidLongitude {
                value: self.longitude,
            });
        }
        if !self.plume_height_m.is_finite() || !(0.0..=15000.0).contains(&self.plume_height_m) {
            return Err(ScenarioError::InvalidPlumeHeight {
                value: self.plume_height_m,
            });
        }
        if self.duration_hours == 0 {
            return Err(ScenarioError::ZeroDuration);
        }
        if !self.ash_fraction.is_finite() || !(0.0..=1.0).contains(&self.ash_fraction) {
            return Err(ScenarioError::InvalidAshFraction {
                value: self.ash_fraction,
            });
        }
        if !self.mass_rate.is_finite() || self.mass_rate <= 0.0 {
            return Err(ScenarioError::InvalidMassRate {
                value: self.mass_rate,
            });
        }
        if !self.volume_rate.is_finite() || self.volume_rate <= 0.0 {
            return Err(ScenarioError::InvalidVolumeRate {
                value: self.volume_rate,
            });
        }
        Ok(())
    }

    /// The constant per-cell concentration this eruption injects.
    pub fn concentration(&self, resolution_km: f64) -> f64 {
        self.mass_rate * self.ash_fraction / self.volume_rate / (resolution_km * resolution_km)
    }

    /// Validate and resolve into a runnable scenario at the given
    /// model resolution.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError`] if any parameter is out of range.
    pub fn into_scenario(self, resolution_km: f64) -> Result<EruptionScenario, ScenarioError> {
        self.validate()?;
        let concentration = self.concentration(resolution_km);
        Ok(EruptionScenario {
            latitude: self.latitude,
            longitude: self.longitude,
            concentrations: vec![concentration; self.duration_hours as usize],
            plume_heights_km: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manual() -> ManualEruption {
        ManualEruption {
            latitude: 63.625,
            longitude: -19.625,
            plume_height_m: 5000.0,
            duration_hours: 12,
            ash_fraction: 0.5,
            mass_rate: 100e6,
            volume_rate: 100.0,
        }
    }

    #[test]
    fn eyjafjallajokull_series_shape() {
        let scenario = eyjafjallajokull_2010(80.0);
        assert_eq!(scenario.duration_hours(), 156);
        assert_eq!(scenario.plume_heights_km.len(), 156);
        assert_eq!(scenario.latitude, 63.625);
        assert_eq!(scenario.longitude, -19.625);
        // Pre-eruption hours inject nothing.
        assert_eq!(scenario.amount(0), Some(0.0));
        assert_eq!(scenario.amount(1), Some(0.0));
        // Hour 2: 550e6 * 0.5 / 300 / 6400.
        let expected = 550e6 * 0.5 / 300.0 / 6400.0;
        assert!((scenario.amount(2).unwrap() - expected).abs() < 1e-9);
        // Past the record the schedule is exhausted.
        assert_eq!(scenario.amount(156), None);
        assert_eq!(scenario.amount(10_000), None);
    }

    #[test]
    fn eyjafjallajokull_peak_is_hour_three() {
        let scenario = eyjafjallajokull_2010(80.0);
        let peak = scenario
            .concentrations
            .iter()
            .cloned()
            .fold(0.0f64, f64::max);
        assert!((scenario.amount(3).unwrap() - peak).abs() < 1e-12);
    }

    #[test]
    fn manual_scenario_is_constant_for_its_duration() {
        let scenario = manual().into_scenario(80.0).unwrap();
        assert_eq!(scenario.duration_hours(), 12);
        let expected = 100e6 * 0.5 / 100.0 / 6400.0;
        for hour in 0..12 {
            assert!((scenario.amount(hour).unwrap() - expected).abs() < 1e-12);
        }
        assert_eq!(scenario.amount(12), None);
        assert!(scenario.plume_heights_km.is_empty());
    }

    #[test]
    fn concentration_scales_inversely_with_cell_area() {
        let m = manual();
        let coarse = m.concentration(80.0);
        let fine = m.concentration(40.0);
        assert!((fine / coarse - 4.0).abs() < 1e-12);
    }

    #[test]
    fn manual_validation_rejects_out_of_range_parameters() {
        let cases: Vec<(ManualEruption, ScenarioError)> = vec![
            (
                ManualEruption { latitude: 95.0, ..manual() },
                ScenarioError::InvalidLatitude { value: 95.0 },
            ),
            (
                ManualEruption { longitude: -181.0, ..manual() },
                ScenarioError::InvalidLongitude { value: -181.0 },
            ),
            (
                ManualEruption { plume_height_m: 20_000.0, ..manual() },
                ScenarioError::InvalidPlumeHeight { value: 20_000.0 },
            ),
            (
                ManualEruption { duration_hours: 0, ..manual() },
                ScenarioError::ZeroDuration,
            ),
            (
                ManualEruption { ash_fraction: 1.5, ..manual() },
                ScenarioError::InvalidAshFraction { value: 1.5 },
            ),
            (
                ManualEruption { mass_rate: 0.0, ..manual() },
                ScenarioError::InvalidMassRate { value: 0.0 },
            ),
            (
                ManualEruption { volume_rate: -1.0, ..manual() },
                ScenarioError::InvalidVolumeRate { value: -1.0 },
            ),
        ];
        for (eruption, expected) in cases {
            assert_eq!(eruption.validate(), Err(expected));
        }
        assert_eq!(manual().validate(), Ok(()));
    }
}
