//! Built-in wind-field providers.
//!
//! Production runs feed the engine from preloaded reanalysis slices
//! ([`SliceWind`]); tests and calibration runs use a uniform field
//! ([`ConstantWind`]).

use tephra_core::{AshGrid, GridError, ProviderError, WindFieldProvider, WindSlice};

/// The same uniform wind at every cell and every timestep.
#[derive(Clone, Debug)]
pub struct ConstantWind {
    slice: WindSlice,
}

impl ConstantWind {
    /// A uniform field of `(u, v)` m/s over a `rows × cols` grid.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::EmptyGrid`] if either dimension is zero.
    pub fn new(rows: u32, cols: u32, u: f64, v: f64) -> Result<Self, GridError> {
        let slice = WindSlice::new(
            AshGrid::filled(rows, cols, u)?,
            AshGrid::filled(rows, cols, v)?,
        )?;
        Ok(Self { slice })
    }
}

impl WindFieldProvider for ConstantWind {
    fn sample(&self, _index: u64) -> Result<WindSlice, ProviderError> {
        Ok(self.slice.clone())
    }
}

/// Preloaded wind slices, one per timestep, indexed directly.
#[derive(Clone, Debug, Default)]
pub struct SliceWind {
    slices: Vec<WindSlice>,
}

impl SliceWind {
    /// Wrap a sequence of slices; index `n` serves timestep `n`.
    pub fn new(slices: Vec<WindSlice>) -> Self {
        Self { slices }
    }

    /// Number of timesteps available.
    pub fn len(&self) -> usize {
        self.slices.len()
    }

    /// Whether no slices are loaded.
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

impl WindFieldProvider for SliceWind {
    fn sample(&self, index: u64) -> Result<WindSlice, ProviderError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.slices.get(i))
            .cloned()
            .ok_or(ProviderError::SampleOutOfRange {
                index,
                len: self.slices.len() as u64,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_wind_is_uniform_and_timeless() {
        let wind = ConstantWind::new(3, 4, 5.0, -2.0).unwrap();
        for index in [0, 1, 1000] {
            let slice = wind.sample(index).unwrap();
            assert_eq!(slice.shape(), (3, 4));
            assert_eq!(slice.u().get(2, 3), 5.0);
            assert_eq!(slice.v().get(0, 0), -2.0);
        }
    }

    #[test]
    fn constant_wind_rejects_empty_grid() {
        assert!(ConstantWind::new(0, 4, 1.0, 1.0).is_err());
    }

    #[test]
    fn slice_wind_indexes_by_timestep() {
        let make = |u: f64| {
            WindSlice::new(
                AshGrid::filled(2, 2, u).unwrap(),
                AshGrid::zeros(2, 2).unwrap(),
            )
            .unwrap()
        };
        let wind = SliceWind::new(vec![make(1.0), make(2.0)]);
        assert_eq!(wind.len(), 2);
        assert_eq!(wind.sample(0).unwrap().u().get(0, 0), 1.0);
        assert_eq!(wind.sample(1).unwrap().u().get(0, 0), 2.0);
    }

    #[test]
    fn slice_wind_errors_past_the_end() {
        let wind = SliceWind::default();
        assert!(wind.is_empty());
        assert!(matches!(
            wind.sample(0),
            Err(ProviderError::SampleOutOfRange { index: 0, len: 0 })
        ));
    }
}
