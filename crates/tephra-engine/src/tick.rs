//! The timestep driver.
//!
//! [`Simulation`] owns the concentration grid and advances it one wind
//! sample at a time. Per sample: fallout thins the whole grid, the
//! source injects that hour's concentration, then `hourly_res`
//! transport + diffusion ticks run against the same wind slice, each
//! followed by a snapshot. The run closes with a mass-balance report.

use std::error::Error;
use std::fmt;

use tephra_core::{
    AshGrid, ProviderError, SnapshotSink, SourceSchedule, TickId, WindFieldProvider,
};

use crate::config::SimulationConfig;
use crate::diffusion::diffusion_step;
use crate::report::{MassBalanceReport, MassLedger, RunSummary};
use crate::transport::transport_step;
use crate::ConfigError;

/// Errors that can interrupt a run.
#[derive(Debug)]
pub enum StepError {
    /// The wind provider failed to produce a slice.
    Provider(ProviderError),
    /// The provider's slice does not match the grid shape.
    WindShapeMismatch {
        /// The configured grid shape.
        expected: (u32, u32),
        /// What the provider returned.
        got: (u32, u32),
    },
    /// `step_sample` called after the configured range was exhausted.
    RangeExhausted,
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Provider(e) => write!(f, "wind provider: {e}"),
            Self::WindShapeMismatch { expected, got } => write!(
                f,
                "wind slice shape {}x{} does not match grid {}x{}",
                got.0, got.1, expected.0, expected.1
            ),
            Self::RangeExhausted => write!(f, "sample range already exhausted"),
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Provider(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ProviderError> for StepError {
    fn from(e: ProviderError) -> Self {
        Self::Provider(e)
    }
}

/// A configured, running dispersion simulation.
pub struct Simulation {
    config: SimulationConfig,
    wind: Box<dyn WindFieldProvider>,
    schedule: Box<dyn SourceSchedule>,
    grid: AshGrid,
    tick: TickId,
    elapsed_samples: u64,
    ledger: MassLedger,
}

impl Simulation {
    /// Validate the configuration and set up a zeroed grid.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration is invalid.
    pub fn new(
        config: SimulationConfig,
        wind: Box<dyn WindFieldProvider>,
        schedule: Box<dyn SourceSchedule>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        // validate() guarantees non-zero dimensions.
        let grid = AshGrid::zeros(config.rows, config.cols)
            .map_err(|_| ConfigError::EmptyGrid)?;
        Ok(Self {
            config,
            wind,
            schedule,
            grid,
            tick: TickId(0),
            elapsed_samples: 0,
            ledger: MassLedger::default(),
        })
    }

    /// The current grid state.
    pub fn grid(&self) -> &AshGrid {
        &self.grid
    }

    /// The tick after which the grid was last updated.
    pub fn tick(&self) -> TickId {
        self.tick
    }

    /// Wind samples consumed so far.
    pub fn elapsed_samples(&self) -> u64 {
        self.elapsed_samples
    }

    /// The running mass ledger.
    pub fn ledger(&self) -> &MassLedger {
        &self.ledger
    }

    /// Advance by one wind sample: fallout, injection, then
    /// `hourly_res` transport + diffusion ticks with a snapshot after
    /// each.
    ///
    /// # Errors
    ///
    /// Returns [`StepError`] if the range is exhausted or the wind
    /// provider fails; the grid is left untouched in either case.
    pub fn step_sample(&mut self, sink: &mut dyn SnapshotSink) -> Result<(), StepError> {
        if self.elapsed_samples >= self.config.sample_count() {
            return Err(StepError::RangeExhausted);
        }

        let wind = self
            .wind
            .sample(self.config.start + self.elapsed_samples)?;
        if wind.shape() != self.grid.shape() {
            return Err(StepError::WindShapeMismatch {
                expected: self.grid.shape(),
                got: wind.shape(),
            });
        }

        // Fallout thins the whole grid before this hour's injection,
        // so freshly erupted ash is not removed in the hour it enters.
        if self.config.fall_out < 1.0 {
            let before = self.grid.sum();
            self.grid.scale(self.config.fall_out);
            self.ledger.fallout_removed += before * (1.0 - self.config.fall_out);
        }

        if let Some(amount) = self.schedule.amount(self.elapsed_samples) {
            let (r, c) = self.config.source_cell;
            self.grid.add(r, c, amount);
            self.ledger.injected += amount;
        }

        for _ in 0..self.config.hourly_res {
            let transported = transport_step(
                &self.grid,
                &wind,
                self.config.resolution_km,
                self.config.diffusion_percent,
            );
            self.ledger.boundary_lost += transported.boundary_lost;

            let diffused = diffusion_step(
                &transported.grid,
                self.config.diffusion,
                self.config.diffusion_percent,
                self.config.resolution_km,
            );
            self.ledger.boundary_lost += diffused.boundary_lost;

            self.grid = diffused.grid;
            self.tick = self.tick.next();
            sink.accept(self.tick, &self.grid);
        }

        self.elapsed_samples += 1;
        Ok(())
    }

    /// Run the whole configured sample range and close the books.
    ///
    /// # Errors
    ///
    /// Returns the first [`StepError`] encountered.
    pub fn run(&mut self, sink: &mut dyn SnapshotSink) -> Result<RunSummary, StepError> {
        while self.elapsed_samples < self.config.sample_count() {
            self.step_sample(sink)?;
        }
        let final_mass = self.grid.sum();
        Ok(RunSummary {
            ticks_run: self.tick.0,
            final_mass,
            balance: MassBalanceReport::close(&self.ledger, final_mass),
        })
    }
}
