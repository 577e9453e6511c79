//! Tephra: a 2D volcanic ash advection-diffusion model.
//!
//! This is the top-level facade crate that re-exports the public API
//! from the Tephra sub-crates. For most users, adding `tephra` as a
//! single dependency is sufficient.
//!
//! The model advances an ash-concentration raster one hour at a time:
//! fallout thins the whole grid, the volcano injects that hour's
//! concentration, then wind-classified transport and neighbour
//! diffusion redistribute it. Every tick's grid goes to a snapshot
//! sink, and the run closes with a mass-balance report.
//!
//! # Quick start
//!
//! ```rust
//! use tephra::prelude::*;
//!
//! // A 9x9 grid of 80 km cells, a steady eastward 80 m/s wind, and a
//! // single 100-unit burst at the centre cell.
//! struct Burst;
//! impl SourceSchedule for Burst {
//!     fn amount(&self, elapsed_ticks: u64) -> Option<f64> {
//!         (elapsed_ticks == 0).then_some(100.0)
//!     }
//! }
//!
//! let config = SimulationConfig {
//!     rows: 9,
//!     cols: 9,
//!     resolution_km: 80.0,
//!     hourly_res: 1,
//!     diffusion_percent: 0.0,
//!     diffusion: DiffusionPolicy::NoDiffusion,
//!     fall_out: 1.0,
//!     source_cell: (4, 4),
//!     start: 0,
//!     end: 3,
//! };
//! let wind = ConstantWind::new(9, 9, 80.0, 0.0).unwrap();
//! let mut sim = Simulation::new(config, Box::new(wind), Box::new(Burst)).unwrap();
//!
//! let mut frames = MemorySink::new();
//! let summary = sim.run(&mut frames).unwrap();
//!
//! // The burst marches one cell east per tick.
//! assert_eq!(frames.frame(TickId(3)).unwrap().get(4, 7), 100.0);
//! assert!(summary.balance.is_balanced());
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in
//! the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `tephra-core` | The grid, tick IDs, collaborator traits, error types |
//! | [`grid`] | `tephra-grid` | Octant classification, neighbour indexing, geographic axes |
//! | [`engine`] | `tephra-engine` | Transport, diffusion, the driver, scenarios, sinks, zones |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// The concentration grid, tick IDs, and collaborator traits
/// (`tephra-core`).
///
/// Contains [`types::AshGrid`], [`types::TickId`], and the traits the
/// engine consumes: [`types::WindFieldProvider`],
/// [`types::SourceSchedule`], [`types::SnapshotSink`].
pub use tephra_core as types;

/// Wind-octant classification and spatial indexing (`tephra-grid`).
///
/// [`grid::Octant`] maps a wind vector to one of eight compass
/// neighbours; [`grid::GeoAxes`] locates a volcano on a geographic
/// raster.
pub use tephra_grid as grid;

/// The transport-diffusion engine and timestep driver
/// (`tephra-engine`).
///
/// [`engine::Simulation`] is the main entry point; scenarios, wind
/// providers, snapshot sinks, and flight-zone classification live
/// alongside it.
pub use tephra_engine as engine;

/// Common imports for typical Tephra usage.
///
/// ```rust
/// use tephra::prelude::*;
/// ```
pub mod prelude {
    pub use tephra_core::{
        AshGrid, GridError, ProviderError, SnapshotSink, SourceSchedule, TickId,
        WindFieldProvider, WindSlice,
    };
    pub use tephra_engine::{
        eyjafjallajokull_2010, ChannelSink, ConfigError, ConstantWind, DiffusionPolicy,
        ManualEruption, MassBalanceReport, MemorySink, NullSink, RunSummary, Simulation,
        SimulationConfig, SliceWind, StepError,
    };
    pub use tephra_grid::{GeoAxes, Octant};
}
