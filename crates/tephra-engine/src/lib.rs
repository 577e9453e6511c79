//! Transport-diffusion engine for the Tephra ash-dispersion model.
//!
//! The engine advances a 2D concentration raster one tick at a time:
//! fallout, source injection, wind-classified directional transport,
//! and neighbour diffusion, with a snapshot handed to a sink after
//! every tick. Configuration is validated up front; the only runtime
//! failures are wind-provider errors. Mass that leaves the grid at its
//! boundary is dropped and ledgered, never wrapped — the end-of-run
//! mass-balance report attributes the residual.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod config;
mod diffusion;
mod providers;
mod report;
mod scenarios;
mod sink;
mod tick;
mod transport;
mod zones;

pub use config::{ConfigError, DiffusionPolicy, SimulationConfig};
pub use diffusion::{diffusion_step, DiffusionOutcome};
pub use providers::{ConstantWind, SliceWind};
pub use report::{MassBalanceReport, MassLedger, RunSummary};
pub use scenarios::{
    eyjafjallajokull_2010, EruptionScenario, ManualEruption, ScenarioError,
    EYJAFJALLAJOKULL_ASH_FRACTION, EYJAFJALLAJOKULL_LAT, EYJAFJALLAJOKULL_LON,
};
pub use sink::{ChannelSink, Frame, MemorySink, NullSink};
pub use tick::{Simulation, StepError};
pub use transport::{transport_fraction, transport_step, TransportOutcome, RETAINED_EPSILON};
pub use zones::{classify_zones, FlightZone, ENHANCED_PROCEDURE_THRESHOLD, NO_FLY_THRESHOLD};
