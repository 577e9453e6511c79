//! Core types and traits for the Tephra ash-dispersion model.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the concentration raster ([`AshGrid`]), the tick counter, the error
//! types, and the collaborator traits the engine consumes: wind field
//! providers, source schedules, and snapshot sinks.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod error;
mod grid;
mod id;
mod traits;

pub use error::{GridError, ProviderError};
pub use grid::AshGrid;
pub use id::TickId;
pub use traits::{SnapshotSink, SourceSchedule, WindFieldProvider, WindSlice};
