//! Strongly-typed tick identifier.

use std::fmt;

/// Monotonically increasing tick counter.
///
/// One tick is one internal grid update (transport + diffusion). When the
/// engine sub-steps a single wind sample, every sub-step advances the tick.
/// `TickId(0)` is the initial, all-zero grid before any update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(pub u64);

impl TickId {
    /// The tick after this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TickId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
