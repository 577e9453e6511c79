//! Mass-balance bookkeeping.
//!
//! The driver keeps a running [`MassLedger`] of everything that enters
//! and deliberately leaves the grid, and closes the run with a
//! [`MassBalanceReport`] comparing injected mass against what can
//! still be accounted for. An imbalance is reported, never fatal; it
//! points at a conservation bug rather than invalidating output.

use std::fmt;

/// Relative tolerance for the closing balance check.
const BALANCE_REL_TOLERANCE: f64 = 1e-6;

/// Absolute floor so near-zero runs do not trip on rounding noise.
const BALANCE_ABS_FLOOR: f64 = 1e-9;

/// Running totals of mass entering and leaving the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MassLedger {
    /// Total mass injected at the source.
    pub injected: f64,
    /// Total mass removed by fallout.
    pub fallout_removed: f64,
    /// Total mass dropped at the grid boundary by transport and
    /// diffusion.
    pub boundary_lost: f64,
}

/// Closing comparison of injected mass against accounted-for mass.
///
/// The check compares injected mass against the grid plus fallout
/// only. Boundary drops are not counted as accounted-for, so a run
/// that pushes ash off the edge reports the loss as an imbalance
/// warning; the `boundary_lost` field lets the reader attribute it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MassBalanceReport {
    /// Total mass injected over the run.
    pub injected: f64,
    /// Mass still residing on the grid at the end of the run.
    pub residing: f64,
    /// Mass removed by fallout over the run.
    pub fallout_removed: f64,
    /// Mass dropped at the grid boundary over the run. Informational;
    /// deliberately outside the balance check.
    pub boundary_lost: f64,
}

impl MassBalanceReport {
    /// Build the report from the ledger and the final grid mass.
    pub fn close(ledger: &MassLedger, residing: f64) -> Self {
        Self {
            injected: ledger.injected,
            residing,
            fallout_removed: ledger.fallout_removed,
            boundary_lost: ledger.boundary_lost,
        }
    }

    /// Injected mass not accounted for by the grid or fallout.
    /// Boundary drops are excluded on purpose, so mass leaving the
    /// grid shows up here.
    pub fn residual(&self) -> f64 {
        self.injected - (self.residing + self.fallout_removed)
    }

    /// The residual after additionally crediting boundary drops.
    /// Should be rounding noise on any run; a nonzero value points at
    /// a conservation bug rather than edge loss.
    pub fn attributed_residual(&self) -> f64 {
        self.residual() - self.boundary_lost
    }

    /// The acceptance threshold for [`residual()`](Self::residual),
    /// relative to injected mass with an absolute floor.
    pub fn tolerance(&self) -> f64 {
        (self.injected.abs() * BALANCE_REL_TOLERANCE).max(BALANCE_ABS_FLOOR)
    }

    /// Whether injected mass is covered by the grid plus fallout to
    /// within tolerance. False whenever a meaningful amount of mass
    /// left the grid at its boundary.
    pub fn is_balanced(&self) -> bool {
        self.residual().abs() <= self.tolerance()
    }
}

impl fmt::Display for MassBalanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "injected {:.6e}, residing {:.6e}, fallout {:.6e}, boundary {:.6e}, residual {:.3e} ({})",
            self.injected,
            self.residing,
            self.fallout_removed,
            self.boundary_lost,
            self.residual(),
            if self.is_balanced() { "balanced" } else { "IMBALANCED" },
        )
    }
}

/// Outcome of a completed run.
#[derive(Clone, Debug)]
pub struct RunSummary {
    /// Internal ticks executed (wind samples times `hourly_res`).
    pub ticks_run: u64,
    /// Mass residing on the grid after the final tick.
    pub final_mass: f64,
    /// The closing mass balance.
    pub balance: MassBalanceReport,
}
