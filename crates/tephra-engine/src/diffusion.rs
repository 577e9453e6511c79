//! Neighbour diffusion pass.
//!
//! Runs after transport on the post-transport buffer. Each cell's
//! diffusion share is recomputed from that buffer and redistributed to
//! its 8-neighbourhood according to the configured policy. Like the
//! transport pass, all reads are against the input buffer and writes
//! accumulate into a fresh one.

use smallvec::SmallVec;
use tephra_core::AshGrid;
use tephra_grid::neighbours_flat;

use crate::config::DiffusionPolicy;

/// Result of one diffusion pass.
#[derive(Clone, Debug)]
pub struct DiffusionOutcome {
    /// Post-diffusion grid.
    pub grid: AshGrid,
    /// Mass whose neighbour share fell outside the grid this pass.
    pub boundary_lost: f64,
}

/// Run the diffusion pass over the post-transport buffer.
///
/// `AllDirections` splits each cell's share into eighths, one per
/// compass neighbour, dropping and ledgering shares that fall off the
/// grid. `GradientDependent` divides the share equally among in-bounds
/// neighbours at strictly lower concentration than the donor's
/// post-donation value; a cell with no such neighbour keeps its full
/// mass. `NoDiffusion` passes the buffer through untouched.
pub fn diffusion_step(
    temp: &AshGrid,
    policy: DiffusionPolicy,
    diffusion_percent: f64,
    resolution_km: f64,
) -> DiffusionOutcome {
    if policy == DiffusionPolicy::NoDiffusion || diffusion_percent == 0.0 {
        return DiffusionOutcome {
            grid: temp.clone(),
            boundary_lost: 0.0,
        };
    }

    let (rows, cols) = temp.shape();
    let mut out = vec![0.0f64; temp.cell_count()];
    let mut boundary_lost = 0.0f64;

    let src = temp.as_slice();
    // Diagonal neighbours sit one cell away along both axes, so the
    // centre-to-centre distance is resolution / cos(45 deg).
    let diagonal_dist = resolution_km / std::f64::consts::FRAC_1_SQRT_2;

    for r in 0..rows {
        for c in 0..cols {
            let i = temp.index(r, c);
            let value = src[i];
            if value == 0.0 {
                continue;
            }

            let diff_amount = value * diffusion_percent;
            let neighbours = neighbours_flat(r, c, rows, cols);

            match policy {
                DiffusionPolicy::AllDirections => {
                    let share = diff_amount / 8.0;
                    for &(_, dest) in &neighbours {
                        out[dest] += share;
                    }
                    boundary_lost += share * (8 - neighbours.len()) as f64;
                    out[i] += value - diff_amount;
                }
                DiffusionPolicy::GradientDependent => {
                    let origin_value = value - diff_amount;
                    let mut downhill: SmallVec<[usize; 8]> = SmallVec::new();
                    for &(octant, dest) in &neighbours {
                        let dist = if octant.is_diagonal() {
                            diagonal_dist
                        } else {
                            resolution_km
                        };
                        let gradient = (src[dest] - origin_value) / dist;
                        if gradient < 0.0 {
                            downhill.push(dest);
                        }
                    }
                    if downhill.is_empty() {
                        // Nowhere lower to flow: the cell keeps its share.
                        out[i] += value;
                    } else {
                        let share = diff_amount / downhill.len() as f64;
                        for dest in downhill {
                            out[dest] += share;
                        }
                        out[i] += origin_value;
                    }
                }
                DiffusionPolicy::NoDiffusion => unreachable!(),
            }
        }
    }

    DiffusionOutcome {
        // Shape comes from the input grid, so this cannot fail.
        grid: AshGrid::from_vec(rows, cols, out).unwrap_or_else(|_| temp.clone()),
        boundary_lost,
    }
}
