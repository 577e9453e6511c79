//! Directional transport pass.
//!
//! Each cell's wind vector selects exactly one destination neighbour
//! (its octant); a wind-speed-dependent fraction of the cell's
//! non-reserved mass moves there whole, never split. All reads are
//! against the pre-tick grid and all writes accumulate into a fresh
//! buffer, so cell processing order cannot affect the result.

use tephra_core::{AshGrid, WindSlice};
use tephra_grid::{offset_flat, WindSample};

/// Retained transportable remainders below this are zeroed to stop
/// floating dust accumulating over long runs.
pub const RETAINED_EPSILON: f64 = 1e-8;

/// Result of one transport pass.
#[derive(Clone, Debug)]
pub struct TransportOutcome {
    /// Post-transport grid (the `temp` buffer).
    pub grid: AshGrid,
    /// Mass whose destination fell outside the grid this pass.
    pub boundary_lost: f64,
}

/// Fraction of the transportable share that moves, from the cell's
/// `max_wind` (km/h) against the model resolution (km).
///
/// The tiers are the model's calibration, anchored to the wind speed
/// that fully crosses one cell in an hour; a calm cell transports
/// nothing regardless of tier.
pub fn transport_fraction(max_wind_kmh: f64, resolution_km: f64) -> f64 {
    if max_wind_kmh == 0.0 {
        0.0
    } else if max_wind_kmh >= resolution_km - 5.0 {
        1.0
    } else if max_wind_kmh >= resolution_km * 0.8 - 5.0 {
        0.95
    } else if max_wind_kmh >= resolution_km * 0.6 - 5.0 {
        0.90
    } else {
        0.85
    }
}

/// Run the transport pass over the whole grid.
///
/// For every cell with nonzero concentration `C`:
/// reserve `C × diffusion_percent` for the diffusion pass, move
/// `(C − reserve) × transport_fraction` into the octant neighbour
/// (dropped and ledgered if out of bounds), and retain the remainder
/// plus the reserve at the origin. Remainders below
/// [`RETAINED_EPSILON`] are treated as exactly zero.
pub fn transport_step(
    grid: &AshGrid,
    wind: &WindSlice,
    resolution_km: f64,
    diffusion_percent: f64,
) -> TransportOutcome {
    let (rows, cols) = grid.shape();
    let mut temp = vec![0.0f64; grid.cell_count()];
    let mut boundary_lost = 0.0f64;

    let src = grid.as_slice();
    let u = wind.u().as_slice();
    let v = wind.v().as_slice();

    for r in 0..rows {
        for c in 0..cols {
            let i = grid.index(r, c);
            let concentration = src[i];
            if concentration == 0.0 {
                continue;
            }

            let sample = WindSample::new(u[i], v[i]);
            let fraction = transport_fraction(sample.max_wind_kmh(), resolution_km);

            let diff_amount = concentration * diffusion_percent;
            let transportable = concentration - diff_amount;
            let moved = transportable * fraction;

            if moved != 0.0 {
                // fraction > 0 implies nonzero wind, so an octant exists.
                match sample.octant().and_then(|o| offset_flat(r, c, o, rows, cols)) {
                    Some(dest) => temp[dest] += moved,
                    None => boundary_lost += moved,
                }
            }

            let mut retained = transportable - moved;
            if retained < RETAINED_EPSILON {
                retained = 0.0;
            }
            temp[i] += retained + diff_amount;
        }
    }

    TransportOutcome {
        // Shape comes from the source grid, so this cannot fail.
        grid: AshGrid::from_vec(rows, cols, temp).unwrap_or_else(|_| grid.clone()),
        boundary_lost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tephra_core::GridError;

    const RES: f64 = 80.0;

    fn constant_wind(rows: u32, cols: u32, u: f64, v: f64) -> WindSlice {
        WindSlice::new(
            AshGrid::filled(rows, cols, u).unwrap(),
            AshGrid::filled(rows, cols, v).unwrap(),
        )
        .unwrap()
    }

    fn single_cell_grid(rows: u32, cols: u32, r: u32, c: u32, value: f64) -> AshGrid {
        let mut g = AshGrid::zeros(rows, cols).unwrap();
        g.set(r, c, value);
        g
    }

    #[test]
    fn fraction_tiers() {
        // resolution 80: thresholds at 75, 59, 43 km/h.
        assert_eq!(transport_fraction(80.0, RES), 1.0);
        assert_eq!(transport_fraction(75.0, RES), 1.0);
        assert_eq!(transport_fraction(74.9, RES), 0.95);
        assert_eq!(transport_fraction(59.0, RES), 0.95);
        assert_eq!(transport_fraction(58.9, RES), 0.90);
        assert_eq!(transport_fraction(43.0, RES), 0.90);
        assert_eq!(transport_fraction(42.9, RES), 0.85);
        assert_eq!(transport_fraction(0.0, RES), 0.0);
    }

    #[test]
    fn full_transport_moves_everything_east() {
        // 80 m/s east = 288 km/h, well past the full-transport tier.
        let grid = single_cell_grid(5, 5, 2, 2, 100.0);
        let wind = constant_wind(5, 5, 80.0, 0.0);
        let out = transport_step(&grid, &wind, RES, 0.0);
        assert_eq!(out.grid.get(2, 3), 100.0);
        assert_eq!(out.grid.get(2, 2), 0.0);
        assert_eq!(out.boundary_lost, 0.0);
        assert_eq!(out.grid.sum(), 100.0);
    }

    #[test]
    fn partial_transport_retains_remainder() {
        // 10 m/s = 36 km/h -> bottom tier, 0.85.
        let grid = single_cell_grid(5, 5, 2, 2, 100.0);
        let wind = constant_wind(5, 5, 10.0, 0.0);
        let out = transport_step(&grid, &wind, RES, 0.0);
        assert!((out.grid.get(2, 3) - 85.0).abs() < 1e-12);
        assert!((out.grid.get(2, 2) - 15.0).abs() < 1e-12);
    }

    #[test]
    fn diffusion_reserve_stays_at_origin() {
        let grid = single_cell_grid(5, 5, 2, 2, 100.0);
        let wind = constant_wind(5, 5, 80.0, 0.0);
        let out = transport_step(&grid, &wind, RES, 0.2);
        // 20 reserved, 80 transportable, all of it moves.
        assert!((out.grid.get(2, 3) - 80.0).abs() < 1e-12);
        assert!((out.grid.get(2, 2) - 20.0).abs() < 1e-12);
    }

    #[test]
    fn exactly_one_neighbour_receives() {
        let grid = single_cell_grid(5, 5, 2, 2, 100.0);
        // North-east wind.
        let wind = constant_wind(5, 5, 60.0, 60.0);
        let out = transport_step(&grid, &wind, RES, 0.0);
        let nonzero: Vec<usize> = out
            .grid
            .as_slice()
            .iter()
            .enumerate()
            .filter(|(_, &v)| v != 0.0)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(nonzero, vec![out.grid.index(3, 3)]);
    }

    #[test]
    fn boundary_overflow_is_dropped_and_ledgered() {
        let grid = single_cell_grid(5, 5, 2, 4, 100.0);
        let wind = constant_wind(5, 5, 80.0, 0.0);
        let out = transport_step(&grid, &wind, RES, 0.0);
        assert_eq!(out.grid.sum(), 0.0);
        assert_eq!(out.boundary_lost, 100.0);
    }

    #[test]
    fn calm_cell_keeps_its_mass() {
        let grid = single_cell_grid(5, 5, 2, 2, 100.0);
        let wind = constant_wind(5, 5, 0.0, 0.0);
        let out = transport_step(&grid, &wind, RES, 0.1);
        assert_eq!(out.grid.get(2, 2), 100.0);
        assert_eq!(out.grid.sum(), 100.0);
    }

    #[test]
    fn tiny_remainder_zeroed() {
        let grid = single_cell_grid(5, 5, 2, 2, 1e-9);
        let wind = constant_wind(5, 5, 10.0, 0.0);
        let out = transport_step(&grid, &wind, RES, 0.0);
        // 15% of 1e-9 is below RETAINED_EPSILON and treated as zero.
        assert_eq!(out.grid.get(2, 2), 0.0);
        assert!((out.grid.get(2, 3) - 0.85e-9).abs() < 1e-24);
    }

    #[test]
    fn converging_winds_accumulate_at_destination() {
        let mut grid = AshGrid::zeros(3, 3).unwrap();
        grid.set(1, 0, 10.0);
        grid.set(1, 2, 20.0);
        // Column 0 blows east, column 2 blows west; both land on (1,1).
        let mut u = AshGrid::zeros(3, 3).unwrap();
        for r in 0..3 {
            u.set(r, 0, 80.0);
            u.set(r, 2, -80.0);
        }
        let v = AshGrid::zeros(3, 3).unwrap();
        let wind = WindSlice::new(u, v).unwrap();
        let out = transport_step(&grid, &wind, RES, 0.0);
        assert_eq!(out.grid.get(1, 1), 30.0);
    }

    #[test]
    fn reads_are_against_pre_tick_grid() {
        // A chain of cells all blowing east: each destination receives
        // only its upwind neighbour's pre-tick mass, not a cascade.
        let mut grid = AshGrid::zeros(1, 4).unwrap();
        grid.set(0, 0, 8.0);
        grid.set(0, 1, 4.0);
        let wind = constant_wind(1, 4, 80.0, 0.0);
        let out = transport_step(&grid, &wind, RES, 0.0);
        assert_eq!(out.grid.get(0, 1), 8.0);
        assert_eq!(out.grid.get(0, 2), 4.0);
        assert_eq!(out.grid.get(0, 3), 0.0);
    }

    #[test]
    fn shape_error_type_is_exposed() {
        // Guard against the WindSlice constructor silently accepting
        // mismatched component shapes.
        let u = AshGrid::zeros(2, 3).unwrap();
        let v = AshGrid::zeros(3, 2).unwrap();
        assert!(matches!(
            WindSlice::new(u, v),
            Err(GridError::ComponentShapeMismatch { .. })
        ));
    }
}
