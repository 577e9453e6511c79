//! Bounds-checked neighbour resolution over the row-major raster.
//!
//! The model's boundary policy is drop-at-edge: an offset that leaves
//! the grid resolves to `None` and the caller accounts the mass as
//! lost. No wraparound, no clamping.

use crate::octant::Octant;
use smallvec::SmallVec;

/// Flat index of `(r, c)` if it lies inside a `rows × cols` grid.
pub fn in_bounds_flat(r: i32, c: i32, rows: u32, cols: u32) -> Option<usize> {
    if r < 0 || r >= rows as i32 || c < 0 || c >= cols as i32 {
        return None;
    }
    Some(r as usize * cols as usize + c as usize)
}

/// Flat index of the cell one `octant` step from `(r, c)`, or `None`
/// if the destination falls outside the grid.
pub fn offset_flat(r: u32, c: u32, octant: Octant, rows: u32, cols: u32) -> Option<usize> {
    let (dr, dc) = octant.offset();
    in_bounds_flat(r as i32 + dr, c as i32 + dc, rows, cols)
}

/// In-bounds 8-connected neighbours of `(r, c)` as `(octant, flat index)`
/// pairs, in octant-code order.
pub fn neighbours_flat(r: u32, c: u32, rows: u32, cols: u32) -> SmallVec<[(Octant, usize); 8]> {
    let mut result = SmallVec::new();
    for octant in Octant::ALL {
        if let Some(i) = offset_flat(r, c, octant, rows, cols) {
            result.push((octant, i));
        }
    }
    result
}
