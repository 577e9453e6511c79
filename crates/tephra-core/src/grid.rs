//! The 2D concentration raster.

use crate::error::GridError;

/// A `rows × cols` raster of ash concentrations (g/m³).
///
/// Rows index latitude (ascending northward), columns index longitude.
/// Storage is a flat row-major `Vec<f64>`; cell `(r, c)` lives at
/// `r * cols + c`. Values are finite and non-negative after every
/// completed engine tick.
///
/// `f64` rather than `f32`: eruption-series concentrations span many
/// orders of magnitude and the end-of-run mass balance must close to a
/// tight tolerance.
#[derive(Clone, Debug, PartialEq)]
pub struct AshGrid {
    rows: u32,
    cols: u32,
    data: Vec<f64>,
}

impl AshGrid {
    /// Create a zero-filled grid.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::EmptyGrid`] if either dimension is zero.
    pub fn zeros(rows: u32, cols: u32) -> Result<Self, GridError> {
        Self::filled(rows, cols, 0.0)
    }

    /// Create a grid with every cell set to `value`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::EmptyGrid`] if either dimension is zero.
    pub fn filled(rows: u32, cols: u32, value: f64) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::EmptyGrid);
        }
        Ok(Self {
            rows,
            cols,
            data: vec![value; rows as usize * cols as usize],
        })
    }

    /// Wrap an existing row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::EmptyGrid`] for zero dimensions, or
    /// [`GridError::ShapeMismatch`] if `data.len() != rows * cols`.
    pub fn from_vec(rows: u32, cols: u32, data: Vec<f64>) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::EmptyGrid);
        }
        if data.len() != rows as usize * cols as usize {
            return Err(GridError::ShapeMismatch {
                expected: (rows, cols),
                got: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Number of rows (latitude cells).
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns (longitude cells).
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// `(rows, cols)` pair.
    pub fn shape(&self) -> (u32, u32) {
        (self.rows, self.cols)
    }

    /// Total cell count.
    pub fn cell_count(&self) -> usize {
        self.data.len()
    }

    /// Flat index of cell `(r, c)`. Callers must stay in bounds.
    pub fn index(&self, r: u32, c: u32) -> usize {
        r as usize * self.cols as usize + c as usize
    }

    /// Value at cell `(r, c)`.
    ///
    /// # Panics
    ///
    /// Panics if `(r, c)` is out of bounds.
    pub fn get(&self, r: u32, c: u32) -> f64 {
        self.data[self.index(r, c)]
    }

    /// Set cell `(r, c)` to `value`.
    ///
    /// # Panics
    ///
    /// Panics if `(r, c)` is out of bounds.
    pub fn set(&mut self, r: u32, c: u32, value: f64) {
        let i = self.index(r, c);
        self.data[i] = value;
    }

    /// Add `amount` to cell `(r, c)`.
    ///
    /// # Panics
    ///
    /// Panics if `(r, c)` is out of bounds.
    pub fn add(&mut self, r: u32, c: u32, amount: f64) {
        let i = self.index(r, c);
        self.data[i] += amount;
    }

    /// Multiply every cell by `factor` (fallout application).
    pub fn scale(&mut self, factor: f64) {
        for v in &mut self.data {
            *v *= factor;
        }
    }

    /// Sum of all cell values.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Largest cell value (0.0 for an all-zero grid).
    pub fn max_value(&self) -> f64 {
        self.data.iter().copied().fold(0.0, f64::max)
    }

    /// Read-only view of the flat row-major buffer.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Mutable view of the flat row-major buffer.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Whether two grids have the same dimensions.
    pub fn same_shape(&self, other: &AshGrid) -> bool {
        self.rows == other.rows && self.cols == other.cols
    }
}
