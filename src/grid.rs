//! The row-major sample buffer every grid generator hands back.

use crate::error::{FractalError, Result};

/// The most cells any generator will allocate for one grid.
pub const MAX_CELLS: usize = 1 << 30;

/// The number of cells in a `width` by `height` grid, or an error if
/// either side is zero or the grid would be larger than `MAX_CELLS`.
pub(crate) fn cell_count(width: usize, height: usize) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(FractalError::invalid(format!(
            "dimensions must be positive, got {}x{}",
            width, height
        )));
    }
    match width.checked_mul(height) {
        Some(cells) if cells <= MAX_CELLS => Ok(cells),
        _ => Err(FractalError::invalid(format!(
            "{}x{} is more than {} cells",
            width, height, MAX_CELLS
        ))),
    }
}

/// A 2-D array of scalars, one per pixel.  Row `r` holds the samples
/// whose y coordinate is the `r`th one, column `c` those whose x
/// coordinate is the `c`th one.  Produced fresh by each generator and
/// never mutated once returned.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleGrid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T: Copy> SampleGrid<T> {
    /// A grid of `width` columns and `height` rows, every cell `fill`.
    pub(crate) fn filled(width: usize, height: usize, fill: T) -> Self {
        SampleGrid {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }

    /// Wrap an already populated row-major buffer.
    pub(crate) fn from_cells(width: usize, height: usize, cells: Vec<T>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        SampleGrid {
            width,
            height,
            cells,
        }
    }

    pub(crate) fn set(&mut self, row: usize, column: usize, value: T) {
        let offset = row * self.width + column;
        self.cells[offset] = value;
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The cell at `row`, `column`, or None outside the grid.
    pub fn get(&self, row: usize, column: usize) -> Option<T> {
        if row < self.height && column < self.width {
            Some(self.cells[row * self.width + column])
        } else {
            None
        }
    }

    /// The whole buffer, row after row.
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    /// Iterate over the rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.width)
    }
}
