//! Sierpinski carpet
//!
//! The carpet starts solid and repeatedly carves the middle ninth out
//! of every square, then does the same to the eight squares around
//! it.  Squares are kept on an explicit work stack rather than the call
//! stack, so `step` can be used to watch the carpet being cut one
//! square at a time.
//!
//! The carpet occupies the largest square that fits the grid, centred
//! along the longer axis.  Thirds are taken with integer division, so a
//! side that is not a power of three leaves a solid margin on the
//! right and bottom of each square.

use crate::error::Result;
use crate::grid::{self, SampleGrid};

/// A solid cell.
pub const SOLID: u8 = 1;

/// A carved cell.
pub const EMPTY: u8 = 0;

/// A pending square: top-left column and row, side, and nesting level.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Block {
    /// Leftmost column.
    pub x: usize,
    /// Topmost row.
    pub y: usize,
    /// Side length in cells.
    pub size: usize,
    /// How many squares enclose this one.
    pub depth: u32,
}

/// A carpet being cut.
#[derive(Debug)]
pub struct Carpet {
    grid: SampleGrid<u8>,
    pending: Vec<Block>,
    max_depth: Option<u32>,
}

impl Carpet {
    /// A solid `width` by `height` grid with the carpet's outer square
    /// waiting to be cut.  `max_depth` stops carving below that many
    /// levels; `None` carves until the squares are too small to split.
    pub fn new(width: usize, height: usize, max_depth: Option<u32>) -> Result<Self> {
        grid::cell_count(width, height)?;
        let size = width.min(height);
        let outer = Block {
            x: (width - size) / 2,
            y: (height - size) / 2,
            size,
            depth: 0,
        };
        Ok(Carpet {
            grid: SampleGrid::filled(width, height, SOLID),
            pending: vec![outer],
            max_depth,
        })
    }

    /// The squares still waiting to be cut, the next one last.
    pub fn pending(&self) -> &[Block] {
        &self.pending
    }

    /// The grid as cut so far.
    pub fn grid(&self) -> &SampleGrid<u8> {
        &self.grid
    }

    /// Cut the next pending square.  Returns false once nothing is left.
    pub fn step(&mut self) -> bool {
        let block = match self.pending.pop() {
            Some(block) => block,
            None => return false,
        };
        if self.max_depth.map_or(false, |max| block.depth >= max) {
            return true;
        }
        let third = block.size / 3;
        if third == 0 {
            return true;
        }

        for row in block.y + third..block.y + 2 * third {
            for column in block.x + third..block.x + 2 * third {
                self.grid.set(row, column, EMPTY);
            }
        }

        // Pushed in reverse so the top-left square is cut first.
        for i in (0..3).rev() {
            for j in (0..3).rev() {
                if i == 1 && j == 1 {
                    continue;
                }
                self.pending.push(Block {
                    x: block.x + j * third,
                    y: block.y + i * third,
                    size: third,
                    depth: block.depth + 1,
                });
            }
        }
        true
    }

    /// Cut every remaining square and hand back the grid.
    pub fn finish(mut self) -> SampleGrid<u8> {
        while self.step() {}
        self.grid
    }
}

/// A fully cut carpet.
pub fn sierpinski_carpet(
    width: usize,
    height: usize,
    max_depth: Option<u32>,
) -> Result<SampleGrid<u8>> {
    let carpet = Carpet::new(width, height, max_depth)?;
    debug!(
        "cutting a {}x{} carpet (depth cap {:?})",
        width, height, max_depth
    );
    Ok(carpet.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(grid: &SampleGrid<u8>) -> usize {
        grid.cells().iter().filter(|&&c| c == SOLID).count()
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(sierpinski_carpet(0, 9, None).is_err());
        assert!(sierpinski_carpet(9, 0, None).is_err());
    }

    #[test]
    fn oversized_dimensions_are_rejected() {
        assert!(Carpet::new(usize::max_value(), 2, None).is_err());
        assert!(sierpinski_carpet(1 << 16, 1 << 16, None).is_err());
    }

    #[test]
    fn solid_cells_are_powers_of_eight() {
        for (levels, size) in [(0, 1), (1, 3), (2, 9), (3, 27), (4, 81)].iter() {
            let grid = sierpinski_carpet(*size, *size, None).unwrap();
            assert_eq!(solid(&grid), 8usize.pow(*levels), "size {}", size);
        }
    }

    #[test]
    fn nine_removes_the_centre_and_eight_small_centres() {
        let grid = sierpinski_carpet(9, 9, None).unwrap();
        assert_eq!(81 - solid(&grid), 9 + 8);
        for row in 3..6 {
            for column in 3..6 {
                assert_eq!(grid.get(row, column), Some(EMPTY));
            }
        }
        assert_eq!(grid.get(1, 1), Some(EMPTY));
        assert_eq!(grid.get(7, 4), Some(EMPTY));
        assert_eq!(grid.get(0, 0), Some(SOLID));
    }

    #[test]
    fn carpet_is_centred_in_wide_grids() {
        let grid = sierpinski_carpet(7, 3, None).unwrap();
        assert_eq!(grid.width(), 7);
        assert_eq!(grid.height(), 3);
        // Square occupies columns 2..5; its centre is (1, 3).
        assert_eq!(grid.get(1, 3), Some(EMPTY));
        assert_eq!(solid(&grid), 20);
    }

    #[test]
    fn carpet_is_centred_in_tall_grids() {
        let grid = sierpinski_carpet(3, 5, None).unwrap();
        assert_eq!(grid.get(2, 1), Some(EMPTY));
        assert_eq!(solid(&grid), 14);
    }

    #[test]
    fn uneven_sides_keep_a_solid_margin() {
        // Thirds of 10 are 3, so the last row and column are never cut.
        let grid = sierpinski_carpet(10, 10, None).unwrap();
        assert!((0..10).all(|i| grid.get(9, i) == Some(SOLID)));
        assert!((0..10).all(|i| grid.get(i, 9) == Some(SOLID)));
        assert_eq!(solid(&grid), 64 + 19);
    }

    #[test]
    fn depth_cap_stops_early() {
        let grid = sierpinski_carpet(27, 27, Some(1)).unwrap();
        assert_eq!(solid(&grid), 27 * 27 - 81);
        let grid = sierpinski_carpet(27, 27, Some(0)).unwrap();
        assert_eq!(solid(&grid), 27 * 27);
    }

    #[test]
    fn stepping_exposes_partial_state() {
        let mut carpet = Carpet::new(9, 9, None).unwrap();
        assert_eq!(carpet.pending().len(), 1);
        assert!(carpet.step());
        assert_eq!(solid(carpet.grid()), 72);
        assert_eq!(carpet.pending().len(), 8);
        assert!(carpet.pending().iter().all(|b| b.size == 3 && b.depth == 1));
        assert_eq!(carpet.pending().last().map(|b| (b.x, b.y)), Some((0, 0)));
        assert!(carpet.step());
        assert_eq!(carpet.grid().get(1, 1), Some(EMPTY));
        assert_eq!(solid(carpet.grid()), 71);
    }

    #[test]
    fn stepping_ends() {
        let mut carpet = Carpet::new(3, 3, None).unwrap();
        assert!(carpet.step());
        while carpet.step() {}
        assert!(!carpet.step());
        assert!(carpet.pending().is_empty());
    }
}
