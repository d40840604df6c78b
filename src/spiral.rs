// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Spirals of integers
//!
//! Two unrelated spirals live here.  The polar spiral puts `n` at angle
//! 2π√n and radius equal to that angle, so every integer gets its own
//! point with no grid involved; plotting only the primes gives the
//! prime scatter.  The square spiral is Ulam's: starting from the
//! centre of an odd-sided grid, integers are laid out in runs of 1, 1,
//! 2, 2, 3, 3, ... cells, turning a quarter after each run, and the
//! cells holding primes are marked.

use std::f64::consts::PI;

use crate::error::{FractalError, Result};
use crate::grid::{self, SampleGrid};
use crate::primes::Primality;

/// A position on the polar spiral.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpiralPoint {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl SpiralPoint {
    /// Where `n` lands on the polar spiral.
    pub fn polar(n: u64) -> Self {
        let angle = (n as f64).sqrt() * 2.0 * PI;
        SpiralPoint {
            x: angle * angle.cos(),
            y: angle * angle.sin(),
        }
    }
}

/// The polar spiral positions of `numbers`, in the same order.
pub fn polar_spiral(numbers: &[u64]) -> Vec<SpiralPoint> {
    numbers.iter().map(|&n| SpiralPoint::polar(n)).collect()
}

/// The polar spiral positions of every prime up to and including
/// `limit`.
pub fn prime_scatter(limit: u64, rule: Primality) -> Result<Vec<SpiralPoint>> {
    if limit > i64::max_value() as u64 {
        return Err(FractalError::invalid(format!("limit {} is too large", limit)));
    }
    let mut primes = Vec::new();
    for n in 2..=limit {
        if rule.is_prime(n as i64)? {
            primes.push(n);
        }
    }
    debug!("{} primes up to {}", primes.len(), limit);
    Ok(polar_spiral(&primes))
}

/// Unit steps, in the order the square spiral turns through them.
/// Offsets are (dx, dy) with y pointing up.
const DIRECTIONS: [(i64, i64); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// An endless walk over the square spiral.  Yields each integer,
/// starting at 1, with its offset from the centre cell.
#[derive(Clone, Debug)]
pub struct SquareSpiral {
    n: u64,
    x: i64,
    y: i64,
    direction: usize,
    run: u64,
    taken: u64,
    turns: u8,
}

impl SquareSpiral {
    /// A walk starting at the centre.
    pub fn new() -> Self {
        SquareSpiral {
            n: 1,
            x: 0,
            y: 0,
            direction: 0,
            run: 1,
            taken: 0,
            turns: 0,
        }
    }
}

impl Default for SquareSpiral {
    fn default() -> Self {
        SquareSpiral::new()
    }
}

impl Iterator for SquareSpiral {
    type Item = (u64, i64, i64);

    fn next(&mut self) -> Option<Self::Item> {
        let here = (self.n, self.x, self.y);
        let (dx, dy) = DIRECTIONS[self.direction];
        self.x += dx;
        self.y += dy;
        self.n += 1;
        self.taken += 1;
        if self.taken == self.run {
            self.taken = 0;
            self.direction = (self.direction + 1) % DIRECTIONS.len();
            self.turns += 1;
            if self.turns == 2 {
                self.turns = 0;
                self.run += 1;
            }
        }
        Some(here)
    }
}

/// The smallest odd side whose square holds `count` integers.
pub fn compute_grid_size(count: u64) -> usize {
    let mut size = (count as f64).sqrt().ceil() as usize;
    if size % 2 == 0 {
        size += 1;
    }
    size
}

/// Pick the Ulam grid side from exactly one of an explicit side or a
/// count of integers to cover.
pub fn resolve_ulam_size(size: Option<usize>, count: Option<u64>) -> Result<usize> {
    match (size, count) {
        (Some(_), Some(_)) => Err(FractalError::invalid(
            "give either a grid size or a count, not both",
        )),
        (None, None) => Err(FractalError::invalid("give a grid size or a count")),
        (Some(size), None) => Ok(size),
        (None, Some(count)) => Ok(compute_grid_size(count)),
    }
}

/// An Ulam spiral on an odd-sided square grid.
#[derive(Debug)]
pub struct UlamSpiral {
    size: usize,
    rule: Primality,
}

impl UlamSpiral {
    /// The side must be odd so the spiral has a centre cell.
    pub fn new(size: usize, rule: Primality) -> Result<Self> {
        if size == 0 {
            return Err(FractalError::invalid("grid size must be positive"));
        }
        if size % 2 == 0 {
            return Err(FractalError::invalid(format!(
                "grid size must be odd, got {}",
                size
            )));
        }
        grid::cell_count(size, size)?;
        Ok(UlamSpiral { size, rule })
    }

    /// Grid side.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Row and column of the cell holding `(dx, dy)` from the centre.
    /// Row 0 is the top, so positive dy moves towards it.
    fn cell(&self, dx: i64, dy: i64) -> Option<(usize, usize)> {
        let centre = (self.size / 2) as i64;
        let (x, y) = (centre + dx, centre + dy);
        let size = self.size as i64;
        if x < 0 || y < 0 || x >= size || y >= size {
            return None;
        }
        Some(((size - y - 1) as usize, x as usize))
    }

    /// Which integer sits in each cell, for inspecting the layout.
    pub fn numbering(&self) -> SampleGrid<u64> {
        let mut grid = SampleGrid::filled(self.size, self.size, 0);
        let cells = self.size * self.size;
        for (n, dx, dy) in SquareSpiral::new().take(cells) {
            if let Some((row, column)) = self.cell(dx, dy) {
                grid.set(row, column, n);
            }
        }
        grid
    }

    /// Walk 1..=size² and mark the cells holding primes with 1.
    pub fn generate(&self) -> Result<SampleGrid<u8>> {
        let mut grid = SampleGrid::filled(self.size, self.size, 0);
        let cells = self.size * self.size;
        for (n, dx, dy) in SquareSpiral::new().take(cells) {
            match self.cell(dx, dy) {
                Some((row, column)) => {
                    if self.rule.is_prime(n as i64)? {
                        grid.set(row, column, 1);
                    }
                }
                None => warn!("spiral stepped off a {} grid at {}", self.size, n),
            }
        }
        Ok(grid)
    }
}
