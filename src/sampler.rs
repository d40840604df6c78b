// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Grid sampling
//!
//! The sampler walks every pixel of the integral plane, maps it to its
//! point on the complex plane, and records what the escape rule makes
//! of that point.  Each cell depends only on its own coordinates, so
//! the multi-threaded version hands each thread a band of whole rows
//! and writes straight into that band of the shared buffer.

use itertools::iproduct;

use crate::error::{FractalError, Result};
use crate::escape::{evaluate, EscapeResult, EscapeRule};
use crate::grid::SampleGrid;
use crate::planes::{ComplexRegion, IntegralPlane, Pixel, PlaneMapper};

/// Samples one escape rule over a plane.  Once built, the sampler is
/// not mutable.
pub struct GridSampler<R: EscapeRule> {
    plane: PlaneMapper,
    rule: R,
    max_iter: u32,
}

impl<R: EscapeRule> GridSampler<R> {
    /// Requires the width and height of the image, the region of the
    /// complex plane to cover, the rule to evaluate, and the iteration
    /// budget per point.
    pub fn new(
        width: usize,
        height: usize,
        region: ComplexRegion,
        rule: R,
        max_iter: u32,
    ) -> Result<Self> {
        let plane = PlaneMapper::new(width, height, region)?;
        Ok(GridSampler {
            plane,
            rule,
            max_iter,
        })
    }

    /// The plane being sampled.
    pub fn plane(&self) -> &PlaneMapper {
        &self.plane
    }

    /// The largest value any cell can hold.
    pub fn ceiling(&self) -> EscapeResult {
        self.rule.ceiling(self.max_iter)
    }

    fn evaluate(&self, column: usize, row: usize) -> EscapeResult {
        let point = self.plane.pixel_to_point(&Pixel(column, row));
        evaluate(&self.rule, point, self.max_iter)
    }

    /// Fill `band` with the rows starting at `first_row`.
    fn render_band(&self, band: &mut [EscapeResult], first_row: usize) {
        let width = self.plane.integral_plane.0;
        for (offset, cell) in band.iter_mut().enumerate() {
            *cell = self.evaluate(offset % width, first_row + offset / width);
        }
    }

    /// The single-threaded sampler.
    pub fn sample_single(&self) -> SampleGrid<EscapeResult> {
        let IntegralPlane(width, height) = self.plane.integral_plane;
        let mut grid = SampleGrid::filled(width, height, 0);
        for (row, column) in iproduct!(0..height, 0..width) {
            grid.set(row, column, self.evaluate(column, row));
        }
        grid
    }

    /// A multi-threaded version of the sampler that takes a thread
    /// count.  The result is identical to `sample_single`.
    pub fn sample(&self, threads: usize) -> Result<SampleGrid<EscapeResult>> {
        if threads == 0 {
            return Err(FractalError::invalid("thread count must be positive"));
        }
        let IntegralPlane(width, height) = self.plane.integral_plane;
        if threads == 1 || height == 1 {
            return Ok(self.sample_single());
        }

        let rows_per_band = (height + threads - 1) / threads;
        debug!(
            "sampling {}x{} in bands of {} rows on {} threads",
            width, height, rows_per_band, threads
        );

        let mut cells = vec![0 as EscapeResult; self.plane.len()];
        crossbeam::scope(|spawner| {
            for (i, band) in cells.chunks_mut(rows_per_band * width).enumerate() {
                spawner.spawn(move |_| {
                    self.render_band(band, i * rows_per_band);
                });
            }
        })
        .map_err(|_| FractalError::Worker("a sampling thread panicked".to_string()))?;

        Ok(SampleGrid::from_cells(width, height, cells))
    }
}
