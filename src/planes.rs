//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and a rectangle on the complex plane bounded by a ComplexRegion.
//! Samples are evenly spaced and inclusive of both edges, so the
//! first column lands on `x_min` and the last on `x_max`.
use num::Complex;

use crate::error::{FractalError, Result};
use crate::grid;

/// Describes the width and height of an integral plane that is assumed to start at
/// 0,0 and all values are assumed to be non-negative integers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralPlane(pub usize, pub usize);

/// The bounding rectangle on the complex plane, treating the real
/// part as the x-component and the imaginary part as the y-component.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ComplexRegion {
    /// Real part of the first column.
    pub x_min: f64,
    /// Real part of the last column.
    pub x_max: f64,
    /// Imaginary part of the first row.
    pub y_min: f64,
    /// Imaginary part of the last row.
    pub y_max: f64,
}

impl ComplexRegion {
    /// Build a region, rejecting empty, inverted or non-finite bounds.
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Result<Self> {
        let region = ComplexRegion {
            x_min,
            x_max,
            y_min,
            y_max,
        };
        region.validate()?;
        Ok(region)
    }

    /// The region the Mandelbrot set is usually drawn in.
    pub fn mandelbrot() -> Self {
        ComplexRegion {
            x_min: -2.0,
            x_max: 1.0,
            y_min: -1.0,
            y_max: 1.0,
        }
    }

    /// The square around the origin used for Julia sets and Newton basins.
    pub fn centered() -> Self {
        ComplexRegion {
            x_min: -1.5,
            x_max: 1.5,
            y_min: -1.5,
            y_max: 1.5,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        let bounds = [self.x_min, self.x_max, self.y_min, self.y_max];
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(FractalError::invalid("region bounds must be finite"));
        }
        if self.x_min >= self.x_max {
            return Err(FractalError::invalid(format!(
                "x_min ({}) must be less than x_max ({})",
                self.x_min, self.x_max
            )));
        }
        if self.y_min >= self.y_max {
            return Err(FractalError::invalid(format!(
                "y_min ({}) must be less than y_max ({})",
                self.y_min, self.y_max
            )));
        }
        Ok(())
    }
}

/// Describes the column, row of a pixel in the integral plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Contains the definitions of two planes: an integral cartesian plane,
/// and a complex cartesian plane.  Maps pixels from one to points in
/// the other.
#[derive(Debug)]
pub struct PlaneMapper {
    /// Width and height of the integral plane.
    pub integral_plane: IntegralPlane,
    /// The rectangle of the complex plane being sampled.
    pub region: ComplexRegion,
    // Distance between neighbouring samples along each axis.
    steps: (f64, f64),
}

/// Spacing of `count` evenly spaced samples across `[low, high]`.
fn spacing(low: f64, high: f64, count: usize) -> f64 {
    if count > 1 {
        (high - low) / ((count - 1) as f64)
    } else {
        0.0
    }
}

/// The `index`th of `count` evenly spaced samples.  The last sample is
/// pinned to `high` so rounding never nudges it past the edge.
fn sample(low: f64, high: f64, step: f64, index: usize, count: usize) -> f64 {
    if count > 1 && index == count - 1 {
        high
    } else {
        low + (index as f64) * step
    }
}

impl PlaneMapper {
    /// Constructor.  Takes the size of the integral plane and the
    /// region of the complex plane it covers.
    pub fn new(width: usize, height: usize, region: ComplexRegion) -> Result<PlaneMapper> {
        grid::cell_count(width, height)?;
        region.validate()?;

        Ok(PlaneMapper {
            integral_plane: IntegralPlane(width, height),
            region,
            steps: (
                spacing(region.x_min, region.x_max, width),
                spacing(region.y_min, region.y_max, height),
            ),
        })
    }

    /// The total number of points in the integral grid.  Used to
    /// calculate memory needs.
    pub fn len(&self) -> usize {
        self.integral_plane.0 * self.integral_plane.1
    }

    /// Describes that the integral plane is of a size.
    pub fn is_empty(&self) -> bool {
        self.integral_plane.0 == 0 || self.integral_plane.1 == 0
    }

    /// Given a pixel on the integral cartesian plane, return the
    /// sample point it stands for on the complex plane.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        let IntegralPlane(width, height) = self.integral_plane;
        Complex::new(
            sample(self.region.x_min, self.region.x_max, self.steps.0, pixel.0, width),
            sample(self.region.y_min, self.region.y_max, self.steps.1, pixel.1, height),
        )
    }
}
