// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Escape-time evaluation
//!
//! Every escape-time fractal takes a point on the complex plane,
//! derives a starting value from it, and repeatedly applies an update
//! rule until either a stop condition fires or the iteration budget is
//! spent.  The Mandelbrot and Julia sets stop when the orbit leaves
//! the disc of radius 2 and report how long that took; Newton's method
//! on z³ - 1 stops when successive estimates agree and reports which
//! cube root of unity the orbit settled on.
//!
//! The rules only describe the start, the step, and what a stop means.
//! The loop that drives them lives in `evaluate`.

use num::Complex;

use crate::error::{FractalError, Result};

/// Iteration count, or root index for Newton basins.
pub type EscapeResult = u32;

/// A single escape-time rule.  `Sync` so a sampler can share one rule
/// across its worker threads.
pub trait EscapeRule: Sync {
    /// The value the orbit starts from when sampling `point`.
    fn start(&self, point: Complex<f64>) -> Complex<f64>;

    /// One application of the update rule.
    fn step(&self, z: Complex<f64>, point: Complex<f64>) -> Result<Complex<f64>>;

    /// Given iteration `i`, the value before and after the step, return
    /// the result if the orbit should stop here.
    fn stop(&self, i: u32, z: Complex<f64>, next: Complex<f64>) -> Option<EscapeResult>;

    /// The result once `max_iter` steps ran without stopping.
    fn exhausted(&self, max_iter: u32) -> EscapeResult;

    /// The result when a step could not be computed.
    fn degenerate(&self) -> EscapeResult {
        0
    }

    /// The largest value `evaluate` can return for this rule.
    fn ceiling(&self, max_iter: u32) -> EscapeResult {
        max_iter
    }
}

/// Run `rule` from `point` for at most `max_iter` steps.
pub fn evaluate<R: EscapeRule + ?Sized>(
    rule: &R,
    point: Complex<f64>,
    max_iter: u32,
) -> EscapeResult {
    let mut z = rule.start(point);
    for i in 0..max_iter {
        let next = match rule.step(z, point) {
            Ok(next) => next,
            Err(e) => {
                trace!("{} at {}", e, point);
                return rule.degenerate();
            }
        };
        if let Some(result) = rule.stop(i, z, next) {
            return result;
        }
        z = next;
    }
    rule.exhausted(max_iter)
}

#[inline]
fn escaped(z: Complex<f64>) -> bool {
    z.norm_sqr() > 4.0
}

/// z₀ = 0, zₙ₊₁ = zₙ² + c where c is the sampled point.  Returns the
/// index of the step whose result left the radius-2 disc.
#[derive(Copy, Clone, Debug, Default)]
pub struct Mandelbrot;

impl EscapeRule for Mandelbrot {
    fn start(&self, _point: Complex<f64>) -> Complex<f64> {
        Complex::new(0.0, 0.0)
    }

    fn step(&self, z: Complex<f64>, point: Complex<f64>) -> Result<Complex<f64>> {
        Ok(z * z + point)
    }

    fn stop(&self, i: u32, _z: Complex<f64>, next: Complex<f64>) -> Option<EscapeResult> {
        if escaped(next) {
            Some(i)
        } else {
            None
        }
    }

    fn exhausted(&self, max_iter: u32) -> EscapeResult {
        max_iter
    }
}

/// The sampled point is z₀ and c is fixed.  The magnitude test comes
/// before each update, so the result counts the updates performed
/// while the orbit was still inside the disc.
#[derive(Copy, Clone, Debug)]
pub struct Julia {
    /// The constant added on every step.
    pub c: Complex<f64>,
}

impl Julia {
    /// A Julia rule for the constant `c`.
    pub fn new(c: Complex<f64>) -> Self {
        Julia { c }
    }
}

impl Default for Julia {
    fn default() -> Self {
        Julia::new(Complex::new(-0.7, 0.27))
    }
}

impl EscapeRule for Julia {
    fn start(&self, point: Complex<f64>) -> Complex<f64> {
        point
    }

    fn step(&self, z: Complex<f64>, _point: Complex<f64>) -> Result<Complex<f64>> {
        Ok(z * z + self.c)
    }

    fn stop(&self, i: u32, z: Complex<f64>, _next: Complex<f64>) -> Option<EscapeResult> {
        if escaped(z) {
            Some(i)
        } else {
            None
        }
    }

    fn exhausted(&self, max_iter: u32) -> EscapeResult {
        max_iter
    }
}

/// Successive estimates closer than this have converged.
pub const NEWTON_CONVERGENCE: f64 = 1e-6;

/// A converged estimate within this of a root belongs to that root.
pub const NEWTON_ROOT_TOLERANCE: f64 = 1e-3;

/// Newton's method on p(z) = z³ - 1.  Returns the 1-based index of the
/// cube root of unity an orbit converges to, or 0 when it does not
/// converge, converges somewhere else, or hits a zero derivative.
#[derive(Copy, Clone, Debug)]
pub struct Newton {
    roots: [Complex<f64>; 3],
}

impl Default for Newton {
    fn default() -> Self {
        let half_root3 = 3.0_f64.sqrt() / 2.0;
        Newton {
            roots: [
                Complex::new(1.0, 0.0),
                Complex::new(-0.5, half_root3),
                Complex::new(-0.5, -half_root3),
            ],
        }
    }
}

impl Newton {
    /// The three cube roots of unity, in result order.
    pub fn roots(&self) -> &[Complex<f64>; 3] {
        &self.roots
    }

    fn classify(&self, z: Complex<f64>) -> EscapeResult {
        self.roots
            .iter()
            .position(|root| (z - root).norm() < NEWTON_ROOT_TOLERANCE)
            .map_or(0, |k| k as EscapeResult + 1)
    }
}

impl EscapeRule for Newton {
    fn start(&self, point: Complex<f64>) -> Complex<f64> {
        point
    }

    fn step(&self, z: Complex<f64>, _point: Complex<f64>) -> Result<Complex<f64>> {
        let derivative = z * z * 3.0;
        if derivative.norm_sqr() == 0.0 {
            return Err(FractalError::NumericDegenerate(format!(
                "zero derivative at {}",
                z
            )));
        }
        let next = z - (z * z * z - 1.0) / derivative;
        if !next.re.is_finite() || !next.im.is_finite() {
            return Err(FractalError::NumericDegenerate(format!(
                "non-finite estimate from {}",
                z
            )));
        }
        Ok(next)
    }

    fn stop(&self, _i: u32, z: Complex<f64>, next: Complex<f64>) -> Option<EscapeResult> {
        if (next - z).norm() < NEWTON_CONVERGENCE {
            Some(self.classify(next))
        } else {
            None
        }
    }

    fn exhausted(&self, _max_iter: u32) -> EscapeResult {
        0
    }

    fn ceiling(&self, _max_iter: u32) -> EscapeResult {
        self.roots.len() as EscapeResult
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mandelbrot_origin_never_escapes() {
        assert_eq!(evaluate(&Mandelbrot, Complex::new(0.0, 0.0), 100), 100);
    }

    #[test]
    fn mandelbrot_three_escapes_immediately() {
        assert_eq!(evaluate(&Mandelbrot, Complex::new(3.0, 0.0), 100), 0);
    }

    #[test]
    fn mandelbrot_counts_the_escaping_step() {
        // 0 -> 1 -> 2 -> 5: 2 sits on the radius, so the third step leaves the disc.
        assert_eq!(evaluate(&Mandelbrot, Complex::new(1.0, 0.0), 100), 2);
    }

    #[test]
    fn mandelbrot_boundary_is_inside() {
        // -2 -> 2 -> 2 ... sits exactly on the radius and never exceeds it.
        assert_eq!(evaluate(&Mandelbrot, Complex::new(-2.0, 0.0), 50), 50);
    }

    #[test]
    fn zero_iterations_is_exhausted_immediately() {
        assert_eq!(evaluate(&Mandelbrot, Complex::new(3.0, 0.0), 0), 0);
        assert_eq!(evaluate(&Newton::default(), Complex::new(1.0, 0.0), 0), 0);
    }

    #[test]
    fn julia_tests_before_stepping() {
        let julia = Julia::default();
        assert_eq!(evaluate(&julia, Complex::new(3.0, 0.0), 100), 0);
    }

    #[test]
    fn julia_counts_updates_inside_the_disc() {
        let julia = Julia::new(Complex::new(0.0, 0.0));
        // 1.5 -> 2.25: one update performed inside the disc.
        assert_eq!(evaluate(&julia, Complex::new(1.5, 0.0), 100), 1);
        // The unit circle maps to itself under z².
        assert_eq!(evaluate(&julia, Complex::new(0.0, 1.0), 40), 40);
    }

    #[test]
    fn newton_finds_each_root() {
        let newton = Newton::default();
        // Points on the ray through a root stay on it and shrink towards it.
        for (k, root) in newton.roots().iter().enumerate() {
            assert_eq!(evaluate(&newton, *root * 2.0, 50), k as u32 + 1);
        }
    }

    #[test]
    fn newton_on_a_root_converges_at_once() {
        let newton = Newton::default();
        for (k, root) in newton.roots().iter().enumerate() {
            assert_eq!(evaluate(&newton, *root, 1), k as u32 + 1);
        }
    }

    #[test]
    fn newton_origin_is_degenerate_not_a_crash() {
        let newton = Newton::default();
        assert!(newton.step(Complex::new(0.0, 0.0), Complex::new(0.0, 0.0)).is_err());
        assert_eq!(evaluate(&newton, Complex::new(0.0, 0.0), 20), 0);
    }

    #[test]
    fn newton_without_enough_steps_is_unclassified() {
        let newton = Newton::default();
        assert_eq!(evaluate(&newton, Complex::new(2.0, 0.0), 2), 0);
    }

    #[test]
    fn newton_ceiling_is_root_count() {
        assert_eq!(Newton::default().ceiling(500), 3);
        assert_eq!(Mandelbrot.ceiling(500), 500);
    }
}
