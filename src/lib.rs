#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mathematical art generator
//!
//! Every picture this crate makes starts as numbers.  The escape-time
//! fractals (Mandelbrot, Julia, Newton basins) sample a rectangle of
//! the complex plane and record, for each pixel, how an iterated
//! function behaves at that point.  The Sierpinski carpet carves a
//! solid square into a self-similar lace.  The Ulam spiral lays the
//! integers out on a square spiral and marks the primes, and the prime
//! scatter places each prime on a polar spiral.
//!
//! `generate` turns a `Request` into an `Artwork`: a grid of escape
//! results, a 0/1 mask, or a list of points.  Turning that into an
//! image is the job of a `Renderer`; `ImageRenderer` writes files with
//! the `image` crate.  Nothing here is random, so the same request
//! always yields the same artwork.

extern crate crossbeam;
extern crate failure;
extern crate image;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;

pub mod carpet;
pub mod error;
pub mod escape;
pub mod grid;
pub mod planes;
pub mod primes;
pub mod render;
pub mod sampler;
pub mod spiral;

use std::fmt;
use std::str::FromStr;

use num::Complex;

pub use crate::error::{FractalError, Result};
pub use crate::escape::{EscapeResult, EscapeRule, Julia, Mandelbrot, Newton};
pub use crate::grid::SampleGrid;
pub use crate::planes::ComplexRegion;
pub use crate::primes::Primality;
pub use crate::render::{Colormap, ImageRenderer, Renderer};
pub use crate::sampler::GridSampler;
pub use crate::spiral::{SpiralPoint, UlamSpiral};

/// The kinds of picture the crate can generate.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Kind {
    /// Escape times of zₙ₊₁ = zₙ² + c over c.
    Mandelbrot,
    /// Escape times of zₙ₊₁ = zₙ² + c over z₀, for a fixed c.
    Julia,
    /// Basins of Newton's method on z³ - 1.
    Newton,
    /// The Sierpinski carpet.
    Sierpinski,
    /// The Ulam spiral of primes.
    Ulam,
    /// Primes on a polar spiral.
    PrimeScatter,
}

impl Kind {
    /// Every recognised name, in the order they are documented.
    pub const NAMES: &'static [&'static str] = &[
        "mandelbrot",
        "julia",
        "newton",
        "sierpinski",
        "ulam",
        "prime-scatter",
    ];

    /// The region sampled when the request does not name one.
    pub fn default_region(self) -> ComplexRegion {
        match self {
            Kind::Mandelbrot => ComplexRegion::mandelbrot(),
            _ => ComplexRegion::centered(),
        }
    }

    fn samples_plane(self) -> bool {
        match self {
            Kind::Mandelbrot | Kind::Julia | Kind::Newton => true,
            _ => false,
        }
    }
}

impl FromStr for Kind {
    type Err = FractalError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mandelbrot" => Ok(Kind::Mandelbrot),
            "julia" => Ok(Kind::Julia),
            "newton" => Ok(Kind::Newton),
            "sierpinski" => Ok(Kind::Sierpinski),
            "ulam" => Ok(Kind::Ulam),
            "prime-scatter" | "primes" => Ok(Kind::PrimeScatter),
            _ => Err(FractalError::invalid(format!("unknown kind '{}'", s))),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Kind::Mandelbrot => "mandelbrot",
            Kind::Julia => "julia",
            Kind::Newton => "newton",
            Kind::Sierpinski => "sierpinski",
            Kind::Ulam => "ulam",
            Kind::PrimeScatter => "prime-scatter",
        };
        f.write_str(name)
    }
}

/// What `generate` produced.
#[derive(Clone, Debug, PartialEq)]
pub enum Artwork {
    /// Escape counts, or Newton root indices.
    Escape(SampleGrid<EscapeResult>),
    /// A 0/1 grid: the carpet's solid cells or the Ulam spiral's primes.
    Mask(SampleGrid<u8>),
    /// Points in input order.
    Points(Vec<SpiralPoint>),
}

/// Everything needed to generate one artwork.  Fields that do not
/// apply to `kind` are ignored.
#[derive(Clone, Debug)]
pub struct Request {
    /// What to draw.
    pub kind: Kind,
    /// Columns, for the plane samplers and the carpet.
    pub width: usize,
    /// Rows, for the plane samplers and the carpet.
    pub height: usize,
    /// Iteration budget per point for the plane samplers.
    pub max_iter: u32,
    /// Region of the complex plane; `None` uses `Kind::default_region`.
    pub region: Option<ComplexRegion>,
    /// The Julia constant.
    pub julia_c: Complex<f64>,
    /// Optional cap on the carpet's nesting depth.
    pub carpet_depth: Option<u32>,
    /// Ulam grid side; exclusive with `ulam_count`.
    pub ulam_size: Option<usize>,
    /// How many integers the Ulam grid must hold; exclusive with
    /// `ulam_size`.
    pub ulam_count: Option<u64>,
    /// Largest integer considered by the prime scatter.
    pub scatter_limit: u64,
    /// Primality rule for the Ulam spiral and the prime scatter.
    pub primality: Primality,
    /// Worker threads for the plane samplers.
    pub threads: usize,
}

impl Request {
    /// A request for `kind` with the stock settings: 800x800, 100
    /// iterations, one thread.
    pub fn new(kind: Kind) -> Self {
        Request {
            kind,
            width: 800,
            height: 800,
            max_iter: 100,
            region: None,
            julia_c: Julia::default().c,
            carpet_depth: None,
            ulam_size: None,
            ulam_count: None,
            scatter_limit: 10_000,
            primality: Primality::default(),
            threads: 1,
        }
    }

    fn check_dimensions(&self) -> Result<()> {
        grid::cell_count(self.width, self.height).map(|_| ())
    }

    /// Reject the request if anything about it is unusable for its
    /// kind.  `generate` calls this before doing any work.
    pub fn validate(&self) -> Result<()> {
        match self.kind {
            Kind::Mandelbrot | Kind::Julia | Kind::Newton => {
                self.check_dimensions()?;
                if let Some(region) = self.region {
                    region.validate()?;
                }
                if self.threads == 0 {
                    return Err(FractalError::invalid("thread count must be positive"));
                }
                if !self.julia_c.re.is_finite() || !self.julia_c.im.is_finite() {
                    return Err(FractalError::invalid("julia constant must be finite"));
                }
            }
            Kind::Sierpinski => self.check_dimensions()?,
            Kind::Ulam => {
                let size = spiral::resolve_ulam_size(self.ulam_size, self.ulam_count)?;
                UlamSpiral::new(size, self.primality)?;
            }
            Kind::PrimeScatter => {
                if self.scatter_limit > i64::max_value() as u64 {
                    return Err(FractalError::invalid("prime scatter limit is too large"));
                }
            }
        }
        Ok(())
    }

    fn region(&self) -> ComplexRegion {
        self.region.unwrap_or_else(|| self.kind.default_region())
    }
}

fn sample<R: EscapeRule>(request: &Request, rule: R) -> Result<Artwork> {
    let sampler = GridSampler::new(
        request.width,
        request.height,
        request.region(),
        rule,
        request.max_iter,
    )?;
    Ok(Artwork::Escape(sampler.sample(request.threads)?))
}

/// Generate the artwork `request` describes.  Fails before any work is
/// done if the request is invalid; never returns a partial result.
pub fn generate(request: &Request) -> Result<Artwork> {
    request.validate()?;
    if request.kind.samples_plane() {
        info!(
            "generating {} at {}x{}, {} iterations, region {:?}",
            request.kind,
            request.width,
            request.height,
            request.max_iter,
            request.region()
        );
    } else {
        info!("generating {}", request.kind);
    }

    match request.kind {
        Kind::Mandelbrot => sample(request, Mandelbrot),
        Kind::Julia => sample(request, Julia::new(request.julia_c)),
        Kind::Newton => sample(request, Newton::default()),
        Kind::Sierpinski => Ok(Artwork::Mask(carpet::sierpinski_carpet(
            request.width,
            request.height,
            request.carpet_depth,
        )?)),
        Kind::Ulam => {
            let size = spiral::resolve_ulam_size(request.ulam_size, request.ulam_count)?;
            let ulam = UlamSpiral::new(size, request.primality)?;
            Ok(Artwork::Mask(ulam.generate()?))
        }
        Kind::PrimeScatter => Ok(Artwork::Points(spiral::prime_scatter(
            request.scatter_limit,
            request.primality,
        )?)),
    }
}
