//! The boundary between the generators and the image on disk.
//!
//! Generators only produce numbers.  A `Renderer` turns an `Artwork`
//! and a `Colormap` into a file; `ImageRenderer` is the one that ships,
//! writing whatever format the `image` crate infers from the file
//! extension.

use std::path::Path;
use std::str::FromStr;

use crate::error::{FractalError, Result};
use crate::grid::SampleGrid;
use crate::spiral::SpiralPoint;
use crate::Artwork;

type Rgb = [u8; 3];

const MAGMA: &[Rgb] = &[
    [0, 0, 4],
    [81, 18, 124],
    [183, 55, 121],
    [252, 137, 97],
    [252, 253, 191],
];
const PLASMA: &[Rgb] = &[
    [13, 8, 135],
    [126, 3, 168],
    [204, 71, 120],
    [248, 149, 64],
    [240, 249, 33],
];
const FIRE: &[Rgb] = &[[0, 0, 0], [255, 0, 0], [255, 255, 0], [255, 255, 255]];
const OCEAN: &[Rgb] = &[[0, 0, 128], [0, 0, 255], [0, 255, 255], [255, 255, 255]];
const FOREST: &[Rgb] = &[[0, 0, 0], [0, 128, 0], [0, 255, 0], [255, 255, 0]];
const GRAY: &[Rgb] = &[[0, 0, 0], [255, 255, 255]];

/// A named colour scheme: evenly spaced stops blended linearly.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Colormap {
    /// Black through purple and orange to pale yellow.
    Magma,
    /// Deep blue through magenta to yellow.
    Plasma,
    /// Black, red, yellow, white.
    Fire,
    /// Navy, blue, cyan, white.
    Ocean,
    /// Black, dark green, green, yellow.
    Forest,
    /// Black to white.
    Gray,
}

impl Default for Colormap {
    fn default() -> Self {
        Colormap::Magma
    }
}

impl FromStr for Colormap {
    type Err = FractalError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "magma" => Ok(Colormap::Magma),
            "plasma" => Ok(Colormap::Plasma),
            "fire" => Ok(Colormap::Fire),
            "ocean" => Ok(Colormap::Ocean),
            "forest" => Ok(Colormap::Forest),
            "gray" | "grey" => Ok(Colormap::Gray),
            _ => Err(FractalError::invalid(format!("unknown colormap '{}'", s))),
        }
    }
}

impl Colormap {
    /// Every recognised name.
    pub const NAMES: &'static [&'static str] =
        &["magma", "plasma", "fire", "ocean", "forest", "gray"];

    fn stops(self) -> &'static [Rgb] {
        match self {
            Colormap::Magma => MAGMA,
            Colormap::Plasma => PLASMA,
            Colormap::Fire => FIRE,
            Colormap::Ocean => OCEAN,
            Colormap::Forest => FOREST,
            Colormap::Gray => GRAY,
        }
    }

    /// The colour at `t`, clamped to [0, 1].
    pub fn color(self, t: f64) -> Rgb {
        let stops = self.stops();
        let t = if t.is_nan() { 0.0 } else { t.max(0.0).min(1.0) };
        let span = t * (stops.len() - 1) as f64;
        let lower = (span.floor() as usize).min(stops.len() - 2);
        let frac = span - lower as f64;
        let (a, b) = (stops[lower], stops[lower + 1]);
        let mut out = [0u8; 3];
        for i in 0..3 {
            let v = f64::from(a[i]) + (f64::from(b[i]) - f64::from(a[i])) * frac;
            out[i] = v.round() as u8;
        }
        out
    }
}

/// The capability a host supplies to put an artwork on disk.
pub trait Renderer {
    /// Colour `artwork` with `colormap` and write it to `path`.
    fn emit(&self, artwork: &Artwork, colormap: Colormap, path: &Path) -> Result<()>;
}

/// Writes artworks with the `image` crate.  Point sets have no size of
/// their own, so they are drawn on a canvas of `canvas` pixels.
#[derive(Copy, Clone, Debug)]
pub struct ImageRenderer {
    /// Width and height used for point sets.
    pub canvas: (u32, u32),
}

impl Default for ImageRenderer {
    fn default() -> Self {
        ImageRenderer { canvas: (800, 800) }
    }
}

/// Colour a grid, scaling its values so the smallest gets the first
/// colour and the largest the last.
pub fn shade_grid<T: Copy + Into<f64>>(grid: &SampleGrid<T>, colormap: Colormap) -> Vec<u8> {
    let values: Vec<f64> = grid.cells().iter().map(|&v| v.into()).collect();
    let low = values.iter().cloned().fold(std::f64::INFINITY, f64::min);
    let high = values.iter().cloned().fold(std::f64::NEG_INFINITY, f64::max);
    let range = high - low;
    let mut pixels = Vec::with_capacity(values.len() * 3);
    for v in values {
        let t = if range > 0.0 { (v - low) / range } else { 0.0 };
        pixels.extend_from_slice(&colormap.color(t));
    }
    pixels
}

/// Plot points on a `width` by `height` canvas filled with the first
/// colour, fitted to their bounding box.  Later points get later
/// colours.
pub fn plot_points(points: &[SpiralPoint], width: u32, height: u32, colormap: Colormap) -> Vec<u8> {
    let background = colormap.color(0.0);
    let mut pixels: Vec<u8> = background
        .iter()
        .cloned()
        .cycle()
        .take((width * height * 3) as usize)
        .collect();
    if points.is_empty() || width == 0 || height == 0 {
        return pixels;
    }

    let (mut x_min, mut x_max, mut y_min, mut y_max) = (
        std::f64::INFINITY,
        std::f64::NEG_INFINITY,
        std::f64::INFINITY,
        std::f64::NEG_INFINITY,
    );
    for p in points {
        x_min = x_min.min(p.x);
        x_max = x_max.max(p.x);
        y_min = y_min.min(p.y);
        y_max = y_max.max(p.y);
    }
    // A square scale keeps the spiral round.
    let extent = (x_max - x_min).max(y_max - y_min).max(std::f64::EPSILON);
    let scale = f64::from(width.min(height) - 1) / extent;

    for (i, p) in points.iter().enumerate() {
        let column = ((p.x - x_min) * scale).round() as u32;
        // Row 0 is the top of the image.
        let row = (height - 1).saturating_sub(((p.y - y_min) * scale).round() as u32);
        if column >= width || row >= height {
            continue;
        }
        let t = (i + 1) as f64 / points.len() as f64;
        let offset = ((row * width + column) * 3) as usize;
        pixels[offset..offset + 3].copy_from_slice(&colormap.color(0.25 + 0.75 * t));
    }
    pixels
}

impl ImageRenderer {
    /// The RGB bytes and dimensions `emit` would write.
    pub fn rasterize(&self, artwork: &Artwork, colormap: Colormap) -> (u32, u32, Vec<u8>) {
        match artwork {
            Artwork::Escape(grid) => (
                grid.width() as u32,
                grid.height() as u32,
                shade_grid(grid, colormap),
            ),
            Artwork::Mask(grid) => (
                grid.width() as u32,
                grid.height() as u32,
                shade_grid(grid, colormap),
            ),
            Artwork::Points(points) => {
                let (width, height) = self.canvas;
                (width, height, plot_points(points, width, height, colormap))
            }
        }
    }
}

impl Renderer for ImageRenderer {
    fn emit(&self, artwork: &Artwork, colormap: Colormap, path: &Path) -> Result<()> {
        let (width, height, pixels) = self.rasterize(artwork, colormap);
        if width == 0 || height == 0 {
            return Err(FractalError::Render("nothing to draw".to_string()));
        }
        debug!("writing {}x{} image to {}", width, height, path.display());
        image::save_buffer(path, &pixels, width, height, image::ColorType::RGB(8))
            .map_err(|e| FractalError::Render(format!("{}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colormap_names_parse() {
        for name in Colormap::NAMES {
            assert!(name.parse::<Colormap>().is_ok(), "{}", name);
        }
        assert_eq!("Fire".parse::<Colormap>(), Ok(Colormap::Fire));
        assert!("viridis".parse::<Colormap>().is_err());
    }

    #[test]
    fn colormap_ends_are_first_and_last_stops() {
        assert_eq!(Colormap::Fire.color(0.0), [0, 0, 0]);
        assert_eq!(Colormap::Fire.color(1.0), [255, 255, 255]);
        assert_eq!(Colormap::Gray.color(0.5), [128, 128, 128]);
        assert_eq!(Colormap::Ocean.color(-3.0), [0, 0, 128]);
        assert_eq!(Colormap::Ocean.color(7.0), [255, 255, 255]);
    }

    #[test]
    fn grid_is_scaled_min_to_max() {
        let grid = SampleGrid::from_cells(3, 1, vec![10u32, 20, 30]);
        let pixels = shade_grid(&grid, Colormap::Gray);
        assert_eq!(pixels, vec![0, 0, 0, 128, 128, 128, 255, 255, 255]);
    }

    #[test]
    fn flat_grid_gets_first_colour() {
        let grid = SampleGrid::from_cells(2, 1, vec![4u8, 4]);
        assert_eq!(shade_grid(&grid, Colormap::Gray), vec![0; 6]);
    }

    #[test]
    fn points_land_inside_canvas() {
        let points = vec![SpiralPoint { x: -1.0, y: -1.0 }, SpiralPoint { x: 1.0, y: 1.0 }];
        let pixels = plot_points(&points, 4, 4, Colormap::Gray);
        assert_eq!(pixels.len(), 48);
        // Bottom-left and top-right corners are lit.
        assert_ne!(&pixels[36..39], &[0, 0, 0]);
        assert_ne!(&pixels[9..12], &[0, 0, 0]);
        assert_eq!(&pixels[0..3], &[0, 0, 0]);
    }

    #[test]
    fn empty_point_set_is_background() {
        assert_eq!(plot_points(&[], 2, 2, Colormap::Fire), vec![0; 12]);
    }

    #[test]
    fn emit_writes_a_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mask.png");
        let artwork = Artwork::Mask(SampleGrid::from_cells(2, 2, vec![1, 0, 0, 1]));
        ImageRenderer::default()
            .emit(&artwork, Colormap::Forest, &path)
            .unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn emit_reports_unwritable_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.png");
        let artwork = Artwork::Mask(SampleGrid::from_cells(1, 1, vec![1]));
        match ImageRenderer::default().emit(&artwork, Colormap::Gray, &path) {
            Err(FractalError::Render(_)) => (),
            other => panic!("expected a render failure, got {:?}", other),
        }
    }
}
