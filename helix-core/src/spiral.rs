//! The rotating spiral renderer.
//!
//! Each frame draws a double helix traced on a cone: a dense parametric
//! curve, projected obliquely and rasterized with 5-pixel cross dots
//! straight onto the surface.

use core::f64::consts::TAU;

use libm::{cos, floor, sin};

use crate::video::{Pixel, PixelComponents, Surface, SurfaceInfo};

/// One full revolution of the spiral every 36 ticks.
pub const TICKS_PER_REVOLUTION: u64 = 36;

/// Number of turns along the curve's length.
const TURNS: f64 = 5.0;

/// Parameter steps per frame.
const STEPS: usize = 1000;

/// Hue gradient cycles along the curve.
const HUE_CYCLES: f64 = 50.0;

/// Scale factors for the spiral, derived once from the surface resolution
/// at startup and immutable for the run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Vertical extent of the curve, in pixels.
    pub height_factor: f64,
    /// Radial extent of the curve, in pixels.
    pub width_factor: f64,
    /// Horizontal center of the curve, in pixels.
    pub width_base: f64,
    /// Rows to skip at the top of the surface (the blitted image band).
    pub y_offset: usize,
}

impl Geometry {
    #[must_use]
    pub fn new(surface: SurfaceInfo, y_offset: usize) -> Self {
        Self {
            height_factor: surface.height as f64 * 0.8,
            width_factor: surface.height as f64 * 0.5,
            width_base: surface.width as f64 * 0.5,
            y_offset,
        }
    }
}

#[must_use]
/// Rotation phase for the given tick, in radians.
///
/// The tick is reduced modulo the revolution period before scaling, so the
/// phase stays accurate no matter how long the loop has been running.
pub fn phase(tick: u64) -> f64 {
    TAU * ((tick % TICKS_PER_REVOLUTION) as f64) / (TICKS_PER_REVOLUTION as f64)
}

/// Draws one frame of the spiral at the given rotation phase.
pub fn render(surface: &mut impl Surface, geometry: &Geometry, phase: f64) {
    let info = surface.info();
    for step in 0..STEPS {
        let t = step as f64 / STEPS as f64;
        let radius = t * geometry.width_factor;
        let angle = TAU * TURNS * t + phase;
        let x = radius * cos(angle) + geometry.width_base;
        let z = radius * sin(angle);
        let y = t * geometry.height_factor;
        // Oblique projection: depth skews right and down.
        let cx = (x + 0.5 * z) as i64;
        let cy = (y + 0.25 * z + geometry.y_offset as f64) as i64;
        let color = hue(t);
        plot(surface, info, cx, cy, color);
        plot(surface, info, cx - 1, cy, color);
        plot(surface, info, cx + 1, cy, color);
        plot(surface, info, cx, cy - 1, color);
        plot(surface, info, cx, cy + 1, color);
    }
}

#[must_use]
/// Dot color along the curve: green rises as red falls, no blue channel.
fn hue(t: f64) -> Pixel {
    let cycle = t * HUE_CYCLES;
    let fract = cycle - floor(cycle);
    Pixel::from_components(PixelComponents::new(
        ((1.0 - fract) * 255.0) as u8,
        (fract * 255.0) as u8,
        0,
    ))
}

/// Bounds-checked plot. The original demo skipped the horizontal check,
/// letting a wide dot spill into the neighboring row; every write is
/// clipped here instead.
fn plot(surface: &mut impl Surface, info: SurfaceInfo, x: i64, y: i64, pixel: Pixel) {
    let in_x = x >= 0 && x < i64::try_from(info.width).unwrap_or(i64::MAX);
    let in_y = y >= 0 && y < i64::try_from(info.height).unwrap_or(i64::MAX);
    if in_x && in_y {
        surface.set_pixel(x as usize, y as usize, pixel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    /// Records every write without clipping, so a missing bounds check in
    /// the renderer shows up as an out-of-range coordinate.
    struct RecordingSurface {
        info: SurfaceInfo,
        writes: Vec<(usize, usize)>,
    }

    impl Surface for RecordingSurface {
        fn info(&self) -> SurfaceInfo {
            self.info
        }

        fn set_pixel(&mut self, x: usize, y: usize, _pixel: Pixel) {
            self.writes.push((x, y));
        }

        fn fill(&mut self, _dest: (usize, usize), _dims: (usize, usize), _color: Pixel) {}

        fn blit(
            &mut self,
            _pixels: &[Pixel],
            _src_stride: usize,
            _dest: (usize, usize),
            _dims: (usize, usize),
        ) {
        }
    }

    #[test]
    fn test_geometry_from_resolution() {
        let geometry = Geometry::new(
            SurfaceInfo {
                width: 800,
                height: 600,
                stride: 800,
            },
            0,
        );
        assert_eq!(geometry.width_factor, 300.0);
        assert_eq!(geometry.height_factor, 480.0);
        assert_eq!(geometry.width_base, 400.0);
    }

    #[test]
    fn test_phase_wraps_after_full_revolution() {
        assert_eq!(phase(36), phase(0));
        assert_eq!(phase(37), phase(1));
        assert!(phase(35) < TAU);
    }

    #[test]
    fn test_render_stays_in_bounds() {
        let info = SurfaceInfo {
            width: 800,
            height: 600,
            stride: 832,
        };
        let mut surface = RecordingSurface {
            info,
            writes: Vec::new(),
        };
        let geometry = Geometry::new(info, 0);
        render(&mut surface, &geometry, phase(0));
        assert!(!surface.writes.is_empty());
        for &(x, y) in &surface.writes {
            assert!(x < info.stride, "x = {x} beyond stride");
            assert!(x < info.width, "x = {x} beyond width");
            assert!(y < info.height, "y = {y} beyond height");
        }
    }

    #[test]
    fn test_render_clips_on_tiny_surface() {
        let info = SurfaceInfo {
            width: 10,
            height: 10,
            stride: 10,
        };
        let mut surface = RecordingSurface {
            info,
            writes: Vec::new(),
        };
        // A y_offset larger than the surface pushes the whole curve out.
        let geometry = Geometry::new(info, 64);
        render(&mut surface, &geometry, phase(7));
        assert!(surface.writes.is_empty());
    }

    #[test]
    fn test_hue_antiphase() {
        assert_eq!(
            hue(0.0).components(),
            PixelComponents::new(0xFF, 0x00, 0x00)
        );
        // Halfway through a cycle both channels sit mid-scale.
        let mid = hue(0.01).components();
        assert_eq!(mid.red, 127);
        assert_eq!(mid.green, 127);
        assert_eq!(mid.blue, 0);
    }
}
