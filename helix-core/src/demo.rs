//! The frame loop tying the demo together.
//!
//! One iteration erases the spiral band, draws the spiral for the current
//! tick, tint-blends the image, blits it, waits out the frame delay and
//! polls for a keystroke. The loop runs until a poll reports a key; there
//! is no other exit path. Everything is synchronous on the single thread,
//! and the tick advances exactly once per iteration regardless of how long
//! drawing took.

use crate::image::{DecodeError, PixelBuffer};
use crate::spiral::{self, Geometry};
use crate::tint;
use crate::video::{Pixel, Surface, SurfaceInfo};

/// Inter-frame delay: 65536 µs scaled by 88/105, approximating the
/// 18.2 Hz IBM PC timer period (~55 ms per frame).
pub const FRAME_DELAY_US: usize = 54_925;

/// Horizontal offset of the blitted image, left of the spiral's axis.
pub const LOGO_OFFSET: usize = 38;

/// A keystroke reported by the platform console.
///
/// The loop never filters by key code; carrying both halves of the
/// firmware key record keeps the type honest anyway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key {
    scan_code: u16,
    unicode: u16,
}

impl Key {
    #[must_use]
    #[inline]
    pub const fn new(scan_code: u16, unicode: u16) -> Self {
        Self { scan_code, unicode }
    }

    #[must_use]
    #[inline]
    pub const fn scan_code(&self) -> u16 {
        self.scan_code
    }

    #[must_use]
    #[inline]
    pub const fn unicode(&self) -> u16 {
        self.unicode
    }
}

/// Non-drawing platform services the loop depends on.
pub trait Console {
    /// Polls for a keystroke without blocking. `None` is not an error.
    fn poll_key(&mut self) -> Option<Key>;

    /// Cooperative pause; blocks the sole thread for the full duration.
    fn delay_us(&mut self, microseconds: usize);
}

/// Per-run state of the animation.
///
/// `original` keeps the decoded image untouched for the lifetime of the
/// run; `scratch` receives each frame's blend and is what gets blitted.
#[derive(Debug)]
pub struct FrameLoop {
    original: PixelBuffer,
    scratch: PixelBuffer,
    geometry: Geometry,
    tick: u64,
}

impl FrameLoop {
    /// Sets up the loop state for the given image and surface.
    ///
    /// Fails only if the scratch buffer cannot be allocated.
    pub fn new(image: PixelBuffer, surface: SurfaceInfo) -> Result<Self, DecodeError> {
        let scratch = image.try_clone()?;
        let geometry = Geometry::new(surface, image.height());
        Ok(Self {
            original: image,
            scratch,
            geometry,
            tick: 0,
        })
    }

    #[must_use]
    #[inline]
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    #[must_use]
    #[inline]
    pub const fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    #[must_use]
    #[inline]
    /// The most recently blended frame of the image.
    pub const fn blended(&self) -> &PixelBuffer {
        &self.scratch
    }

    /// Runs until a keystroke is observed; returns the number of frames
    /// rendered.
    ///
    /// The key is checked once per iteration, after the delay, so the
    /// frame in flight always completes before the loop exits.
    pub fn run(&mut self, surface: &mut impl Surface, console: &mut impl Console) -> u64 {
        loop {
            self.render_frame(surface, spiral::phase(self.tick));
            console.delay_us(FRAME_DELAY_US);
            if console.poll_key().is_some() {
                return self.tick + 1;
            }
            self.tick += 1;
        }
    }

    /// Draws one complete frame at the given rotation phase.
    pub fn render_frame(&mut self, surface: &mut impl Surface, phase: f64) {
        let info = surface.info();

        // Erase the band the spiral swept last frame, below the image.
        // The fill color is the scratch buffer's first pixel, i.e. the sky
        // color of the previous frame's blend.
        let band_left =
            (self.geometry.width_base - 1.2 * self.geometry.width_factor).max(0.0) as usize;
        let band_width = (2.4 * self.geometry.width_factor) as usize;
        let band_top = self.original.height().min(info.height);
        let background = self
            .scratch
            .pixels()
            .first()
            .copied()
            .unwrap_or(Pixel::BLACK);
        surface.fill(
            (band_left, band_top),
            (band_width, info.height - band_top),
            background,
        );

        spiral::render(surface, &self.geometry, phase);

        tint::blend_into(&self.original, &mut self.scratch, phase);

        let dest_x = (self.geometry.width_base as usize).saturating_sub(LOGO_OFFSET);
        surface.blit(
            self.scratch.pixels(),
            self.scratch.width(),
            (dest_x, 0),
            (self.scratch.width(), self.scratch.height()),
        );
    }
}
