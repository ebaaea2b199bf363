//! Pixel and surface model.
//!
//! The destination surface is a linear framebuffer addressed as
//! `base + row * stride + column`, 4 bytes per pixel, little-endian
//! blue-green-red-reserved channel layout. All drawing primitives are
//! bounds-checked: writes outside the surface are silently clipped.

use alloc::vec;
use alloc::vec::Vec;

/// A packed 32-bit framebuffer pixel.
///
/// Little-endian word layout: bits 16-23 red, bits 8-15 green,
/// bits 0-7 blue, bits 24-31 reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct Pixel(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct PixelComponents {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl PixelComponents {
    pub const BLACK: Self = Self {
        red: 0x00,
        green: 0x00,
        blue: 0x00,
    };
    pub const WHITE: Self = Self {
        red: 0xFF,
        green: 0xFF,
        blue: 0xFF,
    };

    #[must_use]
    #[inline]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

impl Pixel {
    pub const BLACK: Self = Self(0);

    #[must_use]
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    #[inline]
    pub const fn to_raw(self) -> u32 {
        self.0
    }

    #[must_use]
    #[inline]
    /// Packs the given components with a zeroed reserved byte.
    pub const fn from_components(components: PixelComponents) -> Self {
        Self(
            ((components.red as u32) << 16)
                | ((components.green as u32) << 8)
                | (components.blue as u32),
        )
    }

    #[must_use]
    #[inline]
    /// Replaces the color channels, keeping the reserved byte of `self`.
    pub const fn with_components(self, components: PixelComponents) -> Self {
        Self((self.0 & 0xFF00_0000) | Self::from_components(components).0)
    }

    #[must_use]
    #[inline]
    pub const fn components(self) -> PixelComponents {
        PixelComponents {
            red: ((self.0 >> 16) & 0xFF) as u8,
            green: ((self.0 >> 8) & 0xFF) as u8,
            blue: (self.0 & 0xFF) as u8,
        }
    }
}

/// Describes the layout of a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceInfo {
    /// The width in pixels.
    pub width: usize,
    /// The height in pixels.
    pub height: usize,
    /// Number of "virtual" pixels between the start of a line and the start
    /// of the next.
    ///
    /// The stride must be used to compute the start address of a next line
    /// as some framebuffers use additional padding at the end of a line.
    /// Invariant: `stride >= width`.
    pub stride: usize,
}

/// A line-addressable pixel surface.
///
/// This is the seam between the demo logic and the platform: the UEFI
/// binary backs it with the GOP framebuffer, tests back it with
/// [`MemorySurface`].
pub trait Surface {
    fn info(&self) -> SurfaceInfo;

    /// Writes a single pixel. Out-of-bounds coordinates are ignored.
    fn set_pixel(&mut self, x: usize, y: usize, pixel: Pixel);

    /// Fills a rectangle with a solid color, clipped to the surface.
    fn fill(&mut self, dest: (usize, usize), dims: (usize, usize), color: Pixel);

    /// Copies a row-major pixel block to the surface, clipped to the
    /// surface. `src_stride` is the width of a source row in pixels.
    fn blit(&mut self, pixels: &[Pixel], src_stride: usize, dest: (usize, usize), dims: (usize, usize));
}

/// Clips a rectangle starting at `origin` with extent `dims` to `limits`.
///
/// Returns the number of columns and rows that remain visible.
fn clipped_dims(origin: (usize, usize), dims: (usize, usize), limits: (usize, usize)) -> (usize, usize) {
    let cols = dims.0.min(limits.0.saturating_sub(origin.0));
    let rows = dims.1.min(limits.1.saturating_sub(origin.1));
    (cols, rows)
}

/// An owned, software-backed [`Surface`].
#[derive(Debug)]
pub struct MemorySurface {
    info: SurfaceInfo,
    pixels: Vec<Pixel>,
}

impl MemorySurface {
    #[must_use]
    /// Creates a black surface of the given dimensions.
    ///
    /// # Panics
    ///
    /// Panics if `stride < width`.
    pub fn new(width: usize, height: usize, stride: usize) -> Self {
        assert!(stride >= width, "stride must cover a full line");
        Self {
            info: SurfaceInfo {
                width,
                height,
                stride,
            },
            pixels: vec![Pixel::BLACK; stride * height],
        }
    }

    #[must_use]
    #[inline]
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    #[must_use]
    #[inline]
    /// Returns the pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel_at(&self, x: usize, y: usize) -> Option<Pixel> {
        if x < self.info.width && y < self.info.height {
            Some(self.pixels[y * self.info.stride + x])
        } else {
            None
        }
    }
}

impl Surface for MemorySurface {
    #[inline]
    fn info(&self) -> SurfaceInfo {
        self.info
    }

    fn set_pixel(&mut self, x: usize, y: usize, pixel: Pixel) {
        if x < self.info.width && y < self.info.height {
            self.pixels[y * self.info.stride + x] = pixel;
        }
    }

    fn fill(&mut self, dest: (usize, usize), dims: (usize, usize), color: Pixel) {
        let (cols, rows) = clipped_dims(dest, dims, (self.info.width, self.info.height));
        if cols == 0 {
            return;
        }
        for row in 0..rows {
            let start = (dest.1 + row) * self.info.stride + dest.0;
            self.pixels[start..start + cols].fill(color);
        }
    }

    fn blit(&mut self, pixels: &[Pixel], src_stride: usize, dest: (usize, usize), dims: (usize, usize)) {
        let (cols, rows) = clipped_dims(dest, dims, (self.info.width, self.info.height));
        let cols = cols.min(src_stride);
        if cols == 0 || src_stride == 0 {
            return;
        }
        let rows = rows.min(pixels.len() / src_stride);
        for row in 0..rows {
            let src_start = row * src_stride;
            let dst_start = (dest.1 + row) * self.info.stride + dest.0;
            let src_row = &pixels[src_start..src_start + cols];
            self.pixels[dst_start..dst_start + cols].copy_from_slice(src_row);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_packing() {
        let pixel = Pixel::from_components(PixelComponents::new(0x12, 0x34, 0x56));
        assert_eq!(pixel.to_raw(), 0x0012_3456);
        assert_eq!(pixel.components(), PixelComponents::new(0x12, 0x34, 0x56));
    }

    #[test]
    fn test_with_components_preserves_reserved() {
        let pixel = Pixel::from_raw(0xAB00_0000);
        let recolored = pixel.with_components(PixelComponents::new(1, 2, 3));
        assert_eq!(recolored.to_raw(), 0xAB01_0203);
    }

    #[test]
    fn test_set_pixel_clips() {
        let mut surface = MemorySurface::new(4, 3, 5);
        let red = Pixel::from_components(PixelComponents::new(0xFF, 0, 0));
        surface.set_pixel(3, 2, red);
        surface.set_pixel(4, 2, red);
        surface.set_pixel(3, 3, red);
        assert_eq!(surface.pixel_at(3, 2), Some(red));
        // Padding pixels between width and stride stay untouched.
        assert_eq!(surface.pixels()[2 * 5 + 4], Pixel::BLACK);
    }

    #[test]
    fn test_fill_clips_to_surface() {
        let mut surface = MemorySurface::new(4, 4, 4);
        let white = Pixel::from_components(PixelComponents::WHITE);
        surface.fill((2, 2), (10, 10), white);
        assert_eq!(surface.pixel_at(2, 2), Some(white));
        assert_eq!(surface.pixel_at(3, 3), Some(white));
        assert_eq!(surface.pixel_at(1, 1), Some(Pixel::BLACK));
    }

    #[test]
    fn test_blit_copies_rows() {
        let mut surface = MemorySurface::new(4, 4, 6);
        let src: Vec<Pixel> = (0..4_u32).map(Pixel::from_raw).collect();
        surface.blit(&src, 2, (1, 1), (2, 2));
        assert_eq!(surface.pixel_at(1, 1), Some(Pixel::from_raw(0)));
        assert_eq!(surface.pixel_at(2, 1), Some(Pixel::from_raw(1)));
        assert_eq!(surface.pixel_at(1, 2), Some(Pixel::from_raw(2)));
        assert_eq!(surface.pixel_at(2, 2), Some(Pixel::from_raw(3)));
    }

    #[test]
    fn test_blit_clips_to_surface() {
        let mut surface = MemorySurface::new(3, 3, 3);
        let src: Vec<Pixel> = (0..4_u32).map(Pixel::from_raw).collect();
        surface.blit(&src, 2, (2, 2), (2, 2));
        assert_eq!(surface.pixel_at(2, 2), Some(Pixel::from_raw(0)));
        assert_eq!(surface.pixel_at(0, 0), Some(Pixel::BLACK));
    }
}
