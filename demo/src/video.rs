//! The GOP-backed drawing surface.

use helix_core::video::{Pixel, Surface, SurfaceInfo};
use uefi::boot::ScopedProtocol;
use uefi::proto::console::gop::{BltOp, BltPixel, BltRegion, GraphicsOutput};

mod gop;
pub use gop::locate;

/// [`Surface`] over the firmware framebuffer.
///
/// Single pixels go straight into the mapped framebuffer; rectangle fills
/// and image blits go through the firmware's `Blt` service, which the
/// adapter may accelerate. Drawing is assumed to succeed once the mode is
/// set; clipping keeps every operation total.
pub struct GopSurface {
    gop: ScopedProtocol<GraphicsOutput>,
    framebuffer: &'static mut [u8],
    info: SurfaceInfo,
}

impl Surface for GopSurface {
    #[inline]
    fn info(&self) -> SurfaceInfo {
        self.info
    }

    fn set_pixel(&mut self, x: usize, y: usize, pixel: Pixel) {
        if x >= self.info.width || y >= self.info.height {
            return;
        }
        let offset = (y * self.info.stride + x) * 4;
        self.framebuffer[offset..offset + 4].copy_from_slice(&pixel.to_raw().to_le_bytes());
    }

    fn fill(&mut self, dest: (usize, usize), dims: (usize, usize), color: Pixel) {
        let (cols, rows) = clip(dest, dims, self.info);
        if cols == 0 || rows == 0 {
            return;
        }
        let c = color.components();
        let _ = self.gop.blt(BltOp::VideoFill {
            color: BltPixel::new(c.red, c.green, c.blue),
            dest,
            dims: (cols, rows),
        });
    }

    fn blit(&mut self, pixels: &[Pixel], src_stride: usize, dest: (usize, usize), dims: (usize, usize)) {
        let (cols, rows) = clip(dest, dims, self.info);
        let cols = cols.min(src_stride);
        if cols == 0 || src_stride == 0 {
            return;
        }
        let rows = rows.min(pixels.len() / src_stride);
        // Safety:
        // `Pixel` is a transparent u32 holding the same 4-byte
        // blue-green-red-reserved layout as `BltPixel`, so the buffer can
        // be reinterpreted in place for the firmware call.
        let buffer = unsafe {
            core::slice::from_raw_parts(pixels.as_ptr().cast::<BltPixel>(), pixels.len())
        };
        let _ = self.gop.blt(BltOp::BufferToVideo {
            buffer,
            src: BltRegion::SubRectangle {
                coords: (0, 0),
                px_stride: src_stride,
            },
            dest,
            dims: (cols, rows),
        });
    }
}

/// Columns and rows of the rectangle that remain on the surface.
fn clip(dest: (usize, usize), dims: (usize, usize), info: SurfaceInfo) -> (usize, usize) {
    (
        dims.0.min(info.width.saturating_sub(dest.0)),
        dims.1.min(info.height.saturating_sub(dest.1)),
    )
}
