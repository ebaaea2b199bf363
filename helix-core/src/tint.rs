//! Day/night tint blending of the decoded image.
//!
//! Each frame recolors the pixels whose blue channel exceeds their red
//! channel (the sky, in practice) toward black or toward a light-blue
//! target, following the sign and magnitude of `sin(phase)`. The blend
//! always reads from the immutable original buffer, never from the
//! previous frame's output, so it is idempotent per phase and colors
//! cannot drift.

use libm::sin;

use crate::image::PixelBuffer;
use crate::video::PixelComponents;

/// Blend target for the "day" half of the cycle.
pub const DAY_TARGET: PixelComponents = PixelComponents::new(175, 224, 250);

/// Recolors `original` into `scratch` for the given rotation phase.
///
/// Both buffers must have identical dimensions; `scratch` is normally the
/// clone made at startup. Pixels failing the chroma predicate are copied
/// unchanged, and the reserved byte is preserved everywhere.
pub fn blend_into(original: &PixelBuffer, scratch: &mut PixelBuffer, phase: f64) {
    debug_assert_eq!(original.width(), scratch.width());
    debug_assert_eq!(original.height(), scratch.height());

    let v = sin(phase);
    for (src, dst) in original.pixels().iter().zip(scratch.pixels_mut()) {
        let c = src.components();
        if c.blue <= c.red {
            *dst = *src;
            continue;
        }
        let blended = if v > 0.0 {
            // Night: fade toward black.
            PixelComponents::new(
                toward_black(c.red, v),
                toward_black(c.green, v),
                toward_black(c.blue, v),
            )
        } else {
            // Day: fade toward the light-blue target.
            PixelComponents::new(
                toward(DAY_TARGET.red, c.red, v),
                toward(DAY_TARGET.green, c.green, v),
                toward(DAY_TARGET.blue, c.blue, v),
            )
        };
        *dst = src.with_components(blended);
    }
}

#[inline]
fn toward_black(channel: u8, v: f64) -> u8 {
    (f64::from(channel) * (1.0 - v)) as u8
}

#[inline]
fn toward(target: u8, channel: u8, v: f64) -> u8 {
    (f64::from(target) - (f64::from(target) - f64::from(channel)) * (1.0 + v)) as u8
}
