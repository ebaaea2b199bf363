//! Decoding of the embedded image resource.
//!
//! The resource is a small directory blob: 2 tag bytes, then the
//! little-endian byte size of the first embedded item, then the item
//! itself, a standard BMP encoding. Decoding is all-or-nothing; no partial
//! buffer is ever exposed.

use alloc::vec::Vec;
use thiserror::Error;

use crate::video::Pixel;

mod bmp;

/// Byte length of the resource directory header preceding the first item.
const RESOURCE_HEADER_LEN: usize = 6;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Resource directory is truncated")]
    TruncatedResource,
    #[error("Not a BMP image")]
    BadSignature,
    #[error("Malformed BMP header")]
    BadHeader,
    #[error("Invalid image dimensions")]
    BadDimensions,
    #[error("Unsupported BMP encoding")]
    Unsupported,
    #[error("Pixel data is truncated")]
    TruncatedPixels,
    #[error("Color index outside the palette")]
    BadPaletteIndex,
    #[error("Out of memory")]
    OutOfMemory,
}

/// A decoded image: row-major pixels, top row first.
///
/// Invariant: `pixels.len() == width * height`, both dimensions non-zero;
/// never resized after decode.
#[derive(Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Pixel>,
}

impl PixelBuffer {
    pub fn new(width: usize, height: usize, pixels: Vec<Pixel>) -> Result<Self, DecodeError> {
        if width == 0 || height == 0 || pixels.len() != width * height {
            return Err(DecodeError::BadDimensions);
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    #[must_use]
    #[inline]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    #[inline]
    pub const fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    #[inline]
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    #[must_use]
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    /// Clones the buffer, reporting allocation failure instead of aborting.
    pub fn try_clone(&self) -> Result<Self, DecodeError> {
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(self.pixels.len())
            .map_err(|_| DecodeError::OutOfMemory)?;
        pixels.extend_from_slice(&self.pixels);
        Ok(Self {
            width: self.width,
            height: self.height,
            pixels,
        })
    }
}

/// Extracts the first item of the resource directory and decodes it.
pub fn decode_resource(blob: &[u8]) -> Result<PixelBuffer, DecodeError> {
    if blob.len() < RESOURCE_HEADER_LEN {
        return Err(DecodeError::TruncatedResource);
    }
    let size = u32::from_le_bytes(blob[2..6].try_into().unwrap()) as usize;
    let item = blob
        .get(RESOURCE_HEADER_LEN..RESOURCE_HEADER_LEN + size)
        .ok_or(DecodeError::TruncatedResource)?;
    bmp::decode(item)
}
