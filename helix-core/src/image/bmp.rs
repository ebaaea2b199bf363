//! BMP bitmap decoding.
//!
//! Supports the encodings produced for firmware logos: `BI_RGB`
//! (uncompressed) data at 1, 4 or 8 bits per pixel with a palette, or 24
//! and 32 bits per pixel raw. Rows are padded to 4-byte boundaries and
//! stored bottom-up unless the header declares a negative height.

use alloc::vec::Vec;

use super::{DecodeError, PixelBuffer};
use crate::video::{Pixel, PixelComponents};

/// BITMAPFILEHEADER (14 bytes) + BITMAPINFOHEADER (40 bytes minimum).
const FILE_HEADER_LEN: usize = 14;
const MIN_INFO_HEADER_LEN: usize = 40;

/// `BI_RGB`, the only compression mode supported.
const COMPRESSION_NONE: u32 = 0;

fn read_u16(data: &[u8], offset: usize) -> Result<u16, DecodeError> {
    data.get(offset..offset + 2)
        .map(|bytes| u16::from_le_bytes(bytes.try_into().unwrap()))
        .ok_or(DecodeError::BadHeader)
}

fn read_u32(data: &[u8], offset: usize) -> Result<u32, DecodeError> {
    data.get(offset..offset + 4)
        .map(|bytes| u32::from_le_bytes(bytes.try_into().unwrap()))
        .ok_or(DecodeError::BadHeader)
}

fn read_i32(data: &[u8], offset: usize) -> Result<i32, DecodeError> {
    read_u32(data, offset).map(|value| value as i32)
}

pub(crate) fn decode(data: &[u8]) -> Result<PixelBuffer, DecodeError> {
    if data.get(0..2) != Some(b"BM") {
        return Err(DecodeError::BadSignature);
    }

    let data_offset = read_u32(data, 10)? as usize;
    let info_header_len = read_u32(data, 14)? as usize;
    if info_header_len < MIN_INFO_HEADER_LEN {
        return Err(DecodeError::BadHeader);
    }

    let raw_width = read_i32(data, 18)?;
    let raw_height = read_i32(data, 22)?;
    if read_u16(data, 26)? != 1 {
        return Err(DecodeError::BadHeader);
    }
    let bits_per_pixel = read_u16(data, 28)?;
    if read_u32(data, 30)? != COMPRESSION_NONE {
        return Err(DecodeError::Unsupported);
    }
    let colors_used = read_u32(data, 46)? as usize;

    let width = usize::try_from(raw_width).map_err(|_| DecodeError::BadDimensions)?;
    // A negative height declares top-down row order.
    let top_down = raw_height < 0;
    let height = raw_height.unsigned_abs() as usize;
    if width == 0 || height == 0 {
        return Err(DecodeError::BadDimensions);
    }

    let palette = match bits_per_pixel {
        1 | 4 | 8 => Some(read_palette(data, info_header_len, bits_per_pixel, colors_used)?),
        24 | 32 => None,
        _ => return Err(DecodeError::Unsupported),
    };

    let row_bytes = (usize::from(bits_per_pixel) * width).div_ceil(32) * 4;
    let pixel_data = data
        .get(data_offset..data_offset + row_bytes * height)
        .ok_or(DecodeError::TruncatedPixels)?;

    let mut pixels = Vec::new();
    pixels
        .try_reserve_exact(width * height)
        .map_err(|_| DecodeError::OutOfMemory)?;

    for dst_y in 0..height {
        let src_y = if top_down { dst_y } else { height - 1 - dst_y };
        let row = &pixel_data[src_y * row_bytes..(src_y + 1) * row_bytes];
        for x in 0..width {
            pixels.push(decode_pixel(row, x, bits_per_pixel, palette.as_deref())?);
        }
    }

    PixelBuffer::new(width, height, pixels)
}

/// Reads the RGBQUAD palette that follows the info header.
fn read_palette(
    data: &[u8],
    info_header_len: usize,
    bits_per_pixel: u16,
    colors_used: usize,
) -> Result<Vec<Pixel>, DecodeError> {
    let max_entries = 1_usize << bits_per_pixel;
    let entries = if colors_used == 0 {
        max_entries
    } else if colors_used <= max_entries {
        colors_used
    } else {
        return Err(DecodeError::BadHeader);
    };

    let start = FILE_HEADER_LEN + info_header_len;
    let raw = data
        .get(start..start + entries * 4)
        .ok_or(DecodeError::BadHeader)?;

    let mut palette = Vec::new();
    palette
        .try_reserve_exact(entries)
        .map_err(|_| DecodeError::OutOfMemory)?;
    for entry in raw.chunks_exact(4) {
        // RGBQUAD stores blue, green, red, reserved.
        palette.push(Pixel::from_components(PixelComponents::new(
            entry[2], entry[1], entry[0],
        )));
    }
    Ok(palette)
}

fn decode_pixel(
    row: &[u8],
    x: usize,
    bits_per_pixel: u16,
    palette: Option<&[Pixel]>,
) -> Result<Pixel, DecodeError> {
    match bits_per_pixel {
        1 => {
            let index = usize::from((row[x / 8] >> (7 - (x % 8))) & 0x01);
            lookup(palette, index)
        }
        4 => {
            let byte = row[x / 2];
            let index = usize::from(if x % 2 == 0 { byte >> 4 } else { byte & 0x0F });
            lookup(palette, index)
        }
        8 => lookup(palette, usize::from(row[x])),
        24 => {
            let offset = x * 3;
            Ok(Pixel::from_components(PixelComponents::new(
                row[offset + 2],
                row[offset + 1],
                row[offset],
            )))
        }
        32 => {
            let offset = x * 4;
            Ok(Pixel::from_components(PixelComponents::new(
                row[offset + 2],
                row[offset + 1],
                row[offset],
            )))
        }
        _ => Err(DecodeError::Unsupported),
    }
}

#[inline]
fn lookup(palette: Option<&[Pixel]>, index: usize) -> Result<Pixel, DecodeError> {
    palette
        .and_then(|palette| palette.get(index))
        .copied()
        .ok_or(DecodeError::BadPaletteIndex)
}
