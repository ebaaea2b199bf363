//! Handles the Graphics Output Protocol (GOP) provided by the UEFI
//! firmware.

use helix_core::video::SurfaceInfo;
use log::info;
use uefi::boot;
use uefi::proto::console::gop::{GraphicsOutput, PixelFormat};

use super::GopSurface;
use crate::error::SetupError;

/// Opens the GOP exclusively and switches to the best usable mode.
///
/// The demo writes 32-bit blue-green-red-reserved words, so only `Bgr`
/// modes qualify; among those the highest resolution wins.
pub fn locate() -> Result<GopSurface, SetupError> {
    let gop_handle = boot::get_handle_for_protocol::<GraphicsOutput>()
        .map_err(|_| SetupError::SurfaceNotFound)?;
    let mut gop = boot::open_protocol_exclusive::<GraphicsOutput>(gop_handle)
        .map_err(|_| SetupError::SurfaceNotFound)?;

    let best_mode = gop
        .modes()
        .filter(|mode| mode.info().pixel_format() == PixelFormat::Bgr)
        .max_by(|a, b| {
            let res_a = a.info().resolution();
            let res_b = b.info().resolution();
            match res_a.0.cmp(&res_b.0) {
                core::cmp::Ordering::Equal => res_a.1.cmp(&res_b.1),
                other => other,
            }
        })
        .ok_or(SetupError::SurfaceNotFound)?;

    let mode_info = best_mode.info();
    gop.set_mode(&best_mode)
        .map_err(|_| SetupError::SurfaceNotFound)?;

    let mut framebuffer = gop.frame_buffer();

    // Safety:
    // The address and length are derived from the GOP-provided
    // framebuffer, and the mode is never changed again, so the mapping
    // stays valid for the rest of the run.
    let fb_slice =
        unsafe { core::slice::from_raw_parts_mut(framebuffer.as_mut_ptr(), framebuffer.size()) };

    let info = SurfaceInfo {
        width: mode_info.resolution().0,
        height: mode_info.resolution().1,
        stride: mode_info.stride(),
    };
    info!(
        "Graphics surface ready: {}x{} (stride {})",
        info.width, info.height, info.stride
    );

    Ok(GopSurface {
        gop,
        framebuffer: fb_slice,
        info,
    })
}
