//! Core logic for the Helix boot demo.
//!
//! Everything with algorithmic content lives here, free of any platform
//! dependency: the pixel/surface model, the bitmap decoder, the spiral
//! rasterizer, the day/night tint blender and the frame loop. The UEFI
//! binary in `demo/` only provides a [`video::Surface`] and a
//! [`demo::Console`] on top of firmware services.
#![no_std]
#![forbid(unsafe_op_in_unsafe_fn)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

extern crate alloc;

pub mod demo;
pub mod image;
pub mod spiral;
pub mod tint;
pub mod video;
