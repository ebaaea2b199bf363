//! End-to-end tests for one `Running` iteration and loop termination,
//! against the in-memory surface and a scripted console.

use core::f64::consts::FRAC_PI_2;

use helix_core::demo::{Console, FrameLoop, Key, FRAME_DELAY_US};
use helix_core::image::PixelBuffer;
use helix_core::tint::DAY_TARGET;
use helix_core::video::{MemorySurface, Pixel, Surface};

/// Reports a key on the n-th poll and records every delay.
struct ScriptedConsole {
    key_on_poll: usize,
    polls: usize,
    delays: Vec<usize>,
}

impl ScriptedConsole {
    fn new(key_on_poll: usize) -> Self {
        Self {
            key_on_poll,
            polls: 0,
            delays: Vec::new(),
        }
    }
}

impl Console for ScriptedConsole {
    fn poll_key(&mut self) -> Option<Key> {
        self.polls += 1;
        (self.polls == self.key_on_poll).then(|| Key::new(0, u16::from(b'q')))
    }

    fn delay_us(&mut self, microseconds: usize) {
        self.delays.push(microseconds);
    }
}

/// A 2x2 image where every pixel passes the chroma predicate, with a
/// distinctive reserved byte to check it survives blending.
fn sky_image() -> PixelBuffer {
    let sky = Pixel::from_raw(0x7F20_40C8);
    PixelBuffer::new(2, 2, vec![sky; 4]).unwrap()
}

fn small_surface() -> MemorySurface {
    MemorySurface::new(10, 10, 10)
}

#[test]
fn test_full_night_frame() {
    let mut surface = small_surface();
    let mut frame_loop = FrameLoop::new(sky_image(), surface.info()).unwrap();

    frame_loop.render_frame(&mut surface, FRAC_PI_2);

    // sin = 1: every eligible pixel lands on black, reserved byte intact.
    for pixel in frame_loop.blended().pixels() {
        assert_eq!(*pixel, Pixel::from_raw(0x7F00_0000));
    }
}

#[test]
fn test_full_day_frame() {
    let mut surface = small_surface();
    let mut frame_loop = FrameLoop::new(sky_image(), surface.info()).unwrap();

    frame_loop.render_frame(&mut surface, -FRAC_PI_2);

    let expected = Pixel::from_raw(0x7F00_0000).with_components(DAY_TARGET);
    for pixel in frame_loop.blended().pixels() {
        assert_eq!(*pixel, expected);
    }
}

#[test]
fn test_blended_image_is_blitted() {
    let mut surface = small_surface();
    let mut frame_loop = FrameLoop::new(sky_image(), surface.info()).unwrap();

    frame_loop.render_frame(&mut surface, FRAC_PI_2);

    // width_base = 5, so the 38-pixel offset clamps the image to x = 0.
    let blended = frame_loop.blended().pixels()[0];
    assert_eq!(surface.pixel_at(0, 0), Some(blended));
    assert_eq!(surface.pixel_at(1, 1), Some(blended));
}

#[test]
fn test_key_on_nth_poll_renders_n_frames() {
    let mut surface = small_surface();
    let mut console = ScriptedConsole::new(5);
    let mut frame_loop = FrameLoop::new(sky_image(), surface.info()).unwrap();

    let frames = frame_loop.run(&mut surface, &mut console);

    assert_eq!(frames, 5);
    assert_eq!(frame_loop.tick(), 4);
    assert_eq!(console.polls, 5);
    assert_eq!(console.delays, vec![FRAME_DELAY_US; 5]);
}

#[test]
fn test_key_on_first_poll_renders_one_frame() {
    let mut surface = small_surface();
    let mut console = ScriptedConsole::new(1);
    let mut frame_loop = FrameLoop::new(sky_image(), surface.info()).unwrap();

    let frames = frame_loop.run(&mut surface, &mut console);

    assert_eq!(frames, 1);
    assert_eq!(frame_loop.tick(), 0);
}

#[test]
fn test_band_erase_uses_previous_sky_color() {
    let mut surface = MemorySurface::new(64, 64, 64);
    let mut frame_loop = FrameLoop::new(sky_image(), surface.info()).unwrap();

    // First frame at full night blackens the scratch buffer...
    frame_loop.render_frame(&mut surface, FRAC_PI_2);
    // ...so the second frame's erase band is filled with black.
    frame_loop.render_frame(&mut surface, 0.0);

    // Band spans x in [32 - 1.2*32, 32 + 1.2*32) from y = 2 downward;
    // probe a corner the spiral never reaches.
    assert_eq!(surface.pixel_at(0, 63), Some(Pixel::from_raw(0x7F00_0000)));
}
