//! Keystroke polling and frame delay on top of boot services.

use helix_core::demo::{Console, Key};
use uefi::proto::console::text;
use uefi::{boot, system};

/// [`Console`] backed by the system text input and `Stall`.
pub struct UefiConsole;

impl Console for UefiConsole {
    fn poll_key(&mut self) -> Option<Key> {
        system::with_stdin(|input| input.read_key().ok().flatten()).map(|key| match key {
            text::Key::Printable(c) => Key::new(0, char::from(c) as u16),
            text::Key::Special(code) => Key::new(code.0, 0),
        })
    }

    fn delay_us(&mut self, microseconds: usize) {
        boot::stall(microseconds);
    }
}
