//! UEFI entry point for the Helix boot demo: decode the embedded scene,
//! grab the framebuffer and animate until a key is pressed.
#![no_main]
#![no_std]
#![warn(clippy::pedantic, clippy::nursery)]

extern crate alloc;

mod console;
mod error;
mod resource;
mod video;

use helix_core::demo::FrameLoop;
use helix_core::image;
use helix_core::video::Surface;
use log::{error, info};
use uefi::prelude::*;

use crate::console::UefiConsole;
use crate::error::SetupError;

#[panic_handler]
/// Logs the panic message and attempts a graceful reset, hanging if the
/// runtime services are unavailable.
fn panic(panic_info: &core::panic::PanicInfo) -> ! {
    error!("[PANIC]: {}", panic_info.message());

    // The demo never exits boot services, so stalling is safe; give the
    // user a moment to read the message in debug builds.
    #[cfg(debug_assertions)]
    boot::stall(5_000_000);

    let runtime_services_available = uefi::table::system_table_raw()
        .is_some_and(|system_table| !unsafe { system_table.as_ref() }.runtime_services.is_null());

    if runtime_services_available {
        uefi::runtime::reset(uefi::runtime::ResetType::COLD, Status::ABORTED, None);
    } else {
        loop {
            #[cfg(target_arch = "x86_64")]
            x86_64::instructions::hlt();
            #[cfg(not(target_arch = "x86_64"))]
            core::hint::spin_loop();
        }
    }
}

#[entry]
fn efi_entry() -> Status {
    uefi::helpers::init().unwrap();

    // The animation runs until a key is pressed, which can easily outlast
    // the firmware's 5 minute boot watchdog.
    let _ = boot::set_watchdog_timer(0, 0x1_0000, None);

    system::with_stdout(|stdout| {
        let _ = stdout.output_string(cstr16!("Helix boot demo is starting\n"));
    });

    match run() {
        Ok(frames) => {
            info!("Key pressed after {frames} frames");
            Status::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            err.status()
        }
    }
}

fn run() -> Result<u64, SetupError> {
    let blob = resource::locate()?;
    let scene = image::decode_resource(blob)?;
    info!("Scene decoded: {}x{}", scene.width(), scene.height());

    let mut surface = video::locate()?;

    // The text cursor would keep blinking over the animation.
    system::with_stdout(|stdout| {
        let _ = stdout.enable_cursor(false);
    });

    let mut frame_loop = FrameLoop::new(scene, surface.info())?;
    Ok(frame_loop.run(&mut surface, &mut UefiConsole))
}

/// The demo cannot be unloaded once it is running; this entry exists for
/// the image header but must never be reached.
#[unsafe(export_name = "efi_unload")]
extern "efiapi" fn efi_unload(_image_handle: uefi::Handle) -> Status {
    unreachable!("unload entry invoked");
}
