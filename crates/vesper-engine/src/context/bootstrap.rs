use std::time::Duration;

use winit::dpi::PhysicalSize;
use winit::event_loop::{ControlFlow, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::Window;

use crate::config::WindowConfig;
use crate::device::{Gpu, GpuInit};
use crate::error::BootstrapError;

use super::{Context, WindowSurfaceTryBuilder};
use super::events::WindowCreator;

/// Pumps allowed for the platform to deliver `resumed`.
const RESUME_ATTEMPTS: usize = 64;

/// Opens the window and brings up its graphics context.
///
/// Blocks until the adapter and device are acquired.
pub fn initialize(window: &WindowConfig, gpu: GpuInit) -> Result<Context, BootstrapError> {
    if window.width == 0 || window.height == 0 {
        return Err(BootstrapError::ZeroSize);
    }

    let mut event_loop = EventLoop::new().map_err(BootstrapError::Init)?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let attrs = Window::default_attributes()
        .with_title(window.title.clone())
        .with_inner_size(PhysicalSize::new(window.width, window.height))
        .with_resizable(window.resizable);

    let mut creator = WindowCreator::new(attrs);
    for _ in 0..RESUME_ATTEMPTS {
        let status = event_loop.pump_app_events(Some(Duration::ZERO), &mut creator);
        if creator.window.is_some() {
            break;
        }
        if let PumpStatus::Exit(code) = status {
            log::error!("event loop exited with code {code} during bootstrap");
            return Err(BootstrapError::WindowUnavailable(
                "event loop exited before the window was created",
            ));
        }
    }

    let native = match creator.window {
        Some(created) => created.map_err(BootstrapError::WindowCreation)?,
        None => {
            return Err(BootstrapError::WindowUnavailable(
                "the platform never resumed the application",
            ));
        }
    };
    log::info!(
        "window created: \"{}\" {}x{}",
        window.title,
        window.width,
        window.height
    );

    let surface = WindowSurfaceTryBuilder {
        window: native,
        gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu)),
    }
    .try_build()?;

    Ok(Context::new(surface, event_loop))
}
