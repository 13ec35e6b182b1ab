//! Window + graphics context ownership.
//!
//! [`initialize`] creates the one [`Context`] of the process. Setup borrows it
//! through [`Context::render_ctx`]; the frame loop drives it through
//! [`Presenter`].

mod bootstrap;
mod events;
mod presenter;

pub use bootstrap::initialize;
pub use presenter::Presenter;

use std::time::Duration;

use ouroboros::self_referencing;
use winit::dpi::PhysicalSize;
use winit::event_loop::EventLoop;
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::Window;

use crate::device::Gpu;
use crate::render::RenderCtx;

use events::EventPump;

#[self_referencing]
struct WindowSurface {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

/// The window, its graphics context and the event loop feeding it.
///
/// Fields drop in declaration order: the surface (GPU, then window) goes
/// before the event loop.
pub struct Context {
    surface: WindowSurface,
    event_loop: EventLoop<()>,
    close_requested: bool,
}

impl Context {
    fn new(surface: WindowSurface, event_loop: EventLoop<()>) -> Self {
        Self {
            surface,
            event_loop,
            close_requested: false,
        }
    }

    pub fn window(&self) -> &Window {
        self.surface.borrow_window()
    }

    pub fn gpu(&self) -> &Gpu<'_> {
        self.surface.borrow_gpu()
    }

    /// Drawable size in physical pixels.
    pub fn size(&self) -> PhysicalSize<u32> {
        self.gpu().size()
    }

    pub fn render_ctx(&self) -> RenderCtx<'_> {
        self.gpu().render_ctx()
    }

    /// Whether the window asked to close. Never resets.
    pub fn close_requested(&self) -> bool {
        self.close_requested
    }

    /// Drains pending events without blocking and applies resizes.
    pub fn poll_events(&mut self) {
        let mut pump = EventPump::default();
        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut pump);

        if let Some(size) = pump.new_size(self.window()) {
            self.surface.with_gpu_mut(|gpu| gpu.resize(size));
        }

        if pump.close_requested && !self.close_requested {
            log::info!("window close requested");
        }
        if let PumpStatus::Exit(code) = status {
            log::debug!("event loop exited with code {code}");
            pump.close_requested = true;
        }
        self.close_requested |= pump.close_requested;

        log::trace!("polled {} window events", pump.events);
    }

    /// Releases the graphics context, then the window, then the event loop.
    pub fn shutdown(self) {
        let Context {
            surface,
            event_loop,
            ..
        } = self;
        drop(surface);
        drop(event_loop);
        log::info!("context shut down");
    }
}
