use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes, WindowId};

/// Creates the window on the first `resumed`.
pub(super) struct WindowCreator {
    attrs: Option<WindowAttributes>,
    pub(super) window: Option<Result<Window, winit::error::OsError>>,
}

impl WindowCreator {
    pub(super) fn new(attrs: WindowAttributes) -> Self {
        Self {
            attrs: Some(attrs),
            window: None,
        }
    }
}

impl ApplicationHandler for WindowCreator {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(attrs) = self.attrs.take() {
            self.window = Some(event_loop.create_window(attrs));
        }
    }

    fn window_event(&mut self, _: &ActiveEventLoop, _: WindowId, _: WindowEvent) {}
}

/// Collects what one non-blocking pump observed.
#[derive(Debug, Default)]
pub(super) struct EventPump {
    pub(super) close_requested: bool,
    pub(super) resized: Option<PhysicalSize<u32>>,
    /// Scale factor changed; the new inner size is read from the window.
    pub(super) rescaled: bool,
    pub(super) events: usize,
}

impl EventPump {
    pub(super) fn record(&mut self, event: &WindowEvent) {
        self.events += 1;
        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => self.close_requested = true,
            WindowEvent::Resized(size) => self.resized = Some(*size),
            WindowEvent::ScaleFactorChanged { .. } => self.rescaled = true,
            _ => {}
        }
    }

    /// Size to reconfigure the surface to, if any.
    pub(super) fn new_size(&self, window: &Window) -> Option<PhysicalSize<u32>> {
        if self.rescaled {
            Some(window.inner_size())
        } else {
            self.resized
        }
    }
}

impl ApplicationHandler for EventPump {
    fn resumed(&mut self, _: &ActiveEventLoop) {}

    fn window_event(&mut self, _: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        self.record(&event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_request_is_recorded() {
        let mut pump = EventPump::default();
        pump.record(&WindowEvent::Focused(true));
        assert!(!pump.close_requested);

        pump.record(&WindowEvent::CloseRequested);
        assert!(pump.close_requested);
        assert_eq!(pump.events, 2);
    }

    #[test]
    fn last_resize_wins() {
        let mut pump = EventPump::default();
        pump.record(&WindowEvent::Resized(PhysicalSize::new(640, 480)));
        pump.record(&WindowEvent::Resized(PhysicalSize::new(800, 600)));
        assert_eq!(pump.resized, Some(PhysicalSize::new(800, 600)));
        assert!(!pump.close_requested);
    }
}
