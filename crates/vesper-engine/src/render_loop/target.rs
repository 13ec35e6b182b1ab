use crate::error::FrameError;
use crate::paint::Color;

/// Outcome of a clear request.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameStatus {
    /// A frame was acquired and cleared; it must be presented.
    Ready,
    /// No frame this iteration (surface reconfigured, timed out, ...).
    Skipped,
}

/// What the loop drives each iteration.
///
/// The window-backed implementation is [`crate::context::Presenter`]; tests
/// and headless runs provide their own.
pub trait FrameTarget {
    /// Whether a close was requested. Once true, stays true.
    fn close_requested(&self) -> bool;

    /// Drains pending window events without blocking.
    fn poll_events(&mut self);

    /// Acquires the next frame and clears it to `color`.
    fn clear(&mut self, color: Color) -> Result<FrameStatus, FrameError>;

    /// Presents the frame cleared by the last `clear` call.
    fn present(&mut self) -> Result<(), FrameError>;

    /// Releases the window and graphics resources. Called exactly once.
    fn release(self)
    where
        Self: Sized;
}
