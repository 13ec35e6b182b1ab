//! Poll / clear / present frame loop.
//!
//! The loop is a two-state machine. Each `Running` iteration polls window
//! events, clears the frame and presents it; the close-request flag is only
//! observed between iterations.

mod target;

pub use target::{FrameStatus, FrameTarget};

use std::time::{Duration, Instant};

use crate::error::FrameError;
use crate::paint::Color;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopState {
    Running,
    Terminated,
}

/// Counters reported when the loop terminates.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FrameStats {
    /// Frames cleared and presented.
    pub presented: u64,
    /// Iterations that produced no frame.
    pub skipped: u64,
    pub elapsed: Duration,
}

/// Drives a [`FrameTarget`] until it requests close.
#[derive(Debug)]
pub struct RenderLoop {
    clear_color: Color,
    state: LoopState,
    stats: FrameStats,
}

impl RenderLoop {
    pub fn new(clear_color: Color) -> Self {
        Self {
            clear_color,
            state: LoopState::Running,
            stats: FrameStats::default(),
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Runs one iteration and returns the resulting state.
    ///
    /// A terminated loop stays terminated and touches nothing.
    pub fn step<T: FrameTarget>(&mut self, target: &mut T) -> Result<LoopState, FrameError> {
        if self.state == LoopState::Terminated {
            return Ok(self.state);
        }

        if target.close_requested() {
            log::debug!("close requested; terminating");
            self.state = LoopState::Terminated;
            return Ok(self.state);
        }

        target.poll_events();

        match target.clear(self.clear_color)? {
            FrameStatus::Ready => {
                target.present()?;
                self.stats.presented += 1;
            }
            FrameStatus::Skipped => self.stats.skipped += 1,
        }

        Ok(self.state)
    }

    /// Runs until close is requested or a frame fails, then releases `target`.
    pub fn run<T: FrameTarget>(mut self, mut target: T) -> Result<FrameStats, FrameError> {
        log::info!("render loop running");
        let start = Instant::now();

        let outcome = loop {
            match self.step(&mut target) {
                Ok(LoopState::Running) => continue,
                Ok(LoopState::Terminated) => break Ok(()),
                Err(err) => break Err(err),
            }
        };

        self.state = LoopState::Terminated;
        self.stats.elapsed = start.elapsed();
        target.release();

        let FrameStats {
            presented,
            skipped,
            elapsed,
        } = self.stats;
        match outcome {
            Ok(()) => {
                log::info!(
                    "render loop terminated: {presented} frames presented, {skipped} skipped in {:.2}s",
                    elapsed.as_secs_f64()
                );
                Ok(self.stats)
            }
            Err(err) => {
                log::error!("render loop aborted after {presented} frames: {err}");
                Err(err)
            }
        }
    }
}
