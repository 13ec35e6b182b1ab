use crate::device::{GpuFrame, SurfaceErrorAction};
use crate::error::FrameError;
use crate::paint::Color;
use crate::render_loop::{FrameStatus, FrameTarget};
use crate::scene::Scene;

use super::Context;

/// Window-backed [`FrameTarget`].
///
/// Each cleared frame also carries the scene's draw state (pipeline and
/// vertex buffers); no draw is recorded.
pub struct Presenter {
    context: Context,
    scene: Scene,
    pending: Option<GpuFrame>,
}

impl Presenter {
    pub fn new(context: Context, scene: Scene) -> Self {
        Self {
            context,
            scene,
            pending: None,
        }
    }
}

impl FrameTarget for Presenter {
    fn close_requested(&self) -> bool {
        self.context.close_requested()
    }

    fn poll_events(&mut self) {
        self.context.poll_events();
    }

    fn clear(&mut self, color: Color) -> Result<FrameStatus, FrameError> {
        let gpu = self.context.gpu();
        let mut frame = match gpu.begin_frame() {
            Ok(frame) => frame,
            Err(err) => {
                return match gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {
                        Ok(FrameStatus::Skipped)
                    }
                    SurfaceErrorAction::Fatal => Err(FrameError::OutOfMemory),
                };
            }
        };

        {
            let mut pass = frame.clear_pass(color);
            self.scene.bind(&mut pass);
        }

        self.pending = Some(frame);
        Ok(FrameStatus::Ready)
    }

    fn present(&mut self) -> Result<(), FrameError> {
        let frame = self.pending.take().ok_or(FrameError::NoFrame)?;
        self.context.window().pre_present_notify();
        self.context.gpu().submit(frame);
        Ok(())
    }

    fn release(self) {
        let Presenter {
            context,
            scene,
            pending,
        } = self;
        drop(pending);
        drop(scene);
        context.shutdown();
    }
}
