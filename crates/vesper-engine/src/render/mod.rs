//! Setup-facing rendering handles.
//!
//! Shader programs, pipelines and vertex buffers are created against a
//! [`RenderCtx`], never against the window or the frame loop directly.

mod ctx;

pub use ctx::RenderCtx;
