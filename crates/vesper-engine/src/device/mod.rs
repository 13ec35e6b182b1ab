//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue for a window
//! - creating & configuring the Surface (swapchain)
//! - acquiring frames, recording clears and presenting them
//! - capturing device errors raised during setup

mod error;
mod frame;
mod gpu;
mod init;
mod scope;
mod surface;

pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::{ApiProfile, GpuInit};
pub use scope::ErrorWatch;

pub(crate) use scope::capture_validation;
