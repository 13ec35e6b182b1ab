//! Error taxonomy for bootstrap, setup and the frame loop.
//!
//! Every setup failure is fatal: the harness logs it and exits with a failure
//! code. Only surface hiccups inside the loop are recovered from (see
//! [`crate::device::SurfaceErrorAction`]).

use thiserror::Error;

use crate::shader::StageKind;

/// Coarse bootstrap phase a [`BootstrapError`] belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BootstrapPhase {
    /// Windowing subsystem initialization.
    Init,
    /// Window creation.
    WindowCreation,
    /// Loading the graphics entry points (surface, adapter, device).
    FunctionLoad,
}

/// Failure while bringing up the window and graphics context.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("failed to initialize the windowing subsystem")]
    Init(#[source] winit::error::EventLoopError),

    #[error("failed to create window")]
    WindowCreation(#[source] winit::error::OsError),

    #[error("window was not created: {0}")]
    WindowUnavailable(&'static str),

    #[error("window has zero size")]
    ZeroSize,

    #[error("failed to create wgpu surface")]
    Surface(#[source] wgpu::CreateSurfaceError),

    #[error("failed to find a suitable GPU adapter")]
    Adapter(#[source] wgpu::RequestAdapterError),

    #[error("failed to create wgpu device/queue")]
    Device(#[source] wgpu::RequestDeviceError),

    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}

impl BootstrapError {
    pub fn phase(&self) -> BootstrapPhase {
        match self {
            BootstrapError::Init(_) => BootstrapPhase::Init,
            BootstrapError::WindowCreation(_)
            | BootstrapError::WindowUnavailable(_)
            | BootstrapError::ZeroSize => BootstrapPhase::WindowCreation,
            BootstrapError::Surface(_)
            | BootstrapError::Adapter(_)
            | BootstrapError::Device(_)
            | BootstrapError::NoSurfaceFormat => BootstrapPhase::FunctionLoad,
        }
    }
}

/// A stage program that did not compile or link.
///
/// The program object has already been released when this is returned; only
/// the diagnostic log survives.
#[derive(Debug, Clone, Error)]
#[error("{stage} program failed to compile:\n{log}")]
pub struct CompileError {
    stage: StageKind,
    log: String,
}

impl CompileError {
    pub(crate) fn new(stage: StageKind, log: impl Into<String>) -> Self {
        Self {
            stage,
            log: log.into(),
        }
    }

    /// Stage the program was requested for.
    pub fn stage(&self) -> StageKind {
        self.stage
    }

    /// Full diagnostic log. Never empty.
    pub fn log(&self) -> &str {
        &self.log
    }
}

/// Structural problem found while validating an assembled pipeline.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum PipelineIssue {
    #[error("no program attached to the {0} slot")]
    MissingStage(StageKind),

    #[error("{found} program attached to the {slot} slot")]
    StageMismatch { slot: StageKind, found: StageKind },

    #[error("{0} slot attached more than once")]
    DuplicateStage(StageKind),
}

/// Pipeline validation failure. The pipeline has been released.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("pipeline validation failed:\n{}", join_issues(.0))]
    Structure(Vec<PipelineIssue>),

    #[error("pipeline rejected by the device:\n{log}")]
    Rejected { log: String },
}

impl ValidationError {
    /// Structural issues, empty for device-side rejections.
    pub fn issues(&self) -> &[PipelineIssue] {
        match self {
            ValidationError::Structure(issues) => issues,
            ValidationError::Rejected { .. } => &[],
        }
    }
}

fn join_issues(issues: &[PipelineIssue]) -> String {
    issues
        .iter()
        .map(|i| format!("  - {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Vertex data or layout that is inconsistent with its buffer.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum GeometryError {
    #[error("vertex data is empty")]
    Empty,

    #[error("{0} vertices exceed the addressable vertex count")]
    TooManyVertices(usize),

    #[error("component count {0} is outside 1..=4")]
    ComponentCount(u32),

    #[error("floating-point attributes cannot be normalized")]
    NormalizedFloat,

    #[error("attribute slot {slot} exceeds the {max} available slots")]
    SlotOutOfRange { slot: u32, max: u32 },

    #[error("attribute slot {0} is already enabled")]
    SlotInUse(u32),

    #[error("stride {stride} is not a non-zero multiple of {align}")]
    MisalignedStride { stride: u64, align: u64 },

    #[error("offset {offset} is not a multiple of {align}")]
    MisalignedOffset { offset: u64, align: u64 },

    #[error("attribute of {size} bytes at offset {offset} does not fit in stride {stride}")]
    AttributeOverflow { offset: u64, size: u64, stride: u64 },

    #[error("declared span of {span} bytes exceeds the {len}-byte buffer")]
    SpanExceedsBuffer { span: u64, len: u64 },
}

/// A device error was pending once setup completed.
#[derive(Debug, Error)]
#[error("graphics error pending after setup: {0}")]
pub struct GraphicsStateError(#[source] pub wgpu::Error);

/// Unrecoverable failure inside the frame loop.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum FrameError {
    #[error("surface ran out of memory")]
    OutOfMemory,

    #[error("present requested without a cleared frame")]
    NoFrame,
}

/// Any failure that aborts setup after bootstrap.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    GraphicsState(#[from] GraphicsStateError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bootstrap_errors_map_to_phases() {
        assert_eq!(
            BootstrapError::WindowUnavailable("x").phase(),
            BootstrapPhase::WindowCreation
        );
        assert_eq!(BootstrapError::ZeroSize.phase(), BootstrapPhase::WindowCreation);
        assert_eq!(BootstrapError::NoSurfaceFormat.phase(), BootstrapPhase::FunctionLoad);
    }

    #[test]
    fn structure_error_lists_every_issue() {
        let err = ValidationError::Structure(vec![
            PipelineIssue::MissingStage(StageKind::Vertex),
            PipelineIssue::StageMismatch {
                slot: StageKind::Fragment,
                found: StageKind::Vertex,
            },
        ]);
        let text = err.to_string();
        assert!(text.contains("no program attached to the vertex slot"));
        assert!(text.contains("vertex program attached to the fragment slot"));
        assert_eq!(err.issues().len(), 2);
    }

    #[test]
    fn compile_error_carries_stage_and_log() {
        let err = CompileError::new(StageKind::Fragment, "line 1: oops");
        assert_eq!(err.stage(), StageKind::Fragment);
        assert_eq!(err.log(), "line 1: oops");
        assert!(err.to_string().starts_with("fragment program failed to compile"));
    }
}
