//! Per-stage shader programs.
//!
//! Each stage (vertex, fragment) is compiled into its own separable program
//! from WGSL text. Compilation is checked twice: first by naga on the CPU,
//! which yields readable diagnostics, then by the device when the module is
//! created.

mod compile;
mod program;
mod stage;

pub use compile::{CompiledStage, compile_stage};
pub use program::{ShaderProgram, ShaderProgramBuilder};
pub use stage::StageKind;
