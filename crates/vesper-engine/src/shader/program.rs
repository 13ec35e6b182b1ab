use crate::device::capture_validation;
use crate::error::CompileError;
use crate::render::RenderCtx;

use super::{StageKind, compile_stage};

/// A compiled, stage-bound program.
///
/// Only successfully linked programs are ever constructed; a failed build
/// releases its module and surfaces a [`CompileError`] instead.
#[derive(Debug)]
pub struct ShaderProgram {
    stage: StageKind,
    entry_point: String,
    module: wgpu::ShaderModule,
    info_log: String,
}

impl ShaderProgram {
    pub fn stage(&self) -> StageKind {
        self.stage
    }

    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }

    pub fn module(&self) -> &wgpu::ShaderModule {
        &self.module
    }

    /// Non-error compiler messages. Empty for clean sources.
    pub fn info_log(&self) -> &str {
        &self.info_log
    }
}

/// Builds one separable program per call.
pub struct ShaderProgramBuilder<'a> {
    ctx: RenderCtx<'a>,
}

impl<'a> ShaderProgramBuilder<'a> {
    pub fn new(ctx: RenderCtx<'a>) -> Self {
        Self { ctx }
    }

    /// Compiles `source` as a standalone program for `stage`.
    ///
    /// The outcome is reported to the log either way: a one-line notice on
    /// success, the full diagnostic log on failure.
    pub fn build_stage_program(
        &self,
        stage: StageKind,
        source: &str,
    ) -> Result<ShaderProgram, CompileError> {
        let result = self.link(stage, source);
        match &result {
            Ok(program) => log::info!(
                "{stage} shader compilation: OK ({})",
                program.entry_point
            ),
            Err(err) => log::error!("{err}"),
        }
        result
    }

    fn link(&self, stage: StageKind, source: &str) -> Result<ShaderProgram, CompileError> {
        let compiled = compile_stage(stage, source)?;

        let device = self.ctx.device;
        let label = format!("vesper {stage} program");
        let (module, captured) = capture_validation(device, || {
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(label.as_str()),
                source: wgpu::ShaderSource::Wgsl(source.into()),
            })
        });

        let info = pollster::block_on(module.get_compilation_info());
        let mut errors = String::new();
        let mut info_log = String::new();
        for msg in &info.messages {
            let out = match msg.message_type {
                wgpu::CompilationMessageType::Error => &mut errors,
                _ => &mut info_log,
            };
            out.push_str(&message_line(msg));
        }

        if let Some(err) = captured {
            if errors.is_empty() {
                errors = err.to_string();
            }
        }
        if !errors.is_empty() {
            return Err(CompileError::new(stage, errors.trim_end()));
        }

        Ok(ShaderProgram {
            stage,
            entry_point: compiled.entry_point,
            module,
            info_log,
        })
    }
}

/// One log line, prefixed with `line:column` when the message has a location.
fn message_line(msg: &wgpu::CompilationMessage) -> String {
    match msg.location {
        Some(loc) => format!("{}:{}: {}\n", loc.line_number, loc.line_position, msg.message),
        None => format!("{}\n", msg.message),
    }
}
