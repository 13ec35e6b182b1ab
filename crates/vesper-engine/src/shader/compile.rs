use wgpu::naga;

use crate::error::CompileError;

use super::StageKind;

/// Front-end result for one stage: the source parsed, validated and found to
/// declare exactly one entry point of the requested stage.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CompiledStage {
    pub stage: StageKind,
    pub entry_point: String,
}

/// Parses and validates WGSL `source` as a standalone program for `stage`.
///
/// The stage is never inferred: a module whose only entry point belongs to
/// another stage is rejected, as is a module declaring several entry points
/// for the requested one.
pub fn compile_stage(stage: StageKind, source: &str) -> Result<CompiledStage, CompileError> {
    if source.trim().is_empty() {
        return Err(CompileError::new(stage, "shader source is empty"));
    }

    let module = naga::front::wgsl::parse_str(source)
        .map_err(|e| CompileError::new(stage, e.emit_to_string(source)))?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::default(),
    )
    .validate(&module)
    .map_err(|e| CompileError::new(stage, e.emit_to_string(source)))?;

    let wanted = stage.to_naga();
    let mut matching = module.entry_points.iter().filter(|ep| ep.stage == wanted);

    match (matching.next(), matching.next()) {
        (Some(ep), None) => Ok(CompiledStage {
            stage,
            entry_point: ep.name.clone(),
        }),
        (None, _) => {
            let found = module
                .entry_points
                .iter()
                .map(|ep| match StageKind::from_naga(ep.stage) {
                    Some(kind) => format!("{} {}", kind.attribute(), ep.name),
                    None => format!("{:?} {}", ep.stage, ep.name),
                })
                .collect::<Vec<_>>();
            let found = if found.is_empty() {
                "none".to_string()
            } else {
                found.join(", ")
            };
            Err(CompileError::new(
                stage,
                format!("no {} entry point (found: {found})", stage.attribute()),
            ))
        }
        (Some(_), Some(_)) => {
            let names = module
                .entry_points
                .iter()
                .filter(|ep| ep.stage == wanted)
                .map(|ep| ep.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            Err(CompileError::new(
                stage,
                format!(
                    "a separable program takes exactly one {} entry point, found: {names}",
                    stage.attribute()
                ),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VS: &str = "@vertex\nfn vs_main(@location(0) p: vec3<f32>) -> @builtin(position) vec4<f32> {\n    return vec4<f32>(p, 1.0);\n}\n";
    const FS: &str = "@fragment\nfn fs_main() -> @location(0) vec4<f32> {\n    return vec4<f32>(1.0, 0.5, 0.2, 1.0);\n}\n";

    #[test]
    fn valid_sources_compile_for_their_stage() {
        let vs = compile_stage(StageKind::Vertex, VS).unwrap();
        assert_eq!(vs.stage, StageKind::Vertex);
        assert_eq!(vs.entry_point, "vs_main");

        let fs = compile_stage(StageKind::Fragment, FS).unwrap();
        assert_eq!(fs.entry_point, "fs_main");
    }

    #[test]
    fn fragment_source_is_not_a_vertex_program() {
        let err = compile_stage(StageKind::Vertex, FS).unwrap_err();
        assert_eq!(err.stage(), StageKind::Vertex);
        assert!(err.log().contains("no @vertex entry point"));
        assert!(err.log().contains("@fragment fs_main"));
    }

    #[test]
    fn empty_source_is_rejected() {
        let err = compile_stage(StageKind::Fragment, "  \n").unwrap_err();
        assert!(!err.log().is_empty());
    }

    #[test]
    fn syntax_error_yields_a_diagnostic_log() {
        let err = compile_stage(StageKind::Vertex, "@vertex fn vs_main( {").unwrap_err();
        assert!(!err.log().is_empty());
    }

    #[test]
    fn type_error_is_rejected() {
        let src = "@fragment\nfn fs_main() -> @location(0) vec4<f32> {\n    let x: f32 = 1u;\n    return vec4<f32>(x);\n}\n";
        assert!(compile_stage(StageKind::Fragment, src).is_err());
    }

    #[test]
    fn two_entry_points_of_one_stage_are_ambiguous() {
        let src = format!("{VS}\n@vertex\nfn other(@location(0) p: vec3<f32>) -> @builtin(position) vec4<f32> {{\n    return vec4<f32>(p, 1.0);\n}}\n");
        let err = compile_stage(StageKind::Vertex, &src).unwrap_err();
        assert!(err.log().contains("vs_main"));
        assert!(err.log().contains("other"));
    }

    #[test]
    fn module_with_no_entry_points_reports_none() {
        let err = compile_stage(StageKind::Vertex, "const K: f32 = 1.0;").unwrap_err();
        assert!(err.log().contains("found: none"));
    }
}
