//! Pipeline assembly and validation.
//!
//! A pipeline moves through three states, each a distinct type:
//! - [`Pipeline`]: stage slots filled by [`assemble`], not yet checked
//! - [`ValidatedPipeline`]: one matching program per required stage
//! - [`BoundPipeline`]: realized as a `wgpu::RenderPipeline` for a vertex
//!   layout and surface format, ready to be set on a render pass
//!
//! Validation consumes the pipeline, so a pipeline that failed validation
//! has already been released and cannot be attached to again.

use std::collections::BTreeMap;

use crate::device::capture_validation;
use crate::error::{PipelineIssue, ValidationError};
use crate::geometry::VertexArray;
use crate::render::RenderCtx;
use crate::shader::{ShaderProgram, StageKind};

/// Attaches each program to the slot it is paired with.
///
/// Assembly never fails; slots attached twice or left empty are reported by
/// [`Pipeline::validate`].
pub fn assemble(programs: impl IntoIterator<Item = (StageKind, ShaderProgram)>) -> Pipeline {
    let mut pipeline = Pipeline::default();
    for (slot, program) in programs {
        pipeline.attach(slot, program);
    }
    pipeline
}

/// Stage slot map, as assembled.
#[derive(Debug, Default)]
pub struct Pipeline {
    slots: BTreeMap<StageKind, ShaderProgram>,
    duplicates: Vec<StageKind>,
}

impl Pipeline {
    /// Attaches `program` to `slot`. A second attachment to the same slot is
    /// recorded as an issue and the later program is released.
    pub fn attach(&mut self, slot: StageKind, program: ShaderProgram) {
        if self.slots.contains_key(&slot) {
            log::warn!("{slot} slot attached more than once; keeping the first program");
            if !self.duplicates.contains(&slot) {
                self.duplicates.push(slot);
            }
            return;
        }
        self.slots.insert(slot, program);
    }

    /// Structural problems, in stage order. Empty for a valid pipeline.
    pub fn issues(&self) -> Vec<PipelineIssue> {
        let mut issues = Vec::new();
        for slot in StageKind::ALL {
            match self.slots.get(&slot) {
                None => issues.push(PipelineIssue::MissingStage(slot)),
                Some(program) if program.stage() != slot => {
                    issues.push(PipelineIssue::StageMismatch {
                        slot,
                        found: program.stage(),
                    })
                }
                Some(_) => {}
            }
            if self.duplicates.contains(&slot) {
                issues.push(PipelineIssue::DuplicateStage(slot));
            }
        }
        issues
    }

    /// Checks every required stage holds exactly one program of its own kind.
    pub fn validate(mut self) -> Result<ValidatedPipeline, ValidationError> {
        let issues = self.issues();
        if !issues.is_empty() {
            let err = ValidationError::Structure(issues);
            log::error!("{err}");
            return Err(err);
        }

        match (
            self.slots.remove(&StageKind::Vertex),
            self.slots.remove(&StageKind::Fragment),
        ) {
            (Some(vertex), Some(fragment)) => {
                log::info!("pipeline: OK");
                Ok(ValidatedPipeline { vertex, fragment })
            }
            // `issues` already covers missing slots.
            (vertex, _) => {
                let missing = if vertex.is_none() {
                    StageKind::Vertex
                } else {
                    StageKind::Fragment
                };
                Err(ValidationError::Structure(vec![PipelineIssue::MissingStage(
                    missing,
                )]))
            }
        }
    }
}

/// A structurally valid pipeline.
#[derive(Debug)]
pub struct ValidatedPipeline {
    vertex: ShaderProgram,
    fragment: ShaderProgram,
}

impl ValidatedPipeline {
    pub fn vertex(&self) -> &ShaderProgram {
        &self.vertex
    }

    pub fn fragment(&self) -> &ShaderProgram {
        &self.fragment
    }

    /// Realizes the pipeline against `layout` and the context's surface
    /// format. The device checks the stage interfaces against each other
    /// and against the vertex layout here.
    pub fn bind(
        self,
        ctx: RenderCtx<'_>,
        layout: &VertexArray,
    ) -> Result<BoundPipeline, ValidationError> {
        let device = ctx.device;
        let buffers = layout.buffer_layouts();

        let (raw, captured) = capture_validation(device, || {
            let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("vesper pipeline layout"),
                bind_group_layouts: &[],
                immediate_size: 0,
            });

            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("vesper pipeline"),
                layout: Some(&pipeline_layout),

                vertex: wgpu::VertexState {
                    module: self.vertex.module(),
                    entry_point: Some(self.vertex.entry_point()),
                    compilation_options: Default::default(),
                    buffers: &buffers,
                },

                fragment: Some(wgpu::FragmentState {
                    module: self.fragment.module(),
                    entry_point: Some(self.fragment.entry_point()),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctx.surface_format,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),

                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },

                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            })
        });

        if let Some(err) = captured {
            let err = ValidationError::Rejected {
                log: err.to_string(),
            };
            log::error!("{err}");
            return Err(err);
        }

        log::debug!("render pipeline bound for {:?}", ctx.surface_format);
        Ok(BoundPipeline {
            raw,
            vertex: self.vertex,
            fragment: self.fragment,
        })
    }
}

/// A pipeline realized on the device.
#[derive(Debug)]
pub struct BoundPipeline {
    raw: wgpu::RenderPipeline,
    vertex: ShaderProgram,
    fragment: ShaderProgram,
}

impl BoundPipeline {
    pub fn raw(&self) -> &wgpu::RenderPipeline {
        &self.raw
    }

    pub fn program(&self, stage: StageKind) -> &ShaderProgram {
        match stage {
            StageKind::Vertex => &self.vertex,
            StageKind::Fragment => &self.fragment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec3;
    use crate::geometry::{describe_layout, upload_vertices};
    use crate::shader::ShaderProgramBuilder;

    const VS: &str = include_str!("../../../vesper-harness/shaders/triangle-vs.wgsl");
    const FS: &str = include_str!("../../../vesper-harness/shaders/triangle-fs.wgsl");

    /// Vertex stage that also reads location 1.
    const VS_TWO_INPUTS: &str = "@vertex\nfn vs_main(@location(0) p: vec3<f32>, @location(1) w: f32) -> @builtin(position) vec4<f32> {\n    return vec4<f32>(p, w);\n}\n";

    fn device() -> wgpu::Device {
        wgpu::Device::noop(&wgpu::DeviceDescriptor::default()).0
    }

    fn ctx(device: &wgpu::Device) -> RenderCtx<'_> {
        RenderCtx::new(device, wgpu::TextureFormat::Bgra8UnormSrgb)
    }

    fn program(ctx: RenderCtx<'_>, stage: StageKind, src: &str) -> ShaderProgram {
        ShaderProgramBuilder::new(ctx)
            .build_stage_program(stage, src)
            .unwrap()
    }

    fn triangle_layout(ctx: RenderCtx<'_>) -> VertexArray {
        let positions = [
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        let vb = upload_vertices(ctx, &positions).unwrap();
        describe_layout(&vb, 0, Vec3::COMPONENTS, Vec3::STRIDE).unwrap()
    }

    // ── structure ───────────────────────────────────────────────────────

    #[test]
    fn two_matching_programs_validate() {
        let device = device();
        let ctx = ctx(&device);
        let pipeline = assemble([
            (StageKind::Vertex, program(ctx, StageKind::Vertex, VS)),
            (StageKind::Fragment, program(ctx, StageKind::Fragment, FS)),
        ]);
        assert!(pipeline.issues().is_empty());

        let validated = pipeline.validate().unwrap();
        assert_eq!(validated.vertex().stage(), StageKind::Vertex);
        assert_eq!(validated.fragment().stage(), StageKind::Fragment);
    }

    #[test]
    fn program_in_the_wrong_slot_fails_validation() {
        let device = device();
        let ctx = ctx(&device);
        let pipeline = assemble([
            (StageKind::Vertex, program(ctx, StageKind::Vertex, VS)),
            (StageKind::Fragment, program(ctx, StageKind::Vertex, VS)),
        ]);

        let err = pipeline.validate().unwrap_err();
        assert_eq!(
            err.issues(),
            [PipelineIssue::StageMismatch {
                slot: StageKind::Fragment,
                found: StageKind::Vertex,
            }]
        );
    }

    #[test]
    fn missing_and_duplicate_slots_are_reported() {
        let device = device();
        let ctx = ctx(&device);
        let pipeline = assemble([
            (StageKind::Vertex, program(ctx, StageKind::Vertex, VS)),
            (StageKind::Vertex, program(ctx, StageKind::Vertex, VS)),
        ]);

        let err = pipeline.validate().unwrap_err();
        assert_eq!(
            err.issues(),
            [
                PipelineIssue::DuplicateStage(StageKind::Vertex),
                PipelineIssue::MissingStage(StageKind::Fragment),
            ]
        );
    }

    #[test]
    fn empty_pipeline_misses_both_stages() {
        let err = assemble(std::iter::empty()).validate().unwrap_err();
        assert_eq!(err.issues().len(), 2);
    }

    // ── device ──────────────────────────────────────────────────────────

    #[test]
    fn validated_pipeline_binds_against_its_layout() {
        let device = device();
        let ctx = ctx(&device);
        let layout = triangle_layout(ctx);
        let bound = assemble([
            (StageKind::Vertex, program(ctx, StageKind::Vertex, VS)),
            (StageKind::Fragment, program(ctx, StageKind::Fragment, FS)),
        ])
        .validate()
        .unwrap()
        .bind(ctx, &layout)
        .unwrap();

        assert_eq!(bound.program(StageKind::Vertex).entry_point(), "vs_main");
    }

    #[test]
    fn unfed_vertex_input_is_rejected_by_the_device() {
        let device = device();
        let ctx = ctx(&device);
        let layout = triangle_layout(ctx);
        let err = assemble([
            (StageKind::Vertex, program(ctx, StageKind::Vertex, VS_TWO_INPUTS)),
            (StageKind::Fragment, program(ctx, StageKind::Fragment, FS)),
        ])
        .validate()
        .unwrap()
        .bind(ctx, &layout)
        .unwrap_err();

        assert!(matches!(err, ValidationError::Rejected { .. }));
        assert!(err.issues().is_empty());
    }
}
