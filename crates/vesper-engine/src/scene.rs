//! Setup sequence: programs, pipeline, geometry, draw state.

use crate::coords::Vec3;
use crate::device::ErrorWatch;
use crate::error::SetupError;
use crate::geometry::{VertexArray, VertexBuffer, describe_layout, upload_vertices};
use crate::pipeline::{BoundPipeline, assemble};
use crate::render::RenderCtx;
use crate::shader::{ShaderProgramBuilder, StageKind};

/// WGSL source text for each stage.
#[derive(Debug, Copy, Clone)]
pub struct StageSources<'s> {
    pub vertex: &'s str,
    pub fragment: &'s str,
}

/// The harness triangle, in normalized device coordinates.
pub const TRIANGLE: [Vec3; 3] = [
    Vec3::new(-1.0, -1.0, 0.0),
    Vec3::new(1.0, -1.0, 0.0),
    Vec3::new(0.0, 1.0, 0.0),
];

/// Everything setup produces that a frame needs.
#[derive(Debug)]
pub struct Scene {
    pipeline: BoundPipeline,
    vertex_buffer: VertexBuffer,
    vertex_array: VertexArray,
}

impl Scene {
    /// Runs setup in order and stops at the first failure.
    ///
    /// Any device error not already attributed to a program or the pipeline
    /// fails setup with [`SetupError::GraphicsState`].
    pub fn build(
        ctx: RenderCtx<'_>,
        sources: StageSources<'_>,
        positions: &[Vec3],
    ) -> Result<Self, SetupError> {
        let watch = ErrorWatch::begin(ctx.device);

        let builder = ShaderProgramBuilder::new(ctx);
        let vertex = builder.build_stage_program(StageKind::Vertex, sources.vertex)?;
        let fragment = builder.build_stage_program(StageKind::Fragment, sources.fragment)?;

        let validated = assemble([(StageKind::Vertex, vertex), (StageKind::Fragment, fragment)])
            .validate()?;

        let vertex_buffer = upload_vertices(ctx, positions)?;
        let vertex_array = describe_layout(&vertex_buffer, 0, Vec3::COMPONENTS, Vec3::STRIDE)?;

        let pipeline = validated.bind(ctx, &vertex_array)?;

        watch.finish()?;
        log::info!("setup complete: {} vertices", vertex_buffer.vertex_count());

        Ok(Self {
            pipeline,
            vertex_buffer,
            vertex_array,
        })
    }

    pub fn pipeline(&self) -> &BoundPipeline {
        &self.pipeline
    }

    pub fn vertex_buffer(&self) -> &VertexBuffer {
        &self.vertex_buffer
    }

    pub fn vertex_array(&self) -> &VertexArray {
        &self.vertex_array
    }

    /// Sets the pipeline and vertex buffers on `pass`.
    ///
    /// No draw is recorded.
    pub fn bind(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(self.pipeline.raw());
        self.vertex_array.bind(pass);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VS: &str = include_str!("../../vesper-harness/shaders/triangle-vs.wgsl");
    const FS: &str = include_str!("../../vesper-harness/shaders/triangle-fs.wgsl");

    fn device() -> wgpu::Device {
        wgpu::Device::noop(&wgpu::DeviceDescriptor::default()).0
    }

    fn ctx(device: &wgpu::Device) -> RenderCtx<'_> {
        RenderCtx::new(device, wgpu::TextureFormat::Bgra8UnormSrgb)
    }

    #[test]
    fn shipped_sources_build_a_scene() {
        let device = device();
        let scene = Scene::build(
            ctx(&device),
            StageSources {
                vertex: VS,
                fragment: FS,
            },
            &TRIANGLE,
        )
        .unwrap();

        assert_eq!(scene.vertex_buffer().byte_len(), 36);
        assert_eq!(scene.vertex_array().declared_span(0), Some(36));
    }

    #[test]
    fn swapped_sources_fail_at_the_vertex_stage() {
        let device = device();
        let err = Scene::build(
            ctx(&device),
            StageSources {
                vertex: FS,
                fragment: VS,
            },
            &TRIANGLE,
        )
        .unwrap_err();

        match err {
            SetupError::Compile(e) => assert_eq!(e.stage(), StageKind::Vertex),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_geometry_fails_setup() {
        let device = device();
        let err = Scene::build(
            ctx(&device),
            StageSources {
                vertex: VS,
                fragment: FS,
            },
            &[],
        )
        .unwrap_err();
        assert!(matches!(err, SetupError::Geometry(_)));
    }
}
