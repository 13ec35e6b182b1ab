use wgpu::util::DeviceExt;

use crate::coords::Vec3;
use crate::error::GeometryError;
use crate::render::RenderCtx;

/// Immutable vertex data resident on the GPU.
///
/// The buffer has `VERTEX` usage only: its contents are fixed at upload.
#[derive(Debug)]
pub struct VertexBuffer {
    buffer: wgpu::Buffer,
    byte_len: u64,
    vertex_count: u32,
}

impl VertexBuffer {
    pub fn upload(ctx: RenderCtx<'_>, positions: &[Vec3]) -> Result<Self, GeometryError> {
        let vertex_count = checked_vertex_count(positions.len())?;
        if positions.iter().any(|p| !p.is_finite()) {
            log::warn!("vertex data contains non-finite positions");
        }

        let contents: &[u8] = bytemuck::cast_slice(positions);
        let buffer = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("vesper vertex buffer"),
                contents,
                usage: wgpu::BufferUsages::VERTEX,
            });

        log::debug!("uploaded {} vertices ({} bytes)", positions.len(), contents.len());

        Ok(Self {
            buffer,
            byte_len: contents.len() as u64,
            vertex_count,
        })
    }

    /// Size of the uploaded data in bytes.
    pub fn byte_len(&self) -> u64 {
        self.byte_len
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn raw(&self) -> &wgpu::Buffer {
        &self.buffer
    }
}

fn checked_vertex_count(len: usize) -> Result<u32, GeometryError> {
    match u32::try_from(len) {
        Ok(0) => Err(GeometryError::Empty),
        Ok(count) => Ok(count),
        Err(_) => Err(GeometryError::TooManyVertices(len)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device() -> wgpu::Device {
        wgpu::Device::noop(&wgpu::DeviceDescriptor::default()).0
    }

    #[test]
    fn byte_len_is_twelve_bytes_per_vertex() {
        let device = device();
        let ctx = RenderCtx::new(&device, wgpu::TextureFormat::Rgba8Unorm);
        for n in [1usize, 3, 7] {
            let positions = vec![Vec3::new(0.5, -0.5, 0.0); n];
            let vb = VertexBuffer::upload(ctx, &positions).unwrap();
            assert_eq!(vb.byte_len(), (n * 3 * size_of::<f32>()) as u64);
            assert_eq!(vb.vertex_count(), n as u32);
            assert!(vb.raw().usage().contains(wgpu::BufferUsages::VERTEX));
        }
    }

    #[test]
    fn empty_upload_is_rejected() {
        let device = device();
        let ctx = RenderCtx::new(&device, wgpu::TextureFormat::Rgba8Unorm);
        assert_eq!(VertexBuffer::upload(ctx, &[]).unwrap_err(), GeometryError::Empty);
    }

    #[test]
    fn vertex_count_must_fit_in_u32() {
        assert_eq!(checked_vertex_count(3), Ok(3));
        assert_eq!(checked_vertex_count(u32::MAX as usize), Ok(u32::MAX));
        assert_eq!(checked_vertex_count(0), Err(GeometryError::Empty));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn vertex_count_past_u32_is_rejected() {
        let len = u32::MAX as usize + 1;
        assert_eq!(checked_vertex_count(len), Err(GeometryError::TooManyVertices(len)));
    }
}
