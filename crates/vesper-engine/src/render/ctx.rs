/// Setup context (device + surface format).
///
/// Small and `Copy` so setup components can take it by value.
#[derive(Debug, Copy, Clone)]
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    /// Color target format render pipelines must be built for.
    pub surface_format: wgpu::TextureFormat,
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(device: &'a wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        Self {
            device,
            surface_format,
        }
    }
}
