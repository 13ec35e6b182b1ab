/// Minimum API surface requested from the adapter.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum ApiProfile {
    /// Full WebGPU limits. Adapters that cannot provide them are rejected.
    #[default]
    Core,
    /// Limits reachable by GLES3/WebGL2-class hardware.
    Downlevel,
}

impl ApiProfile {
    pub fn limits(self) -> wgpu::Limits {
        match self {
            ApiProfile::Core => wgpu::Limits::default(),
            ApiProfile::Downlevel => wgpu::Limits::downlevel_defaults(),
        }
    }
}

/// Initialization parameters for the GPU layer.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Backends the instance may pick an adapter from.
    pub backends: wgpu::Backends,

    /// Requested limit profile.
    pub profile: ApiProfile,

    /// Required wgpu features.
    ///
    /// The harness needs none; keep empty for portability.
    pub required_features: wgpu::Features,

    /// Prefer an sRGB surface format when available.
    pub prefer_srgb: bool,

    /// Present mode (swap behavior).
    ///
    /// FIFO is the only mode every surface supports.
    pub present_mode: wgpu::PresentMode,

    /// Desired maximum frame latency for the surface.
    ///
    /// This value is a hint; support depends on platform/backend.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::PRIMARY,
            profile: ApiProfile::Core,
            required_features: wgpu::Features::empty(),
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            desired_maximum_frame_latency: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_profile_is_stricter_than_downlevel() {
        let core = ApiProfile::Core.limits();
        let low = ApiProfile::Downlevel.limits();
        assert!(core.max_texture_dimension_2d >= low.max_texture_dimension_2d);
        assert!(core.max_storage_buffers_per_shader_stage >= low.max_storage_buffers_per_shader_stage);
    }

    #[test]
    fn default_init_requests_core_profile_without_features() {
        let init = GpuInit::default();
        assert_eq!(init.profile, ApiProfile::Core);
        assert!(init.required_features.is_empty());
        assert_eq!(init.present_mode, wgpu::PresentMode::Fifo);
    }
}
