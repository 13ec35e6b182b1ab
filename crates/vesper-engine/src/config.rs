//! Harness configuration.
//!
//! One value, built once in `main` and passed down.

use std::path::{Path, PathBuf};

use crate::device::GpuInit;
use crate::logging::LoggingConfig;
use crate::paint::Color;

/// Window parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    pub title: String,
    /// Physical pixels.
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "TP - From Scratch".to_string(),
            width: 800,
            height: 800,
            resizable: true,
        }
    }
}

pub const DEFAULT_VERTEX_SHADER: &str = "shaders/triangle-vs.wgsl";
pub const DEFAULT_FRAGMENT_SHADER: &str = "shaders/triangle-fs.wgsl";

/// Everything the harness needs to run.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub window: WindowConfig,
    pub gpu: GpuInit,
    pub logging: LoggingConfig,
    pub vertex_shader: PathBuf,
    pub fragment_shader: PathBuf,
    pub clear_color: Color,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            gpu: GpuInit::default(),
            logging: LoggingConfig::default(),
            vertex_shader: PathBuf::from(DEFAULT_VERTEX_SHADER),
            fragment_shader: PathBuf::from(DEFAULT_FRAGMENT_SHADER),
            clear_color: Color::WHITE,
        }
    }
}

impl HarnessConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.window.title = t.into();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.window.width = width;
        self.window.height = height;
        self
    }

    pub fn resizable(mut self, resizable: bool) -> Self {
        self.window.resizable = resizable;
        self
    }

    pub fn vertex_shader(mut self, path: impl Into<PathBuf>) -> Self {
        self.vertex_shader = path.into();
        self
    }

    pub fn fragment_shader(mut self, path: impl Into<PathBuf>) -> Self {
        self.fragment_shader = path.into();
        self
    }

    pub fn clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    pub fn gpu(mut self, gpu: GpuInit) -> Self {
        self.gpu = gpu;
        self
    }

    pub fn logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = logging;
        self
    }
}

/// Resolves a shader path.
///
/// Absolute paths and paths that exist relative to the working directory are
/// used as given; other relative paths are looked up under `base`.
pub fn resolve_shader_path(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() || path.exists() {
        return path.to_path_buf();
    }
    base.join(path)
}
