use std::fmt;

use wgpu::naga;

/// Programmable stage a shader program targets.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum StageKind {
    Vertex,
    Fragment,
}

impl StageKind {
    /// Every stage a graphics pipeline requires, in pipeline order.
    pub const ALL: [StageKind; 2] = [StageKind::Vertex, StageKind::Fragment];

    /// WGSL attribute marking an entry point of this stage.
    pub fn attribute(self) -> &'static str {
        match self {
            StageKind::Vertex => "@vertex",
            StageKind::Fragment => "@fragment",
        }
    }

    pub(crate) fn to_naga(self) -> naga::ShaderStage {
        match self {
            StageKind::Vertex => naga::ShaderStage::Vertex,
            StageKind::Fragment => naga::ShaderStage::Fragment,
        }
    }

    pub(crate) fn from_naga(stage: naga::ShaderStage) -> Option<Self> {
        match stage {
            naga::ShaderStage::Vertex => Some(StageKind::Vertex),
            naga::ShaderStage::Fragment => Some(StageKind::Fragment),
            _ => None,
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StageKind::Vertex => "vertex",
            StageKind::Fragment => "fragment",
        })
    }
}
