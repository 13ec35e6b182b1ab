use std::collections::BTreeMap;

use crate::error::GeometryError;

use super::VertexBuffer;

/// Number of attribute slots a vertex array may enable.
///
/// Each slot reads from its own buffer binding, so this follows the smallest
/// `max_vertex_buffers` any supported profile guarantees.
pub const MAX_VERTEX_SLOTS: u32 = 8;

/// Attribute offsets and strides must be multiples of this.
const ALIGN: u64 = wgpu::VERTEX_ALIGNMENT;

/// Scalar type of an attribute component.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ElementType {
    Float32,
}

impl ElementType {
    pub fn size(self) -> u64 {
        match self {
            ElementType::Float32 => 4,
        }
    }
}

/// Format of one attribute slot.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct AttributeFormat {
    pub component_count: u32,
    pub element_type: ElementType,
    pub normalized: bool,
    /// Byte offset of the attribute inside one vertex.
    pub offset: u64,
}

impl AttributeFormat {
    /// Non-normalized `f32` components at offset 0.
    pub fn floats(component_count: u32) -> Self {
        Self {
            component_count,
            element_type: ElementType::Float32,
            normalized: false,
            offset: 0,
        }
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    pub fn byte_size(&self) -> u64 {
        u64::from(self.component_count) * self.element_type.size()
    }

    pub fn vertex_format(&self) -> Result<wgpu::VertexFormat, GeometryError> {
        if self.normalized {
            return Err(GeometryError::NormalizedFloat);
        }
        match (self.element_type, self.component_count) {
            (ElementType::Float32, 1) => Ok(wgpu::VertexFormat::Float32),
            (ElementType::Float32, 2) => Ok(wgpu::VertexFormat::Float32x2),
            (ElementType::Float32, 3) => Ok(wgpu::VertexFormat::Float32x3),
            (ElementType::Float32, 4) => Ok(wgpu::VertexFormat::Float32x4),
            (_, n) => Err(GeometryError::ComponentCount(n)),
        }
    }
}

/// An enabled slot: its source buffer and how the buffer's bytes are read.
#[derive(Debug, Clone)]
struct VertexBinding {
    buffer: wgpu::Buffer,
    buffer_len: u64,
    vertex_count: u32,
    stride: u64,
    /// Bytes the layout reads from the buffer for all of its vertices.
    span: u64,
    attribute: wgpu::VertexAttribute,
}

/// `None` when the span does not fit in a `u64`.
fn declared_span(vertex_count: u32, stride: u64, format: &AttributeFormat) -> Option<u64> {
    u64::from(vertex_count.saturating_sub(1))
        .checked_mul(stride)?
        .checked_add(format.offset)?
        .checked_add(format.byte_size())
}

/// Maps attribute slots to their source buffers and formats.
///
/// Every enabled slot is checked against the buffer it reads from when it is
/// enabled, so a `VertexArray` never describes bytes its buffers do not hold.
#[derive(Debug, Clone, Default)]
pub struct VertexArray {
    bindings: BTreeMap<u32, VertexBinding>,
}

impl VertexArray {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables `slot`, reading `format` from `buffer` every `stride` bytes.
    pub fn enable_attribute(
        &mut self,
        slot: u32,
        buffer: &VertexBuffer,
        format: AttributeFormat,
        stride: u64,
    ) -> Result<(), GeometryError> {
        let vertex_format = format.vertex_format()?;

        if slot >= MAX_VERTEX_SLOTS {
            return Err(GeometryError::SlotOutOfRange {
                slot,
                max: MAX_VERTEX_SLOTS,
            });
        }
        if self.bindings.contains_key(&slot) {
            return Err(GeometryError::SlotInUse(slot));
        }
        if stride == 0 || stride % ALIGN != 0 {
            return Err(GeometryError::MisalignedStride { stride, align: ALIGN });
        }
        if format.offset % ALIGN != 0 {
            return Err(GeometryError::MisalignedOffset {
                offset: format.offset,
                align: ALIGN,
            });
        }
        match format.offset.checked_add(format.byte_size()) {
            Some(end) if end <= stride => {}
            _ => {
                return Err(GeometryError::AttributeOverflow {
                    offset: format.offset,
                    size: format.byte_size(),
                    stride,
                });
            }
        }

        let span = match declared_span(buffer.vertex_count(), stride, &format) {
            Some(span) if span <= buffer.byte_len() => span,
            span => {
                return Err(GeometryError::SpanExceedsBuffer {
                    span: span.unwrap_or(u64::MAX),
                    len: buffer.byte_len(),
                });
            }
        };

        self.bindings.insert(
            slot,
            VertexBinding {
                buffer: buffer.raw().clone(),
                buffer_len: buffer.byte_len(),
                vertex_count: buffer.vertex_count(),
                stride,
                span,
                attribute: wgpu::VertexAttribute {
                    format: vertex_format,
                    offset: format.offset,
                    shader_location: slot,
                },
            },
        );
        log::debug!("vertex slot {slot}: {vertex_format:?}, stride {stride}, span {span}");
        Ok(())
    }

    /// Bytes `slot` reads from its buffer for all of its vertices.
    pub fn declared_span(&self, slot: u32) -> Option<u64> {
        self.bindings.get(&slot).map(|b| b.span)
    }

    /// Length of the buffer bound to `slot`.
    pub fn buffer_len(&self, slot: u32) -> Option<u64> {
        self.bindings.get(&slot).map(|b| b.buffer_len)
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Vertices every enabled slot can supply.
    pub fn vertex_count(&self) -> u32 {
        self.bindings
            .values()
            .map(|b| b.vertex_count)
            .min()
            .unwrap_or(0)
    }

    /// One buffer layout per enabled slot, in slot order.
    ///
    /// Layout `i` corresponds to the `i`-th enabled slot, which is also the
    /// buffer index [`VertexArray::bind`] uses.
    pub fn buffer_layouts(&self) -> Vec<wgpu::VertexBufferLayout<'_>> {
        self.bindings
            .values()
            .map(|b| wgpu::VertexBufferLayout {
                array_stride: b.stride,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: std::slice::from_ref(&b.attribute),
            })
            .collect()
    }

    /// Binds every enabled slot's buffer on `pass`.
    pub fn bind(&self, pass: &mut wgpu::RenderPass<'_>) {
        for (index, binding) in self.bindings.values().enumerate() {
            pass.set_vertex_buffer(index as u32, binding.buffer.slice(..));
        }
    }
}
