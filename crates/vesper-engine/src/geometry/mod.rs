//! Vertex data and the description of how its bytes feed shader inputs.
//!
//! - [`VertexBuffer`]: immutable GPU buffer, uploaded once
//! - [`VertexArray`]: attribute slot table checked against its buffers

mod buffer;
mod layout;

pub use buffer::VertexBuffer;
pub use layout::{AttributeFormat, ElementType, MAX_VERTEX_SLOTS, VertexArray};

use crate::coords::Vec3;
use crate::error::GeometryError;
use crate::render::RenderCtx;

/// Uploads `positions` into a new immutable vertex buffer.
pub fn upload_vertices(ctx: RenderCtx<'_>, positions: &[Vec3]) -> Result<VertexBuffer, GeometryError> {
    VertexBuffer::upload(ctx, positions)
}

/// Vertex array with a single float attribute enabled at `slot`.
pub fn describe_layout(
    buffer: &VertexBuffer,
    slot: u32,
    component_count: u32,
    stride: u64,
) -> Result<VertexArray, GeometryError> {
    let mut array = VertexArray::new();
    array.enable_attribute(slot, buffer, AttributeFormat::floats(component_count), stride)?;
    Ok(array)
}
