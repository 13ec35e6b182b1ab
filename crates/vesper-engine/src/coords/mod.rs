//! Coordinate types for vertex data.
//!
//! Positions are submitted directly in normalized device coordinates:
//! - X right, Y up, both in `[-1, 1]`
//! - Z in `[0, 1]` (wgpu depth range)

mod vec3;

pub use vec3::Vec3;
