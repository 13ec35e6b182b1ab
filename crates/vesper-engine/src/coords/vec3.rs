use bytemuck::{Pod, Zeroable};

/// 3D vertex position.
///
/// `repr(C)` with three packed `f32`s, so a `&[Vec3]` can be uploaded as-is.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    /// Number of `f32` components.
    pub const COMPONENTS: u32 = 3;

    /// Byte stride of a tightly packed `Vec3` array.
    pub const STRIDE: u64 = std::mem::size_of::<Vec3>() as u64;

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f32; 3]> for Vec3 {
    #[inline]
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_three_packed_floats() {
        assert_eq!(std::mem::size_of::<Vec3>(), 3 * std::mem::size_of::<f32>());
        assert_eq!(Vec3::STRIDE, 12);
        assert_eq!(Vec3::COMPONENTS as u64 * 4, Vec3::STRIDE);
    }

    #[test]
    fn cast_preserves_component_order() {
        let v = [Vec3::new(1.0, 2.0, 3.0), Vec3::from([4.0, 5.0, 6.0])];
        let floats: &[f32] = bytemuck::cast_slice(&v);
        assert_eq!(floats, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn non_finite_is_detected() {
        assert!(Vec3::new(0.0, 0.0, 0.0).is_finite());
        assert!(!Vec3::new(f32::NAN, 0.0, 0.0).is_finite());
        assert!(!Vec3::new(0.0, 0.0, f32::INFINITY).is_finite());
    }
}
