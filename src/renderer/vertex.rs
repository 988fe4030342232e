//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Simple 2D vertex with position and color, laid out for direct upload
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Byte stride between consecutive vertices
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}

/// Opaque RGBA from an RGB color
#[inline]
pub fn rgba(color: Vec3) -> [f32; 4] {
    [color.x, color.y, color.z, 1.0]
}

/// Colors for scene elements
pub mod colors {
    use glam::Vec3;

    pub const ARENA: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    pub const POINTER: Vec3 = Vec3::new(0.0, 1.0, 0.0);
    pub const CENTER_OF_MASS: Vec3 = Vec3::new(0.0, 1.0, 1.0);
    pub const OUTLINE: Vec3 = Vec3::new(1.0, 1.0, 1.0);
    pub const DRAG_LINE: Vec3 = Vec3::new(0.0, 0.0, 1.0);
}
