//! Triangle batch built from draw commands

use super::shapes;
use super::vertex::{Vertex, rgba};
use super::{DrawCommand, RenderSink};

/// Target edge length (pixels) when tessellating circles
const MAX_EDGE_PX: f32 = 4.0;

/// Accumulates one frame of triangles, ready for upload
#[derive(Debug, Clone, Default)]
pub struct VertexBatch {
    pub vertices: Vec<Vertex>,
    commands: usize,
}

impl VertexBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the previous frame's contents, keeping the allocation
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.commands = 0;
    }

    /// Number of draw commands received since the last clear
    pub fn command_count(&self) -> usize {
        self.commands
    }

    /// Raw bytes of the vertex buffer
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

impl RenderSink for VertexBatch {
    fn draw(&mut self, command: DrawCommand) {
        self.commands += 1;
        match command {
            DrawCommand::Circle {
                center,
                radius,
                color,
                ..
            } => {
                if radius <= 0.0 {
                    return;
                }
                let segments = shapes::segments_for_radius(radius, MAX_EDGE_PX);
                self.vertices
                    .extend(shapes::circle(center, radius, rgba(color), segments));
            }
            DrawCommand::Line {
                from,
                to,
                width,
                color,
                ..
            } => {
                self.vertices.extend(shapes::line(from, to, width, rgba(color)));
            }
        }
    }
}
