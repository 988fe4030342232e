//! Rendering interface
//!
//! The engine never touches pixels. Each frame it emits screen-space draw
//! commands into a [`RenderSink`] supplied by the host; [`VertexBatch`]
//! is a ready-made sink that tessellates them into triangles.

pub mod batch;
pub mod scene;
pub mod shapes;
pub mod vertex;

use glam::{Vec2, Vec3};

pub use batch::VertexBatch;
pub use scene::draw_scene;
pub use vertex::Vertex;

/// What a draw command represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawLayer {
    Arena,
    Pointer,
    CenterOfMass,
    Outline,
    Particle,
    DragLine,
}

/// One screen-space primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Circle {
        layer: DrawLayer,
        center: Vec2,
        radius: f32,
        color: Vec3,
    },
    Line {
        layer: DrawLayer,
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Vec3,
    },
}

impl DrawCommand {
    pub fn layer(&self) -> DrawLayer {
        match *self {
            DrawCommand::Circle { layer, .. } | DrawCommand::Line { layer, .. } => layer,
        }
    }
}

/// Per-object draw callback
pub trait RenderSink {
    fn draw(&mut self, command: DrawCommand);
}

/// Collects commands as-is (handy for hosts with their own draw calls)
impl RenderSink for Vec<DrawCommand> {
    fn draw(&mut self, command: DrawCommand) {
        self.push(command);
    }
}

