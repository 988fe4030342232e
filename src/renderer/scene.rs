//! Per-frame scene emission
//!
//! Everything is mapped to screen space with
//! `(world - arena_center) * zoom / 100 + arena_center`.

use glam::DVec2;

use super::vertex::colors;
use super::{DrawCommand, DrawLayer, RenderSink};
use crate::consts::POINTER_RADIUS;
use crate::sim::state::Engine;

/// Fixed on-screen radius of the center-of-mass marker
const CENTER_MARKER_RADIUS: f32 = 5.0;
/// Outline thickness around each particle (pixels)
const OUTLINE_PX: f32 = 1.0;
/// Width of the drag launch line (pixels)
const DRAG_LINE_WIDTH: f32 = 5.0;

/// Emit the arena, markers, every particle and the drag line
pub fn draw_scene(engine: &Engine, pointer: DVec2, sink: &mut impl RenderSink) {
    let anchor = engine.to_screen(engine.center_of_mass).as_vec2();
    let pointer = pointer.as_vec2();
    sink.draw(DrawCommand::Circle {
        layer: DrawLayer::Arena,
        center: anchor,
        radius: engine.to_screen_len(engine.arena_radius) as f32,
        color: colors::ARENA,
    });
    sink.draw(DrawCommand::Circle {
        layer: DrawLayer::Pointer,
        center: pointer,
        radius: engine.to_screen_len(POINTER_RADIUS) as f32,
        color: colors::POINTER,
    });
    sink.draw(DrawCommand::Circle {
        layer: DrawLayer::CenterOfMass,
        center: anchor,
        radius: CENTER_MARKER_RADIUS,
        color: colors::CENTER_OF_MASS,
    });

    let store = &engine.store;
    for i in 0..store.len() {
        let center = engine.to_screen(store.pos[i]).as_vec2();
        let radius = engine.to_screen_len(store.radius[i]).floor() as f32;
        sink.draw(DrawCommand::Circle {
            layer: DrawLayer::Outline,
            center,
            radius: radius + OUTLINE_PX,
            color: colors::OUTLINE,
        });
        sink.draw(DrawCommand::Circle {
            layer: DrawLayer::Particle,
            center,
            radius,
            color: store.color[i].as_vec3(),
        });
    }

    if let Some(drag) = engine.drag {
        sink.draw(DrawCommand::Line {
            layer: DrawLayer::DragLine,
            from: drag.screen.as_vec2(),
            to: pointer,
            width: DRAG_LINE_WIDTH,
            color: colors::DRAG_LINE,
        });
    }
}
