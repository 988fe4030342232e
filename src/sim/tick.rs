//! Frame controller
//!
//! One call to [`frame`] advances the simulation by one rendered frame:
//! per-frame input handling, a fixed number of sub-steps, a settle pass,
//! then the render callback. Every pass runs to completion before the next
//! starts.

use glam::DVec2;

use super::constraint::{PointerMode, apply_pointer_field, apply_pointer_gravity, constrain_to_arena};
use super::integrate::integrate;
use super::interaction::{InteractionPass, solve_pairs};
use super::state::Engine;
use super::topology::merge;
use crate::renderer::{RenderSink, draw_scene};

/// Held input sampled once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Pointer position (screen space)
    pub pointer: DVec2,
    /// Zero all velocities before stepping
    pub freeze: bool,
    pub pointer_mode: PointerMode,
    /// Gravity well key held (ignored unless enabled in config)
    pub pointer_gravity: bool,
    /// Spawn a large particle at the pointer
    pub spawn_at_pointer: bool,
    /// Signed zoom direction (+1, -1 or 0)
    pub zooming: f64,
}

/// What happened during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub merges: usize,
    pub breaks: usize,
    pub wall_hits: usize,
    pub particles: usize,
}

/// Advance one frame and render it
pub fn frame(engine: &mut Engine, input: &FrameInput, dt: f64, sink: &mut impl RenderSink) -> FrameReport {
    let report = step(engine, input, dt);
    draw_scene(engine, input.pointer, sink);
    report
}

/// Advance one frame without rendering
pub fn step(engine: &mut Engine, input: &FrameInput, dt: f64) -> FrameReport {
    if input.freeze {
        engine.store.freeze();
    }
    if input.spawn_at_pointer {
        engine.spawn_at_pointer(input.pointer);
    }
    engine.recenter();
    engine.update_zoom(input.zooming, dt);

    let pointer = engine.to_world(input.pointer);
    let well = input.pointer_gravity && engine.config.pointer_gravity;
    let substeps = engine.config.substeps.max(1);
    let sub_dt = dt / substeps as f64;

    let mut report = FrameReport::default();
    for _ in 0..substeps {
        substep(engine, pointer, input.pointer_mode, well, sub_dt, &mut report);
    }
    // overlap-only, so no acceleration survives the frame
    solve_pairs(&mut engine.store, InteractionPass::collisions_only());

    engine.frame_count += 1;
    report.particles = engine.store.len();
    if report.merges > 0 || report.breaks > 0 {
        log::debug!(
            "frame {}: {} merges, {} breaks, {} particles",
            engine.frame_count,
            report.merges,
            report.breaks,
            report.particles
        );
    }
    report
}

/// interact → (well) → integrate → constrain → break → merge
fn substep(
    engine: &mut Engine,
    pointer: DVec2,
    mode: PointerMode,
    well: bool,
    dt: f64,
    report: &mut FrameReport,
) {
    solve_pairs(&mut engine.store, InteractionPass::default());
    if well {
        apply_pointer_gravity(&mut engine.store, pointer);
    }
    integrate(&mut engine.store, dt);

    report.wall_hits += constrain_to_arena(&mut engine.store, engine.center_of_mass, engine.arena_radius);
    apply_pointer_field(&mut engine.store, pointer, mode);

    if engine.store.any_pending_break() {
        report.breaks += engine.break_flagged();
    }
    report.merges += merge(&mut engine.store);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SandboxConfig;
    use crate::renderer::DrawCommand;
    use crate::sim::store::ParticleSpawn;
    use glam::DVec3;

    const DT: f64 = 1.0;

    fn engine() -> Engine {
        Engine::empty(SandboxConfig {
            initial_particles: 0,
            seed: Some(2024),
            ..Default::default()
        })
    }

    fn add(engine: &mut Engine, offset: DVec2, radius: f64) -> usize {
        let pos = engine.arena_center + offset;
        engine.spawn(ParticleSpawn::at_rest(pos, radius, DVec3::ONE))
    }

    #[test]
    fn test_empty_frame() {
        let mut engine = engine();
        let mut commands: Vec<DrawCommand> = Vec::new();
        let report = frame(&mut engine, &FrameInput::default(), DT, &mut commands);
        assert_eq!(report, FrameReport::default());
        assert_eq!(engine.frame_count, 1);
        // arena, pointer and center-of-mass markers
        assert_eq!(commands.len(), 3);
    }

    #[test]
    fn test_zero_dt_frame_is_stable() {
        let mut engine = engine();
        add(&mut engine, DVec2::new(-200.0, 0.0), 20.0);
        add(&mut engine, DVec2::new(200.0, 0.0), 20.0);
        step(&mut engine, &FrameInput::default(), 0.0);
        assert_eq!(engine.store.pos[0], engine.arena_center + DVec2::new(-200.0, 0.0));
        assert!(engine.store.pos.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn test_attraction_brings_pair_together() {
        let mut engine = engine();
        add(&mut engine, DVec2::new(-300.0, 0.0), 20.0);
        add(&mut engine, DVec2::new(300.0, 0.0), 20.0);
        let start = engine.store.pos[0].distance(engine.store.pos[1]);
        for _ in 0..10 {
            step(&mut engine, &FrameInput::default(), DT);
        }
        let end = engine.store.pos[0].distance(engine.store.pos[1]);
        assert!(end < start, "{end} !< {start}");
    }

    #[test]
    fn test_overlap_resolved_before_merge() {
        let mut engine = engine();
        add(&mut engine, DVec2::ZERO, 30.0);
        add(&mut engine, DVec2::new(5.0, 0.0), 30.0);
        let mass = engine.store.total_mass();
        let report = step(&mut engine, &FrameInput::default(), DT);
        // the first interaction pass separates them, so no merge happens
        assert_eq!(report.merges, 0);
        assert_eq!(engine.store.len(), 2);
        assert!((engine.store.total_mass() - mass).abs() < 1.0);
    }

    #[test]
    fn test_break_under_pointer() {
        let mut engine = engine();
        engine.zoom = 100.0;
        add(&mut engine, DVec2::ZERO, 40.0);
        let mass = engine.store.total_mass();

        let input = FrameInput {
            pointer: engine.arena_center,
            pointer_mode: PointerMode::Break,
            ..Default::default()
        };
        let report = step(&mut engine, &input, DT);
        assert!(report.breaks >= 1);
        assert!(engine.store.len() > 1);
        assert!((engine.store.total_mass() - mass).abs() / mass < 1e-4);
        assert!(!engine.store.any_pending_break());
    }

    #[test]
    fn test_freeze_zeroes_velocity() {
        let mut engine = engine();
        let i = add(&mut engine, DVec2::ZERO, 10.0);
        engine.store.prev[i] -= DVec2::new(3.0, 0.0);
        let input = FrameInput {
            freeze: true,
            ..Default::default()
        };
        step(&mut engine, &input, DT);
        assert_eq!(engine.store.pos[i], engine.arena_center);
    }

    #[test]
    fn test_spawn_at_pointer() {
        let mut engine = engine();
        let input = FrameInput {
            pointer: engine.arena_center,
            spawn_at_pointer: true,
            ..Default::default()
        };
        step(&mut engine, &input, DT);
        assert_eq!(engine.store.len(), 1);
        assert_eq!(engine.store.radius[0], 150.0);
    }

    #[test]
    fn test_pointer_gravity_needs_config_flag() {
        let input = FrameInput {
            pointer: engine().arena_center,
            pointer_gravity: true,
            ..Default::default()
        };

        let mut off = engine();
        add(&mut off, DVec2::new(100.0, 0.0), 5.0);
        step(&mut off, &input, DT);
        assert_eq!(off.store.velocity(0), DVec2::ZERO);

        let mut on = Engine::empty(SandboxConfig {
            pointer_gravity: true,
            ..engine().config
        });
        add(&mut on, DVec2::new(100.0, 0.0), 5.0);
        step(&mut on, &input, DT);
        assert_ne!(on.store.velocity(0), DVec2::ZERO);
    }

    #[test]
    fn test_arena_containment_after_frames() {
        let mut engine = Engine::new(SandboxConfig {
            initial_particles: 30,
            arena_radius: 1500.0,
            spawn_radius_min: 20.0,
            spawn_radius_max: 60.0,
            seed: Some(11),
            ..Default::default()
        });
        for _ in 0..5 {
            step(&mut engine, &FrameInput::default(), DT);
        }
        let com = engine.center_of_mass;
        for i in 0..engine.store.len() {
            let d = (engine.store.pos[i] - com).length() + engine.store.radius[i];
            // the final settle pass may nudge particles slightly past the wall
            assert!(d <= engine.arena_radius + engine.store.radius[i], "{d}");
        }
    }

    #[test]
    fn test_acceleration_cleared_after_frame() {
        let mut engine = engine();
        add(&mut engine, DVec2::new(-300.0, 0.0), 20.0);
        add(&mut engine, DVec2::new(300.0, 0.0), 20.0);
        step(&mut engine, &FrameInput::default(), DT);
        assert!(engine.store.acc.iter().all(|a| *a == DVec2::ZERO));

        // a frozen pair stays put for a zero-length frame
        let input = FrameInput {
            freeze: true,
            ..Default::default()
        };
        let before = engine.store.pos.clone();
        step(&mut engine, &input, 0.0);
        assert_eq!(engine.store.pos, before);
        assert!(engine.store.acc.iter().all(|a| *a == DVec2::ZERO));
    }

    #[test]
    fn test_zoom_per_frame() {
        let mut engine = engine();
        let input = FrameInput {
            zooming: 1.0,
            ..Default::default()
        };
        step(&mut engine, &input, 4.0);
        assert_eq!(engine.zoom, 12.0);
    }
}
