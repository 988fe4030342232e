//! Engine state and particle spawning
//!
//! The engine exclusively owns the particle store. Everything that used to be
//! loose global state (arena size, zoom, screen center) lives here and is
//! handed to the physics passes by reference.

use glam::{DVec2, DVec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::store::{ParticleSpawn, ParticleStore};
use super::topology;
use crate::config::SandboxConfig;
use crate::platform::input::PointerButton;
use crate::{consts, min_zoom, screen_to_world, world_to_screen};

/// Radius of the particle placed at the arena center on startup
const SEED_PARTICLE_RADIUS: f64 = 10.0;

/// Pointer-down origin of an in-progress drag launch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragStart {
    /// Screen position where the button went down
    pub screen: DVec2,
    /// Timestamp of the press (milliseconds)
    pub time_ms: f64,
}

/// The complete simulation state
#[derive(Debug, Clone)]
pub struct Engine {
    pub config: SandboxConfig,
    pub store: ParticleStore,
    /// Radius of the confining circle (constant per run)
    pub arena_radius: f64,
    /// Fixed screen-space reference point
    pub arena_center: DVec2,
    /// Damped center of mass; anchor of the arena constraint
    pub center_of_mass: DVec2,
    /// View scale in percent
    pub zoom: f64,
    pub drag: Option<DragStart>,
    /// Seed the RNG was created from
    pub seed: u64,
    /// Frames advanced so far
    pub frame_count: u64,
    rng: Pcg32,
}

impl Engine {
    /// Create an engine populated with `config.initial_particles` particles
    pub fn new(config: SandboxConfig) -> Self {
        let mut engine = Self::empty(config);
        engine.populate();
        engine
    }

    /// Create an engine with no particles.
    ///
    /// Panics if `config` fails [`SandboxConfig::validate`].
    pub fn empty(config: SandboxConfig) -> Self {
        if let Err(err) = config.validate() {
            panic!("cannot create engine: {err}");
        }
        let seed = config.seed.unwrap_or_else(rand::random);
        let arena_center = config.screen_center();
        log::info!(
            "Engine created: arena radius {}, seed {}",
            config.arena_radius,
            seed
        );
        Self {
            arena_radius: config.arena_radius,
            arena_center,
            center_of_mass: arena_center,
            zoom: min_zoom(config.arena_radius),
            drag: None,
            seed,
            frame_count: 0,
            store: ParticleStore::with_capacity(config.initial_particles),
            rng: Pcg32::seed_from_u64(seed),
            config,
        }
    }

    /// One small particle at the center, the rest scattered inside the
    /// square inscribed in the arena
    fn populate(&mut self) {
        if self.config.initial_particles == 0 {
            return;
        }
        let color = DVec3::new(self.rng.random(), self.rng.random(), self.rng.random());
        self.spawn(ParticleSpawn::at_rest(
            self.arena_center,
            SEED_PARTICLE_RADIUS,
            color,
        ));
        for _ in 1..self.config.initial_particles {
            self.spawn_random();
        }
        log::info!(
            "Spawned {} particles, total mass {:.0}",
            self.store.len(),
            self.store.total_mass()
        );
    }

    /// Spawn a randomly sized particle somewhere inside the arena
    pub fn spawn_random(&mut self) -> usize {
        let radius = self
            .rng
            .random_range(self.config.spawn_radius_min..=self.config.spawn_radius_max);
        let half_side = (self.arena_radius / std::f64::consts::SQRT_2).floor();
        let limit = (half_side - radius).max(0.0);
        let offset = DVec2::new(
            self.rng.random_range(-limit..=limit),
            self.rng.random_range(-limit..=limit),
        );
        let color = self.random_color();
        self.spawn(ParticleSpawn::at_rest(self.arena_center + offset, radius, color))
    }

    /// Append a particle to the store
    pub fn spawn(&mut self, spawn: ParticleSpawn) -> usize {
        self.store.push(spawn)
    }

    /// Bluish-green tint
    pub fn random_color(&mut self) -> DVec3 {
        DVec3::new(
            self.rng.random_range(0.0..=0.5),
            self.rng.random(),
            self.rng.random(),
        )
    }

    /// Fragment every particle flagged for breaking
    pub fn break_flagged(&mut self) -> usize {
        topology::break_flagged(&mut self.store, &mut self.rng)
    }

    /// Screen position to world position under the current zoom
    pub fn to_world(&self, screen: DVec2) -> DVec2 {
        screen_to_world(screen, self.arena_center, self.zoom)
    }

    /// World position to screen position under the current zoom
    pub fn to_screen(&self, world: DVec2) -> DVec2 {
        world_to_screen(world, self.arena_center, self.zoom)
    }

    /// World length to screen length
    pub fn to_screen_len(&self, len: f64) -> f64 {
        len * self.zoom / consts::ZOOM_SCALE
    }

    /// Spawn a large particle at the pointer
    pub fn spawn_at_pointer(&mut self, pointer_screen: DVec2) -> usize {
        let pos = self.to_world(pointer_screen);
        let color = self.random_color();
        let radius = self.config.pointer_spawn_radius;
        self.spawn(ParticleSpawn::at_rest(pos, radius, color))
    }

    /// Start a drag launch
    pub fn press(&mut self, screen: DVec2, time_ms: f64) {
        self.drag = Some(DragStart { screen, time_ms });
    }

    /// Finish a drag launch: spawn at the press position, moving toward the
    /// release position at the drag speed. Returns the new particle's index.
    pub fn release(&mut self, screen: DVec2, time_ms: f64, button: PointerButton) -> Option<usize> {
        let start = self.drag.take()?;
        let from = self.to_world(start.screen);
        let to = self.to_world(screen);
        let elapsed = time_ms - start.time_ms;
        let velocity = if elapsed > 0.0 {
            (to - from) / elapsed
        } else {
            DVec2::ZERO
        };

        let radius = match button {
            PointerButton::Primary => self.config.small_launch_radius,
            _ => self.config.large_launch_radius,
        };
        let color = self.random_color();
        let index = self.spawn(ParticleSpawn::at_rest(from, radius, color).with_velocity(velocity));
        log::debug!("Launched particle {index} (r = {radius}) with velocity {velocity}");
        Some(index)
    }

    /// Shift the whole store halfway (by `recenter_damping`) back toward the
    /// screen center and update the arena anchor
    pub fn recenter(&mut self) {
        if self.store.len() < self.config.recenter_min_particles.max(1) {
            return;
        }
        let Some(com) = self.store.center_of_mass() else {
            return;
        };
        let offset = (com - self.arena_center) * self.config.recenter_damping;
        self.center_of_mass = com - offset;
        self.store.translate(-offset);
    }

    /// Apply the signed zoom direction for one frame
    pub fn update_zoom(&mut self, zooming: f64, dt: f64) {
        self.zoom = (self.zoom + zooming * dt)
            .min(consts::ZOOM_MAX)
            .max(min_zoom(self.arena_radius));
    }
}
