//! Gravity Sandbox - a circular arena particle playground
//!
//! Core modules:
//! - `sim`: Verlet physics engine (store, integration, constraints, merge/break)
//! - `renderer`: Render callback trait and vertex tessellation
//! - `platform`: Tagged input events and held-key tracking
//! - `config`: Construction-time configuration loaded from JSON

pub mod config;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::{ConfigError, SandboxConfig};

use glam::{DVec2, DVec3};

/// Physics constants
pub mod consts {
    /// Sub-steps per rendered frame
    pub const SUBSTEPS: u32 = 16;

    /// Mass per unit of squared radius (`mass == radius² × DENSITY`)
    pub const DENSITY: f64 = 10.0;
    /// Strength of the mutual inverse-square attraction
    pub const GRAVITY: f64 = 0.1;

    /// Pairs closer than this fraction of their radii sum are fused
    pub const MERGE_THRESHOLD: f64 = 0.8;
    /// Number of fragments a broken particle splits into
    pub const BREAK_PIECES: usize = 4;
    /// Gravity-free resettle passes per fragment after a break
    pub const RESETTLE_PASSES_PER_PIECE: usize = 16;

    /// Pointer exclusion radius (world units)
    pub const POINTER_RADIUS: f64 = 10.0;
    /// Guards the pointer field against exact coincidence
    pub const POINTER_EPSILON: f64 = 1e-6;
    /// Pointer gravity well strength
    pub const POINTER_GRAVITY: f64 = 1000.0;
    /// Particles within this distance of the pointer ignore the well
    pub const POINTER_GRAVITY_MIN_DIST: f64 = 10.0;

    /// Zoom is expressed in percent
    pub const ZOOM_SCALE: f64 = 100.0;
    /// Maximum zoom
    pub const ZOOM_MAX: f64 = 200.0;
    /// Minimum zoom is `ZOOM_FLOOR / arena_radius` so the arena stays visible
    pub const ZOOM_FLOOR: f64 = 32000.0;
}

/// Radius of a particle of the given mass
#[inline]
pub fn radius_for_mass(mass: f64) -> f64 {
    (mass / consts::DENSITY).sqrt()
}

/// Mass of a particle of the given radius
#[inline]
pub fn mass_for_radius(radius: f64) -> f64 {
    radius * radius * consts::DENSITY
}

/// Lowest zoom allowed for an arena of the given radius
#[inline]
pub fn min_zoom(arena_radius: f64) -> f64 {
    consts::ZOOM_FLOOR / arena_radius
}

/// Map a world position into screen space around `center`
#[inline]
pub fn world_to_screen(world: DVec2, center: DVec2, zoom: f64) -> DVec2 {
    (world - center) * zoom / consts::ZOOM_SCALE + center
}

/// Inverse of [`world_to_screen`]
#[inline]
pub fn screen_to_world(screen: DVec2, center: DVec2, zoom: f64) -> DVec2 {
    (screen - center) * consts::ZOOM_SCALE / zoom + center
}

/// Mass-weighted average of two values
#[inline]
pub fn mass_blend2(a: DVec2, ma: f64, b: DVec2, mb: f64) -> DVec2 {
    (a * ma + b * mb) / (ma + mb)
}

/// Mass-weighted average of two colors
#[inline]
pub fn mass_blend3(a: DVec3, ma: f64, b: DVec3, mb: f64) -> DVec3 {
    (a * ma + b * mb) / (ma + mb)
}
