//! Boundary constraint and pointer interaction field
//!
//! The arena is a circle around the (moving) center of mass. Hitting the
//! wall is fully inelastic: the particle is projected back inside and its
//! velocity is dropped.

use glam::DVec2;

use super::store::ParticleStore;
use crate::consts::{POINTER_EPSILON, POINTER_GRAVITY, POINTER_GRAVITY_MIN_DIST, POINTER_RADIUS};

/// What the pointer does to particles it touches during a sub-step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerMode {
    /// Pointer passes through particles
    #[default]
    Idle,
    /// Shove touched particles out of the pointer's exclusion radius
    Push,
    /// Flag touched particles for fragmentation
    Break,
}

/// Project every particle back inside the arena. Returns how many hit the wall.
pub fn constrain_to_arena(store: &mut ParticleStore, center: DVec2, arena_radius: f64) -> usize {
    let mut hits = 0;
    for i in 0..store.len() {
        let disp = store.pos[i] - center;
        let len = disp.length();
        let dist = len + store.radius[i];
        if dist <= arena_radius {
            continue;
        }
        hits += 1;
        if len > 0.0 {
            // project onto the wall itself so the particle ends fully inside
            let reach = (arena_radius - store.radius[i]).max(0.0);
            store.pos[i] = center + disp * (reach / len);
        }
        store.prev[i] = store.pos[i];
    }
    hits
}

/// Apply the pointer's push or break field at `pointer` (world space)
pub fn apply_pointer_field(store: &mut ParticleStore, pointer: DVec2, mode: PointerMode) {
    if mode == PointerMode::Idle {
        return;
    }
    for i in 0..store.len() {
        let disp = store.pos[i] - pointer;
        let dist = disp.length() + POINTER_EPSILON;
        let reach = store.radius[i] + POINTER_RADIUS;
        if dist >= reach {
            continue;
        }
        match mode {
            PointerMode::Break => store.pending_break[i] = true,
            PointerMode::Push => store.pos[i] += disp * reach / dist - disp,
            PointerMode::Idle => {}
        }
    }
}

/// Pull every particle toward the pointer with an inverse-square well
pub fn apply_pointer_gravity(store: &mut ParticleStore, pointer: DVec2) {
    let min_dist_sq = POINTER_GRAVITY_MIN_DIST * POINTER_GRAVITY_MIN_DIST;
    for i in 0..store.len() {
        let disp = store.pos[i] - pointer;
        let dist_sq = disp.length_squared() + 0.001;
        if dist_sq > min_dist_sq {
            store.acc[i] -= disp * POINTER_GRAVITY / (dist_sq * dist_sq.sqrt());
        }
    }
}
