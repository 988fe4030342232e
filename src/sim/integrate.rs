//! Position Verlet integration
//!
//! Velocity is never stored: it is the difference between the current and
//! previous positions.

use super::store::ParticleStore;

/// Advance every particle by one sub-step and clear its acceleration
pub fn integrate(store: &mut ParticleStore, dt: f64) {
    let dt2 = dt * dt;
    for i in 0..store.len() {
        let change = store.pos[i] - store.prev[i] + store.acc[i] * dt2;
        store.prev[i] = store.pos[i];
        store.pos[i] += change;
        store.acc[i] = glam::DVec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::store::ParticleSpawn;
    use glam::{DVec2, DVec3};

    fn single(velocity: DVec2) -> ParticleStore {
        let mut store = ParticleStore::new();
        store.push(ParticleSpawn::at_rest(DVec2::ZERO, 1.0, DVec3::ONE).with_velocity(velocity));
        store
    }

    #[test]
    fn test_inertia_carries_velocity() {
        let mut store = single(DVec2::new(1.0, -2.0));
        integrate(&mut store, 0.5);
        assert_eq!(store.pos[0], DVec2::new(1.0, -2.0));
        assert_eq!(store.prev[0], DVec2::ZERO);
        integrate(&mut store, 0.5);
        assert_eq!(store.pos[0], DVec2::new(2.0, -4.0));
    }

    #[test]
    fn test_acceleration_applied_and_reset() {
        let mut store = single(DVec2::ZERO);
        store.acc[0] = DVec2::new(4.0, 0.0);
        integrate(&mut store, 0.5);
        assert_eq!(store.pos[0], DVec2::new(1.0, 0.0));
        assert_eq!(store.acc[0], DVec2::ZERO);
    }

    #[test]
    fn test_zero_dt_ignores_acceleration() {
        let mut store = single(DVec2::new(0.5, 0.0));
        store.acc[0] = DVec2::new(1e6, 1e6);
        integrate(&mut store, 0.0);
        assert_eq!(store.pos[0], DVec2::new(0.5, 0.0));
        assert!(store.pos[0].is_finite());
        assert_eq!(store.acc[0], DVec2::ZERO);
    }
}
