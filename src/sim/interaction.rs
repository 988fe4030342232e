//! Pairwise interaction solver
//!
//! Every unordered pair is visited exactly once (`i < j`). Overlapping pairs
//! are pushed apart along their separation, weighted so the lighter particle
//! moves more. Separated pairs attract each other with an inverse-square
//! force. Coincident pairs are skipped.

use super::store::ParticleStore;
use crate::consts::GRAVITY;

/// Options for one solver pass
#[derive(Debug, Clone, Copy)]
pub struct InteractionPass<'a> {
    /// Accumulate mutual attraction for separated pairs
    pub gravity: bool,
    /// When set, only particles flagged `true` receive overlap corrections
    pub adjustable: Option<&'a [bool]>,
}

impl Default for InteractionPass<'_> {
    fn default() -> Self {
        Self {
            gravity: true,
            adjustable: None,
        }
    }
}

impl InteractionPass<'_> {
    /// Overlap-only pass, no attraction
    pub fn collisions_only() -> Self {
        Self {
            gravity: false,
            adjustable: None,
        }
    }
}

/// Counts from a single pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractionStats {
    pub overlaps: usize,
    pub attractions: usize,
}

/// Run one solver pass over all unordered pairs
pub fn solve_pairs(store: &mut ParticleStore, pass: InteractionPass<'_>) -> InteractionStats {
    let n = store.len();
    if let Some(mask) = pass.adjustable {
        assert_eq!(mask.len(), n, "adjustable mask length mismatch");
    }
    let can_move = |k: usize| pass.adjustable.is_none_or(|mask| mask[k]);

    let mut stats = InteractionStats::default();
    for i in 0..n {
        for j in (i + 1)..n {
            let disp = store.pos[i] - store.pos[j];
            let dist = disp.length();
            if dist == 0.0 {
                continue;
            }
            let radii_sum = store.radius[i] + store.radius[j];
            let (mi, mj) = (store.mass[i], store.mass[j]);

            if dist < radii_sum {
                stats.overlaps += 1;
                let change = disp * (radii_sum - dist) / dist;
                let total = mi + mj;
                if can_move(i) {
                    store.pos[i] += change * (mj / total);
                }
                if can_move(j) {
                    store.pos[j] -= change * (mi / total);
                }
            } else if pass.gravity {
                stats.attractions += 1;
                // |f| = G·mi·mj / dist², directed along disp / dist
                let force = disp * (GRAVITY * mi * mj / (dist * dist * dist));
                store.acc[i] -= force / mi;
                store.acc[j] += force / mj;
            }
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::store::ParticleSpawn;
    use glam::{DVec2, DVec3};

    fn store_with(particles: &[(DVec2, f64)]) -> ParticleStore {
        let mut store = ParticleStore::new();
        for &(pos, radius) in particles {
            store.push(ParticleSpawn::at_rest(pos, radius, DVec3::ONE));
        }
        store
    }

    #[test]
    fn test_single_particle_no_self_interaction() {
        let mut store = store_with(&[(DVec2::new(3.0, 4.0), 10.0)]);
        let stats = solve_pairs(&mut store, InteractionPass::default());
        assert_eq!(stats, InteractionStats::default());
        assert_eq!(store.pos[0], DVec2::new(3.0, 4.0));
        assert_eq!(store.acc[0], DVec2::ZERO);
    }

    #[test]
    fn test_overlap_corrected_once() {
        // radii 10 + 10, centers 12 apart: overlap of 8
        let mut store = store_with(&[(DVec2::new(-6.0, 0.0), 10.0), (DVec2::new(6.0, 0.0), 10.0)]);
        let stats = solve_pairs(&mut store, InteractionPass::default());
        assert_eq!(stats.overlaps, 1);
        assert!((store.pos[0].x - -10.0).abs() < 1e-5);
        assert!((store.pos[1].x - 10.0).abs() < 1e-5);
        let dist = (store.pos[0] - store.pos[1]).length();
        assert!((dist - 20.0).abs() < 1e-4, "double counting would give {dist} != 20");
    }

    #[test]
    fn test_equal_masses_half_overlap_separate_symmetrically() {
        let r = 10.0_f64.sqrt();
        let radii_sum = 2.0 * r;
        let mut store = store_with(&[
            (DVec2::new(-radii_sum / 4.0, 0.0), r),
            (DVec2::new(radii_sum / 4.0, 0.0), r),
        ]);
        assert!((store.mass[0] - 100.0).abs() < 1e-3);

        solve_pairs(&mut store, InteractionPass::collisions_only());
        let dist = (store.pos[0] - store.pos[1]).length();
        assert!((dist - radii_sum).abs() < 1e-4);
        assert!((store.pos[0].x + store.pos[1].x).abs() < 1e-5);
    }

    #[test]
    fn test_heavier_particle_moves_less() {
        let mut store = store_with(&[(DVec2::new(0.0, 0.0), 30.0), (DVec2::new(35.0, 0.0), 10.0)]);
        solve_pairs(&mut store, InteractionPass::default());
        let heavy_shift = store.pos[0].length();
        let light_shift = (store.pos[1] - DVec2::new(35.0, 0.0)).length();
        assert!(heavy_shift < light_shift);
        assert!(((store.pos[1] - store.pos[0]).length() - 40.0).abs() < 1e-3);
    }

    #[test]
    fn test_attraction_pulls_together() {
        let mut store = store_with(&[(DVec2::new(-100.0, 0.0), 5.0), (DVec2::new(100.0, 0.0), 5.0)]);
        let stats = solve_pairs(&mut store, InteractionPass::default());
        assert_eq!(stats.attractions, 1);
        assert!(store.acc[0].x > 0.0);
        assert!(store.acc[1].x < 0.0);
        // equal masses: equal and opposite
        assert!((store.acc[0] + store.acc[1]).length() < 1e-6);

        // G·m / d² = 0.1 · 250 / 200²
        let expected = 0.1 * 250.0 / (200.0 * 200.0);
        assert!((store.acc[0].x - expected).abs() < 1e-7);

        // integrating moves them closer
        crate::sim::integrate::integrate(&mut store, 1.0);
        assert!((store.pos[1] - store.pos[0]).length() < 200.0);
    }

    #[test]
    fn test_gravity_disabled() {
        let mut store = store_with(&[(DVec2::new(-100.0, 0.0), 5.0), (DVec2::new(100.0, 0.0), 5.0)]);
        let stats = solve_pairs(&mut store, InteractionPass::collisions_only());
        assert_eq!(stats.attractions, 0);
        assert_eq!(store.acc[0], DVec2::ZERO);
    }

    #[test]
    fn test_coincident_pair_skipped() {
        let mut store = store_with(&[(DVec2::ONE, 5.0), (DVec2::ONE, 5.0)]);
        let stats = solve_pairs(&mut store, InteractionPass::default());
        assert_eq!(stats, InteractionStats::default());
        assert_eq!(store.pos[0], DVec2::ONE);
        assert!(store.pos[1].is_finite());
        assert_eq!(store.acc[1], DVec2::ZERO);
    }

    #[test]
    fn test_adjustable_mask_pins_particles() {
        let mut store = store_with(&[(DVec2::new(-6.0, 0.0), 10.0), (DVec2::new(6.0, 0.0), 10.0)]);
        let mask = [false, true];
        solve_pairs(
            &mut store,
            InteractionPass {
                gravity: false,
                adjustable: Some(&mask),
            },
        );
        assert_eq!(store.pos[0], DVec2::new(-6.0, 0.0));
        assert!(store.pos[1].x > 6.0);
    }
}
