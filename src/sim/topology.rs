//! Topology changes: merging deeply overlapping pairs and fragmenting
//! flagged particles.
//!
//! Both operations compute everything they need from the pre-mutation store
//! first, then apply a single compaction, so no index is ever looked up
//! after it may have shifted.

use glam::DVec2;
use rand::Rng;

use super::interaction::{InteractionPass, solve_pairs};
use super::store::{ParticleSpawn, ParticleStore};
use crate::consts::{BREAK_PIECES, MERGE_THRESHOLD, RESETTLE_PASSES_PER_PIECE};
use crate::{mass_blend2, mass_blend3, radius_for_mass};

/// A pair selected for merging; `keep < absorb`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergePair {
    pub keep: usize,
    pub absorb: usize,
}

/// Find merge candidates in index order. Each particle takes part in at most
/// one pair; later pairs touching an already claimed particle wait for the
/// next call.
pub fn find_merge_pairs(store: &ParticleStore) -> Vec<MergePair> {
    let n = store.len();
    let mut claimed = vec![false; n];
    let mut pairs = Vec::new();

    for i in 0..n {
        if claimed[i] {
            continue;
        }
        for j in (i + 1)..n {
            if claimed[j] {
                continue;
            }
            let dist = store.pos[i].distance(store.pos[j]);
            let threshold = (store.radius[i] + store.radius[j]) * MERGE_THRESHOLD;
            if dist > 0.0 && dist < threshold {
                claimed[i] = true;
                claimed[j] = true;
                pairs.push(MergePair { keep: i, absorb: j });
                break;
            }
        }
    }
    pairs
}

/// Fuse every qualifying pair into its lower index. Returns the number of
/// merges performed.
pub fn merge(store: &mut ParticleStore) -> usize {
    let pairs = find_merge_pairs(store);
    if pairs.is_empty() {
        return 0;
    }

    let mut absorbed = vec![false; store.len()];
    for &MergePair { keep, absorb } in &pairs {
        let (m1, m2) = (store.mass[keep], store.mass[absorb]);
        let mass = m1 + m2;
        let pos = mass_blend2(store.pos[keep], m1, store.pos[absorb], m2);
        let vel = mass_blend2(store.velocity(keep), m1, store.velocity(absorb), m2);

        store.mass[keep] = mass;
        store.radius[keep] = radius_for_mass(mass);
        store.pos[keep] = pos;
        store.prev[keep] = pos - vel;
        store.color[keep] = mass_blend3(store.color[keep], m1, store.color[absorb], m2);
        absorbed[absorb] = true;
    }
    store.remove_flagged(&absorbed);

    log::debug!("merged {} pairs, {} particles remain", pairs.len(), store.len());
    pairs.len()
}

/// Split every flagged particle into `BREAK_PIECES` fragments, then let the
/// fragments settle without disturbing the rest of the store. Returns the
/// number of particles broken.
pub fn break_flagged<R: Rng>(store: &mut ParticleStore, rng: &mut R) -> usize {
    if !store.any_pending_break() {
        return 0;
    }

    let mut fragments = Vec::new();
    for i in 0..store.len() {
        if store.pending_break[i] {
            fragments.extend(fragment(store, i, rng));
        }
    }
    let flagged = store.pending_break.clone();
    let broken = store.remove_flagged(&flagged);

    let survivors = store.len();
    store.extend(fragments);

    let mut adjustable = vec![false; store.len()];
    adjustable[survivors..].fill(true);
    let pass = InteractionPass {
        gravity: false,
        adjustable: Some(&adjustable),
    };
    for _ in 0..BREAK_PIECES * RESETTLE_PASSES_PER_PIECE {
        solve_pairs(store, pass);
    }

    log::debug!("broke {broken} particles into {} fragments", broken * BREAK_PIECES);
    broken
}

/// Fragments of particle `i`, each with an equal share of its mass, the same
/// velocity and color, scattered within its radius.
fn fragment<R: Rng>(store: &ParticleStore, i: usize, rng: &mut R) -> Vec<ParticleSpawn> {
    let mass = store.mass[i] / BREAK_PIECES as f64;
    let radius = radius_for_mass(mass);
    let velocity = store.velocity(i);

    (0..BREAK_PIECES)
        .map(|_| {
            let offset = DVec2::new(rng.random_range(-1.0..=1.0), rng.random_range(-1.0..=1.0));
            let pos = store.pos[i] + offset * store.radius[i];
            ParticleSpawn {
                pos,
                prev: pos - velocity,
                radius,
                mass,
                color: store.color[i],
            }
        })
        .collect()
}
