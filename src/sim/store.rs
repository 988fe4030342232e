//! Columnar particle storage
//!
//! Indices are the implicit particle identity and are only stable between
//! mutations: removals compact every column in a single pass, so all later
//! indices shift down.

use glam::{DVec2, DVec3};

/// Everything needed to create one particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSpawn {
    pub pos: DVec2,
    /// Position one step ago (`pos - prev` is the implied velocity)
    pub prev: DVec2,
    pub radius: f64,
    pub mass: f64,
    pub color: DVec3,
}

impl ParticleSpawn {
    /// A resting particle whose mass follows from its radius
    pub fn at_rest(pos: DVec2, radius: f64, color: DVec3) -> Self {
        Self {
            pos,
            prev: pos,
            radius,
            mass: crate::mass_for_radius(radius),
            color,
        }
    }

    /// Same particle, moving by `velocity` per step
    pub fn with_velocity(mut self, velocity: DVec2) -> Self {
        self.prev = self.pos - velocity;
        self
    }
}

/// Structure-of-arrays particle set. All columns always share one length.
#[derive(Debug, Clone, Default)]
pub struct ParticleStore {
    pub pos: Vec<DVec2>,
    pub prev: Vec<DVec2>,
    pub radius: Vec<f64>,
    pub mass: Vec<f64>,
    pub acc: Vec<DVec2>,
    pub color: Vec<DVec3>,
    pub pending_break: Vec<bool>,
}

impl ParticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pos: Vec::with_capacity(capacity),
            prev: Vec::with_capacity(capacity),
            radius: Vec::with_capacity(capacity),
            mass: Vec::with_capacity(capacity),
            acc: Vec::with_capacity(capacity),
            color: Vec::with_capacity(capacity),
            pending_break: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pos.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos.is_empty()
    }

    /// Append a particle and return its index.
    ///
    /// Panics on a non-positive radius or mass.
    pub fn push(&mut self, spawn: ParticleSpawn) -> usize {
        assert!(spawn.radius > 0.0, "particle radius must be positive, got {}", spawn.radius);
        assert!(spawn.mass > 0.0, "particle mass must be positive, got {}", spawn.mass);

        self.pos.push(spawn.pos);
        self.prev.push(spawn.prev);
        self.radius.push(spawn.radius);
        self.mass.push(spawn.mass);
        self.acc.push(DVec2::ZERO);
        self.color.push(spawn.color);
        self.pending_break.push(false);
        self.debug_check();
        self.len() - 1
    }

    /// Append many particles at once
    pub fn extend(&mut self, spawns: impl IntoIterator<Item = ParticleSpawn>) {
        for spawn in spawns {
            self.push(spawn);
        }
    }

    /// Remove every particle whose `remove` flag is set, keeping the order of
    /// the survivors. Returns the number removed.
    pub fn remove_flagged(&mut self, remove: &[bool]) -> usize {
        assert_eq!(remove.len(), self.len(), "removal mask length mismatch");
        let before = self.len();
        compact(&mut self.pos, remove);
        compact(&mut self.prev, remove);
        compact(&mut self.radius, remove);
        compact(&mut self.mass, remove);
        compact(&mut self.acc, remove);
        compact(&mut self.color, remove);
        compact(&mut self.pending_break, remove);
        self.debug_check();
        before - self.len()
    }

    /// Implied per-step velocity of particle `i`
    #[inline]
    pub fn velocity(&self, i: usize) -> DVec2 {
        self.pos[i] - self.prev[i]
    }

    pub fn total_mass(&self) -> f64 {
        self.mass.iter().sum()
    }

    /// Mass-weighted mean position, `None` for an empty (or massless) store
    pub fn center_of_mass(&self) -> Option<DVec2> {
        let total = self.total_mass();
        if total <= 0.0 {
            return None;
        }
        let weighted = self
            .pos
            .iter()
            .zip(&self.mass)
            .fold(DVec2::ZERO, |acc, (&p, &m)| acc + p * m);
        Some(weighted / total)
    }

    /// Shift every particle (and its history) by `offset`
    pub fn translate(&mut self, offset: DVec2) {
        for (p, q) in self.pos.iter_mut().zip(self.prev.iter_mut()) {
            *p += offset;
            *q += offset;
        }
    }

    /// Zero every particle's velocity
    pub fn freeze(&mut self) {
        self.prev.copy_from_slice(&self.pos);
    }

    pub fn any_pending_break(&self) -> bool {
        self.pending_break.iter().any(|&b| b)
    }

    #[inline]
    fn debug_check(&self) {
        let n = self.pos.len();
        debug_assert!(
            self.prev.len() == n
                && self.radius.len() == n
                && self.mass.len() == n
                && self.acc.len() == n
                && self.color.len() == n
                && self.pending_break.len() == n,
            "particle columns out of lock-step"
        );
    }
}

/// Stable single-pass removal of flagged entries
fn compact<T: Copy>(column: &mut Vec<T>, remove: &[bool]) {
    let mut write = 0;
    for read in 0..column.len() {
        if !remove[read] {
            column[write] = column[read];
            write += 1;
        }
    }
    column.truncate(write);
}
