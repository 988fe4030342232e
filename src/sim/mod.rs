//! Deterministic particle simulation
//!
//! Everything that moves lives here. Given the same seed, config and input
//! sequence the engine produces the same frames:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - Stable iteration order (by store index)
//! - No rendering or platform dependencies beyond the draw callback

pub mod constraint;
pub mod integrate;
pub mod interaction;
pub mod state;
pub mod store;
pub mod tick;
pub mod topology;

pub use constraint::{PointerMode, apply_pointer_field, apply_pointer_gravity, constrain_to_arena};
pub use integrate::integrate;
pub use interaction::{InteractionPass, InteractionStats, solve_pairs};
pub use state::{DragStart, Engine};
pub use store::{ParticleSpawn, ParticleStore};
pub use tick::{FrameInput, FrameReport, frame, step};
pub use topology::{MergePair, break_flagged, find_merge_pairs, merge};
