//! Platform abstraction layer
//!
//! Window creation, event polling and frame pacing belong to the host. This
//! module only models what the host feeds in:
//! - Input events (pointer and keys)
//! - Held-key state sampled once per frame

pub mod input;

pub use input::{InputEvent, InputState, Key, PointerButton};
