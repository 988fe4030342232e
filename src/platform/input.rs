//! Input events and held-key tracking
//!
//! Hosts translate their native events into [`InputEvent`]s. Pointer
//! presses and releases drive drag launches immediately; key state is
//! sampled once per frame into a [`FrameInput`].

use glam::DVec2;

use crate::sim::constraint::PointerMode;
use crate::sim::state::Engine;
use crate::sim::tick::FrameInput;

/// Logical keys the sandbox reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Zero all velocities while held
    Freeze,
    /// Pointer pushes particles away
    Push,
    /// Pointer flags touched particles for fragmentation
    Break,
    /// Pointer gravity well (when enabled in config)
    Gravity,
    /// Spawn a large particle at the pointer every frame
    Spawn,
    ZoomIn,
    ZoomOut,
}

impl Key {
    /// Default binding from a host key name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "space" | " " => Some(Key::Freeze),
            "p" => Some(Key::Push),
            "b" => Some(Key::Break),
            "g" => Some(Key::Gravity),
            "n" => Some(Key::Spawn),
            "up" | "arrowup" => Some(Key::ZoomIn),
            "down" | "arrowdown" => Some(Key::ZoomOut),
            _ => None,
        }
    }
}

/// Mouse button of a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
    Other(u8),
}

/// One host input event (screen coordinates, millisecond timestamps)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerMoved {
        pos: DVec2,
    },
    PointerDown {
        pos: DVec2,
        button: PointerButton,
        time_ms: f64,
    },
    PointerUp {
        pos: DVec2,
        button: PointerButton,
        time_ms: f64,
    },
    KeyDown(Key),
    KeyUp(Key),
}

/// Which keys are currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct HeldKeys {
    freeze: bool,
    push: bool,
    break_mode: bool,
    gravity: bool,
    spawn: bool,
}

impl HeldKeys {
    fn get(&self, key: Key) -> bool {
        match key {
            Key::Freeze => self.freeze,
            Key::Push => self.push,
            Key::Break => self.break_mode,
            Key::Gravity => self.gravity,
            Key::Spawn => self.spawn,
            Key::ZoomIn | Key::ZoomOut => false,
        }
    }

    fn slot(&mut self, key: Key) -> Option<&mut bool> {
        match key {
            Key::Freeze => Some(&mut self.freeze),
            Key::Push => Some(&mut self.push),
            Key::Break => Some(&mut self.break_mode),
            Key::Gravity => Some(&mut self.gravity),
            Key::Spawn => Some(&mut self.spawn),
            Key::ZoomIn | Key::ZoomOut => None,
        }
    }
}

/// Accumulated input state between frames
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Last known pointer position (screen space)
    pub pointer: DVec2,
    held: HeldKeys,
    /// +1 zooming in, -1 zooming out, 0 idle
    zooming: f64,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event. Returns the index of a particle launched by a
    /// pointer release.
    pub fn handle(&mut self, engine: &mut Engine, event: InputEvent) -> Option<usize> {
        match event {
            InputEvent::PointerMoved { pos } => {
                self.pointer = pos;
                None
            }
            InputEvent::PointerDown { pos, time_ms, .. } => {
                self.pointer = pos;
                engine.press(pos, time_ms);
                None
            }
            InputEvent::PointerUp {
                pos,
                button,
                time_ms,
            } => {
                self.pointer = pos;
                engine.release(pos, time_ms, button)
            }
            InputEvent::KeyDown(key) => {
                match key {
                    Key::ZoomIn => self.zooming = 1.0,
                    Key::ZoomOut => self.zooming = -1.0,
                    _ => {}
                }
                if let Some(slot) = self.held.slot(key) {
                    *slot = true;
                }
                None
            }
            InputEvent::KeyUp(key) => {
                if matches!(key, Key::ZoomIn | Key::ZoomOut) {
                    self.zooming = 0.0;
                }
                if let Some(slot) = self.held.slot(key) {
                    *slot = false;
                }
                None
            }
        }
    }

    pub fn zooming(&self) -> f64 {
        self.zooming
    }

    /// Whether `key` is currently held
    pub fn is_held(&self, key: Key) -> bool {
        match key {
            Key::ZoomIn => self.zooming > 0.0,
            Key::ZoomOut => self.zooming < 0.0,
            _ => self.held.get(key),
        }
    }

    /// Sample the held state for the coming frame. Break wins over push.
    pub fn frame_input(&self) -> FrameInput {
        let pointer_mode = if self.held.break_mode {
            PointerMode::Break
        } else if self.held.push {
            PointerMode::Push
        } else {
            PointerMode::Idle
        };
        FrameInput {
            pointer: self.pointer,
            freeze: self.held.freeze,
            pointer_mode,
            pointer_gravity: self.held.gravity,
            spawn_at_pointer: self.held.spawn,
            zooming: self.zooming,
        }
    }
}
