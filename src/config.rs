//! Sandbox configuration
//!
//! Fixed at construction time. Loaded from JSON; any missing field takes its
//! default.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Construction-time parameters of a sandbox run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// Particles created at startup (including the central seed particle)
    pub initial_particles: usize,
    /// Radius of the confining arena (world units)
    pub arena_radius: f64,

    // === Screen ===
    pub screen_width: f64,
    pub screen_height: f64,

    /// RNG seed (system entropy when absent)
    pub seed: Option<u64>,
    /// Sub-steps per rendered frame
    pub substeps: u32,

    // === Spawning ===
    /// Radius range for the initial random population
    pub spawn_radius_min: f64,
    pub spawn_radius_max: f64,
    /// Radius of particles spawned by the spawn key
    pub pointer_spawn_radius: f64,
    /// Radius of a primary-button drag launch
    pub small_launch_radius: f64,
    /// Radius of any other button's drag launch
    pub large_launch_radius: f64,

    /// Enables the pointer gravity well key
    pub pointer_gravity: bool,

    // === Recentering ===
    /// Recenter only once this many particles exist
    pub recenter_min_particles: usize,
    /// Fraction of the center-of-mass offset removed per frame
    pub recenter_damping: f64,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            initial_particles: 200,
            arena_radius: 4000.0,

            screen_width: 800.0,
            screen_height: 600.0,

            seed: None,
            substeps: crate::consts::SUBSTEPS,

            spawn_radius_min: 100.0,
            spawn_radius_max: 150.0,
            pointer_spawn_radius: 150.0,
            small_launch_radius: 10.0,
            large_launch_radius: 50.0,

            pointer_gravity: false,

            recenter_min_particles: 3,
            recenter_damping: 0.5,
        }
    }
}

impl SandboxConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from `path` if given, falling back to defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::load(path).unwrap_or_else(|e| {
                log::warn!("{e}; using default config");
                Self::default()
            }),
            None => {
                log::info!("Using default config");
                Self::default()
            }
        }
    }

    /// Check construction-time preconditions
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("arena_radius", self.arena_radius),
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("spawn_radius_min", self.spawn_radius_min),
            ("pointer_spawn_radius", self.pointer_spawn_radius),
            ("small_launch_radius", self.small_launch_radius),
            ("large_launch_radius", self.large_launch_radius),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }
        if self.spawn_radius_max < self.spawn_radius_min {
            return Err(ConfigError::Invalid(format!(
                "spawn radius range is empty ({}..{})",
                self.spawn_radius_min, self.spawn_radius_max
            )));
        }
        if self.substeps == 0 {
            return Err(ConfigError::Invalid("substeps must be at least 1".into()));
        }
        if self.recenter_damping.is_nan() || self.recenter_damping <= 0.0 || self.recenter_damping > 1.0 {
            return Err(ConfigError::Invalid(format!(
                "recenter_damping must be in (0, 1], got {}",
                self.recenter_damping
            )));
        }
        Ok(())
    }

    /// Fixed screen-space anchor of the arena
    pub fn screen_center(&self) -> glam::DVec2 {
        glam::DVec2::new(self.screen_width, self.screen_height) / 2.0
    }
}
