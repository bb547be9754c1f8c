//! Run settings and physics tuning
//!
//! Defaults reproduce the classic feel; hosts may load overrides from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};

/// Per-frame physics constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    pub gravity: f32,
    /// Horizontal velocity multiplier when no direction is held
    pub friction: f32,
    pub move_speed: f32,
    pub jump_force: f32,
    pub bounce_force: f32,
    pub terminal_velocity: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            friction: FRICTION,
            move_speed: MOVE_SPEED,
            jump_force: JUMP_FORCE,
            bounce_force: BOUNCE_FORCE,
            terminal_velocity: TERMINAL_VELOCITY,
        }
    }
}

impl PhysicsTuning {
    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("gravity", self.gravity),
            ("friction", self.friction),
            ("jump_force", self.jump_force),
            ("bounce_force", self.bounce_force),
            ("terminal_velocity", self.terminal_velocity),
        ];
        if let Some((name, value)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(Error::InvalidSettings(format!(
                "physics.{name} must be finite, got {value}"
            )));
        }
        // Horizontal speed is clamped to [-move_speed, move_speed]
        if !(self.move_speed.is_finite() && self.move_speed >= 0.0) {
            return Err(Error::InvalidSettings(format!(
                "physics.move_speed must be non-negative, got {}",
                self.move_speed
            )));
        }
        Ok(())
    }
}

/// Run settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Physics ===
    pub physics: PhysicsTuning,

    // === Viewport ===
    /// Visible width used by the camera (pixels)
    pub viewport_width: f32,
    /// Vertical extent of the screen; pit death triggers below it
    pub screen_height: f32,

    // === Rules ===
    pub starting_lives: u8,
    /// Delay between a death and the respawn (milliseconds)
    pub respawn_delay_ms: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            physics: PhysicsTuning::default(),
            viewport_width: VIEWPORT_WIDTH,
            screen_height: SCREEN_HEIGHT,
            starting_lives: STARTING_LIVES,
            respawn_delay_ms: RESPAWN_DELAY_MS,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        self.physics.validate()?;
        if !(self.viewport_width.is_finite() && self.viewport_width > 0.0) {
            return Err(Error::InvalidSettings(format!(
                "viewport_width must be positive, got {}",
                self.viewport_width
            )));
        }
        if !self.screen_height.is_finite() {
            return Err(Error::InvalidSettings("screen_height must be finite".into()));
        }
        if self.starting_lives == 0 {
            return Err(Error::InvalidSettings("starting_lives must be at least 1".into()));
        }
        if !(self.respawn_delay_ms.is_finite() && self.respawn_delay_ms >= 0.0) {
            return Err(Error::InvalidSettings(format!(
                "respawn_delay_ms must be non-negative, got {}",
                self.respawn_delay_ms
            )));
        }
        Ok(())
    }

    /// Pit death line in level space
    pub fn pit_line(&self) -> f32 {
        self.screen_height + PIT_MARGIN
    }
}
