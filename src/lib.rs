//! Pixel Jump - a side-scrolling platformer simulation core
//!
//! Core modules:
//! - `sim`: Frame simulation (physics, collisions, lives, camera, scene)
//! - `level`: Level data contract, default level, generated-level mapping
//! - `settings`: Tunable physics and run configuration
//! - `error`: Errors for the fallible edges (JSON, files, settings)

pub mod error;
pub mod level;
pub mod settings;
pub mod sim;

pub use error::Error;
pub use level::{GeneratedLevel, Level, Theme};
pub use settings::{PhysicsTuning, Settings};

/// Game configuration constants
///
/// Velocities and accelerations are per frame at 60 Hz.
pub mod consts {
    /// Fixed simulation timestep for the accumulator driver (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest real frame the accumulator will swallow (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Physics
    pub const GRAVITY: f32 = 0.6;
    pub const FRICTION: f32 = 0.8;
    pub const MOVE_SPEED: f32 = 5.0;
    pub const JUMP_FORCE: f32 = -14.0;
    /// Rebound after stomping an enemy
    pub const BOUNCE_FORCE: f32 = -8.0;
    pub const TERMINAL_VELOCITY: f32 = 15.0;
    /// Horizontal speeds below this snap to zero
    pub const MIN_SPEED: f32 = 0.1;
    /// Walk acceleration per frame while a direction is held
    pub const WALK_ACCEL: f32 = 1.0;

    /// Dimensions (logical pixels)
    pub const TILE_SIZE: f32 = 40.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    /// Falling this far below the screen bottom is a pit death
    pub const PIT_MARGIN: f32 = 100.0;
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    pub const VIEWPORT_WIDTH: f32 = 800.0;

    /// Camera low-pass factor per frame
    pub const CAMERA_LERP: f32 = 0.1;

    /// Run rules
    pub const STARTING_LIVES: u8 = 3;
    pub const RESPAWN_DELAY_MS: f64 = 500.0;

    /// Scoring
    pub const STOMP_SCORE: u64 = 100;
    pub const COIN_SCORE: u64 = 50;
    pub const GOAL_BONUS: u64 = 1000;
}
