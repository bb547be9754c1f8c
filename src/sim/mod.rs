//! Frame simulation module
//!
//! All gameplay logic lives here. Rules for this module:
//! - One step per call, no wall-clock reads (time is passed in)
//! - Stable iteration order (level-authored order, indices never shift)
//! - No rendering or platform dependencies

pub mod camera;
pub mod lifecycle;
pub mod rect;
pub mod run;
pub mod scene;
pub mod state;
pub mod tick;

pub use camera::Camera;
pub use lifecycle::{DeathOutcome, Lifecycle, Outcome, RespawnTicket, RunPhase, respawn};
pub use rect::{Rect, overlaps};
pub use run::Run;
pub use scene::{PlayerPose, Scene};
pub use state::{Coin, DeathCause, Enemy, GameEvent, GameState, Goal, Platform, Player};
pub use tick::{TickInput, tick};
