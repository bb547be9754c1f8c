//! Read-only scene projection for renderers
//!
//! Everything is in level space; the renderer applies the camera offset.

use glam::Vec2;
use serde::Serialize;

use super::lifecycle::RunPhase;
use super::rect::Rect;
use super::state::{GameState, Platform};
use crate::level::{Level, Theme};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayerPose {
    pub position: Vec2,
    pub size: Vec2,
    pub facing_right: bool,
    pub is_dead: bool,
}

/// What a renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub camera_x: f32,
    pub theme: Theme,
    pub player: PlayerPose,
    /// Live enemies only
    pub enemies: Vec<Rect>,
    /// Uncollected coins only
    pub coins: Vec<Rect>,
    /// Level platforms, color overrides included
    pub platforms: Vec<Platform>,
    pub goal: Rect,
    // HUD
    pub score: u64,
    pub lives: u8,
    pub phase: RunPhase,
}

impl Scene {
    pub fn capture(state: &GameState, level: &Level) -> Self {
        let player = &state.player;
        Self {
            camera_x: state.camera.x,
            theme: level.theme,
            player: PlayerPose {
                position: player.rect.position(),
                size: player.rect.size(),
                facing_right: player.facing_right,
                is_dead: player.is_dead,
            },
            enemies: state.live_enemies().map(|e| e.rect).collect(),
            coins: state.remaining_coins().map(|c| c.rect).collect(),
            platforms: level.platforms.clone(),
            goal: level.goal.rect,
            score: state.score,
            lives: state.lifecycle.lives,
            phase: state.lifecycle.phase,
        }
    }
}
