//! Entity records and per-run game state
//!
//! Static geometry (platforms, goal) stays in the shared [`Level`]; everything
//! a run mutates lives in [`GameState`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::lifecycle::{Lifecycle, RespawnTicket};
use super::rect::Rect;
use crate::consts::*;
use crate::level::Level;

/// A static, solid platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    #[serde(flatten)]
    pub rect: Rect,
    /// Optional render color override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Platform {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
            color: None,
        }
    }
}

/// Level-clear trigger; only `rect.x` matters for the win test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    #[serde(flatten)]
    pub rect: Rect,
}

/// A patrolling enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enemy {
    #[serde(flatten)]
    pub rect: Rect,
    /// Signed patrol velocity (pixels/frame)
    pub vx: f32,
    /// Patrol half-width around `origin_x`
    pub range: f32,
    pub origin_x: f32,
    #[serde(default)]
    pub is_dead: bool,
}

impl Enemy {
    /// Enemy one tile in size, patrolling around its spawn x
    pub fn new(x: f32, y: f32, vx: f32, range: f32) -> Self {
        Self {
            rect: Rect::new(x, y, TILE_SIZE, TILE_SIZE),
            vx,
            range,
            origin_x: x,
            is_dead: false,
        }
    }

    /// Advance one patrol step, reversing once outside the range
    ///
    /// The bound check runs every frame, so an overshoot is at most one `vx`.
    pub fn patrol(&mut self) {
        self.rect.x += self.vx;
        if self.rect.x > self.origin_x + self.range || self.rect.x < self.origin_x - self.range {
            self.vx = -self.vx;
        }
    }
}

/// A collectible coin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    #[serde(flatten)]
    pub rect: Rect,
    #[serde(default)]
    pub collected: bool,
}

impl Coin {
    pub fn new(x: f32, y: f32) -> Self {
        let size = TILE_SIZE * 0.75;
        Self {
            rect: Rect::new(x, y, size, size),
            collected: false,
        }
    }
}

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    pub vx: f32,
    pub vy: f32,
    pub is_grounded: bool,
    pub facing_right: bool,
    pub is_dead: bool,
    pub won: bool,
}

impl Player {
    pub fn spawn(start: Vec2) -> Self {
        Self {
            rect: Rect::new(start.x, start.y, PLAYER_WIDTH, PLAYER_HEIGHT),
            vx: 0.0,
            vy: 0.0,
            is_grounded: false,
            facing_right: true,
            is_dead: false,
            won: false,
        }
    }

    /// Put the player back at the spawn point, alive and at rest
    pub fn respawn_at(&mut self, start: Vec2) {
        self.rect.x = start.x;
        self.rect.y = start.y;
        self.vx = 0.0;
        self.vy = 0.0;
        self.is_grounded = false;
        self.is_dead = false;
    }
}

/// Why the player died
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Fell below the pit line
    Pit,
    /// Touched a live enemy without stomping it
    Enemy { index: usize },
}

/// Discrete events emitted by the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    CoinCollected { index: usize, score: u64 },
    EnemyDefeated { index: usize, score: u64 },
    PlayerDied {
        cause: DeathCause,
        lives_left: u8,
        /// Pending respawn, `None` when that was the last life
        respawn: Option<RespawnTicket>,
    },
    PlayerRespawned { episode: u32 },
    RunWon { score: u64 },
    RunLost { score: u64 },
}

/// Mutable state of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Identifies this run; respawn tickets from other runs are ignored
    pub run_id: u64,
    pub player: Player,
    /// Per-run copies of the level's enemies (indices are stable)
    pub enemies: Vec<Enemy>,
    /// Per-run copies of the level's coins (indices are stable)
    pub coins: Vec<Coin>,
    pub camera: Camera,
    pub score: u64,
    pub lifecycle: Lifecycle,
    /// Frames simulated so far
    pub frame: u64,
    /// Run clock in milliseconds, advanced by the host
    pub clock_ms: f64,
}

impl GameState {
    /// Fresh run state for a level template
    pub fn new(run_id: u64, level: &Level, starting_lives: u8) -> Self {
        Self {
            run_id,
            player: Player::spawn(level.start_pos),
            enemies: level.enemies.clone(),
            coins: level.coins.clone(),
            camera: Camera::default(),
            score: 0,
            lifecycle: Lifecycle::new(starting_lives),
            frame: 0,
            clock_ms: 0.0,
        }
    }

    pub fn lives(&self) -> u8 {
        self.lifecycle.lives
    }

    /// Enemies still in play
    pub fn live_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| !e.is_dead)
    }

    /// Coins still in play
    pub fn remaining_coins(&self) -> impl Iterator<Item = &Coin> {
        self.coins.iter().filter(|c| !c.collected)
    }
}
