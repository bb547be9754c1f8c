//! Level data contract
//!
//! A [`Level`] is an immutable template: platforms and goal are read directly
//! by the simulation, enemies and coins are copied into each run. Levels come
//! from the built-in default, from JSON, or from a generator payload mapped
//! through [`GeneratedLevel`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::Result;
use crate::sim::rect::Rect;
use crate::sim::state::{Coin, Enemy, Goal, Platform};

/// Visual theme (rendering hint only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Day,
    Night,
    Cave,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Day => "day",
            Theme::Night => "night",
            Theme::Cave => "cave",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "day" => Some(Theme::Day),
            "night" => Some(Theme::Night),
            "cave" => Some(Theme::Cave),
            _ => None,
        }
    }
}

/// A playable level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub theme: Theme,
    /// Total level width (pixels)
    pub width: f32,
    /// Player spawn point (top-left)
    #[serde(with = "point")]
    pub start_pos: Vec2,
    pub platforms: Vec<Platform>,
    #[serde(default)]
    pub enemies: Vec<Enemy>,
    #[serde(default)]
    pub coins: Vec<Coin>,
    pub goal: Goal,
}

impl Level {
    /// Parse a level in the camelCase wire format
    pub fn from_json(json: &str) -> Result<Self> {
        let level: Level = serde_json::from_str(json)?;
        log::info!(
            "Loaded level '{}' ({} platforms, {} enemies, {} coins)",
            level.name,
            level.platforms.len(),
            level.enemies.len(),
            level.coins.len()
        );
        Ok(level)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// The hand-authored starter level
    pub fn default_level() -> Self {
        Self {
            id: "default_1".into(),
            name: "Classic Start".into(),
            theme: Theme::Day,
            width: 2000.0,
            start_pos: Vec2::new(50.0, 400.0),
            platforms: vec![
                // Floor
                Platform::new(0.0, 500.0, 2200.0, 100.0),
                Platform::new(300.0, 380.0, 120.0, 40.0),
                Platform::new(500.0, 280.0, 120.0, 40.0),
                Platform::new(700.0, 350.0, 40.0, 40.0),
                Platform::new(740.0, 350.0, 40.0, 40.0),
                Platform::new(900.0, 200.0, 200.0, 40.0),
                // Wall
                Platform::new(1300.0, 400.0, 120.0, 100.0),
            ],
            enemies: vec![
                Enemy::new(500.0, 460.0, 2.0, 200.0),
                Enemy::new(950.0, 160.0, 2.0, 100.0),
            ],
            coins: vec![
                Coin::new(340.0, 330.0),
                Coin::new(540.0, 230.0),
                Coin::new(920.0, 150.0),
                Coin::new(960.0, 150.0),
                Coin::new(1000.0, 150.0),
            ],
            goal: Goal {
                rect: Rect::new(1800.0, 200.0, 20.0, 300.0),
            },
        }
    }
}

/// `{x, y}` objects for `Vec2` fields
mod point {
    use glam::Vec2;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Point {
        x: f32,
        y: f32,
    }

    pub fn serialize<S: Serializer>(v: &Vec2, s: S) -> Result<S::Ok, S::Error> {
        Point { x: v.x, y: v.y }.serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec2, D::Error> {
        let p = Point::deserialize(d)?;
        Ok(Vec2::new(p.x, p.y))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedEnemy {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub range: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedCoin {
    pub x: f32,
    pub y: f32,
}

/// Raw layout as returned by an external level generator
///
/// Generators only place things; sizes, patrol speed, spawn point and a
/// safety floor are filled in by [`GeneratedLevel::into_level`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratedLevel {
    pub name: Option<String>,
    pub width: Option<f32>,
    pub theme: Option<String>,
    pub platforms: Vec<Rect>,
    pub enemies: Vec<GeneratedEnemy>,
    pub coins: Vec<GeneratedCoin>,
    pub goal_x: Option<f32>,
    /// Bottom of the goal flag
    pub goal_y: Option<f32>,
}

/// Patrol speed given to generated enemies
const GENERATED_ENEMY_SPEED: f32 = 2.0;
const GENERATED_ENEMY_RANGE: f32 = 100.0;
const GENERATED_WIDTH: f32 = 3000.0;
const GENERATED_GOAL_X: f32 = 2800.0;
const GENERATED_GOAL_Y: f32 = 500.0;
const GOAL_WIDTH: f32 = 20.0;
const GOAL_HEIGHT: f32 = 300.0;

impl GeneratedLevel {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Fill in defaults and append a floor spanning the whole level
    pub fn into_level(self, id: impl Into<String>) -> Level {
        // Zero counts as missing; negative values are taken as given
        let given = |v: Option<f32>| v.filter(|v| v.is_finite() && *v != 0.0);

        let width = given(self.width).unwrap_or(GENERATED_WIDTH);
        let theme = self
            .theme
            .as_deref()
            .and_then(Theme::from_str)
            .unwrap_or_default();
        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| "AI Generated Level".to_string());

        let mut platforms: Vec<Platform> = self
            .platforms
            .into_iter()
            .map(|rect| Platform { rect, color: None })
            .collect();
        platforms.push(Platform::new(
            -100.0,
            SCREEN_HEIGHT - 50.0,
            width + 500.0,
            200.0,
        ));

        let enemies = self
            .enemies
            .into_iter()
            .map(|e| {
                let range = given(e.range).unwrap_or(GENERATED_ENEMY_RANGE);
                Enemy::new(e.x, e.y, GENERATED_ENEMY_SPEED, range)
            })
            .collect();
        let coins = self.coins.into_iter().map(|c| Coin::new(c.x, c.y)).collect();

        let goal_x = given(self.goal_x).unwrap_or(GENERATED_GOAL_X);
        let goal_y = given(self.goal_y).unwrap_or(GENERATED_GOAL_Y);

        let level = Level {
            id: id.into(),
            name,
            theme,
            width,
            start_pos: Vec2::new(50.0, SCREEN_HEIGHT - 200.0),
            platforms,
            enemies,
            coins,
            goal: Goal {
                rect: Rect::new(goal_x, goal_y - GOAL_HEIGHT, GOAL_WIDTH, GOAL_HEIGHT),
            },
        };
        log::info!(
            "Mapped generated level '{}' ({} theme, width {})",
            level.name,
            level.theme.as_str(),
            level.width
        );
        level
    }
}
