//! Run handle: owns one run's state, its clock and the frame drivers
//!
//! Hosts either call [`Run::frame`] once per display frame with the elapsed
//! time, or feed real time to [`Run::advance`], which steps the simulation at a
//! fixed 60 Hz.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use super::lifecycle::{self, RespawnTicket, RunPhase};
use super::scene::Scene;
use super::state::{GameEvent, GameState};
use super::tick::{TickInput, tick};
use crate::consts::*;
use crate::level::Level;
use crate::settings::Settings;

static NEXT_RUN_ID: AtomicU64 = AtomicU64::new(1);

fn next_run_id() -> u64 {
    NEXT_RUN_ID.fetch_add(1, Ordering::Relaxed)
}

/// One playthrough of a level
pub struct Run {
    level: Arc<Level>,
    settings: Settings,
    state: GameState,
    /// Unsimulated real time for the fixed-step driver (seconds)
    accumulator: f32,
}

impl Run {
    pub fn new(level: impl Into<Arc<Level>>, settings: Settings) -> Self {
        let level = level.into();
        let state = GameState::new(next_run_id(), &level, settings.starting_lives);
        log::info!(
            "Run {} started on '{}' with {} lives",
            state.run_id,
            level.name,
            settings.starting_lives
        );
        Self {
            level,
            settings,
            state,
            accumulator: 0.0,
        }
    }

    /// Start over on the same level; pending respawns from before become stale
    pub fn restart(&mut self) {
        self.state = GameState::new(next_run_id(), &self.level, self.settings.starting_lives);
        self.accumulator = 0.0;
        log::info!("Run {} restarted on '{}'", self.state.run_id, self.level.name);
    }

    /// Advance the run clock by `elapsed_ms` and simulate one frame
    ///
    /// A respawn that has come due fires before the frame is simulated.
    pub fn frame(&mut self, input: &mut TickInput, elapsed_ms: f64) -> Vec<GameEvent> {
        self.state.clock_ms += elapsed_ms.max(0.0);

        let mut events = Vec::new();
        let now = self.state.clock_ms;
        if let Some(ticket) = self.state.lifecycle.pending().filter(|t| now >= t.due_at_ms) {
            events.extend(lifecycle::respawn(&mut self.state, &self.level, &ticket));
        }
        events.extend(tick(&mut self.state, &self.level, &self.settings, input));
        events
    }

    /// Feed real time (seconds) and run as many fixed steps as it covers
    pub fn advance(&mut self, input: &mut TickInput, dt: f32) -> Vec<GameEvent> {
        // NaN or infinite elapsed time counts as none
        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += dt;

        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            events.extend(self.frame(input, f64::from(SIM_DT) * 1000.0));
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        events
    }

    /// Apply a respawn from an external timer; stale tickets are ignored
    pub fn respawn(&mut self, ticket: &RespawnTicket) -> Option<GameEvent> {
        lifecycle::respawn(&mut self.state, &self.level, ticket)
    }

    pub fn scene(&self) -> Scene {
        Scene::capture(&self.state, &self.level)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn run_id(&self) -> u64 {
        self.state.run_id
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn lives(&self) -> u8 {
        self.state.lives()
    }

    pub fn phase(&self) -> RunPhase {
        self.state.lifecycle.phase
    }

    pub fn is_over(&self) -> bool {
        self.state.lifecycle.is_over()
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
