//! Lives and respawn state machine
//!
//! `Alive -> DeadPendingRespawn -> Alive` per death episode, until the last
//! life is lost or the goal is reached (`RunOver`). Respawns are deferred and
//! carried by a [`RespawnTicket`] so a stale timer can be told apart.

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState};
use crate::level::Level;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

/// A scheduled respawn for one death episode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RespawnTicket {
    pub run_id: u64,
    pub episode: u32,
    /// Run clock time (ms) at which the respawn is due
    pub due_at_ms: f64,
}

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RunPhase {
    Alive,
    DeadPendingRespawn { ticket: RespawnTicket },
    /// Terminal; only a restart leaves it
    RunOver(Outcome),
}

/// Result of reporting a death to the state machine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeathOutcome {
    /// Already dead or the run is over
    Ignored,
    Respawning(RespawnTicket),
    /// That was the last life
    RunOver,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lifecycle {
    pub lives: u8,
    pub phase: RunPhase,
    /// Incremented on every counted death
    pub episode: u32,
}

impl Lifecycle {
    pub fn new(lives: u8) -> Self {
        Self {
            lives,
            phase: RunPhase::Alive,
            episode: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.phase == RunPhase::Alive
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, RunPhase::RunOver(_))
    }

    /// Count a death; a no-op unless currently `Alive`
    pub fn on_death(&mut self, run_id: u64, now_ms: f64, respawn_delay_ms: f64) -> DeathOutcome {
        if !self.is_alive() {
            return DeathOutcome::Ignored;
        }
        self.lives = self.lives.saturating_sub(1);
        self.episode += 1;

        if self.lives == 0 {
            self.phase = RunPhase::RunOver(Outcome::Lost);
            return DeathOutcome::RunOver;
        }

        let ticket = RespawnTicket {
            run_id,
            episode: self.episode,
            due_at_ms: now_ms + respawn_delay_ms,
        };
        self.phase = RunPhase::DeadPendingRespawn { ticket };
        DeathOutcome::Respawning(ticket)
    }

    /// Goal reached; returns false if the run was not in a state to win
    pub fn on_goal(&mut self) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.phase = RunPhase::RunOver(Outcome::Won);
        true
    }

    /// Whether `ticket` is the respawn this run is currently waiting for
    pub fn accepts(&self, run_id: u64, ticket: &RespawnTicket) -> bool {
        match self.phase {
            RunPhase::DeadPendingRespawn { ticket: pending } => {
                ticket.run_id == run_id && pending.episode == ticket.episode
            }
            _ => false,
        }
    }

    /// Ticket waiting to fire, if any
    pub fn pending(&self) -> Option<RespawnTicket> {
        match self.phase {
            RunPhase::DeadPendingRespawn { ticket } => Some(ticket),
            _ => None,
        }
    }
}

/// Apply a respawn ticket to the run
///
/// Stale tickets (another run, an earlier episode, or a run that has ended)
/// leave the state untouched and return `None`.
pub fn respawn(state: &mut GameState, level: &Level, ticket: &RespawnTicket) -> Option<GameEvent> {
    if !state.lifecycle.accepts(state.run_id, ticket) {
        log::warn!(
            "Ignoring stale respawn (run {}, episode {})",
            ticket.run_id,
            ticket.episode
        );
        return None;
    }

    state.player.respawn_at(level.start_pos);
    state.camera.reset();
    state.lifecycle.phase = RunPhase::Alive;
    log::info!(
        "Player respawned (episode {}, {} lives left)",
        ticket.episode,
        state.lifecycle.lives
    );
    Some(GameEvent::PlayerRespawned {
        episode: ticket.episode,
    })
}
