//! Per-frame simulation step
//!
//! Phases run in a fixed order: player horizontal, player vertical, enemies,
//! coins, goal, camera. Collisions resolve in level-authored platform order.

use super::lifecycle::DeathOutcome;
use super::state::{DeathCause, GameEvent, GameState, Platform, Player};
use crate::consts::*;
use crate::level::Level;
use crate::settings::{PhysicsTuning, Settings};

/// Input intents for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Jump; cleared by the step when it produces a jump
    pub up: bool,
}

/// Advance the run by one frame and return the events it produced
///
/// A run that is over is left untouched. A dead player awaiting respawn is
/// frozen while enemies keep patrolling.
pub fn tick(
    state: &mut GameState,
    level: &Level,
    settings: &Settings,
    input: &mut TickInput,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.lifecycle.is_over() {
        return events;
    }
    state.frame += 1;

    let player_active = state.lifecycle.is_alive();
    if player_active {
        move_horizontal(&mut state.player, &level.platforms, &settings.physics, input);
        move_vertical(&mut state.player, &level.platforms, &settings.physics, input);

        if state.player.rect.y > settings.pit_line() {
            kill_player(state, settings, DeathCause::Pit, &mut events);
        }
    }
    if state.lifecycle.is_over() {
        return events;
    }

    // Enemies
    for index in 0..state.enemies.len() {
        let stomped = {
            let enemy = &mut state.enemies[index];
            if enemy.is_dead {
                continue;
            }
            enemy.patrol();

            if !state.lifecycle.is_alive() || !state.player.rect.overlaps(&enemy.rect) {
                continue;
            }
            // Bottom edge before this frame's vertical move was at or above the enemy
            let player = &state.player;
            player.vy > 0.0 && player.rect.bottom() - player.vy <= enemy.rect.y
        };

        if stomped {
            state.enemies[index].is_dead = true;
            state.player.vy = settings.physics.bounce_force;
            state.score += STOMP_SCORE;
            log::debug!("Enemy {} stomped, score {}", index, state.score);
            events.push(GameEvent::EnemyDefeated {
                index,
                score: state.score,
            });
        } else {
            kill_player(state, settings, DeathCause::Enemy { index }, &mut events);
            if state.lifecycle.is_over() {
                return events;
            }
        }
    }

    // Coins are credited even if the player died earlier this frame
    if player_active {
        for (index, coin) in state.coins.iter_mut().enumerate() {
            if !coin.collected && state.player.rect.overlaps(&coin.rect) {
                coin.collected = true;
                state.score += COIN_SCORE;
                log::debug!("Coin {} collected, score {}", index, state.score);
                events.push(GameEvent::CoinCollected {
                    index,
                    score: state.score,
                });
            }
        }
    }

    // Goal
    if state.lifecycle.is_alive()
        && !state.player.won
        && state.player.rect.x > level.goal.rect.x
        && state.lifecycle.on_goal()
    {
        state.player.won = true;
        state.score += GOAL_BONUS;
        log::info!("Level '{}' cleared with score {}", level.name, state.score);
        events.push(GameEvent::RunWon { score: state.score });
        return events;
    }

    state
        .camera
        .follow(&state.player.rect, settings.viewport_width, level.width);

    events
}

/// Walk, friction, and x-axis platform resolution
fn move_horizontal(
    player: &mut Player,
    platforms: &[Platform],
    physics: &PhysicsTuning,
    input: &TickInput,
) {
    // Right wins when both directions are held
    if input.right {
        player.vx += WALK_ACCEL;
        player.facing_right = true;
    } else if input.left {
        player.vx -= WALK_ACCEL;
        player.facing_right = false;
    } else {
        player.vx *= physics.friction;
    }

    player.vx = player.vx.clamp(-physics.move_speed, physics.move_speed);
    if player.vx.abs() < MIN_SPEED {
        player.vx = 0.0;
    }

    player.rect.x += player.vx;

    for platform in platforms {
        let solid = &platform.rect;
        if !player.rect.overlaps(solid) {
            continue;
        }
        if player.vx > 0.0 {
            player.rect.x = solid.x - player.rect.width;
        } else if player.vx < 0.0 {
            player.rect.x = solid.right();
        } else {
            // No direction to go by: only separate on x if that's the shallower axis
            let push = player.rect.penetration(solid);
            if push.x.abs() < push.y.abs() {
                player.rect.x += push.x;
            }
        }
        player.vx = 0.0;
    }

    // Left edge of the level; forward progress is bounded by the goal instead
    if player.rect.x < 0.0 {
        player.rect.x = 0.0;
    }
}

/// Gravity, jumping, and y-axis platform resolution
fn move_vertical(
    player: &mut Player,
    platforms: &[Platform],
    physics: &PhysicsTuning,
    input: &mut TickInput,
) {
    player.vy = (player.vy + physics.gravity).min(physics.terminal_velocity);

    if input.up && player.is_grounded {
        player.vy = physics.jump_force;
        player.is_grounded = false;
        // One impulse per press, not hold-to-fly
        input.up = false;
    }

    player.rect.y += player.vy;
    player.is_grounded = false;

    for platform in platforms {
        let solid = &platform.rect;
        if !player.rect.overlaps(solid) {
            continue;
        }
        if player.vy > 0.0 {
            player.rect.y = solid.y - player.rect.height;
            player.is_grounded = true;
            player.vy = 0.0;
        } else if player.vy < 0.0 {
            player.rect.y = solid.bottom();
            player.vy = 0.0;
        }
    }
}

/// Report a death to the lifecycle and emit the matching events
fn kill_player(
    state: &mut GameState,
    settings: &Settings,
    cause: DeathCause,
    events: &mut Vec<GameEvent>,
) {
    let outcome = state
        .lifecycle
        .on_death(state.run_id, state.clock_ms, settings.respawn_delay_ms);

    match outcome {
        DeathOutcome::Ignored => {}
        DeathOutcome::Respawning(ticket) => {
            state.player.is_dead = true;
            log::info!(
                "Player died ({:?}), {} lives left",
                cause,
                state.lifecycle.lives
            );
            events.push(GameEvent::PlayerDied {
                cause,
                lives_left: state.lifecycle.lives,
                respawn: Some(ticket),
            });
        }
        DeathOutcome::RunOver => {
            state.player.is_dead = true;
            log::info!("Game over ({:?}), final score {}", cause, state.score);
            events.push(GameEvent::PlayerDied {
                cause,
                lives_left: 0,
                respawn: None,
            });
            events.push(GameEvent::RunLost { score: state.score });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::tests::flat_level;
    use crate::sim::lifecycle::{Outcome, RunPhase};
    use crate::sim::rect::Rect;
    use crate::sim::state::{Coin, Enemy};

    fn run_frames(
        state: &mut GameState,
        level: &Level,
        input: TickInput,
        frames: usize,
    ) -> Vec<GameEvent> {
        let settings = Settings::default();
        let mut events = Vec::new();
        for _ in 0..frames {
            let mut input = input;
            events.extend(tick(state, level, &settings, &mut input));
        }
        events
    }

    fn deaths(events: &[GameEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::PlayerDied { .. }))
            .count()
    }

    const RIGHT: TickInput = TickInput {
        left: false,
        right: true,
        up: false,
    };

    #[test]
    fn test_walk_accelerates_and_clamps() {
        let level = flat_level();
        let mut state = GameState::new(1, &level, 3);
        run_frames(&mut state, &level, RIGHT, 10);

        assert_eq!(state.player.vx, MOVE_SPEED);
        // 1 + 2 + 3 + 4 + 5 * 6
        assert_eq!(state.player.rect.x, 90.0);
        assert!(state.player.facing_right);
        assert!(state.player.is_grounded);
    }

    #[test]
    fn test_friction_decays_to_zero() {
        let level = flat_level();
        let mut state = GameState::new(1, &level, 3);
        state.player.vx = 5.0;
        run_frames(&mut state, &level, TickInput::default(), 1);
        assert!((state.player.vx - 4.0).abs() < 1e-5);

        run_frames(&mut state, &level, TickInput::default(), 30);
        assert_eq!(state.player.vx, 0.0);
    }

    #[test]
    fn test_right_beats_left() {
        let level = flat_level();
        let mut state = GameState::new(1, &level, 3);
        state.player.facing_right = false;
        let both = TickInput {
            left: true,
            right: true,
            up: false,
        };
        run_frames(&mut state, &level, both, 1);
        assert_eq!(state.player.vx, 1.0);
        assert!(state.player.facing_right);
    }

    #[test]
    fn test_wall_stops_player() {
        let mut level = flat_level();
        level.platforms.push(Platform::new(300.0, 400.0, 50.0, 100.0));
        let mut state = GameState::new(1, &level, 3);
        state.player.rect.x = 260.0;

        let settings = Settings::default();
        for _ in 0..20 {
            let mut input = RIGHT;
            tick(&mut state, &level, &settings, &mut input);
            for platform in &level.platforms {
                assert!(!state.player.rect.overlaps(&platform.rect));
            }
        }
        assert_eq!(state.player.rect.x, 270.0);
    }

    #[test]
    fn test_lands_on_floor() {
        let level = flat_level();
        let mut state = GameState::new(1, &level, 3);
        state.player.rect.y = 300.0;
        run_frames(&mut state, &level, TickInput::default(), 60);

        assert_eq!(state.player.rect.y, 460.0);
        assert_eq!(state.player.vy, 0.0);
        assert!(state.player.is_grounded);
    }

    #[test]
    fn test_jump_is_one_shot() {
        let level = flat_level();
        let settings = Settings::default();
        let mut state = GameState::new(1, &level, 3);
        run_frames(&mut state, &level, TickInput::default(), 1);
        assert!(state.player.is_grounded);

        let mut input = TickInput {
            up: true,
            ..Default::default()
        };
        tick(&mut state, &level, &settings, &mut input);
        assert!(!input.up, "jump intent should be consumed");
        assert_eq!(state.player.vy, JUMP_FORCE);
        assert_eq!(state.player.rect.y, 446.0);

        // Holding up in the air does nothing
        let mut input = TickInput {
            up: true,
            ..Default::default()
        };
        tick(&mut state, &level, &settings, &mut input);
        assert!(input.up);
        assert!((state.player.vy - (JUMP_FORCE + GRAVITY)).abs() < 1e-5);
    }

    #[test]
    fn test_head_bump_stops_rise() {
        let mut level = flat_level();
        level.platforms.push(Platform::new(0.0, 380.0, 200.0, 40.0));
        let settings = Settings::default();
        let mut state = GameState::new(1, &level, 3);
        run_frames(&mut state, &level, TickInput::default(), 1);

        let mut input = TickInput {
            up: true,
            ..Default::default()
        };
        let mut bumped = false;
        for _ in 0..30 {
            tick(&mut state, &level, &settings, &mut input);
            assert!(state.player.rect.y >= 420.0);
            bumped |= state.player.rect.y == 420.0;
        }
        assert!(bumped);
        assert!(state.player.is_grounded);
    }

    #[test]
    fn test_left_boundary() {
        let level = flat_level();
        let mut state = GameState::new(1, &level, 3);
        state.player.rect.x = 2.0;
        let left = TickInput {
            left: true,
            ..Default::default()
        };
        run_frames(&mut state, &level, left, 3);
        assert_eq!(state.player.rect.x, 0.0);
        assert!(!state.player.facing_right);
    }

    #[test]
    fn test_zero_velocity_overlap_uses_shallow_axis() {
        let mut level = flat_level();
        level.platforms.push(Platform::new(300.0, 400.0, 50.0, 100.0));
        let mut state = GameState::new(1, &level, 3);
        state.player.rect.x = 296.0;
        state.player.rect.y = 460.0;

        run_frames(&mut state, &level, TickInput::default(), 1);
        assert_eq!(state.player.rect.x, 270.0);
        assert_eq!(state.player.rect.y, 460.0);
    }

    #[test]
    fn test_pit_fall_single_death() {
        let mut level = flat_level();
        level.platforms.clear();
        let mut state = GameState::new(1, &level, 3);
        state.player.rect.x = 100.0;
        state.player.rect.y = 680.0;

        let events = run_frames(&mut state, &level, TickInput::default(), 10);
        assert_eq!(deaths(&events), 1);
        assert!(matches!(
            events[0],
            GameEvent::PlayerDied {
                cause: DeathCause::Pit,
                lives_left: 2,
                respawn: Some(_),
            }
        ));
        assert!(state.player.rect.y > 700.0);
        assert!(state.player.is_dead);
        assert_eq!(state.lives(), 2);
    }

    #[test]
    fn test_stomp_defeats_enemy() {
        let mut level = flat_level();
        level.enemies.push(Enemy::new(200.0, 460.0, 0.0, 100.0));
        let mut state = GameState::new(1, &level, 3);
        state.player.rect.x = 200.0;
        state.player.rect.y = 415.0;
        state.player.vy = 10.0;

        let events = run_frames(&mut state, &level, TickInput::default(), 1);
        assert_eq!(
            events,
            vec![GameEvent::EnemyDefeated {
                index: 0,
                score: STOMP_SCORE
            }]
        );
        assert!(state.enemies[0].is_dead);
        assert_eq!(state.player.vy, BOUNCE_FORCE);
        assert_eq!(state.score, 100);
        assert!(!level.enemies[0].is_dead);
    }

    #[test]
    fn test_stomped_enemy_is_inert() {
        let mut level = flat_level();
        level.enemies.push(Enemy::new(200.0, 460.0, 0.0, 100.0));
        let mut state = GameState::new(1, &level, 3);
        state.enemies[0].is_dead = true;
        state.player.rect.x = 205.0;
        state.player.rect.y = 460.0;

        let events = run_frames(&mut state, &level, TickInput::default(), 30);
        assert!(events.is_empty());
        assert_eq!(state.lives(), 3);
        assert_eq!(state.enemies[0].rect.x, 200.0);
    }

    #[test]
    fn test_side_hit_kills_once() {
        let mut level = flat_level();
        level.enemies.push(Enemy::new(200.0, 460.0, 0.0, 100.0));
        let mut state = GameState::new(1, &level, 3);
        state.player.rect.x = 171.0;

        let events = run_frames(&mut state, &level, RIGHT, 1);
        assert!(matches!(
            events.as_slice(),
            [GameEvent::PlayerDied {
                cause: DeathCause::Enemy { index: 0 },
                lives_left: 2,
                respawn: Some(_),
            }]
        ));
        assert!(!state.enemies[0].is_dead);

        // Still overlapping while dead: no more lives lost
        let events = run_frames(&mut state, &level, RIGHT, 20);
        assert_eq!(deaths(&events), 0);
        assert_eq!(state.lives(), 2);
    }

    #[test]
    fn test_coin_collection_is_idempotent() {
        let mut level = flat_level();
        level.coins.push(Coin::new(60.0, 465.0));
        let mut state = GameState::new(1, &level, 3);

        let events = run_frames(&mut state, &level, TickInput::default(), 5);
        assert_eq!(
            events,
            vec![GameEvent::CoinCollected {
                index: 0,
                score: COIN_SCORE
            }]
        );
        assert!(state.coins[0].collected);
        assert_eq!(state.score, 50);
        assert_eq!(state.remaining_coins().count(), 0);
    }

    #[test]
    fn test_coin_and_side_hit_same_frame() {
        let mut level = flat_level();
        level.enemies.push(Enemy::new(200.0, 460.0, 0.0, 100.0));
        level.coins.push(Coin {
            rect: Rect::new(175.0, 470.0, 30.0, 30.0),
            collected: false,
        });
        let mut state = GameState::new(1, &level, 3);
        state.player.rect.x = 171.0;

        let events = run_frames(&mut state, &level, RIGHT, 1);
        assert_eq!(deaths(&events), 1);
        assert!(events.contains(&GameEvent::CoinCollected {
            index: 0,
            score: COIN_SCORE
        }));
        assert_eq!(state.score, 50);
        assert_eq!(state.lives(), 2);
    }

    #[test]
    fn test_last_life_ends_run() {
        let mut level = flat_level();
        level.enemies.push(Enemy::new(200.0, 460.0, 2.0, 100.0));
        let mut state = GameState::new(1, &level, 1);
        state.score = 250;
        // The enemy patrols to x=202 before the overlap test
        state.player.rect.x = 175.0;

        let events = run_frames(&mut state, &level, RIGHT, 1);
        assert_eq!(
            events,
            vec![
                GameEvent::PlayerDied {
                    cause: DeathCause::Enemy { index: 0 },
                    lives_left: 0,
                    respawn: None,
                },
                GameEvent::RunLost { score: 250 },
            ]
        );
        assert_eq!(state.lifecycle.phase, RunPhase::RunOver(Outcome::Lost));
        assert_eq!(state.lifecycle.pending(), None);

        // Halted: nothing moves any more
        let enemy_x = state.enemies[0].rect.x;
        let frame = state.frame;
        let events = run_frames(&mut state, &level, RIGHT, 10);
        assert!(events.is_empty());
        assert_eq!(state.enemies[0].rect.x, enemy_x);
        assert_eq!(state.frame, frame);
    }

    #[test]
    fn test_goal_wins_and_halts() {
        let level = flat_level();
        let mut state = GameState::new(1, &level, 3);
        state.player.rect.x = 1790.0;
        state.score = 150;

        // x: 1791, 1793, 1796, 1800, 1805
        let events = run_frames(&mut state, &level, RIGHT, 4);
        assert!(events.is_empty());
        let events = run_frames(&mut state, &level, RIGHT, 1);
        assert_eq!(events, vec![GameEvent::RunWon { score: 1150 }]);
        assert!(state.player.won);
        assert_eq!(state.lifecycle.phase, RunPhase::RunOver(Outcome::Won));

        let x = state.player.rect.x;
        let events = run_frames(&mut state, &level, RIGHT, 10);
        assert!(events.is_empty());
        assert_eq!(state.player.rect.x, x);
        assert_eq!(state.score, 1150);
    }

    #[test]
    fn test_enemy_patrol_bounds() {
        let mut level = flat_level();
        level.enemies.push(Enemy::new(500.0, 460.0, 2.0, 200.0));
        let mut state = GameState::new(1, &level, 3);

        run_frames(&mut state, &level, TickInput::default(), 100);
        assert_eq!(state.enemies[0].rect.x, 700.0);
        assert_eq!(state.enemies[0].vx, 2.0);

        run_frames(&mut state, &level, TickInput::default(), 1);
        assert_eq!(state.enemies[0].rect.x, 702.0);
        assert_eq!(state.enemies[0].vx, -2.0);

        let mut saw_left_turn = false;
        for _ in 0..400 {
            run_frames(&mut state, &level, TickInput::default(), 1);
            let enemy = &state.enemies[0];
            assert!(enemy.rect.x >= 298.0 && enemy.rect.x <= 702.0);
            saw_left_turn |= enemy.rect.x < 300.0;
        }
        assert!(saw_left_turn);
    }

    #[test]
    fn test_enemies_patrol_while_player_dead() {
        let mut level = flat_level();
        level.platforms.clear();
        level.enemies.push(Enemy::new(500.0, 460.0, 2.0, 200.0));
        let mut state = GameState::new(1, &level, 3);
        state.player.rect.y = 750.0;

        run_frames(&mut state, &level, TickInput::default(), 1);
        assert!(state.player.is_dead);
        let y = state.player.rect.y;
        run_frames(&mut state, &level, TickInput::default(), 5);
        assert_eq!(state.player.rect.y, y);
        assert_eq!(state.enemies[0].rect.x, 512.0);
    }

    #[test]
    fn test_camera_follows_player() {
        let level = flat_level();
        let mut state = GameState::new(1, &level, 3);
        state.player.rect.x = 1000.0;
        run_frames(&mut state, &level, TickInput::default(), 1);
        // target 1000 - 400 + 15
        assert!((state.camera.x - 61.5).abs() < 1e-3);
    }
}
