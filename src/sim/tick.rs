//! Fixed timestep simulation tick
//!
//! Advances the world by one tick. Pure: no timers, no I/O, no rendering.

use super::collision::{player_has_passed, player_hits_obstacle};
use super::state::{EndReason, GameState};
use crate::tuning::Tuning;

/// Side signals produced by one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Obstacles passed this tick
    pub scored: u32,
    /// Set if the run must end; falling off screen wins over collision
    pub terminal: Option<EndReason>,
}

/// Advance the game state by one fixed timestep.
///
/// Every obstacle is moved, collision-tested, scored and culled on every
/// tick, including the tick that ends the run.
pub fn tick(state: &mut GameState, tuning: &Tuning) -> TickOutcome {
    let mut outcome = TickOutcome::default();
    state.time_ticks += 1;

    // Player physics
    let player = &mut state.player;
    player.vel_y += tuning.gravity;
    player.pos.y += player.vel_y;

    if player.pos.y < 0.0 {
        player.pos.y = 0.0;
        player.vel_y = 0.0;
    }

    let floor = tuning.viewport_height;
    if player.pos.y + player.size.y > floor {
        player.pos.y = floor - player.size.y;
        outcome.terminal = Some(EndReason::FellOffScreen);
    }

    // Obstacles
    let player = state.player;
    let mut collided = false;
    state.obstacles.retain_mut(|obstacle| {
        obstacle.x -= tuning.pipe_speed;

        if player_hits_obstacle(&player, obstacle) {
            collided = true;
        }

        if !obstacle.passed && player_has_passed(&player, obstacle) {
            obstacle.passed = true;
            outcome.scored += 1;
        }

        !obstacle.is_off_screen()
    });

    state.score += outcome.scored;
    if collided && outcome.terminal.is_none() {
        outcome.terminal = Some(EndReason::Collision);
    }

    outcome
}
