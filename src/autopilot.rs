//! Demo player
//!
//! Picks the next pipe the player still has to clear and flaps whenever the
//! player sinks toward the bottom of that pipe's gap.

use crate::sim::{GameState, Obstacle};
use crate::tuning::Tuning;

/// Fraction of the gap kept as headroom below the player
const BOTTOM_SLACK: f32 = 0.25;

/// The first obstacle whose trailing edge is still ahead of the player
pub fn next_obstacle(state: &GameState) -> Option<&Obstacle> {
    state
        .obstacles
        .iter()
        .find(|o| o.trailing_edge() >= state.player.pos.x)
}

/// y the player's top edge should stay above
pub fn aim_y(state: &GameState, tuning: &Tuning) -> f32 {
    match next_obstacle(state) {
        Some(obstacle) => {
            obstacle.gap_bottom - tuning.player_height - tuning.gap_size * BOTTOM_SLACK
        }
        None => tuning.viewport_height / 2.0,
    }
}

/// Whether a flap now keeps the player on course
pub fn should_flap(state: &GameState, tuning: &Tuning) -> bool {
    let player = &state.player;
    player.vel_y >= 0.0 && player.pos.y > aim_y(state, tuning)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_holds_mid_screen_without_obstacles() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);

        state.player.pos.y = 290.0;
        state.player.vel_y = 1.0;
        assert!(!should_flap(&state, &tuning));

        state.player.pos.y = 310.0;
        assert!(should_flap(&state, &tuning));
    }

    #[test]
    fn test_never_flaps_while_rising() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        state.player.pos.y = 500.0;
        state.player.vel_y = -2.0;
        assert!(!should_flap(&state, &tuning));
    }

    #[test]
    fn test_targets_first_unpassed_obstacle() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        // Already behind the player
        state.obstacles.push(Obstacle::new(1, -30.0, 60.0, 50.0, 150.0));
        state.obstacles.push(Obstacle::new(2, 200.0, 60.0, 300.0, 150.0));

        assert_eq!(next_obstacle(&state).map(|o| o.id), Some(2));
        // 450 - 40 - 37.5
        assert_eq!(aim_y(&state, &tuning), 372.5);
    }
}
