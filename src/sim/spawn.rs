//! Obstacle generator
//!
//! Runs on its own timer, independent of the tick rate.

use rand::Rng;

use super::state::{GameState, Obstacle};
use crate::tuning::Tuning;

/// Append a new pipe pair at the right edge with a random gap position.
///
/// The gap top is a whole pixel drawn uniformly from
/// `[gap_margin, viewport_height - gap_size - gap_margin]`, rounded inward.
/// Nothing is spawned for a tuning that fails [`Tuning::validate`].
pub fn spawn_obstacle(state: &mut GameState, tuning: &Tuning) {
    let Some((min, max)) = tuning.gap_top_range() else {
        log::error!("No gap position fits the viewport, skipping spawn");
        return;
    };
    let gap_top = state.rng.random_range(min..=max) as f32;

    let id = state.next_entity_id();
    state.obstacles.push(Obstacle::new(
        id,
        tuning.viewport_width,
        tuning.pipe_width,
        gap_top,
        tuning.gap_size,
    ));
    log::debug!("Spawned obstacle {} with gap at {}", id, gap_top);
}
