//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No timers, rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Rect, player_has_passed, player_hits_obstacle};
pub use spawn::spawn_obstacle;
pub use state::{EndReason, GameEvent, GameState, Obstacle, Player};
pub use tick::{TickOutcome, tick};
