//! World state and core simulation types
//!
//! Everything a restart throws away lives in [`GameState`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::tuning::Tuning;

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// Player's bottom edge went past the floor
    FellOffScreen,
    /// Player overlapped a pipe outside its gap
    Collision,
}

impl EndReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndReason::FellOffScreen => "fell off screen",
            EndReason::Collision => "collision",
        }
    }
}

/// Notifications for the front-end (sounds, HUD, screens)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new run began
    Started,
    /// Jump impulse applied
    Flapped,
    /// An obstacle was passed; carries the new score
    Scored { score: u32 },
    /// Run is over; carries the frozen final score
    Ended { reason: EndReason, score: u32 },
}

/// The falling character
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner; x never changes during a run
    pub pos: Vec2,
    /// Vertical velocity (px/tick, positive is down)
    pub vel_y: f32,
    pub size: Vec2,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.player_x, tuning.spawn_y()),
            vel_y: 0.0,
            size: Vec2::new(tuning.player_width, tuning.player_height),
        }
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Override current velocity with the jump impulse
    pub fn flap(&mut self, jump_velocity: f32) {
        self.vel_y = jump_velocity;
    }
}

/// A pipe pair with a gap the player must fly through
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    pub width: f32,
    /// Bottom of the top pipe
    pub gap_top: f32,
    /// Top of the bottom pipe (`gap_top + gap_size`)
    pub gap_bottom: f32,
    /// Set once the trailing edge has crossed the player's leading edge
    pub passed: bool,
}

impl Obstacle {
    pub fn new(id: u32, x: f32, width: f32, gap_top: f32, gap_size: f32) -> Self {
        Self {
            id,
            x,
            width,
            gap_top,
            gap_bottom: gap_top + gap_size,
            passed: false,
        }
    }

    /// Rightmost x of the pipe
    #[inline]
    pub fn trailing_edge(&self) -> f32 {
        self.x + self.width
    }

    /// Scrolled entirely past the left edge of the viewport
    #[inline]
    pub fn is_off_screen(&self) -> bool {
        self.trailing_edge() < 0.0
    }
}

/// Complete world state for one run (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Gap placement RNG
    pub rng: Pcg32,
    pub player: Player,
    /// Live obstacles, oldest (leftmost) first
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Next obstacle ID
    next_id: u32,
}

impl GameState {
    /// Create a fresh world with the given seed
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::new(tuning),
            obstacles: Vec::new(),
            score: 0,
            time_ticks: 0,
            next_id: 1,
        }
    }

    /// Allocate a new obstacle ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}
