//! Collision and pass tests between the player box and a pipe pair
//!
//! A pipe pair is two axis-aligned boxes sharing one x-span: the top pipe
//! covers [0, gap_top) and the bottom pipe covers (gap_bottom, floor].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Obstacle, Player};

/// Axis-aligned rectangle, y grows downward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    /// Open-interval overlap on the x axis (touching edges don't count)
    #[inline]
    pub fn overlaps_x(&self, left: f32, right: f32) -> bool {
        self.left() < right && self.right() > left
    }
}

/// True if the player overlaps either pipe of the obstacle
pub fn player_hits_obstacle(player: &Player, obstacle: &Obstacle) -> bool {
    let bounds = player.bounds();
    if !bounds.overlaps_x(obstacle.x, obstacle.trailing_edge()) {
        return false;
    }
    bounds.top() < obstacle.gap_top || bounds.bottom() > obstacle.gap_bottom
}

/// True once the obstacle's trailing edge is strictly left of the player
#[inline]
pub fn player_has_passed(player: &Player, obstacle: &Obstacle) -> bool {
    obstacle.trailing_edge() < player.pos.x
}
