//! Render step: turns the world into a flat list of draw commands
//!
//! Pure, so it can be tested without a canvas. The painter decides whether a
//! sprite is drawn from its image or as a placeholder rectangle.

use glam::Vec2;

use crate::game::{Game, RunState};
use crate::sim::Rect;

/// Background fill
pub const SKY_COLOR: &str = "#70c5ce";
pub const TEXT_COLOR: &str = "white";

/// Image-backed sprites
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Player,
    Pipe,
}

impl Sprite {
    /// Solid fill used when the sprite's image failed to load
    pub fn placeholder_color(&self) -> &'static str {
        match self {
            Sprite::Player => "red",
            Sprite::Pipe => "green",
        }
    }
}

/// One drawing operation, in canvas pixels
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Fill the whole viewport
    Clear { color: &'static str },
    /// Draw a sprite stretched to `rect`, optionally upside down
    Sprite {
        sprite: Sprite,
        rect: Rect,
        flip_vertical: bool,
    },
    /// Left-aligned text with its baseline at `pos`
    Text {
        text: String,
        pos: Vec2,
        size_px: f32,
        bold: bool,
    },
}

/// Build the draw list for the current frame
pub fn draw_list(game: &Game) -> Vec<DrawCmd> {
    let tuning = game.tuning();
    let state = game.state();
    let height = tuning.viewport_height;

    let mut cmds = Vec::with_capacity(3 + state.obstacles.len() * 2);
    cmds.push(DrawCmd::Clear { color: SKY_COLOR });

    cmds.push(DrawCmd::Sprite {
        sprite: Sprite::Player,
        rect: state.player.bounds(),
        flip_vertical: false,
    });

    for obstacle in &state.obstacles {
        // Top pipe hangs from the ceiling, drawn upside down
        cmds.push(DrawCmd::Sprite {
            sprite: Sprite::Pipe,
            rect: Rect::new(
                Vec2::new(obstacle.x, 0.0),
                Vec2::new(obstacle.width, obstacle.gap_top),
            ),
            flip_vertical: true,
        });
        cmds.push(DrawCmd::Sprite {
            sprite: Sprite::Pipe,
            rect: Rect::new(
                Vec2::new(obstacle.x, obstacle.gap_bottom),
                Vec2::new(obstacle.width, height - obstacle.gap_bottom),
            ),
            flip_vertical: false,
        });
    }

    cmds.push(DrawCmd::Text {
        text: format!("Score: {}", state.score),
        pos: Vec2::new(10.0, 30.0),
        size_px: 24.0,
        bold: true,
    });

    if game.run_state() == RunState::Idle {
        cmds.push(DrawCmd::Text {
            text: "Press SPACE to start".to_string(),
            pos: Vec2::new(50.0, height / 2.0),
            size_px: 20.0,
            bold: false,
        });
    }

    cmds
}
