//! Flappy Mario - a one-button side-scroller
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, pipes, collisions, scoring)
//! - `game`: Run-state machine and the two timers that drive the sim
//! - `tuning`: Data-driven physics constants and the shipped presets
//! - `renderer`: Draw list construction and the browser canvas painter
//! - `autopilot`: Demo player used by idle mode and the native binary

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod autopilot;
pub mod game;
pub mod renderer;
pub mod sim;
pub mod timer;
pub mod tuning;

pub use game::{Game, RunState};
pub use tuning::{Tuning, TuningError, Variant};

/// Game configuration constants
pub mod consts {
    /// Simulation ticks per second
    pub const TICK_RATE_HZ: f64 = 60.0;
    /// Milliseconds per simulation tick
    pub const TICK_MS: f64 = 1000.0 / TICK_RATE_HZ;
    /// Maximum timer events drained per frame to prevent spiral of death
    pub const MAX_EVENTS_PER_FRAME: u32 = 16;
    /// Longest frame delta honoured by the controller (ms)
    pub const MAX_FRAME_MS: f64 = 250.0;

    /// Default canvas dimensions
    pub const VIEWPORT_WIDTH: f32 = 400.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Player's fixed horizontal position
    pub const PLAYER_X: f32 = 50.0;
}
