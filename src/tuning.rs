//! Physics constants and shipped presets
//!
//! Every number the simulation reads lives in [`Tuning`], so both game
//! variants run on one core.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Shipped tuning presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    /// Slower, tighter gap, 40px sprite
    #[default]
    Classic,
    /// Floatier jump, wider gap, faster pipes, 50px sprite
    Mario,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Classic => "Classic",
            Variant::Mario => "Mario",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(Variant::Classic),
            "mario" | "flappy-mario" => Some(Variant::Mario),
            _ => None,
        }
    }

    /// Tuning values for this preset
    pub fn tuning(&self) -> Tuning {
        match self {
            Variant::Classic => Tuning::default(),
            Variant::Mario => Tuning {
                player_width: 50.0,
                player_height: 50.0,
                gravity: 0.25,
                jump_velocity: -5.5,
                pipe_width: 70.0,
                gap_size: 170.0,
                pipe_speed: 2.5,
                spawn_interval_ms: 1500.0,
                gap_margin: 60.0,
                ..Tuning::default()
            },
        }
    }
}

/// Errors from loading or validating a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("cannot read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("gap_margin must not be negative, got {0}")]
    NegativeMargin(f32),
    #[error("player_x {x} is outside a viewport {width} wide")]
    PlayerOutsideViewport { x: f32, width: f32 },
    #[error("gap of {gap} with margin {margin} does not fit a viewport {height} tall")]
    GapDoesNotFit { gap: f32, margin: f32, height: f32 },
}

/// All constants the simulation and generator read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub viewport_width: f32,
    pub viewport_height: f32,

    /// Fixed x of the player's left edge
    pub player_x: f32,
    pub player_width: f32,
    pub player_height: f32,

    /// Added to vertical velocity every tick (px/tick²)
    pub gravity: f32,
    /// Velocity set (not added) on flap; negative is up
    pub jump_velocity: f32,

    pub pipe_width: f32,
    /// Vertical opening between the top and bottom pipe
    pub gap_size: f32,
    /// Leftward scroll per tick (px)
    pub pipe_speed: f32,
    /// Time between obstacle spawns (ms)
    pub spawn_interval_ms: f64,
    /// Minimum distance from the gap to the ceiling and to the floor
    pub gap_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            player_x: PLAYER_X,
            player_width: 40.0,
            player_height: 40.0,
            gravity: 0.3,
            jump_velocity: -6.0,
            pipe_width: 60.0,
            gap_size: 150.0,
            pipe_speed: 2.0,
            spawn_interval_ms: 2000.0,
            gap_margin: 50.0,
        }
    }
}

impl Tuning {
    /// Parse a JSON overlay on top of the defaults and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read a JSON overlay from disk
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let finite = [
            ("player_x", self.player_x),
            ("gravity", self.gravity),
            ("jump_velocity", self.jump_velocity),
            ("gap_margin", self.gap_margin),
            ("spawn_interval_ms", self.spawn_interval_ms as f32),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(TuningError::NotFinite { field, value });
            }
        }

        let positive = [
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("pipe_width", self.pipe_width),
            ("gap_size", self.gap_size),
            ("pipe_speed", self.pipe_speed),
            ("spawn_interval_ms", self.spawn_interval_ms as f32),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(TuningError::NotPositive { field, value });
            }
            if !value.is_finite() {
                return Err(TuningError::NotFinite { field, value });
            }
        }

        if self.gap_margin < 0.0 {
            return Err(TuningError::NegativeMargin(self.gap_margin));
        }
        if self.player_x < 0.0 || self.player_x >= self.viewport_width {
            return Err(TuningError::PlayerOutsideViewport {
                x: self.player_x,
                width: self.viewport_width,
            });
        }
        if self.gap_top_range().is_none() {
            return Err(TuningError::GapDoesNotFit {
                gap: self.gap_size,
                margin: self.gap_margin,
                height: self.viewport_height,
            });
        }
        Ok(())
    }

    /// y at which a fresh player spawns
    #[inline]
    pub fn spawn_y(&self) -> f32 {
        self.viewport_height / 2.0
    }

    /// Lowest y the player's top edge may take
    #[inline]
    pub fn max_player_y(&self) -> f32 {
        self.viewport_height - self.player_height
    }

    /// Inclusive range of whole-pixel gap tops the generator may pick,
    /// rounded inward so both margins hold. `None` when no whole pixel fits.
    pub fn gap_top_range(&self) -> Option<(i32, i32)> {
        let min = self.gap_margin.ceil();
        let max = (self.viewport_height - self.gap_size - self.gap_margin).floor();
        (min <= max).then_some((min as i32, max as i32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        assert!(Variant::Classic.tuning().validate().is_ok());
        assert!(Variant::Mario.tuning().validate().is_ok());
    }

    #[test]
    fn test_variant_from_str() {
        assert_eq!(Variant::from_str("MARIO"), Some(Variant::Mario));
        assert_eq!(Variant::from_str("classic"), Some(Variant::Classic));
        assert_eq!(Variant::from_str("luigi"), None);
        assert_eq!(Variant::Mario.as_str(), "Mario");
    }

    #[test]
    fn test_from_json_overlays_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.5, "gap_size": 200 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.5);
        assert_eq!(tuning.gap_size, 200.0);
        assert_eq!(tuning.pipe_width, Tuning::default().pipe_width);
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "pipe_speed": 0 }"#),
            Err(TuningError::NotPositive { field: "pipe_speed", .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "viewport_height": 200 }"#),
            Err(TuningError::GapDoesNotFit { .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "gap_margin": -100 }"#),
            Err(TuningError::NegativeMargin(m)) if m == -100.0
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "player_x": 400 }"#),
            Err(TuningError::PlayerOutsideViewport { .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "player_x": -1 }"#),
            Err(TuningError::PlayerOutsideViewport { .. })
        ));
    }

    #[test]
    fn test_rejects_non_finite_physics() {
        let gravity = Tuning {
            gravity: f32::NAN,
            ..Tuning::default()
        };
        assert!(matches!(
            gravity.validate(),
            Err(TuningError::NotFinite { field: "gravity", .. })
        ));

        let jump = Tuning {
            jump_velocity: f32::NEG_INFINITY,
            ..Tuning::default()
        };
        assert!(matches!(
            jump.validate(),
            Err(TuningError::NotFinite { field: "jump_velocity", .. })
        ));

        let height = Tuning {
            viewport_height: f32::INFINITY,
            ..Tuning::default()
        };
        assert!(matches!(
            height.validate(),
            Err(TuningError::NotFinite { field: "viewport_height", .. })
        ));
    }

    #[test]
    fn test_from_path_reports_missing_file() {
        assert!(matches!(
            Tuning::from_path("/nonexistent/tuning.json"),
            Err(TuningError::Io(_))
        ));
    }

    #[test]
    fn test_gap_top_range() {
        let tuning = Tuning::default();
        // 600 - 150 - 50
        assert_eq!(tuning.gap_top_range(), Some((50, 400)));
    }

    #[test]
    fn test_fractional_margin_rounds_inward() {
        let tuning = Tuning {
            gap_margin: 50.5,
            ..Tuning::default()
        };
        assert!(tuning.validate().is_ok());
        // ceil(50.5), floor(600 - 150 - 50.5)
        assert_eq!(tuning.gap_top_range(), Some((51, 399)));
    }

    #[test]
    fn test_no_whole_pixel_fits() {
        // Real range is [50.2, 50.8]; no integer inside it
        let tuning = Tuning {
            viewport_height: 251.0,
            gap_margin: 50.2,
            ..Tuning::default()
        };
        assert_eq!(tuning.gap_top_range(), None);
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::GapDoesNotFit { .. })
        ));
    }
}
