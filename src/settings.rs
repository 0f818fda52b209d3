//! Match configuration
//!
//! Loaded from an optional JSON file; missing fields fall back to the
//! defaults in [`crate::consts`].

use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating a [`MatchConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Every tunable constant of a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    // === Playfield ===
    pub field_width: f32,
    pub field_height: f32,

    // === Paddles ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,
    /// Distance from the bottom edge of the field to the bottom paddle's top edge
    pub bottom_paddle_offset: f32,
    /// Distance from the top edge of the field to the top paddle
    pub top_paddle_offset: f32,

    // === Ball ===
    pub ball_radius: f32,
    pub ball_min_x_speed: u32,
    pub ball_min_y_speed: u32,
    pub ball_max_speed: u32,
    pub return_speedup: f32,
    pub return_lateral_impulse: f32,

    // === Match ===
    pub winning_score: u32,
    /// Shell pacing only; the simulation is tick-based
    pub tick_rate: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,
            bottom_paddle_offset: BOTTOM_PADDLE_OFFSET,
            top_paddle_offset: TOP_PADDLE_OFFSET,

            ball_radius: BALL_RADIUS,
            ball_min_x_speed: BALL_MIN_X_SPEED,
            ball_min_y_speed: BALL_MIN_Y_SPEED,
            ball_max_speed: BALL_MAX_SPEED,
            return_speedup: RETURN_SPEEDUP,
            return_lateral_impulse: RETURN_LATERAL_IMPULSE,

            winning_score: WINNING_SCORE,
            tick_rate: TICK_RATE,
        }
    }
}

impl MatchConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded match config from {}", path.display());
        Ok(config)
    }

    /// Check that the values describe a playable field
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_speed", self.paddle_speed),
            ("ball_radius", self.ball_radius),
            ("return_speedup", self.return_speedup),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::invalid(field, format!("must be positive, got {value}")));
            }
        }

        if self.paddle_width > self.field_width {
            return Err(ConfigError::invalid(
                "paddle_width",
                format!("{} does not fit a field {} wide", self.paddle_width, self.field_width),
            ));
        }
        if self.paddle_speed > self.field_width - self.paddle_width {
            log::warn!("paddle_speed exceeds the paddle's travel room; paddles may not move");
        }

        let top_bottom = self.top_paddle_offset + self.paddle_height;
        let bottom_top = self.field_height - self.bottom_paddle_offset;
        if self.top_paddle_offset < 0.0 || top_bottom > bottom_top {
            return Err(ConfigError::invalid(
                "top_paddle_offset",
                "paddles overlap or leave the field vertically",
            ));
        }
        if self.bottom_paddle_offset < self.paddle_height {
            return Err(ConfigError::invalid(
                "bottom_paddle_offset",
                format!("must be at least paddle_height ({})", self.paddle_height),
            ));
        }

        if self.ball_min_x_speed > self.ball_max_speed {
            return Err(ConfigError::invalid("ball_min_x_speed", "exceeds ball_max_speed"));
        }
        if self.ball_min_y_speed == 0 || self.ball_min_y_speed > self.ball_max_speed {
            return Err(ConfigError::invalid(
                "ball_min_y_speed",
                "must be non-zero and at most ball_max_speed",
            ));
        }
        if !self.return_lateral_impulse.is_finite() || self.return_lateral_impulse < 0.0 {
            return Err(ConfigError::invalid("return_lateral_impulse", "must be non-negative"));
        }

        if self.winning_score == 0 {
            return Err(ConfigError::invalid("winning_score", "must be at least 1"));
        }
        if self.tick_rate == 0 {
            return Err(ConfigError::invalid("tick_rate", "must be at least 1"));
        }
        Ok(())
    }

    /// Horizontal spawn position shared by both paddles (centred, whole pixels)
    fn paddle_spawn_x(&self) -> f32 {
        (self.field_width / 2.0).floor() - (self.paddle_width / 2.0).floor()
    }

    /// Spawn position of the human (bottom) paddle
    pub fn bottom_paddle_spawn(&self) -> Vec2 {
        Vec2::new(self.paddle_spawn_x(), self.field_height - self.bottom_paddle_offset)
    }

    /// Spawn position of the AI (top) paddle
    pub fn top_paddle_spawn(&self) -> Vec2 {
        Vec2::new(self.paddle_spawn_x(), self.top_paddle_offset)
    }

    /// Spawn position of the ball (field centre)
    pub fn ball_spawn(&self) -> Vec2 {
        Vec2::new(
            (self.field_width / 2.0).floor(),
            (self.field_height / 2.0).floor(),
        )
    }

    /// Wall-clock duration of one tick for the shell's pacing
    pub fn tick_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / f64::from(self.tick_rate.max(1)))
    }
}
