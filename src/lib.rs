//! Horizontal Pong - player vs computer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, AI, match state)
//! - `settings`: Match configuration with JSON loading and validation

pub mod settings;
pub mod sim;

pub use settings::{ConfigError, MatchConfig};
pub use sim::{Match, MatchEvent, MoveIntent, Phase, Side, StateSnapshot};

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 700.0;
    pub const FIELD_HEIGHT: f32 = 500.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    /// Horizontal distance covered per move (pixels/tick)
    pub const PADDLE_SPEED: f32 = 6.0;
    /// Gap between the bottom paddle's top edge and the bottom of the field
    pub const BOTTOM_PADDLE_OFFSET: f32 = 30.0;
    /// Gap between the top of the field and the top paddle
    pub const TOP_PADDLE_OFFSET: f32 = 10.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 7.0;
    /// Launch speed ranges (pixels/tick, drawn as whole numbers)
    pub const BALL_MIN_X_SPEED: u32 = 2;
    pub const BALL_MIN_Y_SPEED: u32 = 3;
    pub const BALL_MAX_SPEED: u32 = 5;
    /// Vertical speed multiplier applied on every paddle return
    pub const RETURN_SPEEDUP: f32 = 1.1;
    /// Magnitude of the random lateral kick on a paddle return
    pub const RETURN_LATERAL_IMPULSE: f32 = 1.0;

    /// Frame pacing for the shell (ticks per second)
    pub const TICK_RATE: u32 = 60;
    /// First side to reach this many points wins the match
    pub const WINNING_SCORE: u32 = 5;
}
