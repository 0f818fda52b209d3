//! Entities and phases of a match

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::{Circle, Rect};
use crate::settings::MatchConfig;

/// The two sides of the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Human player, bottom paddle
    Player,
    /// Computer opponent, top paddle
    Ai,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Player => "Player",
            Side::Ai => "Computer",
        }
    }
}

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Active gameplay
    Playing,
    /// Ball just left the field and the score was updated
    RoundOver,
    /// A side reached the winning score; waiting for continue
    MatchOver { winner: Side },
}

/// Horizontal move direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Toward decreasing x
    Left,
    /// Toward increasing x
    Right,
}

impl Direction {
    #[inline]
    pub fn sign(&self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// Something notable that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEvent {
    WallBounce,
    PaddleReturn { side: Side },
    PointScored { scorer: Side },
    MatchWon { winner: Side },
    MatchRestarted,
}

/// Uniform choice between -1 and +1
#[inline]
pub(crate) fn random_sign<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    if rng.random_bool(0.5) { 1.0 } else { -1.0 }
}

/// Speed ranges a ball draws from on (re)launch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchSpeeds {
    pub min_x: u32,
    pub min_y: u32,
    pub max: u32,
}

impl LaunchSpeeds {
    pub fn from_config(config: &MatchConfig) -> Self {
        Self {
            min_x: config.ball_min_x_speed,
            min_y: config.ball_min_y_speed,
            max: config.ball_max_speed,
        }
    }

    /// Draw a launch velocity: whole-number magnitudes, independent random signs
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        let x = rng.random_range(self.min_x..=self.max) as f32;
        let x = random_sign(rng) * x;
        let y = rng.random_range(self.min_y..=self.max) as f32;
        let y = random_sign(rng) * y;
        Vec2::new(x, y)
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    pub radius: f32,
    pub spawn: Vec2,
    pub launch: LaunchSpeeds,
}

impl Ball {
    /// Place a ball at its spawn point with a freshly drawn velocity
    pub fn new<R: Rng + ?Sized>(spawn: Vec2, radius: f32, launch: LaunchSpeeds, rng: &mut R) -> Self {
        Self {
            pos: spawn,
            vel: launch.draw(rng),
            radius,
            spawn,
            launch,
        }
    }

    /// Advance by one tick of velocity
    #[inline]
    pub fn step(&mut self) {
        self.pos += self.vel;
    }

    /// Back to spawn with a new random velocity
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.pos = self.spawn;
        self.vel = self.launch.draw(rng);
    }

    pub fn circle(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }
}

/// A horizontally sliding paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Distance covered per move
    pub speed: f32,
    pub spawn: Vec2,
}

impl Paddle {
    pub fn new(spawn: Vec2, size: Vec2, speed: f32) -> Self {
        Self {
            pos: spawn,
            size,
            speed,
            spawn,
        }
    }

    /// Shift by `speed` with no bounds checking
    #[inline]
    pub fn step(&mut self, direction: Direction) {
        self.pos.x = self.stepped_x(direction);
    }

    #[inline]
    fn stepped_x(&self, direction: Direction) -> f32 {
        self.pos.x + direction.sign() * self.speed
    }

    /// Whether a move keeps the paddle inside `[0, field_width]`
    pub fn can_move(&self, direction: Direction, field_width: f32) -> bool {
        let x = self.stepped_x(direction);
        match direction {
            Direction::Left => x >= 0.0,
            Direction::Right => x + self.size.x <= field_width,
        }
    }

    /// Move only if the paddle stays on the field. Returns whether it moved.
    pub fn move_within(&mut self, direction: Direction, field_width: f32) -> bool {
        if self.can_move(direction, field_width) {
            self.step(direction);
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.pos = self.spawn;
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}
