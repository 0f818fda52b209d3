//! Match state machine
//!
//! One call to [`Match::advance_tick`] runs the whole fixed update order:
//! human move, AI move, ball move, collisions, scoring, win check.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ai;
use super::collision::resolve_collisions;
use super::geometry::{Circle, Rect};
use super::state::{Ball, Direction, LaunchSpeeds, MatchEvent, Paddle, Phase, Side};
use crate::settings::MatchConfig;

/// Human input for a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MoveIntent {
    #[default]
    Idle,
    Left,
    Right,
}

impl MoveIntent {
    /// Map held-key flags to an intent; opposing keys cancel out
    pub fn from_keys(left: bool, right: bool) -> Self {
        match (left, right) {
            (true, false) => MoveIntent::Left,
            (false, true) => MoveIntent::Right,
            _ => MoveIntent::Idle,
        }
    }

    pub fn direction(self) -> Option<Direction> {
        match self {
            MoveIntent::Idle => None,
            MoveIntent::Left => Some(Direction::Left),
            MoveIntent::Right => Some(Direction::Right),
        }
    }
}

impl From<Direction> for MoveIntent {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Left => MoveIntent::Left,
            Direction::Right => MoveIntent::Right,
        }
    }
}

/// Render-ready copy of the match after a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Simulated ticks since the match was created
    pub tick: u64,
    pub ball: Circle,
    pub ball_vel: Vec2,
    pub bottom_paddle: Rect,
    pub top_paddle: Rect,
    pub player_score: u32,
    pub ai_score: u32,
    pub phase: Phase,
    /// Events raised since the previous snapshot
    pub events: Vec<MatchEvent>,
}

impl StateSnapshot {
    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            Phase::MatchOver { winner } => Some(winner),
            _ => None,
        }
    }

    /// The shell should show its continue prompt
    pub fn awaiting_continue(&self) -> bool {
        self.winner().is_some()
    }
}

/// A match between the human (bottom) and the computer (top)
#[derive(Debug, Clone)]
pub struct Match {
    config: MatchConfig,
    rng: Pcg32,
    /// Human paddle
    pub bottom: Paddle,
    /// Computer paddle
    pub top: Paddle,
    pub ball: Ball,
    player_score: u32,
    ai_score: u32,
    phase: Phase,
    ticks: u64,
    /// Events raised outside a tick, flushed into the next snapshot
    pending: Vec<MatchEvent>,
}

impl Match {
    /// Create a match whose randomness is seeded from `seed`
    pub fn new(config: MatchConfig, seed: u64) -> Self {
        Self::with_rng(config, Pcg32::seed_from_u64(seed))
    }

    /// Create a match drawing randomness from `rng`
    pub fn with_rng(config: MatchConfig, mut rng: Pcg32) -> Self {
        let paddle_size = Vec2::new(config.paddle_width, config.paddle_height);
        let ball = Ball::new(
            config.ball_spawn(),
            config.ball_radius,
            LaunchSpeeds::from_config(&config),
            &mut rng,
        );
        Self {
            bottom: Paddle::new(config.bottom_paddle_spawn(), paddle_size, config.paddle_speed),
            top: Paddle::new(config.top_paddle_spawn(), paddle_size, config.paddle_speed),
            ball,
            config,
            rng,
            player_score: 0,
            ai_score: 0,
            phase: Phase::Playing,
            ticks: 0,
            pending: Vec::new(),
        }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn player_score(&self) -> u32 {
        self.player_score
    }

    pub fn ai_score(&self) -> u32 {
        self.ai_score
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advance the simulation by one tick
    ///
    /// In `MatchOver` nothing moves and the snapshot repeats the frozen state
    /// until [`Match::continue_after_match`] is called.
    pub fn advance_tick(&mut self, intent: MoveIntent) -> StateSnapshot {
        let mut events = std::mem::take(&mut self.pending);

        match self.phase {
            Phase::MatchOver { .. } => return self.snapshot_with(events),
            Phase::RoundOver => self.start_round(),
            Phase::Playing => {}
        }

        self.ticks += 1;
        let field_width = self.config.field_width;

        if let Some(direction) = intent.direction() {
            self.bottom.move_within(direction, field_width);
        }
        if let Some(direction) = ai::decide(&self.ball, &self.top, field_width).direction() {
            self.top.move_within(direction, field_width);
        }

        self.ball.step();

        let contacts = resolve_collisions(
            &mut self.ball,
            &self.bottom,
            &self.top,
            &self.config,
            &mut self.rng,
        );
        if contacts.wall {
            events.push(MatchEvent::WallBounce);
        }
        if let Some(side) = contacts.paddle {
            events.push(MatchEvent::PaddleReturn { side });
        }

        if let Some(scorer) = self.out_of_bounds() {
            self.award_point(scorer, &mut events);
        }

        self.snapshot_with(events)
    }

    /// Start a fresh match after a win. No-op (returns `false`) in any other phase.
    pub fn continue_after_match(&mut self) -> bool {
        let Phase::MatchOver { winner } = self.phase else {
            log::debug!("continue ignored in phase {:?}", self.phase);
            return false;
        };

        self.player_score = 0;
        self.ai_score = 0;
        self.ball.reset(&mut self.rng);
        self.bottom.reset();
        self.top.reset();
        self.phase = Phase::Playing;
        self.pending.push(MatchEvent::MatchRestarted);
        log::info!("New match started (previous winner: {})", winner.as_str());
        true
    }

    /// Current state without advancing (events stay queued)
    pub fn snapshot(&self) -> StateSnapshot {
        self.snapshot_with(Vec::new())
    }

    fn snapshot_with(&self, events: Vec<MatchEvent>) -> StateSnapshot {
        StateSnapshot {
            tick: self.ticks,
            ball: self.ball.circle(),
            ball_vel: self.ball.vel,
            bottom_paddle: self.bottom.rect(),
            top_paddle: self.top.rect(),
            player_score: self.player_score,
            ai_score: self.ai_score,
            phase: self.phase,
            events,
        }
    }

    /// Side that scores if the ball has left the field vertically
    fn out_of_bounds(&self) -> Option<Side> {
        if self.ball.pos.y < 0.0 {
            Some(Side::Player)
        } else if self.ball.pos.y > self.config.field_height {
            Some(Side::Ai)
        } else {
            None
        }
    }

    fn award_point(&mut self, scorer: Side, events: &mut Vec<MatchEvent>) {
        let score = match scorer {
            Side::Player => {
                self.player_score += 1;
                self.player_score
            }
            Side::Ai => {
                self.ai_score += 1;
                self.ai_score
            }
        };
        self.phase = Phase::RoundOver;
        events.push(MatchEvent::PointScored { scorer });
        log::debug!(
            "{} scores at tick {} ({} - {})",
            scorer.as_str(),
            self.ticks,
            self.player_score,
            self.ai_score
        );

        if score >= self.config.winning_score {
            self.phase = Phase::MatchOver { winner: scorer };
            events.push(MatchEvent::MatchWon { winner: scorer });
            log::info!(
                "{} wins {} - {}",
                scorer.as_str(),
                self.player_score,
                self.ai_score
            );
        } else {
            self.start_round();
        }
    }

    /// RoundOver -> Playing: relaunch the ball from its spawn point
    fn start_round(&mut self) {
        self.ball.reset(&mut self.rng);
        self.phase = Phase::Playing;
    }
}
