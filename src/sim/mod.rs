//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed update order per tick
//! - Seeded RNG only
//! - No rendering, input polling or frame pacing

pub mod ai;
pub mod collision;
pub mod geometry;
pub mod state;
pub mod tick;

pub use collision::{Contacts, paddle_contact, resolve_collisions, touches_side_wall};
pub use geometry::{Circle, Rect};
pub use state::{Ball, Direction, LaunchSpeeds, MatchEvent, Paddle, Phase, Side};
pub use tick::{Match, MoveIntent, StateSnapshot};
