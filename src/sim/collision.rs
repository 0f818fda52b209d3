//! Collision detection and response
//!
//! Velocity-only response: the ball is never pushed out of a wall or paddle,
//! so a fast enough ball can pass through a paddle in a single tick.

use rand::Rng;

use super::geometry::{Circle, Rect};
use super::state::{Ball, Paddle, Side, random_sign};
use crate::settings::MatchConfig;

/// What the ball touched during one resolver pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contacts {
    /// Ball touched or crossed a side wall
    pub wall: bool,
    /// Paddle that returned the ball, if any
    pub paddle: Option<Side>,
}

/// Ball touches or crosses the left or right wall
#[inline]
pub fn touches_side_wall(ball: &Circle, field_width: f32) -> bool {
    ball.left() <= 0.0 || ball.right() >= field_width
}

/// Leading edge of the ball inside the paddle's vertical span and its centre
/// inside the horizontal span.
///
/// The leading edge is the bottom of the ball when it travels down and the
/// top of the ball when it travels up.
pub fn paddle_contact(ball: &Circle, moving_down: bool, paddle: &Rect) -> bool {
    let leading_edge = if moving_down { ball.bottom() } else { ball.top() };
    paddle.spans_y(leading_edge) && paddle.spans_x(ball.center.x)
}

/// Apply wall and paddle bounces to the ball's velocity
///
/// Only the paddle the ball is heading toward is tested: the bottom paddle
/// while `vel.y > 0`, the top paddle otherwise. A return flips `vel.y` and
/// scales it by `return_speedup`, then kicks `vel.x` by a random
/// `±return_lateral_impulse`.
pub fn resolve_collisions<R: Rng + ?Sized>(
    ball: &mut Ball,
    bottom: &Paddle,
    top: &Paddle,
    config: &MatchConfig,
    rng: &mut R,
) -> Contacts {
    let mut contacts = Contacts::default();
    let circle = ball.circle();

    if touches_side_wall(&circle, config.field_width) {
        ball.vel.x = -ball.vel.x;
        contacts.wall = true;
    }

    let moving_down = ball.vel.y > 0.0;
    let (paddle, side) = if moving_down {
        (bottom, Side::Player)
    } else {
        (top, Side::Ai)
    };

    if paddle_contact(&circle, moving_down, &paddle.rect()) {
        ball.vel.y *= -config.return_speedup;
        ball.vel.x += random_sign(rng) * config.return_lateral_impulse;
        contacts.paddle = Some(side);
        log::trace!(
            "{} paddle return at x={:.1}, vel=({:.2}, {:.2})",
            side.as_str(),
            ball.pos.x,
            ball.vel.x,
            ball.vel.y
        );
    }

    contacts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::LaunchSpeeds;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    struct Table {
        config: MatchConfig,
        bottom: Paddle,
        top: Paddle,
        ball: Ball,
        rng: Pcg32,
    }

    fn table() -> Table {
        let config = MatchConfig::default();
        let size = Vec2::new(config.paddle_width, config.paddle_height);
        let mut rng = Pcg32::seed_from_u64(1234);
        let ball = Ball::new(
            config.ball_spawn(),
            config.ball_radius,
            LaunchSpeeds::from_config(&config),
            &mut rng,
        );
        Table {
            bottom: Paddle::new(config.bottom_paddle_spawn(), size, config.paddle_speed),
            top: Paddle::new(config.top_paddle_spawn(), size, config.paddle_speed),
            config,
            ball,
            rng,
        }
    }

    impl Table {
        fn resolve(&mut self) -> Contacts {
            resolve_collisions(
                &mut self.ball,
                &self.bottom,
                &self.top,
                &self.config,
                &mut self.rng,
            )
        }
    }

    #[test]
    fn test_left_wall_bounce() {
        let mut t = table();
        t.ball.pos = Vec2::new(7.0, 250.0);
        t.ball.vel = Vec2::new(-3.0, 4.0);
        let contacts = t.resolve();
        assert!(contacts.wall);
        assert_eq!(contacts.paddle, None);
        assert_eq!(t.ball.vel, Vec2::new(3.0, 4.0));
        // Position untouched
        assert_eq!(t.ball.pos, Vec2::new(7.0, 250.0));
    }

    #[test]
    fn test_right_wall_bounce() {
        let mut t = table();
        t.ball.pos = Vec2::new(695.0, 250.0);
        t.ball.vel = Vec2::new(4.0, -3.0);
        assert!(t.resolve().wall);
        assert_eq!(t.ball.vel.x, -4.0);
        assert_eq!(t.ball.vel.y, -3.0);
    }

    #[test]
    fn test_no_bounce_in_open_field() {
        let mut t = table();
        t.ball.pos = Vec2::new(350.0, 250.0);
        t.ball.vel = Vec2::new(4.0, 3.0);
        assert_eq!(t.resolve(), Contacts::default());
        assert_eq!(t.ball.vel, Vec2::new(4.0, 3.0));
    }

    #[test]
    fn test_bottom_paddle_return() {
        let mut t = table();
        // Bottom edge of the ball on the paddle's top edge
        t.ball.pos = Vec2::new(350.0, 470.0 - 7.0);
        t.ball.vel = Vec2::new(2.0, 4.0);
        let contacts = t.resolve();
        assert_eq!(contacts.paddle, Some(Side::Player));
        assert_eq!(t.ball.vel.y, 4.0 * -1.1);
        assert!(t.ball.vel.x == 1.0 || t.ball.vel.x == 3.0);
    }

    #[test]
    fn test_top_paddle_return() {
        let mut t = table();
        // Top edge of the ball on the paddle's bottom edge
        t.ball.pos = Vec2::new(300.0, 30.0 + 7.0);
        t.ball.vel = Vec2::new(-2.0, -5.0);
        let contacts = t.resolve();
        assert_eq!(contacts.paddle, Some(Side::Ai));
        assert_eq!(t.ball.vel.y, -5.0 * -1.1);
        assert!(t.ball.vel.x == -1.0 || t.ball.vel.x == -3.0);
    }

    #[test]
    fn test_miss_outside_horizontal_span() {
        let mut t = table();
        t.ball.pos = Vec2::new(401.0, 470.0);
        t.ball.vel = Vec2::new(2.0, 4.0);
        assert_eq!(t.resolve().paddle, None);
        assert_eq!(t.ball.vel, Vec2::new(2.0, 4.0));
    }

    #[test]
    fn test_gating_ignores_paddle_behind_ball() {
        let mut t = table();
        // Overlapping the bottom paddle but moving up
        t.ball.pos = Vec2::new(350.0, 480.0);
        t.ball.vel = Vec2::new(2.0, -4.0);
        assert_eq!(t.resolve().paddle, None);
        assert_eq!(t.ball.vel.y, -4.0);

        // Overlapping the top paddle but moving down
        t.ball.pos = Vec2::new(350.0, 20.0);
        t.ball.vel = Vec2::new(2.0, 4.0);
        assert_eq!(t.resolve().paddle, None);
        assert_eq!(t.ball.vel.y, 4.0);
    }

    #[test]
    fn test_zero_vertical_speed_tests_top_paddle() {
        let mut t = table();
        t.ball.pos = Vec2::new(350.0, 30.0);
        t.ball.vel = Vec2::new(2.0, 0.0);
        assert_eq!(t.resolve().paddle, Some(Side::Ai));
    }

    #[test]
    fn test_speed_ramp_compounds() {
        let mut t = table();
        t.ball.vel = Vec2::new(0.0, 3.0);
        let mut last = t.ball.vel.y.abs();
        let mut expected = 3.0f32;

        for _ in 0..5 {
            // Park the ball on whichever paddle it is heading toward
            t.ball.pos = if t.ball.vel.y > 0.0 {
                Vec2::new(350.0, 470.0 - 7.0)
            } else {
                Vec2::new(350.0, 30.0 + 7.0)
            };
            let before = t.ball.vel.y;
            assert!(t.resolve().paddle.is_some());
            assert_eq!(t.ball.vel.y.signum(), -before.signum());

            expected *= 1.1;
            let speed = t.ball.vel.y.abs();
            assert!(speed > last);
            assert!((speed - expected).abs() < 1e-4);
            last = speed;
        }
        assert!((last - 3.0 * 1.1f32.powi(5)).abs() < 1e-3);
    }
}
