//! Computer opponent
//!
//! A reactive tracker: the paddle chases the ball's x-coordinate and nothing
//! else. No memory between ticks, no prediction of bounces or speed.

use super::state::{Ball, Direction, Paddle};
use super::tick::MoveIntent;

/// Pick this tick's move for `paddle`
pub fn decide(ball: &Ball, paddle: &Paddle, field_width: f32) -> MoveIntent {
    let center = paddle.rect().center_x();

    let direction = if center < ball.pos.x {
        Direction::Right
    } else if center > ball.pos.x {
        Direction::Left
    } else {
        return MoveIntent::Idle;
    };

    if paddle.can_move(direction, field_width) {
        direction.into()
    } else {
        MoveIntent::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::LaunchSpeeds;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn ball_at(x: f32) -> Ball {
        let mut rng = Pcg32::seed_from_u64(0);
        let launch = LaunchSpeeds { min_x: 2, min_y: 3, max: 5 };
        let mut ball = Ball::new(Vec2::new(x, 250.0), 7.0, launch, &mut rng);
        ball.pos.x = x;
        ball
    }

    fn top_paddle(x: f32) -> Paddle {
        let mut paddle = Paddle::new(Vec2::new(300.0, 10.0), Vec2::new(100.0, 20.0), 6.0);
        paddle.pos.x = x;
        paddle
    }

    #[test]
    fn test_chases_right() {
        assert_eq!(decide(&ball_at(500.0), &top_paddle(300.0), 700.0), MoveIntent::Right);
    }

    #[test]
    fn test_chases_left() {
        assert_eq!(decide(&ball_at(100.0), &top_paddle(300.0), 700.0), MoveIntent::Left);
    }

    #[test]
    fn test_idle_when_centred() {
        assert_eq!(decide(&ball_at(350.0), &top_paddle(300.0), 700.0), MoveIntent::Idle);
    }

    #[test]
    fn test_ignores_vertical_state() {
        let mut ball = ball_at(500.0);
        ball.pos.y = 5.0;
        ball.vel = Vec2::new(-5.0, 40.0);
        assert_eq!(decide(&ball, &top_paddle(300.0), 700.0), MoveIntent::Right);
    }

    #[test]
    fn test_tracks_until_right_wall_then_stops() {
        let ball = ball_at(690.0);
        let mut paddle = top_paddle(300.0);
        let mut moves = 0;

        loop {
            match decide(&ball, &paddle, 700.0) {
                MoveIntent::Right => {
                    let before = paddle.pos.x;
                    assert!(paddle.move_within(Direction::Right, 700.0));
                    assert!(paddle.pos.x > before);
                    moves += 1;
                }
                MoveIntent::Idle => break,
                MoveIntent::Left => panic!("moved away from the ball"),
            }
            assert!(moves < 1000);
        }

        // 300 -> 600 in steps of 6
        assert_eq!(moves, 50);
        assert_eq!(paddle.rect().right(), 700.0);

        // Idempotent at the boundary
        for _ in 0..10 {
            assert_eq!(decide(&ball, &paddle, 700.0), MoveIntent::Idle);
        }
    }

    #[test]
    fn test_stops_at_left_wall() {
        let ball = ball_at(3.0);
        let paddle = top_paddle(4.0);
        assert_eq!(decide(&ball, &paddle, 700.0), MoveIntent::Idle);
        let paddle = top_paddle(6.0);
        assert_eq!(decide(&ball, &paddle, 700.0), MoveIntent::Left);
    }
}
