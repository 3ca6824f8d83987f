use hecs::World;

use crate::components::{Ball, Paddle, Side};
use crate::physics::advance_ball;
use crate::{Config, Events};

/// Move the ball one frame and resolve wall and paddle collisions.
///
/// Returns the side that scored if the ball crossed an end line.
pub fn move_ball(world: &mut World, config: &Config, events: &mut Events) -> Option<Side> {
    let mut left = None;
    let mut right = None;
    for (_entity, paddle) in world.query::<&Paddle>().iter() {
        let rect = config.paddle_rect(paddle);
        match paddle.side {
            Side::Left => left = Some(rect),
            Side::Right => right = Some(rect),
        }
    }

    let (left, right) = match (left, right) {
        (Some(left), Some(right)) => (left, right),
        _ => return None, // Both paddles are needed
    };

    let field = config.playfield();
    let mut scorer = None;
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        let step = advance_ball(ball, &left, &right, &field);
        *ball = step.ball;

        events.ball_hit_wall |= step.hit_wall;
        events.ball_hit_paddle |= step.hit_paddle.is_some();
        scorer = scorer.or(step.scorer);
    }

    scorer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ControlMode;
    use crate::{create_ball, create_paddle, Config, Events};
    use glam::Vec2;

    fn setup_world() -> (World, Config, Events) {
        let config = Config::new();
        let mut world = World::new();
        create_paddle(&mut world, &config, Side::Left, ControlMode::Pointer, "Alice", 0);
        create_paddle(&mut world, &config, Side::Right, ControlMode::Keyboard, "Bob", 0);
        (world, config, Events::new())
    }

    fn ball_state(world: &World) -> Ball {
        world
            .query::<&Ball>()
            .iter()
            .next()
            .map(|(_e, ball)| *ball)
            .expect("ball exists")
    }

    #[test]
    fn test_ball_bounces_off_top_wall() {
        let (mut world, config, mut events) = setup_world();
        create_ball(&mut world, &config, Vec2::new(400.0, 1.0), Vec2::new(6.0, -3.0));

        let scorer = move_ball(&mut world, &config, &mut events);

        let ball = ball_state(&world);
        assert_eq!(scorer, None);
        assert!(ball.vel.y > 0.0, "Ball should bounce down after hitting top wall");
        assert_eq!(ball.pos.y, 0.0);
        assert!(events.ball_hit_wall, "Should trigger ball_hit_wall event");
    }

    #[test]
    fn test_ball_collides_with_left_paddle() {
        let (mut world, config, mut events) = setup_world();
        create_ball(&mut world, &config, Vec2::new(15.0, 242.0), Vec2::new(-6.0, 0.0));

        move_ball(&mut world, &config, &mut events);

        let ball = ball_state(&world);
        assert!(ball.vel.x > 0.0, "Ball should bounce right after hitting left paddle");
        assert!(events.ball_hit_paddle, "Should trigger ball_hit_paddle event");
    }

    #[test]
    fn test_ball_exiting_left_reports_right_scorer() {
        let (mut world, config, mut events) = setup_world();
        create_ball(&mut world, &config, Vec2::new(2.0, 20.0), Vec2::new(-6.0, 0.0));

        let scorer = move_ball(&mut world, &config, &mut events);

        assert_eq!(scorer, Some(Side::Right));
        assert!(!events.ball_hit_paddle);
    }

    #[test]
    fn test_no_movement_without_paddles() {
        let config = Config::new();
        let mut world = World::new();
        let mut events = Events::new();
        create_ball(&mut world, &config, Vec2::new(100.0, 100.0), Vec2::new(6.0, 0.0));

        assert_eq!(move_ball(&mut world, &config, &mut events), None);
        assert_eq!(ball_state(&world).pos, Vec2::new(100.0, 100.0));
    }
}
