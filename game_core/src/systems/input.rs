use hecs::World;

use crate::components::{ControlMode, Paddle, PaddleControl};
use crate::input::Key;
use crate::{Config, InputQueue};

/// Drain the input queue into paddle control state.
///
/// Pointer samples become a clamped target for pointer paddles; key edges
/// set or clear the latches of keyboard paddles.
pub fn apply_inputs(world: &mut World, queue: &mut InputQueue, config: &Config) {
    let (keys, pointer_y) = queue.drain();
    if keys.is_empty() && pointer_y.is_none() {
        return;
    }

    for (_entity, (paddle, control)) in world.query_mut::<(&Paddle, &mut PaddleControl)>() {
        match control.mode {
            ControlMode::Pointer => {
                if let Some(y) = pointer_y {
                    control.pointer_target = Some(config.clamp_paddle_y(y - paddle.height / 2.0));
                }
            }
            ControlMode::Keyboard => {
                for &(key, pressed) in &keys {
                    match key {
                        Key::Up => control.up_held = pressed,
                        Key::Down => control.down_held = pressed,
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{ControlMode, Side};
    use crate::input::InputEvent;
    use crate::{create_paddle, Config};

    fn setup_world() -> (World, Config, InputQueue) {
        let config = Config::new();
        let mut world = World::new();
        create_paddle(&mut world, &config, Side::Left, ControlMode::Pointer, "Alice", 0);
        create_paddle(&mut world, &config, Side::Right, ControlMode::Keyboard, "Bob", 0);
        (world, config, InputQueue::new(16))
    }

    fn control(world: &World, side: Side) -> PaddleControl {
        world
            .query::<(&Paddle, &PaddleControl)>()
            .iter()
            .find(|(_e, (p, _c))| p.side == side)
            .map(|(_e, (_p, c))| *c)
            .expect("paddle exists")
    }

    #[test]
    fn test_pointer_sets_centered_target() {
        let (mut world, config, mut queue) = setup_world();
        queue.push(InputEvent::PointerMoved { y: 150.0 });

        apply_inputs(&mut world, &mut queue, &config);

        assert_eq!(control(&world, Side::Left).pointer_target, Some(100.0));
        assert_eq!(control(&world, Side::Right).pointer_target, None);
    }

    #[test]
    fn test_pointer_target_is_clamped() {
        let (mut world, config, mut queue) = setup_world();
        queue.push(InputEvent::PointerMoved { y: 10.0 });
        apply_inputs(&mut world, &mut queue, &config);
        assert_eq!(control(&world, Side::Left).pointer_target, Some(0.0));

        queue.push(InputEvent::PointerMoved { y: 495.0 });
        apply_inputs(&mut world, &mut queue, &config);
        assert_eq!(control(&world, Side::Left).pointer_target, Some(400.0));
    }

    #[test]
    fn test_key_edges_toggle_latches() {
        let (mut world, config, mut queue) = setup_world();
        queue.push(InputEvent::KeyDown(Key::Up));
        queue.push(InputEvent::KeyDown(Key::Down));
        queue.push(InputEvent::KeyUp(Key::Up));

        apply_inputs(&mut world, &mut queue, &config);

        let right = control(&world, Side::Right);
        assert!(!right.up_held);
        assert!(right.down_held);
        let left = control(&world, Side::Left);
        assert!(!left.up_held && !left.down_held, "pointer paddle ignores keys");
    }
}
