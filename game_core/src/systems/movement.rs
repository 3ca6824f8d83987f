use hecs::World;

use crate::components::{ControlMode, Paddle, PaddleControl};
use crate::Config;

/// Apply paddle movement from control state, clamped to the playfield
pub fn move_paddles(world: &mut World, config: &Config) {
    for (_entity, (paddle, control)) in world.query_mut::<(&mut Paddle, &PaddleControl)>() {
        match control.mode {
            ControlMode::Pointer => {
                if let Some(target) = control.pointer_target {
                    paddle.y = target;
                }
            }
            ControlMode::Keyboard => {
                // Both latches apply, so holding up and down cancels out
                if control.up_held {
                    paddle.y -= config.paddle_key_step;
                }
                if control.down_held {
                    paddle.y += config.paddle_key_step;
                }
            }
        }

        paddle.y = config.clamp_paddle_y(paddle.y);
    }
}
