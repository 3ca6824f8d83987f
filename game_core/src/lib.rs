//! Headless core of a local two-player Pong game
//!
//! The simulation is frame-coupled: every call to [`step`] advances the game
//! by one display frame. Rendering, frame scheduling and score storage are
//! reached through traits so the whole loop can run without a display.

pub mod components;
pub mod config;
pub mod fsm;
pub mod input;
pub mod params;
pub mod physics;
pub mod render;
pub mod resources;
pub mod schedule;
pub mod session;
pub mod systems;

pub use components::*;
pub use config::*;
pub use fsm::*;
pub use input::*;
pub use params::*;
pub use physics::*;
pub use render::*;
pub use resources::*;
pub use schedule::*;
pub use session::*;

use hecs::World;
use systems::*;

/// Run one frame of the Pong simulation.
///
/// Returns the winner if this frame produced one.
pub fn step(
    world: &mut World,
    config: &Config,
    input: &mut InputQueue,
    events: &mut Events,
    rng: &mut GameRng,
) -> Option<Side> {
    // Clear events at start of frame
    events.clear();

    // 1. Ingest inputs (pointer target, key latches)
    apply_inputs(world, input, config);

    // 2. Move paddles
    move_paddles(world, config);

    // 3. Move ball, bounce off walls and paddles
    let scorer = move_ball(world, config, events)?;

    // 4. Award the point and serve or finish
    award_point(world, scorer, config, events, rng)
}

/// Helper to create a paddle entity, vertically centred
pub fn create_paddle(
    world: &mut World,
    config: &Config,
    side: Side,
    mode: ControlMode,
    name: &str,
    score: u32,
) -> hecs::Entity {
    world.spawn((
        Paddle::new(
            side,
            config.paddle_spawn_y(),
            config.paddle_width,
            config.paddle_height,
        ),
        Player::new(name, score),
        PaddleControl::new(mode),
    ))
}

/// Helper to create the ball entity
pub fn create_ball(
    world: &mut World,
    config: &Config,
    pos: glam::Vec2,
    vel: glam::Vec2,
) -> hecs::Entity {
    world.spawn((Ball::new(pos, vel, config.ball_size, config.ball_speed),))
}
