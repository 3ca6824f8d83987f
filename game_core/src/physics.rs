//! Ball integration and collision geometry
//!
//! Everything here is a pure function of the values passed in. The simulation
//! is frame-coupled: one call to [`advance_ball`] is one display frame, with no
//! delta-time scaling.

use glam::Vec2;

use crate::components::{Ball, Side};
use crate::params::Params;

/// Drawing area the game is played in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned box of a paddle in playfield coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddleRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PaddleRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Vertical extents of the ball and the paddle overlap
    fn overlaps_vertically(&self, ball: &Ball) -> bool {
        ball.pos.y + ball.size >= self.y && ball.pos.y <= self.y + self.height
    }
}

/// Outcome of advancing the ball by one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallStep {
    pub ball: Ball,
    pub hit_wall: bool,
    pub hit_paddle: Option<Side>,
    /// Side that won the point, if the ball left the playfield
    pub scorer: Option<Side>,
}

/// Advance the ball one frame and resolve walls, paddles and scoring
pub fn advance_ball(
    ball: &Ball,
    left: &PaddleRect,
    right: &PaddleRect,
    field: &Playfield,
) -> BallStep {
    let mut next = *ball;
    next.pos += next.vel;

    let hit_wall = bounce_off_walls(&mut next, field);

    let mut hit_paddle = None;
    if next.pos.x <= left.x + left.width && left.overlaps_vertically(&next) {
        deflect(&mut next, left, Side::Left);
        hit_paddle = Some(Side::Left);
    }
    if next.pos.x + next.size >= right.x && right.overlaps_vertically(&next) {
        deflect(&mut next, right, Side::Right);
        hit_paddle = Some(Side::Right);
    }

    BallStep {
        ball: next,
        hit_wall,
        hit_paddle,
        scorer: scorer(&next, field),
    }
}

/// Reflect off the top or bottom edge. Returns true on a bounce.
pub fn bounce_off_walls(ball: &mut Ball, field: &Playfield) -> bool {
    let floor = field.height - ball.size;
    if ball.pos.y <= 0.0 || ball.pos.y >= floor {
        ball.vel.y = -ball.vel.y;
        ball.pos.y = ball.pos.y.clamp(0.0, floor);
        true
    } else {
        false
    }
}

/// Bounce off a paddle, angled by where the ball struck it.
///
/// The hit offset from the paddle centre is normalised to [-1, 1] of the
/// half-height and mapped linearly onto +/- [`Params::MAX_BOUNCE_ANGLE`].
/// The horizontal component always points away from the paddle's side.
pub fn deflect(ball: &mut Ball, paddle: &PaddleRect, side: Side) {
    let half_height = paddle.height / 2.0;
    let offset = ((ball.center().y - paddle.center_y()) / half_height).clamp(-1.0, 1.0);
    let angle = offset * Params::MAX_BOUNCE_ANGLE;
    let away = side.opponent().direction();

    ball.vel = Vec2::new(
        away * ball.speed * angle.cos(),
        ball.speed * angle.sin(),
    );
}

/// Side credited with a point once the ball crosses an end line
pub fn scorer(ball: &Ball, field: &Playfield) -> Option<Side> {
    if ball.pos.x < 0.0 {
        Some(Side::Right)
    } else if ball.pos.x + ball.size > field.width {
        Some(Side::Left)
    } else {
        None
    }
}
