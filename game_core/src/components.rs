use glam::Vec2;

use crate::physics::Playfield;

/// Which end of the playfield a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Sign of horizontal travel towards this side
    pub fn direction(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// How a paddle is driven
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMode {
    Pointer,
    Keyboard,
}

/// Paddle component - geometry of a player's paddle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paddle {
    pub side: Side,
    pub y: f32, // top edge, clamped to the playfield
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    pub fn new(side: Side, y: f32, width: f32, height: f32) -> Self {
        Self {
            side,
            y,
            width,
            height,
        }
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }
}

/// Player component - who owns a paddle and how many points they have
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub score: u32,
}

impl Player {
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// Control state for a paddle, written by the input mapper
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddleControl {
    pub mode: ControlMode,
    pub up_held: bool,
    pub down_held: bool,
    pub pointer_target: Option<f32>,
}

impl PaddleControl {
    pub fn new(mode: ControlMode) -> Self {
        Self {
            mode,
            up_held: false,
            down_held: false,
            pointer_target: None,
        }
    }

    pub fn release(&mut self) {
        self.up_held = false;
        self.down_held = false;
        self.pointer_target = None;
    }
}

/// Ball component - position is the top-left of its bounding square
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub speed: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, size: f32, speed: f32) -> Self {
        Self {
            pos,
            vel,
            size,
            speed,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    /// Place the ball at the centre of the playfield
    pub fn center_in(&mut self, field: &Playfield) {
        self.pos = Vec2::new(
            (field.width - self.size) / 2.0,
            (field.height - self.size) / 2.0,
        );
    }

    /// Serve from the centre towards `toward` with a random vertical component
    pub fn serve(&mut self, field: &Playfield, toward: Side, rng: &mut crate::GameRng) {
        use rand::Rng;

        self.center_in(field);
        let dy = (rng.0.gen::<f32>() - 0.5) * self.speed;
        self.vel = Vec2::new(self.speed * toward.direction(), dy);
    }
}
