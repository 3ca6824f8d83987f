use std::collections::VecDeque;

use crate::components::Side;
use crate::input::{InputEvent, Key};

/// Random number generator used for serves
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }

    /// Seed from the platform entropy source
    pub fn from_entropy() -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::from_entropy())
    }

    /// Pick a side with equal probability
    pub fn coin_flip(&mut self) -> Side {
        use rand::Rng;
        if self.0.gen_bool(0.5) {
            Side::Right
        } else {
            Side::Left
        }
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// Events that occurred during this frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Events {
    pub left_scored: bool,
    pub right_scored: bool,
    pub ball_hit_paddle: bool,
    pub ball_hit_wall: bool,
    pub winner: Option<Side>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.left_scored = false;
        self.right_scored = false;
        self.ball_hit_paddle = false;
        self.ball_hit_wall = false;
        self.winner = None;
    }

    pub fn scored(&self, side: Side) -> bool {
        match side {
            Side::Left => self.left_scored,
            Side::Right => self.right_scored,
        }
    }
}

/// Mailbox between input handlers and the frame step.
///
/// Handlers push at any time; the frame drains it once. Key edges are kept in
/// order up to `capacity` (oldest dropped first). Pointer samples coalesce to
/// the latest one.
#[derive(Debug, Clone)]
pub struct InputQueue {
    keys: VecDeque<(Key, bool)>, // (key, pressed)
    pointer_y: Option<f32>,
    capacity: usize,
}

impl InputQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            keys: VecDeque::with_capacity(capacity),
            pointer_y: None,
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMoved { y } => self.pointer_y = Some(y),
            InputEvent::KeyDown(key) => self.push_key(key, true),
            InputEvent::KeyUp(key) => self.push_key(key, false),
        }
    }

    fn push_key(&mut self, key: Key, pressed: bool) {
        if self.keys.len() >= self.capacity {
            self.keys.pop_front();
        }
        self.keys.push_back((key, pressed));
    }

    /// Take everything queued since the last drain
    pub fn drain(&mut self) -> (Vec<(Key, bool)>, Option<f32>) {
        (self.keys.drain(..).collect(), self.pointer_y.take())
    }

    pub fn clear(&mut self) {
        self.keys.clear();
        self.pointer_y = None;
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() && self.pointer_y.is_none()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new(crate::params::Params::INPUT_QUEUE_CAPACITY)
    }
}
