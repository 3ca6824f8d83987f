//! Game session
//!
//! Owns the world (both paddles and the ball), the phase machine and the
//! collaborators: score storage and an optional phase listener. The frame
//! loop is driven from outside through [`Session::on_frame`]; the session
//! asks for the next frame itself and stops asking once the game ends.

use glam::Vec2;
use hecs::{Entity, World};
use scoreboard::{
    load_record, save_record, PlayerRecord, ScoreRecord, ScoreStore, DEFAULT_PLAYER1_NAME,
    DEFAULT_PLAYER2_NAME,
};

use crate::components::{Ball, ControlMode, Paddle, PaddleControl, Player, Side};
use crate::fsm::{Phase, PhaseMachine, SessionAction, TransitionResult};
use crate::input::InputEvent;
use crate::render::{render, Snapshot, Surface, Theme};
use crate::schedule::{FrameScheduler, ManualScheduler};
use crate::{create_paddle, step, Config, Events, GameRng, InputQueue};

/// Notification sent whenever the phase changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseChange {
    pub from: Phase,
    pub to: Phase,
    pub winner: Option<String>,
}

impl PhaseChange {
    /// Text of the end-of-game notice, if this change ended a game
    pub fn end_notice(&self) -> Option<String> {
        self.winner.as_ref().map(|name| format!("{name} wins!"))
    }
}

/// Receives phase changes, e.g. to toggle the setup form
pub trait PhaseListener {
    fn on_phase_change(&mut self, change: &PhaseChange);
}

/// What a call to [`Session::on_frame`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// No frame was pending or the session was not running
    Skipped,
    /// Frame simulated, next frame requested
    Continued,
    /// Frame simulated and the game ended on it
    Finished,
}

pub struct Session {
    pub world: World,
    pub config: Config,
    pub theme: Theme,
    pub events: Events,
    pub input: InputQueue,
    pub rng: GameRng,
    fsm: PhaseMachine,
    store: Box<dyn ScoreStore>,
    listener: Option<Box<dyn PhaseListener>>,
    left: Entity,
    right: Entity,
    ball: Entity,
    winner: Option<String>,
    frame_pending: bool,
    frames: u64,
}

impl Session {
    /// Build an idle session from the stored record
    pub fn new(config: Config, store: Box<dyn ScoreStore>, rng: GameRng) -> Self {
        let record = load_record(store.as_ref());
        let mut world = World::new();

        let left = create_paddle(
            &mut world,
            &config,
            Side::Left,
            ControlMode::Pointer,
            &record.player1.name,
            record.player1.score,
        );
        let right = create_paddle(
            &mut world,
            &config,
            Side::Right,
            ControlMode::Keyboard,
            &record.player2.name,
            record.player2.score,
        );

        let mut ball = Ball::new(
            Vec2::ZERO,
            Vec2::new(config.ball_speed, config.ball_speed / 2.0),
            config.ball_size,
            config.ball_speed,
        );
        ball.center_in(&config.playfield());
        let ball = world.spawn((ball,));

        Self {
            input: InputQueue::new(config.input_queue_capacity),
            world,
            config,
            theme: Theme::default(),
            events: Events::new(),
            rng,
            fsm: PhaseMachine::new(),
            store,
            listener: None,
            left,
            right,
            ball,
            winner: None,
            frame_pending: false,
            frames: 0,
        }
    }

    pub fn with_listener(mut self, listener: Box<dyn PhaseListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn phase(&self) -> Phase {
        self.fsm.phase()
    }

    /// Name of the winner of the last finished game
    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    /// Frames simulated since construction
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn store(&self) -> &dyn ScoreStore {
        self.store.as_ref()
    }

    fn paddle_entity(&self, side: Side) -> Entity {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn ball_entity(&self) -> Entity {
        self.ball
    }

    pub fn player(&self, side: Side) -> Option<Player> {
        self.world
            .get::<&Player>(self.paddle_entity(side))
            .ok()
            .map(|player| (*player).clone())
    }

    pub fn paddle(&self, side: Side) -> Option<Paddle> {
        self.world
            .get::<&Paddle>(self.paddle_entity(side))
            .ok()
            .map(|paddle| *paddle)
    }

    pub fn ball(&self) -> Option<Ball> {
        self.world.get::<&Ball>(self.ball).ok().map(|ball| *ball)
    }

    /// Current names and scores in persisted form
    pub fn record(&self) -> ScoreRecord {
        let entry = |side: Side| {
            self.player(side)
                .map(|player| PlayerRecord::new(player.name, player.score))
        };
        let defaults = ScoreRecord::default();
        ScoreRecord::new(
            entry(Side::Left).unwrap_or(defaults.player1),
            entry(Side::Right).unwrap_or(defaults.player2),
        )
    }

    /// Queue raw input. Ignored unless a game is running.
    pub fn push_input(&mut self, event: InputEvent) {
        if self.fsm.is_running() {
            self.input.push(event);
        }
    }

    /// Start a new game with the given names.
    ///
    /// Scores reset to zero and are persisted, the ball is served in a random
    /// direction and the first frame is requested after the serve delay.
    /// Rejected while a game is already running.
    pub fn start(
        &mut self,
        player1: &str,
        player2: &str,
        scheduler: &mut dyn FrameScheduler,
        surface: &mut dyn Surface,
    ) -> TransitionResult {
        let result = self.fsm.transition(SessionAction::Start);
        if !result.success() {
            return result;
        }

        let names = [
            (Side::Left, normalize_name(player1, DEFAULT_PLAYER1_NAME)),
            (Side::Right, normalize_name(player2, DEFAULT_PLAYER2_NAME)),
        ];
        let spawn_y = self.config.paddle_spawn_y();
        for (side, name) in names {
            let entity = self.paddle_entity(side);
            if let Ok((paddle, player, control)) = self
                .world
                .query_one_mut::<(&mut Paddle, &mut Player, &mut PaddleControl)>(entity)
            {
                paddle.y = spawn_y;
                *player = Player::new(name, 0);
                control.release();
            }
        }

        self.input.clear();
        self.winner = None;
        self.persist();

        let toward = self.rng.coin_flip();
        let field = self.config.playfield();
        if let Ok(ball) = self.world.query_one_mut::<&mut Ball>(self.ball) {
            ball.serve(&field, toward, &mut self.rng);
        }

        tracing::info!(?toward, "game started");
        self.notify(PhaseChange {
            from: result.from(),
            to: result.to(),
            winner: None,
        });

        self.render(surface);
        self.request_frame(scheduler, Some(self.config.serve_delay_ms));
        result
    }

    /// Frame callback: simulate, render and schedule the next frame
    pub fn on_frame(
        &mut self,
        scheduler: &mut dyn FrameScheduler,
        surface: &mut dyn Surface,
    ) -> FrameStatus {
        if !std::mem::take(&mut self.frame_pending) || !self.fsm.is_running() {
            return FrameStatus::Skipped;
        }

        let winner = step(
            &mut self.world,
            &self.config,
            &mut self.input,
            &mut self.events,
            &mut self.rng,
        );
        self.frames += 1;

        if self.events.left_scored || self.events.right_scored {
            self.persist();
        }
        if let Some(side) = winner {
            self.finish(side);
        }

        self.render(surface);

        if self.fsm.is_running() {
            self.request_frame(scheduler, None);
            FrameStatus::Continued
        } else {
            FrameStatus::Finished
        }
    }

    /// Step frames synchronously while the scheduler has one pending.
    ///
    /// Returns the number of frames simulated, at most `max_frames`.
    pub fn run_headless(
        &mut self,
        scheduler: &mut ManualScheduler,
        surface: &mut dyn Surface,
        max_frames: usize,
    ) -> usize {
        let mut simulated = 0;
        while simulated < max_frames && scheduler.take() {
            if self.on_frame(scheduler, surface) == FrameStatus::Skipped {
                break;
            }
            simulated += 1;
        }
        simulated
    }

    /// Draw the current state. Valid in every phase.
    pub fn render(&self, surface: &mut dyn Surface) {
        match Snapshot::capture(&self.world, &self.config) {
            Some(snapshot) => render(&snapshot, &self.theme, surface),
            None => tracing::warn!("nothing to render: world is missing entities"),
        }
    }

    fn finish(&mut self, side: Side) {
        let result = self.fsm.transition(SessionAction::Win);
        let name = self.player(side).map(|player| player.name).unwrap_or_default();
        tracing::info!(winner = %name, ?side, "game over");

        self.winner = Some(name.clone());
        self.notify(PhaseChange {
            from: result.from(),
            to: result.to(),
            winner: Some(name),
        });
    }

    fn request_frame(&mut self, scheduler: &mut dyn FrameScheduler, delay_ms: Option<u32>) {
        if self.frame_pending {
            return;
        }
        self.frame_pending = true;
        match delay_ms {
            Some(delay) if delay > 0 => scheduler.request_frame_after(delay),
            _ => scheduler.request_frame(),
        }
    }

    fn persist(&mut self) {
        let record = self.record();
        if let Err(err) = save_record(self.store.as_mut(), &record) {
            tracing::warn!(error = %err, "failed to persist scores");
        }
    }

    fn notify(&mut self, change: PhaseChange) {
        if let Some(listener) = self.listener.as_mut() {
            listener.on_phase_change(&change);
        }
    }
}

/// Trimmed name, or the default when nothing is left
pub fn normalize_name(raw: &str, default: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}
