use std::cell::RefCell;
use std::rc::Rc;

use game_core::*;
use glam::Vec2;
use rand::{Rng, SeedableRng};
use scoreboard::{
    load_record, MemoryStore, PlayerRecord, ScoreStore, StoreError, StoreResult, STORAGE_KEY,
};

#[derive(Clone, Default)]
struct RecordingListener {
    changes: Rc<RefCell<Vec<PhaseChange>>>,
}

impl PhaseListener for RecordingListener {
    fn on_phase_change(&mut self, change: &PhaseChange) {
        self.changes.borrow_mut().push(change.clone());
    }
}

struct ReadOnlyStore;

impl ScoreStore for ReadOnlyStore {
    fn read(&self, _key: &str) -> StoreResult<Option<String>> {
        Ok(None)
    }

    fn write(&mut self, _key: &str, _value: &str) -> StoreResult<()> {
        Err(StoreError::unavailable("quota exceeded"))
    }
}

struct Harness {
    session: Session,
    scheduler: ManualScheduler,
    surface: RecordingSurface,
    changes: Rc<RefCell<Vec<PhaseChange>>>,
}

impl Harness {
    fn new(seed: u64) -> Self {
        Self::with_store(Box::new(MemoryStore::new()), seed)
    }

    fn with_store(store: Box<dyn ScoreStore>, seed: u64) -> Self {
        let listener = RecordingListener::default();
        let changes = listener.changes.clone();
        let session =
            Session::new(Config::new(), store, GameRng::new(seed)).with_listener(Box::new(listener));
        Self {
            session,
            scheduler: ManualScheduler::new(),
            surface: RecordingSurface::new(),
            changes,
        }
    }

    fn start(&mut self, player1: &str, player2: &str) -> TransitionResult {
        self.session
            .start(player1, player2, &mut self.scheduler, &mut self.surface)
    }

    /// Run the pending frame, panicking if none was requested
    fn frame(&mut self) -> FrameStatus {
        assert!(self.scheduler.take(), "a frame should be pending");
        self.session.on_frame(&mut self.scheduler, &mut self.surface)
    }

    fn place_ball(&mut self, pos: Vec2, vel: Vec2) {
        let entity = self.session.ball_entity();
        let mut ball = self.session.world.get::<&mut Ball>(entity).unwrap();
        ball.pos = pos;
        ball.vel = vel;
    }

    fn score(&self, side: Side) -> u32 {
        self.session.player(side).unwrap().score
    }
}

#[test]
fn test_five_misses_end_the_game_for_bob() {
    let mut h = Harness::new(7);
    assert!(h.start("Alice", "Bob").success());
    assert_eq!(h.score(Side::Left), 0);
    assert_eq!(h.score(Side::Right), 0);

    for point in 1..=5 {
        // Far above the left paddle, about to cross x < 0
        h.place_ball(Vec2::new(1.0, 20.0), Vec2::new(-6.0, 0.0));
        let status = h.frame();

        assert_eq!(h.score(Side::Right), point);
        assert_eq!(h.score(Side::Left), 0);
        if point < 5 {
            assert_eq!(status, FrameStatus::Continued);
            assert_eq!(h.session.phase(), Phase::Running, "not ended before 5");
        } else {
            assert_eq!(status, FrameStatus::Finished);
        }
    }

    assert_eq!(h.session.phase(), Phase::Ended);
    assert_eq!(h.session.winner(), Some("Bob"));
    assert!(!h.scheduler.is_pending(), "loop stops after the win");

    let changes = h.changes.borrow();
    assert_eq!(changes.len(), 2);
    assert_eq!(changes[0].to, Phase::Running);
    assert_eq!(changes[1].from, Phase::Running);
    assert_eq!(changes[1].to, Phase::Ended);
    assert_eq!(changes[1].end_notice().as_deref(), Some("Bob wins!"));
}

#[test]
fn test_final_frame_is_rendered_with_winning_score() {
    let mut h = Harness::new(7);
    h.start("Alice", "Bob");
    for _ in 0..5 {
        h.place_ball(Vec2::new(1.0, 20.0), Vec2::new(-6.0, 0.0));
        h.frame();
    }
    assert_eq!(h.surface.texts(), vec!["Alice", "0", "Bob", "5"]);
}

#[test]
fn test_serve_travels_towards_player_who_conceded() {
    let mut h = Harness::new(3);
    h.start("Alice", "Bob");

    // Right scores: left conceded, serve heads left
    h.place_ball(Vec2::new(1.0, 20.0), Vec2::new(-6.0, 0.0));
    h.frame();
    let ball = h.session.ball().unwrap();
    assert_eq!(ball.center(), Vec2::new(400.0, 250.0));
    assert!(ball.vel.x < 0.0);
    assert!(ball.vel.y.abs() <= 3.0);

    // Left scores: right conceded, serve heads right
    h.place_ball(Vec2::new(783.0, 20.0), Vec2::new(6.0, 0.0));
    h.frame();
    let ball = h.session.ball().unwrap();
    assert_eq!(h.score(Side::Left), 1);
    assert!(ball.vel.x > 0.0);
}

#[test]
fn test_scores_are_persisted_at_start_and_on_every_point() {
    let store = MemoryStore::with_entry(
        STORAGE_KEY,
        r#"{"player1":{"name":"Old","score":4},"player2":{"name":"Older","score":2}}"#,
    );
    let mut h = Harness::with_store(Box::new(store), 11);
    assert_eq!(h.session.player(Side::Left).unwrap().name, "Old");

    h.start("  Alice  ", "");
    let record = load_record(h.session.store());
    assert_eq!(record.player1, PlayerRecord::new("Alice", 0));
    assert_eq!(record.player2, PlayerRecord::new("Player 2", 0));

    h.place_ball(Vec2::new(783.0, 20.0), Vec2::new(6.0, 0.0));
    h.frame();
    let record = load_record(h.session.store());
    assert_eq!(record.player1, PlayerRecord::new("Alice", 1));
}

#[test]
fn test_storage_failure_does_not_interrupt_play() {
    let mut h = Harness::with_store(Box::new(ReadOnlyStore), 5);
    assert!(h.start("Alice", "Bob").success());

    h.place_ball(Vec2::new(1.0, 20.0), Vec2::new(-6.0, 0.0));
    assert_eq!(h.frame(), FrameStatus::Continued);
    assert_eq!(h.score(Side::Right), 1);
}

#[test]
fn test_restart_after_game_over() {
    let mut h = Harness::new(9);
    h.start("Alice", "Bob");
    for _ in 0..5 {
        h.place_ball(Vec2::new(1.0, 20.0), Vec2::new(-6.0, 0.0));
        h.frame();
    }
    assert_eq!(h.session.phase(), Phase::Ended);

    let result = h.start("Carol", "Dan");
    assert!(result.success());
    assert_eq!(result.from(), Phase::Ended);
    assert_eq!(h.session.phase(), Phase::Running);
    assert_eq!(h.session.winner(), None);
    assert_eq!(h.session.player(Side::Left).unwrap(), Player::new("Carol", 0));
    assert_eq!(h.session.player(Side::Right).unwrap(), Player::new("Dan", 0));
    assert_eq!(h.frame(), FrameStatus::Continued);
}

#[test]
fn test_keyboard_paddle_moves_seven_per_frame() {
    let mut h = Harness::new(13);
    h.start("Alice", "Bob");
    // Keep the ball well away from both paddles
    h.place_ball(Vec2::new(392.0, 242.0), Vec2::new(0.0, 0.0));

    h.session.push_input(InputEvent::KeyDown(Key::Up));
    h.frame();
    h.frame();
    assert_eq!(h.session.paddle(Side::Right).unwrap().y, 200.0 - 14.0);

    h.session.push_input(InputEvent::KeyDown(Key::Down));
    h.frame();
    assert_eq!(
        h.session.paddle(Side::Right).unwrap().y,
        186.0,
        "up and down held together cancel"
    );

    h.session.push_input(InputEvent::KeyUp(Key::Up));
    h.frame();
    assert_eq!(h.session.paddle(Side::Right).unwrap().y, 193.0);
    assert_eq!(h.session.paddle(Side::Left).unwrap().y, 200.0);
}

#[test]
fn test_pointer_drives_left_paddle() {
    let mut h = Harness::new(17);
    h.start("Alice", "Bob");
    h.place_ball(Vec2::new(392.0, 242.0), Vec2::new(0.0, 0.0));

    h.session.push_input(InputEvent::PointerMoved { y: 120.0 });
    assert_eq!(
        h.session.paddle(Side::Left).unwrap().y,
        200.0,
        "applied only inside a frame"
    );
    h.frame();
    assert_eq!(h.session.paddle(Side::Left).unwrap().y, 70.0);

    h.session.push_input(InputEvent::PointerMoved { y: 499.0 });
    h.frame();
    assert_eq!(h.session.paddle(Side::Left).unwrap().y, 400.0);
}

#[test]
fn test_latches_reset_on_new_game() {
    let mut h = Harness::new(19);
    h.start("Alice", "Bob");
    h.session.push_input(InputEvent::KeyDown(Key::Down));
    h.place_ball(Vec2::new(1.0, 20.0), Vec2::new(-6.0, 0.0));
    h.frame();
    for _ in 0..4 {
        h.place_ball(Vec2::new(1.0, 20.0), Vec2::new(-6.0, 0.0));
        h.frame();
    }
    assert_eq!(h.session.phase(), Phase::Ended);

    // Key-up while ended is dropped, but the new game starts released
    h.session.push_input(InputEvent::KeyUp(Key::Down));
    h.start("Alice", "Bob");
    h.place_ball(Vec2::new(392.0, 242.0), Vec2::new(0.0, 0.0));
    h.frame();
    assert_eq!(h.session.paddle(Side::Right).unwrap().y, 200.0);
}

#[test]
fn test_stale_frame_after_end_is_skipped() {
    let mut h = Harness::new(23);
    h.start("Alice", "Bob");
    for _ in 0..5 {
        h.place_ball(Vec2::new(1.0, 20.0), Vec2::new(-6.0, 0.0));
        h.frame();
    }
    let frames = h.session.frames();

    let status = h.session.on_frame(&mut h.scheduler, &mut h.surface);

    assert_eq!(status, FrameStatus::Skipped);
    assert_eq!(h.session.frames(), frames);
}

#[test]
fn test_center_paddle_return_is_flat() {
    let mut h = Harness::new(29);
    h.start("Alice", "Bob");
    // Ball centre will meet the left paddle centre (y = 250) this frame
    h.place_ball(Vec2::new(16.0, 242.0), Vec2::new(-6.0, 0.0));

    h.frame();

    let ball = h.session.ball().unwrap();
    assert!(h.session.events.ball_hit_paddle);
    assert!((ball.vel.x - 6.0).abs() < 1e-5);
    assert!(ball.vel.y.abs() < 1e-5);
}

#[test]
fn test_invariants_hold_under_random_input() {
    let mut h = Harness::new(31);
    let mut input_rng = rand::rngs::StdRng::seed_from_u64(31);
    let config = Config::new();
    h.start("Alice", "Bob");

    let mut previous = (0, 0);
    let mut frames = 0;
    while h.session.phase() == Phase::Running && frames < 20_000 {
        match input_rng.gen_range(0..6) {
            0 => h.session.push_input(InputEvent::PointerMoved {
                y: input_rng.gen_range(-50.0..550.0),
            }),
            1 => h.session.push_input(InputEvent::KeyDown(Key::Up)),
            2 => h.session.push_input(InputEvent::KeyUp(Key::Up)),
            3 => h.session.push_input(InputEvent::KeyDown(Key::Down)),
            4 => h.session.push_input(InputEvent::KeyUp(Key::Down)),
            _ => {}
        }
        h.frame();
        frames += 1;

        for side in [Side::Left, Side::Right] {
            let y = h.session.paddle(side).unwrap().y;
            assert!(y >= 0.0 && y <= config.playfield_height - config.paddle_height);
        }

        let ball = h.session.ball().unwrap();
        assert!(ball.pos.y >= 0.0 && ball.pos.y <= config.playfield_height - ball.size);

        let current = (h.score(Side::Left), h.score(Side::Right));
        assert!(current.0 >= previous.0 && current.1 >= previous.1);
        let gained = (current.0 - previous.0) + (current.1 - previous.1);
        assert!(gained <= 1, "at most one point per frame");
        if h.session.phase() == Phase::Running {
            assert!(current.0 < config.win_score && current.1 < config.win_score);
        } else {
            assert!(current.0 == config.win_score || current.1 == config.win_score);
        }
        previous = current;
    }
}
