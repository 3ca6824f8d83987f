/// Game tuning parameters for Pong
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Playfield
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 500.0;

    // Paddle
    pub const PADDLE_WIDTH: f32 = 12.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    pub const PADDLE_KEY_STEP: f32 = 7.0; // units per frame while a key is held

    // Ball
    pub const BALL_SIZE: f32 = 16.0;
    pub const BALL_SPEED: f32 = 6.0; // units per frame
    pub const MAX_BOUNCE_ANGLE: f32 = std::f32::consts::FRAC_PI_4;

    // Score
    pub const WIN_SCORE: u32 = 5; // First to 5 wins

    // Loop
    pub const SERVE_DELAY_MS: u32 = 300; // pause between start and first frame
    pub const INPUT_QUEUE_CAPACITY: usize = 64;
}
