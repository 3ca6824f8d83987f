use serde::Deserialize;
use thiserror::Error;

use crate::components::{Paddle, Side};
use crate::params::Params;
use crate::physics::{PaddleRect, Playfield};

/// Rejected configuration values
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("paddle height {paddle} does not fit a playfield of height {playfield}")]
    PaddleTooTall { paddle: f32, playfield: f32 },
    #[error("ball size {ball} does not fit the playfield")]
    BallTooLarge { ball: f32 },
    #[error("winning score must be at least 1")]
    ZeroWinScore,
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub playfield_width: f32,
    pub playfield_height: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_key_step: f32,
    pub ball_size: f32,
    pub ball_speed: f32,
    pub win_score: u32,
    pub serve_delay_ms: u32,
    pub input_queue_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            playfield_width: Params::PLAYFIELD_WIDTH,
            playfield_height: Params::PLAYFIELD_HEIGHT,
            paddle_width: Params::PADDLE_WIDTH,
            paddle_height: Params::PADDLE_HEIGHT,
            paddle_key_step: Params::PADDLE_KEY_STEP,
            ball_size: Params::BALL_SIZE,
            ball_speed: Params::BALL_SPEED,
            win_score: Params::WIN_SCORE,
            serve_delay_ms: Params::SERVE_DELAY_MS,
            input_queue_capacity: Params::INPUT_QUEUE_CAPACITY,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse overrides from JSON; absent fields keep their defaults
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_key_step", self.paddle_key_step),
            ("ball_size", self.ball_size),
            ("ball_speed", self.ball_speed),
        ];
        for (field, value) in positive {
            // NaN fails this check too
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        if self.paddle_height > self.playfield_height {
            return Err(ConfigError::PaddleTooTall {
                paddle: self.paddle_height,
                playfield: self.playfield_height,
            });
        }
        if self.ball_size >= self.playfield_height || self.ball_size >= self.playfield_width {
            return Err(ConfigError::BallTooLarge {
                ball: self.ball_size,
            });
        }
        if self.win_score == 0 {
            return Err(ConfigError::ZeroWinScore);
        }
        Ok(())
    }

    pub fn playfield(&self) -> Playfield {
        Playfield::new(self.playfield_width, self.playfield_height)
    }

    /// Get X position (left edge) for a paddle
    pub fn paddle_x(&self, side: Side) -> f32 {
        match side {
            Side::Left => 0.0,
            Side::Right => self.playfield_width - self.paddle_width,
        }
    }

    /// Collision box of a paddle
    pub fn paddle_rect(&self, paddle: &Paddle) -> PaddleRect {
        PaddleRect::new(self.paddle_x(paddle.side), paddle.y, paddle.width, paddle.height)
    }

    /// Clamp paddle Y (top edge) to playfield bounds
    pub fn clamp_paddle_y(&self, y: f32) -> f32 {
        y.clamp(0.0, self.playfield_height - self.paddle_height)
    }

    /// Paddle Y that centres it vertically
    pub fn paddle_spawn_y(&self) -> f32 {
        (self.playfield_height - self.paddle_height) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_paddle_x() {
        let config = Config::new();
        assert_eq!(config.paddle_x(Side::Left), 0.0, "Left paddle X position");
        assert_eq!(config.paddle_x(Side::Right), 788.0, "Right paddle X position");
    }

    #[test]
    fn test_config_clamp_paddle_y() {
        let config = Config::new();
        assert_eq!(config.clamp_paddle_y(-20.0), 0.0);
        assert_eq!(
            config.clamp_paddle_y(1000.0),
            config.playfield_height - config.paddle_height
        );
        assert_eq!(config.clamp_paddle_y(120.0), 120.0);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::new().validate().is_ok());
        assert_eq!(Config::new().paddle_spawn_y(), 200.0);
    }

    #[test]
    fn test_from_json_overrides_some_fields() {
        let config = Config::from_json(r#"{"win_score": 3, "ball_speed": 8.0}"#).unwrap();
        assert_eq!(config.win_score, 3);
        assert_eq!(config.ball_speed, 8.0);
        assert_eq!(config.paddle_height, Params::PADDLE_HEIGHT);
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        assert!(matches!(
            Config::from_json(r#"{"win_score": 0}"#),
            Err(ConfigError::ZeroWinScore)
        ));
        assert!(matches!(
            Config::from_json(r#"{"paddle_height": 900.0}"#),
            Err(ConfigError::PaddleTooTall { .. })
        ));
        assert!(matches!(
            Config::from_json(r#"{"ball_speed": -1.0}"#),
            Err(ConfigError::NotPositive { field: "ball_speed", .. })
        ));
        assert!(matches!(
            Config::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
