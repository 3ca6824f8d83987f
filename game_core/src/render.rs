//! Drawing the game onto a 2D surface
//!
//! [`render`] is stateless: it reads a [`Snapshot`] of the world and issues
//! draw calls in a fixed order (clear, net, scores, paddles, ball).

use glam::Vec2;
use hecs::World;

use crate::components::{Ball, Paddle, Player, Side};
use crate::physics::{PaddleRect, Playfield};
use crate::Config;

const NAME_BASELINE: f32 = 40.0;
const SCORE_BASELINE: f32 = 75.0;

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const WHITE: Color = Color(0xff, 0xff, 0xff);

    /// CSS hex form, e.g. `#00eaff`
    pub fn to_css(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// Drawing primitives the renderer needs
pub trait Surface {
    fn clear(&mut self, width: f32, height: f32);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    /// Stroke a line with a `[dash, gap]` pattern
    fn dashed_line(&mut self, from: Vec2, to: Vec2, pattern: [f32; 2], color: Color);
    fn fill_text(&mut self, text: &str, pos: Vec2, font: &str, align: TextAlign, color: Color);
}

/// Colours and fonts
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub left_paddle: Color,
    pub right_paddle: Color,
    pub ball: Color,
    pub net: Color,
    pub text: Color,
    pub net_pattern: [f32; 2],
    pub name_font: String,
    pub score_font: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            left_paddle: Color(0x00, 0xea, 0xff),
            right_paddle: Color(0xfd, 0xc9, 0x00),
            ball: Color::WHITE,
            net: Color(0xaa, 0xaa, 0xaa),
            text: Color::WHITE,
            net_pattern: [6.0, 12.0],
            name_font: "32px Arial Black, Arial, sans-serif".to_string(),
            score_font: "bold 44px Arial Black, Arial, sans-serif".to_string(),
        }
    }
}

/// What the renderer needs to know about one paddle
#[derive(Debug, Clone, PartialEq)]
pub struct PaddleView {
    pub side: Side,
    pub rect: PaddleRect,
    pub name: String,
    pub score: u32,
}

/// Read-only copy of everything drawn in a frame
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub field: Playfield,
    pub left: PaddleView,
    pub right: PaddleView,
    pub ball: Ball,
}

impl Snapshot {
    /// Copy the drawable state out of the world. `None` if an entity is missing.
    pub fn capture(world: &World, config: &Config) -> Option<Snapshot> {
        let mut left = None;
        let mut right = None;
        for (_entity, (paddle, player)) in world.query::<(&Paddle, &Player)>().iter() {
            let view = PaddleView {
                side: paddle.side,
                rect: config.paddle_rect(paddle),
                name: player.name.clone(),
                score: player.score,
            };
            match paddle.side {
                Side::Left => left = Some(view),
                Side::Right => right = Some(view),
            }
        }

        let ball = world
            .query::<&Ball>()
            .iter()
            .next()
            .map(|(_entity, ball)| *ball)?;

        Some(Snapshot {
            field: config.playfield(),
            left: left?,
            right: right?,
            ball,
        })
    }
}

/// Draw one frame
pub fn render(snapshot: &Snapshot, theme: &Theme, surface: &mut dyn Surface) {
    let Snapshot {
        field,
        left,
        right,
        ball,
    } = snapshot;

    surface.clear(field.width, field.height);

    // Net
    let mid_x = field.width / 2.0;
    surface.dashed_line(
        Vec2::new(mid_x, 0.0),
        Vec2::new(mid_x, field.height),
        theme.net_pattern,
        theme.net,
    );

    // Names and scores
    for (view, anchor_x) in [(left, field.width / 4.0), (right, 3.0 * field.width / 4.0)] {
        surface.fill_text(
            &view.name,
            Vec2::new(anchor_x, NAME_BASELINE),
            &theme.name_font,
            TextAlign::Center,
            theme.text,
        );
        surface.fill_text(
            &view.score.to_string(),
            Vec2::new(anchor_x, SCORE_BASELINE),
            &theme.score_font,
            TextAlign::Center,
            theme.text,
        );
    }

    // Paddles
    for (view, color) in [(left, theme.left_paddle), (right, theme.right_paddle)] {
        let rect = view.rect;
        surface.fill_rect(rect.x, rect.y, rect.width, rect.height, color);
    }

    // Ball
    surface.fill_circle(ball.center(), ball.size / 2.0, theme.ball);
}

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        width: f32,
        height: f32,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    DashedLine {
        from: Vec2,
        to: Vec2,
        pattern: [f32; 2],
        color: Color,
    },
    Text {
        text: String,
        pos: Vec2,
        font: String,
        align: TextAlign,
        color: Color,
    },
}

/// Surface that keeps the draw calls of the latest frame
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
    pub frames: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text drawn in the latest frame, in order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, width: f32, height: f32) {
        self.commands.clear();
        self.frames += 1;
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.commands.push(DrawCommand::Rect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn dashed_line(&mut self, from: Vec2, to: Vec2, pattern: [f32; 2], color: Color) {
        self.commands.push(DrawCommand::DashedLine {
            from,
            to,
            pattern,
            color,
        });
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, font: &str, align: TextAlign, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            font: font.to_string(),
            align,
            color,
        });
    }
}
