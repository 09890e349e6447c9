//! Surface-agnostic render pass
//!
//! Reads `GameState` and issues draw calls strictly back to front against a
//! host-provided [`Surface`]. The host owns the pixels; this module owns
//! the order and the palette.

use crate::consts::GROUND_HEIGHT;
use crate::sim::{GameState, Rect};

/// Packed RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Sky backdrop
pub const SKY: Color = Color::rgb(135, 206, 235);
pub const GROUND: Color = Color::rgb(87, 59, 12);
pub const PIPE: Color = Color::rgb(34, 139, 34);
pub const BIRD: Color = Color::rgb(255, 200, 0);
pub const EYE: Color = Color::rgb(0, 0, 0);
pub const TEXT: Color = Color::rgb(255, 255, 255);
pub const GAME_OVER_TEXT: Color = Color::rgb(255, 0, 0);

/// One frame's drawable target, valid for a single draw pass
///
/// Coordinates are world pixels; hosts with a different resolution scale
/// inside their implementation.
pub trait Surface {
    /// Current size in world pixels
    fn size(&self) -> (u32, u32);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color);
    /// Draw `text` horizontally centered on `cx` with its top edge at `y`
    fn draw_text(&mut self, text: &str, cx: f32, y: f32, size: f32, color: Color);
}

/// Host-side frame source
///
/// The loop acquires at most one frame per iteration and presents every
/// frame it acquires; `None` means "surface not currently valid, skip and
/// retry next cycle".
pub trait SurfaceHost: Send {
    type Frame: Surface;
    fn acquire(&mut self) -> Option<Self::Frame>;
    fn present(&mut self, frame: Self::Frame);
}

/// Draw one frame
///
/// Ordering is a correctness requirement: background, ground, pipes in
/// spawn order, bird, score, then the game-over overlay on top.
pub fn draw(state: &GameState, surface: &mut impl Surface) {
    let (w, h) = surface.size();
    let (w, h) = (w as f32, h as f32);

    surface.fill_rect(Rect::new(0.0, 0.0, w, h), SKY);

    let ground_top = h - GROUND_HEIGHT;
    surface.fill_rect(Rect::new(0.0, ground_top, w, h), GROUND);

    for pipe in &state.pipes {
        surface.fill_rect(pipe.top_rect(), PIPE);
        surface.fill_rect(pipe.bottom_rect(h), PIPE);
    }

    let bird = &state.bird;
    surface.fill_circle(bird.pos.x, bird.pos.y, bird.radius, BIRD);
    surface.fill_circle(
        bird.pos.x + bird.radius / 3.0,
        bird.pos.y - bird.radius / 3.0,
        bird.radius / 6.0,
        EYE,
    );

    surface.draw_text(&state.score.to_string(), w / 2.0, 120.0, 72.0, TEXT);

    if state.game_over {
        surface.draw_text("GAME OVER", w / 2.0, h / 2.0 - 40.0, 64.0, GAME_OVER_TEXT);
        surface.draw_text("TAP TO RESTART", w / 2.0, h / 2.0 + 20.0, 40.0, TEXT);
    }
}
