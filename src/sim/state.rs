//! Game state and core simulation types
//!
//! The simulation exclusively owns the bird and the pipe sequence; the
//! renderer reads them, the loop driver serializes access.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// The player-controlled bird
#[derive(Debug, Clone)]
pub struct Bird {
    /// Center position. `x` never changes after init; the world scrolls
    pub pos: Vec2,
    /// Vertical velocity, positive = down. Unbounded (no terminal velocity)
    pub velocity: f32,
    pub radius: f32,
}

impl Bird {
    fn new() -> Self {
        Self {
            pos: Vec2::new(BIRD_X, BIRD_START_Y),
            velocity: 0.0,
            radius: BIRD_RADIUS,
        }
    }
}

/// A scrolling gap obstacle: top and bottom pipe halves with an opening
#[derive(Debug, Clone)]
pub struct Pipe {
    /// Left edge in world pixels
    pub x: f32,
    /// Height of the top half, measured from the world top
    pub top_height: f32,
    /// Vertical opening below the top half
    pub gap: f32,
    /// Set once the bird has passed; scoring is one-shot per pipe
    pub scored: bool,
}

impl Pipe {
    pub fn new(x: f32, top_height: f32, gap: f32) -> Self {
        debug_assert!(gap > 0.0);
        debug_assert!(top_height >= 0.0);
        Self {
            x,
            top_height,
            gap,
            scored: false,
        }
    }

    /// Collision rect of the top half
    pub fn top_rect(&self) -> Rect {
        Rect::new(self.x, 0.0, self.x + PIPE_WIDTH, self.top_height)
    }

    /// Collision rect of the bottom half, reaching down to the ground line
    pub fn bottom_rect(&self, surface_h: f32) -> Rect {
        Rect::new(
            self.x,
            self.top_height + self.gap,
            self.x + PIPE_WIDTH,
            surface_h - GROUND_HEIGHT,
        )
    }
}

/// Complete world state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Balance knobs
    pub tuning: Tuning,
    pub bird: Bird,
    /// Live pipes in spawn order, which is also left-to-right order
    pub pipes: Vec<Pipe>,
    pub score: u32,
    /// Terminal flag; monotone until `reset`
    pub game_over: bool,
    /// Ticks since the last pipe spawn
    pub spawn_timer: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Host surface size in pixels; zero until the host reports it
    pub surface_w: u32,
    pub surface_h: u32,
    pub(crate) rng: Pcg32,
}

impl GameState {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            tuning,
            bird: Bird::new(),
            pipes: Vec::new(),
            score: 0,
            game_over: false,
            spawn_timer: 0,
            time_ticks: 0,
            surface_w: 0,
            surface_h: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Apply the host surface dimensions. Idempotent; the loop re-applies
    /// it every frame from the acquired surface.
    pub fn set_surface_size(&mut self, width: u32, height: u32) {
        if (self.surface_w, self.surface_h) != (width, height) {
            log::debug!("surface size {width}x{height}");
            self.surface_w = width;
            self.surface_h = height;
        }
    }

    /// Whether the world dimensions are known yet. The tick is a no-op
    /// until they are.
    pub fn surface_ready(&self) -> bool {
        self.surface_w > 1 && self.surface_h > 1
    }

    /// Primary input: flap while alive, restart once the run has ended.
    /// The flap overrides the current velocity rather than accumulating.
    pub fn primary_action(&mut self) {
        if self.game_over {
            self.reset();
        } else {
            self.bird.velocity = self.tuning.flap_impulse;
        }
    }

    /// Return to the initial state, re-centering the bird on the current
    /// surface height. The RNG stream keeps running so each run gets a
    /// fresh pipe layout; `seed` still reproduces the whole session.
    pub fn reset(&mut self) {
        log::info!("restart after score {}", self.score);
        self.bird = Bird::new();
        self.bird.pos.y = self.surface_h as f32 / 2.0;
        self.pipes.clear();
        self.spawn_timer = 0;
        self.score = 0;
        self.game_over = false;
    }
}
