//! Plume - a side-scrolling flap-the-bird arcade engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `render`: Surface-agnostic draw pass over sim state
//! - `runner`: Fixed-cadence background game loop
//! - `tuning`: Data-driven game balance
//!
//! The engine is host-agnostic: anything that can hand out a [`render::Surface`]
//! once per frame and forward a single "primary action" input can drive it.
//! The shipped binary drives it from a terminal.

pub mod render;
pub mod runner;
pub mod sim;
pub mod tuning;

pub use runner::GameLoop;
pub use tuning::Tuning;

/// Game configuration constants
///
/// World units are pixels of a nominal portrait phone surface; hosts with
/// other resolutions scale at the surface boundary, not here.
pub mod consts {
    /// Per-iteration sleep targeting ~60 loop iterations per second
    pub const FRAME_INTERVAL_MS: u64 = 16;
    /// Cap on the measured frame delta (runaway catch-up guard)
    pub const MAX_FRAME_DELTA_MS: u64 = 50;

    /// Bird horizontal position, fixed for the whole run (the world scrolls)
    pub const BIRD_X: f32 = 200.0;
    /// Bird vertical position before the first reset
    pub const BIRD_START_Y: f32 = 300.0;
    pub const BIRD_RADIUS: f32 = 30.0;

    /// Per-tick gravity acceleration
    pub const GRAVITY: f32 = 0.9;
    /// Velocity override applied on flap (negative = up)
    pub const FLAP_IMPULSE: f32 = -18.0;

    /// Pipe body width
    pub const PIPE_WIDTH: f32 = 140.0;
    /// Leftward pipe translation per tick
    pub const PIPE_SPEED: f32 = 6.0;
    /// Ticks between pipe spawns
    pub const PIPE_INTERVAL: u32 = 120;
    /// Pipes spawn this far past the right edge
    pub const PIPE_SPAWN_OFFSET: f32 = 200.0;
    /// A pipe counts as passed once `x + SCORE_TRIGGER_OFFSET` clears the bird
    pub const SCORE_TRIGGER_OFFSET: f32 = 100.0;

    /// Vertical opening between a pipe's top and bottom halves
    pub const BASE_GAP: f32 = 350.0;
    /// Uniform jitter applied to the gap, +/-
    pub const GAP_JITTER: f32 = 80.0;
    /// Smallest top segment a spawn may roll
    pub const TOP_MIN: f32 = 100.0;
    /// Floor on the spawn roll's upper bound
    pub const TOP_MAX_FLOOR: f32 = 150.0;
    /// Bottom clearance reserved below the gap when rolling the top height
    pub const SPAWN_BOTTOM_MARGIN: f32 = 200.0;

    /// Ground band height at the bottom of the world
    pub const GROUND_HEIGHT: f32 = 120.0;
}
