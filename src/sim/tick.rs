//! Fixed timestep simulation tick
//!
//! One call advances the world by exactly one tick. Physics integrates by
//! fixed per-tick constants; the loop driver's measured frame delta never
//! scales anything here.

use rand::Rng;

use super::collision::circle_intersects_rect;
use super::state::{GameState, Pipe};
use crate::consts::*;

/// Advance the world by one fixed tick
///
/// No-op until the host has reported a usable surface size. Once the run
/// has ended, degrades to a cosmetic epilogue: the bird keeps falling until
/// it rests on the ground line, everything else stays frozen.
pub fn tick(state: &mut GameState) {
    if !state.surface_ready() {
        return;
    }
    state.time_ticks += 1;

    if state.game_over {
        settle_bird(state);
        return;
    }

    // Bird physics: constant per-tick gravity, velocity unbounded
    state.bird.velocity += state.tuning.gravity;
    state.bird.pos.y += state.bird.velocity;

    scroll_pipes(state);

    state.spawn_timer += 1;
    if state.spawn_timer >= state.tuning.pipe_interval {
        spawn_pipe(state);
        state.spawn_timer = 0;
    }

    let ground = state.surface_h as f32 - GROUND_HEIGHT;
    if state.bird.pos.y + state.bird.radius > ground {
        state.bird.pos.y = ground - state.bird.radius;
        state.game_over = true;
    }
    // Soft ceiling: stops the bird without ending the run
    if state.bird.pos.y - state.bird.radius < 0.0 {
        state.bird.pos.y = state.bird.radius;
        state.bird.velocity = 0.0;
    }

    // Pipe collision. Every pipe is checked even after a hit; game_over is
    // a monotone flag, and ground + pipe in the same tick both apply.
    let center = state.bird.pos;
    let radius = state.bird.radius;
    let surface_h = state.surface_h as f32;
    for pipe in &state.pipes {
        if circle_intersects_rect(center, radius, &pipe.top_rect())
            || circle_intersects_rect(center, radius, &pipe.bottom_rect(surface_h))
        {
            state.game_over = true;
        }
    }

    if state.game_over {
        log::info!(
            "bird down at tick {}, final score {}",
            state.time_ticks,
            state.score
        );
    }
}

/// Translate pipes left, score newly passed ones, drop off-screen ones
fn scroll_pipes(state: &mut GameState) {
    let bird_x = state.bird.pos.x;
    let speed = state.tuning.pipe_speed;

    for pipe in &mut state.pipes {
        pipe.x -= speed;
        if !pipe.scored && pipe.x + SCORE_TRIGGER_OFFSET < bird_x {
            pipe.scored = true;
            state.score += 1;
            log::debug!("score {}", state.score);
        }
    }

    // Removal is a separate retain pass so the traversal above can never
    // skip or double-visit an element
    state.pipes.retain(|p| p.x + PIPE_WIDTH >= 0.0);
}

/// Spawn one pipe just past the right edge with randomized geometry
fn spawn_pipe(state: &mut GameState) {
    let tuning = &state.tuning;
    let top_max = (state.surface_h as f32
        - GROUND_HEIGHT
        - tuning.base_gap
        - SPAWN_BOTTOM_MARGIN)
        .max(TOP_MAX_FLOOR);
    // On surfaces too short for the full range the roll collapses to TOP_MIN
    let top_height = if top_max > TOP_MIN {
        state.rng.random_range(TOP_MIN..top_max)
    } else {
        TOP_MIN
    };
    let gap = if tuning.gap_jitter > 0.0 {
        tuning.base_gap + state.rng.random_range(-tuning.gap_jitter..tuning.gap_jitter)
    } else {
        tuning.base_gap
    };

    let x = state.surface_w as f32 + PIPE_SPAWN_OFFSET;
    state.pipes.push(Pipe::new(x, top_height, gap));
    log::debug!("spawned pipe at x {x}, top {top_height:.0}, gap {gap:.0}");
}

/// Post-terminal epilogue: gravity-only fall until the bird rests on the
/// ground line
fn settle_bird(state: &mut GameState) {
    let ground = state.surface_h as f32 - GROUND_HEIGHT;
    if state.bird.pos.y + state.bird.radius < ground {
        state.bird.velocity += state.tuning.gravity;
        state.bird.pos.y += state.bird.velocity;
        if state.bird.pos.y + state.bird.radius > ground {
            state.bird.pos.y = ground - state.bird.radius;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn world() -> GameState {
        let mut state = GameState::new(42, Tuning::default());
        state.set_surface_size(1080, 1920);
        state
    }

    /// Pin the bird mid-screen and shrug off collisions so long scenario
    /// runs can observe spawning/scoring across many pipe lifetimes
    fn hover(state: &mut GameState) {
        state.bird.pos.y = 900.0;
        state.bird.velocity = 0.0;
        state.game_over = false;
    }

    #[test]
    fn test_physics_recurrence() {
        let mut state = world();
        let mut expected_v = 0.0f32;
        let mut expected_y = state.bird.pos.y;

        for _ in 0..20 {
            let g = state.tuning.gravity;
            tick(&mut state);
            expected_v += g;
            expected_y += expected_v;
            assert_eq!(state.bird.velocity, expected_v);
            assert_eq!(state.bird.pos.y, expected_y);
        }
    }

    #[test]
    fn test_noop_before_surface_known() {
        let mut state = GameState::new(42, Tuning::default());
        let y0 = state.bird.pos.y;
        for _ in 0..10 {
            tick(&mut state);
        }
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.bird.pos.y, y0);
        assert!(state.pipes.is_empty());
    }

    #[test]
    fn test_spawn_cadence() {
        let mut state = world();
        hover(&mut state);

        for n in 1..=119 {
            tick(&mut state);
            hover(&mut state);
            assert!(state.pipes.is_empty(), "no pipe expected at tick {n}");
        }
        tick(&mut state);
        hover(&mut state);
        assert_eq!(state.pipes.len(), 1);
        assert_eq!(state.pipes[0].x, 1080.0 + PIPE_SPAWN_OFFSET);
        assert_eq!(state.spawn_timer, 0);

        // Second spawn exactly one interval later
        for _ in 0..119 {
            tick(&mut state);
            hover(&mut state);
            assert_eq!(state.pipes.len(), 1);
        }
        tick(&mut state);
        assert_eq!(state.pipes.len(), 2);
    }

    #[test]
    fn test_spawn_geometry_bounds() {
        let mut state = world();
        hover(&mut state);
        let top_max = 1920.0 - GROUND_HEIGHT - BASE_GAP - SPAWN_BOTTOM_MARGIN;

        let mut spawns = 0;
        for _ in 0..1000 {
            tick(&mut state);
            hover(&mut state);
            // spawn_timer sits at zero only on the tick that spawned
            if state.spawn_timer == 0 && !state.pipes.is_empty() {
                let pipe = state.pipes.last().unwrap();
                assert_eq!(pipe.x, 1080.0 + PIPE_SPAWN_OFFSET);
                assert!(pipe.top_height >= TOP_MIN && pipe.top_height < top_max);
                assert!(pipe.gap >= BASE_GAP - GAP_JITTER && pipe.gap < BASE_GAP + GAP_JITTER);
                assert!(!pipe.scored);
                spawns += 1;
            }
        }
        assert!(spawns >= 8);
    }

    #[test]
    fn test_scoring_is_one_shot() {
        let mut state = world();
        hover(&mut state);
        // Degenerate top half and a huge gap keep the pipe harmless while
        // it crosses the bird
        state.pipes.push(Pipe::new(105.0, 0.0, 1700.0));

        tick(&mut state);
        hover(&mut state);
        assert_eq!(state.score, 1);
        assert!(state.pipes[0].scored);

        for _ in 0..10 {
            tick(&mut state);
            hover(&mut state);
        }
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_offscreen_pipe_removed() {
        let mut state = world();
        hover(&mut state);
        state.pipes.push(Pipe::new(10.0, 0.0, 1700.0));

        // x drops by 6 per tick; gone once x + PIPE_WIDTH < 0
        for _ in 0..30 {
            tick(&mut state);
            hover(&mut state);
        }
        assert!(state.pipes.is_empty());
    }

    #[test]
    fn test_ground_collision_clamps_and_ends_run() {
        let mut state = world();
        state.bird.pos.y = 1765.0;
        state.bird.velocity = 10.0;

        tick(&mut state);

        assert!(state.game_over);
        assert_eq!(state.bird.pos.y, 1800.0 - state.bird.radius);
    }

    #[test]
    fn test_ceiling_is_soft() {
        let mut state = world();
        state.bird.pos.y = 40.0;
        state.bird.velocity = -50.0;

        tick(&mut state);

        assert!(!state.game_over);
        assert_eq!(state.bird.pos.y, state.bird.radius);
        assert_eq!(state.bird.velocity, 0.0);
    }

    #[test]
    fn test_pipe_collision_ends_run() {
        let mut state = world();
        state.bird.pos.y = 300.0;
        state.bird.velocity = 0.0;
        // Top half reaches below the bird, right on top of it
        state.pipes.push(Pipe::new(180.0, 500.0, 350.0));

        tick(&mut state);
        assert!(state.game_over);
    }

    #[test]
    fn test_terminal_freezes_world_and_settles_bird() {
        let mut state = world();
        state.bird.pos.y = 600.0;
        state.bird.velocity = 0.0;
        state.pipes.push(Pipe::new(180.0, 700.0, 350.0));
        state.spawn_timer = 50;

        tick(&mut state);
        assert!(state.game_over);

        let pipe_x = state.pipes[0].x;
        let timer = state.spawn_timer;
        let score = state.score;

        // Epilogue: bird falls, everything else is frozen
        for _ in 0..2000 {
            tick(&mut state);
        }
        assert!(state.game_over);
        assert_eq!(state.pipes[0].x, pipe_x);
        assert_eq!(state.spawn_timer, timer);
        assert_eq!(state.score, score);
        assert_eq!(state.bird.pos.y, 1800.0 - state.bird.radius);
    }

    #[test]
    fn test_determinism() {
        let mut a = world();
        let mut b = world();

        for _ in 0..600 {
            tick(&mut a);
            hover(&mut a);
            tick(&mut b);
            hover(&mut b);
        }

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.score, b.score);
        assert_eq!(a.pipes.len(), b.pipes.len());
        for (pa, pb) in a.pipes.iter().zip(&b.pipes) {
            assert_eq!(pa.x, pb.x);
            assert_eq!(pa.top_height, pb.top_height);
            assert_eq!(pa.gap, pb.gap);
        }
    }
}
