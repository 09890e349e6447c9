//! Fixed-cadence game loop driver
//!
//! One background thread owns the whole step/draw cycle; input arrives from
//! the host's event context and is applied under the same state lock the
//! loop ticks under. Best-effort ~60 Hz pacing with a hard sleep, not a
//! precise scheduler.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::consts::{FRAME_INTERVAL_MS, MAX_FRAME_DELTA_MS};
use crate::render::{self, Surface, SurfaceHost};
use crate::sim::{self, GameState};

/// Start/stop lifecycle around the background loop thread
pub struct GameLoop {
    state: Arc<Mutex<GameState>>,
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl GameLoop {
    pub fn new(state: GameState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            running: Arc::new(AtomicBool::new(false)),
            handle: None,
        }
    }

    /// Shared handle to the world state
    pub fn state(&self) -> Arc<Mutex<GameState>> {
        Arc::clone(&self.state)
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Spawn the loop thread. No-op if already running.
    pub fn start<H: SurfaceHost + 'static>(&mut self, host: H) {
        if self.running.swap(true, Ordering::SeqCst) {
            return;
        }
        let state = Arc::clone(&self.state);
        let running = Arc::clone(&self.running);
        let spawned = thread::Builder::new()
            .name("plume-loop".into())
            .spawn(move || run_loop(state, running, host));
        match spawned {
            Ok(handle) => self.handle = Some(handle),
            Err(e) => {
                self.running.store(false, Ordering::SeqCst);
                log::error!("failed to spawn loop thread: {e}");
            }
        }
    }

    /// Signal the loop to exit and block until the thread has terminated.
    /// Idempotent; after this returns no background activity remains.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("loop thread panicked");
            }
        }
    }

    /// Forward the primary input action into the simulation. Callable in
    /// either state; only visible while frames are being simulated.
    pub fn primary_action(&self) {
        lock(&self.state).primary_action();
    }
}

impl Drop for GameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Lock that recovers from poisoning instead of propagating it; a panic in
/// one iteration must not wedge input dispatch or shutdown
fn lock(state: &Arc<Mutex<GameState>>) -> MutexGuard<'_, GameState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn run_loop<H: SurfaceHost>(
    state: Arc<Mutex<GameState>>,
    running: Arc<AtomicBool>,
    mut host: H,
) {
    log::info!("game loop started");
    let frame = Duration::from_millis(FRAME_INTERVAL_MS);
    let max_delta = Duration::from_millis(MAX_FRAME_DELTA_MS);
    let mut last = Instant::now();

    while running.load(Ordering::SeqCst) {
        // Surface not currently valid: not an error, retry next cycle
        let Some(mut target) = host.acquire() else {
            thread::sleep(frame);
            continue;
        };

        // Measured but never used to scale physics; the sim is fixed-step
        let now = Instant::now();
        let delta = (now - last).min(max_delta);
        last = now;
        if delta >= max_delta {
            log::debug!("frame delta hit the {MAX_FRAME_DELTA_MS}ms cap");
        }

        let (w, h) = target.size();
        let snapshot = {
            let mut world = lock(&state);
            world.set_surface_size(w, h);
            sim::tick(&mut world);
            world.clone()
        };

        // Every acquired frame is presented, hit or miss
        render::draw(&snapshot, &mut target);
        host.present(target);

        thread::sleep(frame);
    }
    log::info!("game loop stopped");
}
