//! Frame driver
//!
//! Owns one game session and runs it once per animation frame:
//!
//! 1. drain the reset/pause edges from the input latch
//! 2. run the simulation for however many fixed ticks the frame owes
//! 3. hand the state to the presenter (always, so overlays show when paused)
//! 4. capture a snapshot and return it if it changed
//!
//! The driver never reads a clock itself; the host passes the frame
//! timestamp in, which keeps sessions deterministic under test.

use crate::consts::{MAX_FRAME_MS, MAX_SUBSTEPS, TICK_MS};
use crate::input::InputLatch;
use crate::sim::{GameState, RunStatus, tick};
use crate::snapshot::{Snapshot, SnapshotGate};
use crate::tuning::Tuning;

/// Draws a frame. Implemented by the canvas renderer and by test doubles.
pub trait Presenter {
    fn present(&mut self, state: &GameState, now_ms: f64);
}

/// Presenter that draws nothing (headless runs)
#[derive(Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn present(&mut self, _state: &GameState, _now_ms: f64) {}
}

/// Fixed-timestep accumulator: converts host frame times into tick counts
#[derive(Debug, Clone, Default)]
pub struct FixedClock {
    last_ms: Option<f64>,
    accumulator_ms: f64,
}

impl FixedClock {
    /// Slack for float drift when frames land exactly on tick boundaries
    const EPSILON_MS: f64 = 1e-6;

    pub fn new() -> Self {
        Self::default()
    }

    /// Ticks owed for a frame at `now_ms`. The first frame always gets one.
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let Some(last) = self.last_ms.replace(now_ms) else {
            return 1;
        };

        let dt = (now_ms - last).clamp(0.0, MAX_FRAME_MS);
        self.accumulator_ms += dt;

        let mut steps = 0;
        while self.accumulator_ms + Self::EPSILON_MS >= TICK_MS && steps < MAX_SUBSTEPS {
            self.accumulator_ms -= TICK_MS;
            steps += 1;
        }

        // Spiral-of-death guard: drop whatever backlog is left
        if self.accumulator_ms >= TICK_MS {
            log::warn!(
                "Dropping {:.1}ms of simulation backlog after {} ticks",
                self.accumulator_ms,
                steps
            );
            self.accumulator_ms = 0.0;
        }
        steps
    }

    /// Forget accumulated time (while the simulation is frozen)
    pub fn clear_backlog(&mut self) {
        self.accumulator_ms = 0.0;
    }
}

/// One game session
pub struct FrameDriver {
    state: GameState,
    latch: InputLatch,
    tuning: Tuning,
    clock: FixedClock,
    gate: SnapshotGate,
}

impl FrameDriver {
    /// Create a session in the `Ready` state
    pub fn new(tuning: Tuning) -> Self {
        Self {
            state: GameState::new(&tuning),
            latch: InputLatch::new(),
            tuning,
            clock: FixedClock::new(),
            gate: SnapshotGate::new(),
        }
    }

    /// Initial full reset; moves `Ready` to `Running`
    pub fn start(&mut self, now_ms: f64) {
        self.state.full_reset(&self.tuning, now_ms);
        log::info!("Run started");
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn latch_mut(&mut self) -> &mut InputLatch {
        &mut self.latch
    }

    /// Run one animation frame. Returns a snapshot when it differs from
    /// the previous one returned.
    pub fn frame(&mut self, now_ms: f64, presenter: &mut dyn Presenter) -> Option<Snapshot> {
        self.apply_edges(now_ms);

        let steps = self.clock.advance(now_ms);
        if self.is_frozen() {
            self.clock.clear_backlog();
        } else {
            let input = self.latch.held();
            for _ in 0..steps {
                tick(&mut self.state, &input, &self.tuning, now_ms);
                if self.is_frozen() {
                    break;
                }
            }
        }

        presenter.present(&self.state, now_ms);

        self.gate.offer(Snapshot::capture(&self.state, now_ms))
    }

    fn is_frozen(&self) -> bool {
        self.state.world.paused || self.state.world.status != RunStatus::Running
    }

    /// Reset first, then pause, so both in one frame restarts paused
    fn apply_edges(&mut self, now_ms: f64) {
        let edges = self.latch.take_edges();
        if edges.reset {
            self.state.full_reset(&self.tuning, now_ms);
            log::info!("Run restarted");
        }
        if edges.pause {
            self.toggle_pause();
        }
    }

    /// Running <-> Paused. Ignored before start and after game over.
    pub fn toggle_pause(&mut self) {
        let world = &mut self.state.world;
        match world.status {
            RunStatus::Running => {
                world.paused = true;
                world.status = RunStatus::Paused;
                log::info!("Paused");
            }
            RunStatus::Paused => {
                world.paused = false;
                world.status = RunStatus::Running;
                log::info!("Resumed");
            }
            RunStatus::Ready | RunStatus::GameOver => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;
    use glam::Vec2;

    #[derive(Default)]
    struct Recorder {
        frames: u32,
        paused_frames: u32,
    }

    impl Presenter for Recorder {
        fn present(&mut self, state: &GameState, _now_ms: f64) {
            self.frames += 1;
            if state.world.paused {
                self.paused_frames += 1;
            }
        }
    }

    fn started() -> (FrameDriver, Recorder) {
        let mut driver = FrameDriver::new(Tuning::default());
        driver.start(0.0);
        (driver, Recorder::default())
    }

    fn release(driver: &mut FrameDriver, key: Key) {
        driver.latch_mut().key_down(key);
        driver.latch_mut().key_up(key);
    }

    #[test]
    fn test_ready_then_running_reported_once_each() {
        let mut driver = FrameDriver::new(Tuning::default());
        let mut rec = Recorder::default();

        let s = driver.frame(0.0, &mut rec).expect("first frame reports");
        assert_eq!(s.status, RunStatus::Ready);
        assert!(driver.frame(16.0, &mut rec).is_none());

        driver.start(20.0);
        let s = driver.frame(33.0, &mut rec).expect("start reports");
        assert_eq!(s.status, RunStatus::Running);
        assert!(driver.frame(50.0, &mut rec).is_none());
        assert_eq!(rec.frames, 4);
    }

    #[test]
    fn test_ready_does_not_simulate() {
        let mut driver = FrameDriver::new(Tuning::default());
        let before = driver.state().clone();
        for i in 0..10 {
            driver.frame(i as f64 * TICK_MS, &mut NullPresenter);
        }
        assert_eq!(driver.state(), &before);
    }

    #[test]
    fn test_pause_toggle_and_freeze() {
        let (mut driver, mut rec) = started();
        driver.frame(0.0, &mut rec);

        release(&mut driver, Key::Pause);
        let s = driver.frame(TICK_MS, &mut rec).expect("pause reports");
        assert_eq!(s.status, RunStatus::Paused);
        assert!(driver.state().world.paused);

        let frozen = driver.state().clone();
        for i in 2..20 {
            driver.frame(i as f64 * TICK_MS, &mut rec);
        }
        assert_eq!(driver.state(), &frozen);
        // Still drawn while paused
        assert_eq!(rec.frames, 20);
        assert_eq!(rec.paused_frames, 19);

        release(&mut driver, Key::Pause);
        let s = driver.frame(20.0 * TICK_MS, &mut rec).expect("resume reports");
        assert_eq!(s.status, RunStatus::Running);
        assert!(!driver.state().world.paused);
    }

    #[test]
    fn test_pause_ignored_after_game_over() {
        let (mut driver, mut rec) = started();
        driver.state_mut().player.lives = 1;
        driver.state_mut().lose_life();
        driver.frame(0.0, &mut rec);

        release(&mut driver, Key::Pause);
        driver.frame(TICK_MS, &mut rec);
        assert_eq!(driver.state().world.status, RunStatus::GameOver);
        assert!(driver.state().world.paused);
    }

    #[test]
    fn test_reset_leaves_game_over() {
        let (mut driver, mut rec) = started();
        driver.state_mut().player.score = 900;
        driver.state_mut().player.lives = 1;
        driver.state_mut().lose_life();
        let s = driver.frame(0.0, &mut rec).unwrap();
        assert_eq!(s.status, RunStatus::GameOver);
        assert_eq!(s.lives, 0);

        release(&mut driver, Key::Reset);
        let s = driver.frame(5_000.0, &mut rec).unwrap();
        assert_eq!(s.status, RunStatus::Running);
        assert_eq!(s.lives, 3);
        assert_eq!(s.score, 0);
        assert_eq!(s.time, 0);
        assert!(!driver.state().world.paused);
    }

    #[test]
    fn test_reset_and_pause_in_one_frame_restarts_paused() {
        let (mut driver, mut rec) = started();
        driver.frame(0.0, &mut rec);
        release(&mut driver, Key::Reset);
        release(&mut driver, Key::Pause);
        driver.frame(TICK_MS, &mut rec);
        assert_eq!(driver.state().world.status, RunStatus::Paused);
    }

    #[test]
    fn test_edges_consumed_once() {
        let (mut driver, mut rec) = started();
        driver.frame(0.0, &mut rec);
        release(&mut driver, Key::Pause);
        driver.frame(TICK_MS, &mut rec);
        driver.frame(2.0 * TICK_MS, &mut rec);
        // One toggle only
        assert_eq!(driver.state().world.status, RunStatus::Paused);
    }

    #[test]
    fn test_time_ticks_in_snapshots() {
        let (mut driver, mut rec) = started();
        let mut times = Vec::new();
        for i in 0..=130 {
            if let Some(s) = driver.frame(i as f64 * TICK_MS, &mut rec) {
                times.push(s.time);
            }
        }
        // Player idles on the ground: only the clock changes
        assert_eq!(times, vec![0, 1, 2]);
    }

    #[test]
    fn test_held_input_moves_player() {
        let (mut driver, mut rec) = started();
        driver.latch_mut().key_down(Key::Right);
        let x0 = driver.state().player.pos.x;
        for i in 0..10 {
            driver.frame(i as f64 * TICK_MS, &mut rec);
        }
        assert!(driver.state().player.pos.x > x0);
    }

    #[test]
    fn test_clock_one_tick_per_60hz_frame() {
        let mut clock = FixedClock::new();
        let mut total = 0;
        for i in 0..120 {
            total += clock.advance(i as f64 * TICK_MS);
        }
        assert_eq!(total, 120);
    }

    #[test]
    fn test_clock_catches_up_at_30hz() {
        let mut clock = FixedClock::new();
        assert_eq!(clock.advance(0.0), 1);
        for i in 1..30 {
            assert_eq!(clock.advance(i as f64 * 2.0 * TICK_MS), 2);
        }
    }

    #[test]
    fn test_clock_skips_ticks_at_high_refresh() {
        let mut clock = FixedClock::new();
        let mut total = 0;
        // 120 Hz for one second
        for i in 0..=120 {
            total += clock.advance(i as f64 * 1000.0 / 120.0);
        }
        // First frame plus 60 ticks of elapsed time
        assert_eq!(total, 61);
    }

    #[test]
    fn test_clock_caps_long_gaps() {
        let mut clock = FixedClock::new();
        clock.advance(0.0);
        assert_eq!(clock.advance(10_000.0), MAX_SUBSTEPS);
        // Backlog dropped, next normal frame is normal
        assert_eq!(clock.advance(10_000.0 + TICK_MS), 1);
        // Time going backwards owes nothing
        assert_eq!(clock.advance(0.0), 0);
    }

    #[test]
    fn test_game_speed_independent_of_refresh_rate() {
        let run = |hz: f64| {
            let (mut driver, mut rec) = started();
            driver.state_mut().player.pos = Vec2::new(40.0, 386.0);
            driver.latch_mut().key_down(Key::Right);
            // A third of a second: clear of the patrolling enemies
            let frames = (hz / 3.0) as usize;
            for i in 0..=frames {
                driver.frame(i as f64 * 1000.0 / hz, &mut rec);
            }
            driver.state().player.pos.x
        };
        let at_60 = run(60.0);
        let at_30 = run(30.0);
        assert!(at_60 > 40.0);
        assert!((at_60 - at_30).abs() < 1e-3);
    }
}
