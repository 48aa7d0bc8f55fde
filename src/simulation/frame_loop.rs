//! Clock-driven frame loop
//!
//! The loop reads an injected clock, turns the time since the previous tick
//! into a clamped delta, and feeds it to `SimWorld::advance`. Tests and the
//! headless runner use `ManualClock`; interactive play uses `SystemClock`.

use std::time::{Duration, Instant};

use super::types::DriveInput;
use super::world::SimWorld;

/// Largest delta a single frame may simulate, so a stalled host
/// can't produce a physics-breaking jump
pub const MAX_FRAME_DELTA: f32 = 0.033;

/// Clamp a measured frame time into [0, MAX_FRAME_DELTA]
pub fn clamp_frame_delta(raw_secs: f32) -> f32 {
    if !raw_secs.is_finite() || raw_secs <= 0.0 {
        return 0.0;
    }
    raw_secs.min(MAX_FRAME_DELTA)
}

/// Monotonic time source
pub trait Clock {
    /// Time since an arbitrary fixed origin
    fn now(&self) -> Duration;
}

/// Wall clock backed by `Instant`
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock that only moves when told to
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Duration,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, by: Duration) {
        self.now = self.now.saturating_add(by);
    }

    /// Negative and NaN inputs are ignored; huge ones saturate
    pub fn advance_secs(&mut self, secs: f32) {
        if secs.is_nan() || secs <= 0.0 {
            return;
        }
        let by = Duration::try_from_secs_f32(secs).unwrap_or(Duration::MAX);
        self.advance(by);
    }

    pub fn set(&mut self, now: Duration) {
        self.now = now;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now
    }
}

/// Drives a `SimWorld` from a clock, one tick per host frame
pub struct FrameLoop<C: Clock> {
    clock: C,
    last_tick: Option<Duration>,
    ticks: u64,
    simulated: f32,
}

impl<C: Clock> FrameLoop<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            last_tick: None,
            ticks: 0,
            simulated: 0.0,
        }
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Number of ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Total simulated seconds, after clamping
    pub fn simulated_secs(&self) -> f32 {
        self.simulated
    }

    /// Run one frame; the first tick simulates zero time
    ///
    /// Returns the delta that was actually simulated.
    pub fn tick(&mut self, world: &mut SimWorld, input: DriveInput) -> f32 {
        let now = self.clock.now();
        let raw = self
            .last_tick
            .map(|last| now.saturating_sub(last).as_secs_f32())
            .unwrap_or(0.0);
        self.last_tick = Some(now);

        let delta = clamp_frame_delta(raw);
        world.advance(delta, input);
        self.ticks += 1;
        self.simulated += delta;
        delta
    }

    /// Forget the previous tick time, e.g. after a pause or reset
    pub fn resync(&mut self) {
        self.last_tick = None;
    }
}
