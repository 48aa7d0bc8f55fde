//! Race lifecycle tracking
//!
//! Countdown, race clock, finish and time-out detection. Both end states
//! are absorbing; only a full world reset goes back to the countdown.

use log::info;

/// Phase of the race
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RaceState {
    #[default]
    Countdown,
    Racing,
    Finished,
    Failed,
}

impl RaceState {
    pub fn is_terminal(self) -> bool {
        matches!(self, RaceState::Finished | RaceState::Failed)
    }

    /// Throttle, brake and steering are ignored in every phase but Racing
    pub fn is_locked(self) -> bool {
        self != RaceState::Racing
    }

    pub fn label(self) -> &'static str {
        match self {
            RaceState::Countdown => "COUNTDOWN",
            RaceState::Racing => "RACING",
            RaceState::Finished => "FINISHED",
            RaceState::Failed => "TIME UP",
        }
    }
}

/// A state change raised by the lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaceTransition {
    Started,
    Finished,
    Failed,
}

/// Race clock and phase
#[derive(Debug, Clone, PartialEq)]
pub struct RaceLifecycle {
    pub state: RaceState,
    pub countdown_remaining: f32,
    pub race_elapsed: f32,
    pub time_limit: f32,
    pub finish_distance: f32,
    /// Seconds since the finish line was crossed
    pub outro_elapsed: f32,
    /// Distance coasted after the finish line, drives the fade-out
    pub coast_distance: f32,
    /// Set once `Started` has been reported
    start_announced: bool,
}

impl RaceLifecycle {
    pub fn new(countdown: f32, time_limit: f32, finish_distance: f32) -> Self {
        let state = if countdown > 0.0 {
            RaceState::Countdown
        } else {
            RaceState::Racing
        };
        Self {
            state,
            countdown_remaining: countdown.max(0.0),
            race_elapsed: 0.0,
            time_limit,
            finish_distance,
            outro_elapsed: 0.0,
            coast_distance: 0.0,
            start_announced: false,
        }
    }

    /// Run the countdown; the race starts on the frame it reaches zero
    ///
    /// A race that began without a countdown reports `Started` on its
    /// first tick instead.
    pub fn tick_countdown(&mut self, delta_secs: f32) -> Option<RaceTransition> {
        match self.state {
            RaceState::Countdown => {
                self.countdown_remaining = (self.countdown_remaining - delta_secs).max(0.0);
                if self.countdown_remaining > 0.0 {
                    return None;
                }
                self.state = RaceState::Racing;
            }
            RaceState::Racing if !self.start_announced => {}
            _ => return None,
        }
        self.start_announced = true;
        info!("Race started");
        Some(RaceTransition::Started)
    }

    /// Skip straight to racing, used by the CLI and tests
    ///
    /// `Started` is still reported on the next tick.
    pub fn skip_countdown(&mut self) {
        if self.state == RaceState::Countdown {
            self.countdown_remaining = 0.0;
            self.state = RaceState::Racing;
        }
    }

    /// Advance the race clock while racing
    pub fn accrue(&mut self, delta_secs: f32) {
        if self.state == RaceState::Racing {
            self.race_elapsed += delta_secs;
        }
    }

    /// Post-finish bookkeeping for the outro and fade
    pub fn accrue_outro(&mut self, delta_secs: f32, coasted: f32) {
        if self.state == RaceState::Finished {
            self.outro_elapsed += delta_secs;
            self.coast_distance += coasted;
        }
    }

    pub fn check_finish(&mut self, distance: f32) -> Option<RaceTransition> {
        if self.state == RaceState::Racing && distance >= self.finish_distance {
            self.state = RaceState::Finished;
            info!(
                "Finish line crossed after {:.2}s ({:.0} units)",
                self.race_elapsed, distance
            );
            return Some(RaceTransition::Finished);
        }
        None
    }

    pub fn check_time_limit(&mut self) -> Option<RaceTransition> {
        if self.state == RaceState::Racing && self.race_elapsed >= self.time_limit {
            self.state = RaceState::Failed;
            info!("Time limit of {:.1}s reached", self.time_limit);
            return Some(RaceTransition::Failed);
        }
        None
    }

    pub fn remaining_time(&self) -> f32 {
        (self.time_limit - self.race_elapsed).max(0.0)
    }

    /// Depth of the finish line ahead of the camera, 0 once crossed
    pub fn finish_line_depth(&self, distance: f32) -> f32 {
        (self.finish_distance - distance).max(0.0)
    }

    /// Fade-out progress after finishing, in [0, 1]
    pub fn finish_fade(&self, fade_distance: f32) -> f32 {
        if self.state != RaceState::Finished {
            return 0.0;
        }
        if fade_distance <= 0.0 {
            return 1.0;
        }
        (self.coast_distance / fade_distance).min(1.0)
    }

    /// Countdown banner text, or None when no banner should show
    pub fn countdown_label(&self) -> Option<String> {
        if self.state != RaceState::Countdown {
            return None;
        }
        if self.countdown_remaining <= 0.6 {
            Some("GO!".to_string())
        } else {
            Some(format!("{}", self.countdown_remaining.ceil() as u32))
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "State: {} | Elapsed: {:.1}s | Remaining: {:.1}s",
            self.state.label(),
            self.race_elapsed,
            self.remaining_time()
        )
    }
}
