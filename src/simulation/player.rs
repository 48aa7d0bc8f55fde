//! Player car physics
//!
//! Integrates pedal and steering input plus curve forces into speed,
//! world distance and lateral position.

use super::config::{
    SimConfig, DUST_DURATION, FAILED_DECAY_FACTOR, FINISH_CENTER_RATE, FINISH_COAST_FACTOR,
    OFFROAD_DRAG, OFFROAD_EDGE, OFFROAD_SPEED_CAP, SLOW_SPEED_CAP,
};
use super::effects::EffectTimers;
use super::race::RaceState;
use super::track::Track;
use super::types::{DriveInput, SteerPose};

/// Kinematic state of the player car
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayerState {
    pub speed: f32,
    /// Cumulative world distance travelled
    pub distance: f32,
    /// Normalized offset across the road, -1 left edge to 1 right edge
    pub lateral: f32,
    /// Filtered track curvature shared by physics and projection
    pub curve_smoothed: f32,
    pub steer_pose: SteerPose,
    pub steer_timer: f32,
}

impl PlayerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the visual lean; a tap keeps the pose for `hold_time` seconds
    pub fn resolve_steering(&mut self, input: &DriveInput, delta_secs: f32, hold_time: f32) {
        match (input.steer_left, input.steer_right) {
            (true, false) => {
                self.steer_pose = SteerPose::Left;
                self.steer_timer = hold_time;
            }
            (false, true) => {
                self.steer_pose = SteerPose::Right;
                self.steer_timer = hold_time;
            }
            _ if self.steer_timer > 0.0 => {
                self.steer_timer = (self.steer_timer - delta_secs).max(0.0);
                if self.steer_timer == 0.0 {
                    self.steer_pose = SteerPose::Neutral;
                }
            }
            _ => self.steer_pose = SteerPose::Neutral,
        }
    }

    /// Advance speed, distance, curvature filter and lateral position
    ///
    /// Returns the distance covered this frame, whether or not it counted
    /// toward race progress.
    pub fn integrate(
        &mut self,
        input: &DriveInput,
        delta_secs: f32,
        track: &Track,
        config: &SimConfig,
        race: RaceState,
        effects: &mut EffectTimers,
    ) -> f32 {
        let locked = race.is_locked();

        if !locked && input.accelerate {
            self.speed += config.accel * delta_secs;
        } else if !locked && input.brake {
            self.speed -= config.brake * delta_secs;
        } else {
            let rate = match race {
                RaceState::Finished => config.decel * FINISH_COAST_FACTOR,
                RaceState::Failed => config.decel * (1.0 + FAILED_DECAY_FACTOR),
                _ => config.decel,
            };
            let sign = if self.speed == 0.0 { 0.0 } else { self.speed.signum() };
            self.speed -= sign * rate * delta_secs;
        }

        self.speed = self.speed.clamp(0.0, config.max_speed);
        if effects.slow_active() {
            self.speed = self.speed.min(SLOW_SPEED_CAP);
        }

        let travelled = self.speed * delta_secs * config.distance_scale;
        if race == RaceState::Racing {
            self.distance += travelled;
        }

        let target_curve = track.curvature_at(self.distance);
        let smooth_step = (delta_secs * config.curve_smooth_rate).min(1.0);
        self.curve_smoothed += (target_curve - self.curve_smoothed) * smooth_step;

        if race == RaceState::Finished {
            let ease = (delta_secs * FINISH_CENTER_RATE).min(1.0);
            self.lateral -= self.lateral * ease;
        } else {
            let steer = if locked {
                0.0
            } else {
                input.steer_axis() * config.turn_speed * delta_secs
            };
            let assist = -self.curve_smoothed * config.curve_assist * delta_secs;
            let speed_ratio = self.speed / config.max_speed;
            let centrifugal = -self.curve_smoothed * speed_ratio * config.centrifugal * delta_secs;
            self.lateral += steer + assist + centrifugal;
        }
        self.lateral = self.lateral.clamp(-1.0, 1.0);

        if race == RaceState::Racing && self.is_off_road() && self.speed > 0.0 {
            effects.dust_timer = DUST_DURATION;
            if self.speed > OFFROAD_SPEED_CAP {
                self.speed = (self.speed - OFFROAD_DRAG * delta_secs).max(OFFROAD_SPEED_CAP);
            }
        }

        travelled
    }

    /// The car is on the shoulder, outside the lane area
    pub fn is_off_road(&self) -> bool {
        self.lateral.abs() > OFFROAD_EDGE
    }
}
