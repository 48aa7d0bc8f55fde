//! Tuning constants and the validated simulation configuration
//!
//! All gameplay numbers live here as `pub const` values. `SimConfig` collects
//! them into one struct so a world can be built with different settings
//! (tests and the CLI override a handful of them).

use anyhow::{ensure, Result};

use super::collision::CollisionStrategy;
use super::types::Viewport;

/// Top speed of the player car
pub const MAX_SPEED: f32 = 260.0;
/// Throttle acceleration per second
pub const ACCEL: f32 = 140.0;
/// Brake deceleration per second
pub const BRAKE: f32 = 240.0;
/// Coasting deceleration per second when no pedal is held
pub const DECEL: f32 = 80.0;
/// Lateral change per second at full steering input
pub const TURN_SPEED: f32 = 0.9;
/// Number of drivable lanes
pub const LANE_COUNT: usize = 3;

/// Drift opposite to curvature applied regardless of speed
pub const CURVE_ASSIST: f32 = 0.28;
/// Outward push on curves, scaled by speed / MAX_SPEED
pub const CENTRIFUGAL: f32 = 0.35;
/// Rate of the exponential curvature filter
pub const CURVE_SMOOTH_RATE: f32 = 1.5;

/// Converts speed into world distance per second
pub const DISTANCE_SCALE: f32 = 3.2;
/// Depth at which the road meets the horizon
pub const VIEW_DISTANCE: f32 = 5200.0;
/// Length of one road stripe, used only for drawing
pub const STRIPE_LENGTH: f32 = 120.0;

/// How long a tapped steering key keeps the sprite leaning
pub const STEER_HOLD_TIME: f32 = 0.12;

/// Seconds of countdown before the race starts
pub const COUNTDOWN_DURATION: f32 = 3.5;
/// Seconds allowed to reach the finish
pub const RACE_TIME_LIMIT: f32 = 45.0;
/// World distance of the finish line
pub const FINISH_DISTANCE: f32 = 25000.0;

/// Lateral easing rate toward center after finishing
pub const FINISH_CENTER_RATE: f32 = 1.8;
/// Fraction of DECEL used while coasting past the finish line
pub const FINISH_COAST_FACTOR: f32 = 0.5;
/// Extra decay multiplier applied after running out of time
pub const FAILED_DECAY_FACTOR: f32 = 1.2;
/// Coasting distance over which the finish fade goes from 0 to 1
pub const FINISH_FADE_DISTANCE: f32 = 900.0;

/// Opponent cars kept on the road
pub const OPPONENT_COUNT: usize = 4;
pub const OPPONENT_MIN_SPEED: f32 = 60.0;
pub const OPPONENT_MAX_SPEED: f32 = 140.0;
/// Depth spacing of the initial field and base gap for lane selection
pub const OPPONENT_SPAWN_GAP: f32 = 620.0;
/// Depth of the first opponent at race start
pub const OPPONENT_FIRST_DEPTH: f32 = 900.0;
/// Depth gap under which an opponent brakes for the car ahead
pub const FOLLOW_DISTANCE: f32 = 260.0;
/// Braking rate of an opponent stuck behind another one
pub const FOLLOW_BRAKE: f32 = 80.0;
/// Per-frame pull toward the sampled target speed
pub const SPEED_PULL: f32 = 0.02;
/// Random depth range added to the respawn base depth
pub const RESPAWN_JITTER: f32 = 1200.0;
/// Number of opponent color schemes
pub const LIVERY_COUNT: u8 = 4;

/// Depth below which an entity counts as passed and is recycled
pub const BEHIND_CAMERA_MARGIN: f32 = 200.0;

/// Near window in which opponents are tested for contact
pub const COLLISION_DEPTH: f32 = 190.0;
pub const COLLISION_COOLDOWN: f32 = 0.7;
/// Speed multiplier applied on contact
pub const COLLISION_DAMPING: f32 = 0.4;
/// Hitbox shrink factor for the rectangle test
pub const HITBOX_SCALE: f32 = 0.8;
/// Normalized distance for the lane-distance collision test
pub const LANE_HIT_TOLERANCE: f32 = 0.25;
pub const SHAKE_DURATION: f32 = 0.25;
pub const SHAKE_STRENGTH: f32 = 10.0;

/// World distance between item spawns
pub const ITEM_SPAWN_GAP: f32 = 1400.0;
/// Random depth range added to the item spawn depth
pub const ITEM_SPAWN_JITTER: f32 = 500.0;
/// Chance that a spawned item is beneficial
pub const BENEFICIAL_CHANCE: f32 = 0.35;
pub const ITEM_PICKUP_DEPTH: f32 = 90.0;
pub const ITEM_PICKUP_TOLERANCE: f32 = 0.18;
pub const ITEM_COOLDOWN: f32 = 0.3;
pub const SLOW_DURATION: f32 = 2.0;
/// Speed ceiling while the slow debuff is active
pub const SLOW_SPEED_CAP: f32 = 160.0;
pub const OVERLAY_DURATION: f32 = 0.8;
pub const FLASH_DURATION: f32 = 0.12;
pub const ITEM_SHAKE_DURATION: f32 = 0.2;
pub const ITEM_SHAKE_STRENGTH: f32 = 3.0;

/// Normalized lateral position past which the car is on the shoulder
pub const OFFROAD_EDGE: f32 = 0.9;
/// Speed the shoulder drags the car down to
pub const OFFROAD_SPEED_CAP: f32 = 150.0;
pub const OFFROAD_DRAG: f32 = 200.0;
pub const DUST_DURATION: f32 = 0.2;

/// Complete set of tunables for one simulation world
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub viewport: Viewport,
    pub max_speed: f32,
    pub accel: f32,
    pub brake: f32,
    pub decel: f32,
    pub turn_speed: f32,
    pub lane_count: usize,
    pub curve_assist: f32,
    pub centrifugal: f32,
    pub curve_smooth_rate: f32,
    pub distance_scale: f32,
    pub view_distance: f32,
    pub steer_hold_time: f32,
    pub countdown_duration: f32,
    pub race_time_limit: f32,
    pub finish_distance: f32,
    pub opponent_count: usize,
    pub opponent_min_speed: f32,
    pub opponent_max_speed: f32,
    pub opponent_spawn_gap: f32,
    pub item_spawn_gap: f32,
    pub collision_strategy: CollisionStrategy,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            max_speed: MAX_SPEED,
            accel: ACCEL,
            brake: BRAKE,
            decel: DECEL,
            turn_speed: TURN_SPEED,
            lane_count: LANE_COUNT,
            curve_assist: CURVE_ASSIST,
            centrifugal: CENTRIFUGAL,
            curve_smooth_rate: CURVE_SMOOTH_RATE,
            distance_scale: DISTANCE_SCALE,
            view_distance: VIEW_DISTANCE,
            steer_hold_time: STEER_HOLD_TIME,
            countdown_duration: COUNTDOWN_DURATION,
            race_time_limit: RACE_TIME_LIMIT,
            finish_distance: FINISH_DISTANCE,
            opponent_count: OPPONENT_COUNT,
            opponent_min_speed: OPPONENT_MIN_SPEED,
            opponent_max_speed: OPPONENT_MAX_SPEED,
            opponent_spawn_gap: OPPONENT_SPAWN_GAP,
            item_spawn_gap: ITEM_SPAWN_GAP,
            collision_strategy: CollisionStrategy::default(),
        }
    }
}

/// Reject NaN, infinite and negative values for a rate or duration
fn ensure_non_negative(name: &str, value: f32) -> Result<()> {
    ensure!(
        value.is_finite() && value >= 0.0,
        "{} must be a finite non-negative number, got {}",
        name,
        value
    );
    Ok(())
}

/// Reject NaN, infinite, zero and negative values
fn ensure_positive(name: &str, value: f32) -> Result<()> {
    ensure!(
        value.is_finite() && value > 0.0,
        "{} must be a finite positive number, got {}",
        name,
        value
    );
    Ok(())
}

impl SimConfig {
    /// Reject settings that would break the projection or physics math
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.viewport.width.is_finite()
                && self.viewport.height.is_finite()
                && self.viewport.width > 0.0
                && self.viewport.height > 0.0,
            "viewport must have a positive size, got {}x{}",
            self.viewport.width,
            self.viewport.height
        );
        ensure!(self.lane_count > 0, "lane_count must be at least 1");

        ensure_positive("max_speed", self.max_speed)?;
        ensure_positive("view_distance", self.view_distance)?;
        ensure_positive("distance_scale", self.distance_scale)?;
        ensure_positive("race_time_limit", self.race_time_limit)?;
        ensure_positive("finish_distance", self.finish_distance)?;
        ensure_positive("opponent_spawn_gap", self.opponent_spawn_gap)?;
        ensure_positive("item_spawn_gap", self.item_spawn_gap)?;

        for (name, value) in [
            ("accel", self.accel),
            ("brake", self.brake),
            ("decel", self.decel),
            ("turn_speed", self.turn_speed),
            ("curve_assist", self.curve_assist),
            ("centrifugal", self.centrifugal),
            ("curve_smooth_rate", self.curve_smooth_rate),
            ("steer_hold_time", self.steer_hold_time),
            ("countdown_duration", self.countdown_duration),
            ("opponent_min_speed", self.opponent_min_speed),
            ("opponent_max_speed", self.opponent_max_speed),
        ] {
            ensure_non_negative(name, value)?;
        }
        ensure!(
            self.opponent_min_speed <= self.opponent_max_speed,
            "opponent speed range {}..{} is invalid",
            self.opponent_min_speed,
            self.opponent_max_speed
        );
        Ok(())
    }
}
