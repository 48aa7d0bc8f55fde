//! AI traffic for the racing simulation
//!
//! Opponents live in depth space (distance ahead of the camera). They keep
//! their lane, brake behind slower cars, and are recycled ahead of the
//! player once they fall behind the camera.

use log::debug;
use ordered_float::OrderedFloat;
use std::collections::BTreeSet;
use std::ops::Bound;

use super::config::{
    SimConfig, BEHIND_CAMERA_MARGIN, FOLLOW_BRAKE, FOLLOW_DISTANCE, LIVERY_COUNT,
    OPPONENT_FIRST_DEPTH, RESPAWN_JITTER, SPEED_PULL,
};
use super::random::{shuffle, RandomSource};
use super::types::OpponentId;

/// Share of the spawn gap a lane must be free for at the target depth
const LANE_CLEAR_FACTOR: f32 = 0.8;
/// Respawn base depth as a fraction of the view distance
const RESPAWN_DEPTH_FACTOR: f32 = 0.7;
/// Upper depth bound as a fraction of the view distance
const MAX_DEPTH_FACTOR: f32 = 1.2;

/// An AI car
#[derive(Debug, Clone, PartialEq)]
pub struct Opponent {
    pub id: OpponentId,
    pub lane: usize,
    /// Distance ahead of the camera
    pub depth: f32,
    pub speed: f32,
    /// Color scheme index for drawing
    pub livery: u8,
}

/// Opponents per lane, ordered by depth then slot index
pub type LaneIndex = Vec<BTreeSet<(OrderedFloat<f32>, usize)>>;

/// Place the starting field at fixed depth intervals
pub fn initial_opponents(config: &SimConfig, rng: &mut dyn RandomSource) -> Vec<Opponent> {
    let mut opponents = Vec::with_capacity(config.opponent_count);
    for i in 0..config.opponent_count {
        let depth = OPPONENT_FIRST_DEPTH + i as f32 * config.opponent_spawn_gap;
        let opponent = spawn_opponent(OpponentId(i as u32), depth, &opponents, config, rng);
        opponents.push(opponent);
    }
    opponents
}

/// Create an opponent at `depth` with a lane that avoids the others
///
/// # Arguments
/// * `id` - Identity to give the car (respawns keep their slot's id)
/// * `depth` - Depth ahead of the camera
/// * `others` - Opponents already on the road
/// * `config` - Simulation settings
/// * `rng` - Source for lane order, speed and livery
pub fn spawn_opponent(
    id: OpponentId,
    depth: f32,
    others: &[Opponent],
    config: &SimConfig,
    rng: &mut dyn RandomSource,
) -> Opponent {
    let min_gap = config.opponent_spawn_gap * LANE_CLEAR_FACTOR;
    let lane = pick_spawn_lane(depth, others, Some(id), config.lane_count, min_gap, rng);
    let speed = rng.range(config.opponent_min_speed, config.opponent_max_speed);
    let livery = rng.index(LIVERY_COUNT as usize) as u8;

    Opponent {
        id,
        lane,
        depth,
        speed,
        livery,
    }
}

/// Choose a lane free of other cars near `depth`, trying lanes in random
/// order; falls back to any random lane when all are taken
pub fn pick_spawn_lane(
    depth: f32,
    others: &[Opponent],
    exclude: Option<OpponentId>,
    lane_count: usize,
    min_gap: f32,
    rng: &mut dyn RandomSource,
) -> usize {
    let mut lanes: Vec<usize> = (0..lane_count).collect();
    shuffle(rng, &mut lanes);

    for lane in lanes {
        if is_lane_clear(lane, depth, others, exclude, min_gap) {
            return lane;
        }
    }
    rng.index(lane_count)
}

/// No other car in `lane` within `min_gap` of `depth`
pub fn is_lane_clear(
    lane: usize,
    depth: f32,
    others: &[Opponent],
    exclude: Option<OpponentId>,
    min_gap: f32,
) -> bool {
    others
        .iter()
        .filter(|other| Some(other.id) != exclude && other.lane == lane)
        .all(|other| (other.depth - depth).abs() >= min_gap)
}

/// Snapshot of lane occupancy used for car-following queries
pub fn build_lane_index(opponents: &[Opponent], lane_count: usize) -> LaneIndex {
    let mut index: LaneIndex = vec![BTreeSet::new(); lane_count];
    for (slot, opponent) in opponents.iter().enumerate() {
        if let Some(lane) = index.get_mut(opponent.lane) {
            lane.insert((OrderedFloat(opponent.depth), slot));
        }
    }
    index
}

/// Closest car strictly ahead of `depth` in `lane`, as (depth, slot)
pub fn nearest_ahead(index: &LaneIndex, lane: usize, depth: f32) -> Option<(f32, usize)> {
    index
        .get(lane)?
        .range((
            Bound::Excluded((OrderedFloat(depth), usize::MAX)),
            Bound::Unbounded,
        ))
        .next()
        .map(|(ahead_depth, slot)| (ahead_depth.into_inner(), *slot))
}

/// Advance every opponent by one frame
///
/// Returns the ids of opponents that were recycled ahead of the player.
pub fn update_opponents(
    opponents: &mut [Opponent],
    player_speed: f32,
    delta_secs: f32,
    config: &SimConfig,
    rng: &mut dyn RandomSource,
) -> Vec<OpponentId> {
    let closing_scale = delta_secs * config.distance_scale;
    for opponent in opponents.iter_mut() {
        opponent.depth -= (player_speed - opponent.speed) * closing_scale;
    }

    // Follow decisions all see the same post-move snapshot
    let index = build_lane_index(opponents, config.lane_count);
    for opponent in opponents.iter_mut() {
        let blocked = nearest_ahead(&index, opponent.lane, opponent.depth)
            .is_some_and(|(ahead_depth, _)| ahead_depth - opponent.depth < FOLLOW_DISTANCE);

        if blocked {
            opponent.speed =
                (opponent.speed - FOLLOW_BRAKE * delta_secs).max(config.opponent_min_speed);
        } else {
            let target = rng.range(config.opponent_min_speed, config.opponent_max_speed);
            opponent.speed += (target - opponent.speed) * SPEED_PULL;
        }
    }

    let max_depth = config.view_distance * MAX_DEPTH_FACTOR;
    let mut respawned = Vec::new();
    for slot in 0..opponents.len() {
        if opponents[slot].depth < -BEHIND_CAMERA_MARGIN {
            let id = opponents[slot].id;
            let depth = config.view_distance * RESPAWN_DEPTH_FACTOR + rng.range(0.0, RESPAWN_JITTER);
            let replacement = spawn_opponent(id, depth, opponents, config, rng);
            debug!(
                "Respawned opponent {:?} in lane {} at depth {:.0}",
                id, replacement.lane, replacement.depth
            );
            opponents[slot] = replacement;
            respawned.push(id);
        }

        if opponents[slot].depth > max_depth {
            opponents[slot].depth = max_depth;
        }
    }

    respawned
}
