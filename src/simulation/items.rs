//! Lane pickups
//!
//! Items appear past the horizon at a fixed world-distance spacing, drift
//! toward the camera at the player's closing rate, and are picked up by
//! comparing their projected lane center with the player's lateral position.

use log::debug;
use std::f32::consts::TAU;

use super::config::{
    SimConfig, BEHIND_CAMERA_MARGIN, BENEFICIAL_CHANCE, ITEM_PICKUP_DEPTH, ITEM_PICKUP_TOLERANCE,
    ITEM_SPAWN_JITTER,
};
use super::projection::RoadProjector;
use super::random::RandomSource;
use super::types::{ItemId, ItemKind};

/// Spawn depth as a fraction of the view distance
const SPAWN_DEPTH_FACTOR: f32 = 0.9;
/// Lane centers are kept this many lane widths inside the road edges
const EDGE_INSET: f32 = 0.35;

/// A pickup on the road
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: ItemId,
    pub depth: f32,
    pub lane: usize,
    pub kind: ItemKind,
    /// Phase, speed and height of the hovering animation
    pub bob_phase: f32,
    pub bob_speed: f32,
    pub bob_amp: f32,
}

impl Item {
    /// Vertical bob offset in pixels at a given depth fraction
    pub fn bob_offset(&self, depth_fraction: f32) -> f32 {
        self.bob_phase.sin() * self.bob_amp * depth_fraction
    }
}

/// Create an item at `depth` with a random lane and kind
pub fn create_item(
    id: ItemId,
    depth: f32,
    config: &SimConfig,
    rng: &mut dyn RandomSource,
) -> Item {
    let lane = rng.index(config.lane_count);
    let kind = if rng.chance(BENEFICIAL_CHANCE) {
        ItemKind::Beneficial
    } else {
        ItemKind::Harmful
    };
    Item {
        id,
        depth,
        lane,
        kind,
        bob_phase: rng.range(0.0, TAU),
        bob_speed: rng.range(1.6, 2.8),
        bob_amp: rng.range(10.0, 18.0),
    }
}

/// Move items toward the camera and drop the ones that fell behind it
pub fn advance_items(items: &mut Vec<Item>, closing: f32, delta_secs: f32) {
    for item in items.iter_mut() {
        item.depth -= closing;
        item.bob_phase = (item.bob_phase + item.bob_speed * delta_secs) % TAU;
    }
    items.retain(|item| item.depth >= -BEHIND_CAMERA_MARGIN);
}

/// Tracks world-distance spacing between spawns
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemSpawner {
    pub last_spawn_distance: f32,
    next_id: u32,
}

impl ItemSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn one item if the player has covered the spawn gap since the last one
    pub fn spawn_if_needed(
        &mut self,
        items: &mut Vec<Item>,
        distance: f32,
        config: &SimConfig,
        rng: &mut dyn RandomSource,
    ) -> Option<ItemId> {
        if distance - self.last_spawn_distance < config.item_spawn_gap {
            return None;
        }
        self.last_spawn_distance = distance;

        let id = ItemId(self.next_id);
        self.next_id += 1;
        let depth = config.view_distance * SPAWN_DEPTH_FACTOR + rng.range(0.0, ITEM_SPAWN_JITTER);
        let item = create_item(id, depth, config, rng);
        debug!(
            "Spawned {:?} item {:?} in lane {} at depth {:.0}",
            item.kind, id, item.lane, depth
        );
        items.push(item);
        Some(id)
    }
}

/// Normalized [-1, 1] position of a lane center at a depth
///
/// The center is kept `inset_lanes` lane widths inside the road so nothing
/// appears to float off the asphalt.
pub fn lane_position_normalized(
    projector: &RoadProjector,
    depth: f32,
    lane: usize,
    curve_smoothed: f32,
    lateral: f32,
    inset_lanes: f32,
) -> f32 {
    let geometry = projector.project(depth, curve_smoothed, lateral);
    let inset = geometry.lane_width * inset_lanes;
    let lane_center = geometry.clamp_to_road(geometry.lane_center(lane), inset);
    geometry.normalized(lane_center)
}

/// Index of the item the player touches this frame, if any
///
/// Scans back to front and stops at the first hit, so at most one item is
/// collected per frame.
pub fn find_pickup(
    items: &[Item],
    projector: &RoadProjector,
    curve_smoothed: f32,
    lateral: f32,
) -> Option<usize> {
    items.iter().enumerate().rev().find_map(|(index, item)| {
        if item.depth <= 0.0 || item.depth >= ITEM_PICKUP_DEPTH {
            return None;
        }
        let item_x = lane_position_normalized(
            projector,
            item.depth,
            item.lane,
            curve_smoothed,
            lateral,
            EDGE_INSET,
        );
        ((lateral - item_x).abs() < ITEM_PICKUP_TOLERANCE).then_some(index)
    })
}
