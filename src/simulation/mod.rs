//! Standalone racing simulation module
//!
//! This module contains all the core simulation logic: track, projection,
//! physics, traffic, pickups, collisions and the race lifecycle. It runs
//! independently of the Bevy game engine and can be driven from the console
//! or from tests with synthetic frame deltas.

mod collision;
mod config;
mod effects;
mod frame_loop;
mod items;
mod player;
mod projection;
mod race;
mod random;
mod track;
mod traffic;
mod types;
mod world;

// Re-export public types for external use
// These may not be used within this crate but are part of the public API
#[allow(unused_imports)]
pub use collision::{find_collision, is_hit, opponent_rect, player_rect, CollisionStrategy};
#[allow(unused_imports)]
pub use config::*;
#[allow(unused_imports)]
pub use effects::EffectTimers;
#[allow(unused_imports)]
pub use frame_loop::{
    clamp_frame_delta, Clock, FrameLoop, ManualClock, SystemClock, MAX_FRAME_DELTA,
};
#[allow(unused_imports)]
pub use items::{
    advance_items, create_item, find_pickup, lane_position_normalized, Item, ItemSpawner,
};
#[allow(unused_imports)]
pub use player::PlayerState;
#[allow(unused_imports)]
pub use projection::{RoadGeometry, RoadProjector};
#[allow(unused_imports)]
pub use race::{RaceLifecycle, RaceState, RaceTransition};
#[allow(unused_imports)]
pub use random::{shuffle, RandomSource, ScriptedRandom, SeededRandom};
#[allow(unused_imports)]
pub use track::{Track, TrackSegment};
#[allow(unused_imports)]
pub use traffic::{
    build_lane_index, initial_opponents, is_lane_clear, nearest_ahead, pick_spawn_lane,
    spawn_opponent, update_opponents, LaneIndex, Opponent,
};
#[allow(unused_imports)]
pub use types::{
    DriveInput, ItemId, ItemKind, OpponentId, ScreenRect, SimEvent, SteerPose, Viewport,
};
pub use world::{RaceStats, SimWorld};
