//! Player/opponent contact tests in projected screen space

use super::config::{COLLISION_DEPTH, HITBOX_SCALE, LANE_HIT_TOLERANCE};
use super::items::lane_position_normalized;
use super::projection::{RoadGeometry, RoadProjector};
use super::traffic::Opponent;
use super::types::{ScreenRect, Viewport};

/// Car body size relative to the viewport, at sprite scale 1
const CAR_WIDTH_FRACTION: f32 = 0.08;
const CAR_HEIGHT_FRACTION: f32 = 0.12;
/// Gap between the player sprite and the bottom of the screen
const PLAYER_BOTTOM_MARGIN: f32 = 30.0;
/// Horizontal sprite sway per unit of lateral position, as a fraction of width
const PLAYER_SWAY: f32 = 0.08;
/// Opponent sprites stay this many car widths inside the road edges
const OPPONENT_EDGE_INSET: f32 = 0.6;
/// Part of an opponent sprite drawn above its road row
const OPPONENT_LIFT: f32 = 0.8;
/// Lane-center inset for the lane-distance test, in lane widths
const LANE_EDGE_INSET: f32 = 0.4;

/// How player/opponent contact is decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionStrategy {
    /// Overlap of shrunken projected bounding boxes
    #[default]
    ProjectedRect,
    /// Normalized lane-center distance, cheaper but coarse at lane edges
    LaneDistance,
}

/// Screen rectangle of the player car
pub fn player_rect(viewport: Viewport, lateral: f32) -> ScreenRect {
    let height = viewport.height * CAR_HEIGHT_FRACTION;
    let width = viewport.width * CAR_WIDTH_FRACTION;
    let x = viewport.center_x() - width * 0.5 + lateral * viewport.width * PLAYER_SWAY;
    let y = viewport.height - height - PLAYER_BOTTOM_MARGIN;
    ScreenRect::new(x, y, width, height)
}

/// Screen rectangle of a car in `lane` on the road cross-section `geometry`
pub fn opponent_rect(projector: &RoadProjector, geometry: &RoadGeometry, lane: usize) -> ScreenRect {
    let viewport = projector.viewport();
    let scale = geometry.sprite_scale();
    let height = viewport.height * CAR_HEIGHT_FRACTION * scale;
    let width = viewport.width * CAR_WIDTH_FRACTION * scale;
    let center_x = geometry.clamp_to_road(geometry.lane_center(lane), width * OPPONENT_EDGE_INSET);
    let y = projector.screen_y(geometry.depth_fraction) - height * OPPONENT_LIFT;
    ScreenRect::new(center_x - width * 0.5, y, width, height)
}

/// Does the player touch this opponent?
pub fn is_hit(
    opponent: &Opponent,
    projector: &RoadProjector,
    curve_smoothed: f32,
    lateral: f32,
    strategy: CollisionStrategy,
) -> bool {
    if opponent.depth <= 0.0 || opponent.depth >= COLLISION_DEPTH {
        return false;
    }

    match strategy {
        CollisionStrategy::ProjectedRect => {
            let player = player_rect(projector.viewport(), lateral).shrunk(HITBOX_SCALE);
            let geometry = projector.project(opponent.depth, curve_smoothed, lateral);
            opponent_rect(projector, &geometry, opponent.lane)
                .shrunk(HITBOX_SCALE)
                .overlaps(&player)
        }
        CollisionStrategy::LaneDistance => {
            let opponent_x = lane_position_normalized(
                projector,
                opponent.depth,
                opponent.lane,
                curve_smoothed,
                lateral,
                LANE_EDGE_INSET,
            );
            (lateral - opponent_x).abs() < LANE_HIT_TOLERANCE
        }
    }
}

/// Index of the first opponent the player touches, in collection order
pub fn find_collision(
    opponents: &[Opponent],
    projector: &RoadProjector,
    curve_smoothed: f32,
    lateral: f32,
    strategy: CollisionStrategy,
) -> Option<usize> {
    opponents
        .iter()
        .position(|opponent| is_hit(opponent, projector, curve_smoothed, lateral, strategy))
}
