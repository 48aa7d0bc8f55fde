//! Perspective road projection
//!
//! Maps a depth ahead of the camera to screen-space road geometry. This is
//! the only place that knows where lane N sits at depth Z, so traffic,
//! pickups, collisions and drawing all go through `RoadProjector::project`.

use anyhow::{ensure, Result};

use super::types::Viewport;

/// Horizontal bend applied at the horizon, as a fraction of viewport width
const CURVE_BEND: f32 = 0.6;
/// How far the road slides sideways as the car moves across it
const CAMERA_FOLLOW: f32 = 0.32;
/// Share of the road width taken by lanes; the rest is shoulder
const LANE_AREA: f32 = 0.9;
const SHOULDER: f32 = (1.0 - LANE_AREA) * 0.5;

/// Road cross-section at one depth, in screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadGeometry {
    /// 1 at the camera, 0 at the horizon; outside that range is off screen
    pub depth_fraction: f32,
    pub road_width: f32,
    pub center: f32,
    pub lane_width: f32,
    pub road_left: f32,
    pub road_right: f32,
    pub lane_left: f32,
    pub lane_right: f32,
}

impl RoadGeometry {
    /// Unclamped screen x of a lane's center
    pub fn lane_center(&self, lane: usize) -> f32 {
        self.lane_left + self.lane_width * (lane as f32 + 0.5)
    }

    /// Keep an x inside the road, `inset` pixels away from either edge
    pub fn clamp_to_road(&self, x: f32, inset: f32) -> f32 {
        let edge_left = self.road_left + inset;
        let edge_right = self.road_right - inset;
        x.max(edge_left).min(edge_right)
    }

    /// Screen x converted to the [-1, 1] space of the player's lateral position
    pub fn normalized(&self, x: f32) -> f32 {
        let half = self.road_width * 0.5;
        if half.abs() <= f32::EPSILON {
            return 0.0;
        }
        (x - self.center) / half
    }

    /// True when the depth lies between the camera and the horizon
    pub fn is_on_screen(&self) -> bool {
        self.depth_fraction > 0.0 && self.depth_fraction <= 1.0
    }

    /// Size multiplier for sprites drawn at this depth
    pub fn sprite_scale(&self) -> f32 {
        0.45 + 0.55 * self.depth_fraction
    }
}

/// Projection parameters fixed for the lifetime of a world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadProjector {
    viewport: Viewport,
    view_distance: f32,
    lane_count: usize,
}

impl RoadProjector {
    pub fn new(viewport: Viewport, view_distance: f32, lane_count: usize) -> Result<Self> {
        ensure!(
            viewport.width > 0.0 && viewport.height > 0.0,
            "cannot project onto a {}x{} viewport",
            viewport.width,
            viewport.height
        );
        ensure!(
            view_distance > 0.0,
            "view distance must be positive, got {}",
            view_distance
        );
        ensure!(lane_count > 0, "road needs at least one lane");
        Ok(Self {
            viewport,
            view_distance,
            lane_count,
        })
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn view_distance(&self) -> f32 {
        self.view_distance
    }

    pub fn lane_count(&self) -> usize {
        self.lane_count
    }

    /// Road geometry at `depth` for the current curvature and lateral position
    pub fn project(&self, depth: f32, curve_smoothed: f32, lateral: f32) -> RoadGeometry {
        let p = 1.0 - depth / self.view_distance;
        let min_width = self.viewport.road_min_width();
        let max_width = self.viewport.road_max_width();
        let road_width = min_width + p * (max_width - min_width);

        let far = 1.0 - p;
        let curve_offset = far * far * curve_smoothed * self.viewport.width * CURVE_BEND;
        let player_offset = lateral * road_width * CAMERA_FOLLOW;
        let center = self.viewport.center_x() + curve_offset - player_offset;

        let lane_width = road_width * LANE_AREA / self.lane_count as f32;
        let road_left = center - road_width * 0.5;
        let road_right = center + road_width * 0.5;
        let lane_left = road_left + road_width * SHOULDER;
        let lane_right = lane_left + lane_width * self.lane_count as f32;

        RoadGeometry {
            depth_fraction: p,
            road_width,
            center,
            lane_width,
            road_left,
            road_right,
            lane_left,
            lane_right,
        }
    }

    /// Screen row at which a depth fraction is drawn
    pub fn screen_y(&self, depth_fraction: f32) -> f32 {
        let horizon = self.viewport.horizon();
        horizon + depth_fraction * (self.viewport.height - horizon)
    }

    /// Depth drawn on a given screen row; rows above the horizon map past it
    pub fn depth_for_row(&self, row: f32) -> f32 {
        let horizon = self.viewport.horizon();
        let span = self.viewport.height - horizon;
        if span <= 0.0 {
            return self.view_distance;
        }
        let p = (row - horizon) / span;
        (1.0 - p) * self.view_distance
    }
}
