//! Core types for the racing simulation
//!
//! These are standalone types that don't depend on Bevy.

/// A wrapper type for opponent IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OpponentId(pub u32);

/// A wrapper type for item IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u32);

/// Effect of a pickup on the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// Consumed silently, counted for scoring
    Beneficial,
    /// Slows the car down and disturbs the view
    Harmful,
}

/// Held-key state for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DriveInput {
    pub accelerate: bool,
    pub brake: bool,
    pub steer_left: bool,
    pub steer_right: bool,
}

impl DriveInput {
    /// Steering axis in {-1, 0, 1}; both keys cancel out
    pub fn steer_axis(&self) -> f32 {
        let right = if self.steer_right { 1.0 } else { 0.0 };
        let left = if self.steer_left { 1.0 } else { 0.0 };
        right - left
    }
}

/// Which way the player sprite leans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SteerPose {
    Left,
    #[default]
    Neutral,
    Right,
}

impl SteerPose {
    pub fn sign(self) -> f32 {
        match self {
            SteerPose::Left => -1.0,
            SteerPose::Neutral => 0.0,
            SteerPose::Right => 1.0,
        }
    }
}

/// Size of the screen the road is projected onto
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Screen row of the horizon
    pub fn horizon(&self) -> f32 {
        (self.height * 0.38).floor()
    }

    /// Road width right at the camera
    pub fn road_max_width(&self) -> f32 {
        self.width * 0.92
    }

    /// Road width at the horizon
    pub fn road_min_width(&self) -> f32 {
        self.width * 0.18
    }

    pub fn center_x(&self) -> f32 {
        self.width * 0.5
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// Axis-aligned rectangle in screen space (origin top-left, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl ScreenRect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// Scale the rectangle around its center
    pub fn shrunk(&self, factor: f32) -> ScreenRect {
        let (cx, cy) = self.center();
        let w = self.w * factor;
        let h = self.h * factor;
        ScreenRect::new(cx - w * 0.5, cy - h * 0.5, w, h)
    }

    pub fn overlaps(&self, other: &ScreenRect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

/// Something that happened during the last simulation step
///
/// Presentation uses these as triggers for sparks, sounds and banners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimEvent {
    RaceStarted,
    /// The player hit an opponent; `spark_x`/`spark_y` is where sparks fly from
    Collision {
        opponent: OpponentId,
        spark_x: f32,
        spark_y: f32,
    },
    ItemPicked { item: ItemId, kind: ItemKind },
    Finished { elapsed: f32 },
    Failed { distance: f32 },
}
