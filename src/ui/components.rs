//! UI components and resources for linking Bevy entities to simulation state

use bevy::prelude::*;

use crate::simulation::{DriveInput, FrameLoop, ManualClock, SimWorld, Viewport};

/// Resource wrapper for the simulation world
#[derive(Resource)]
pub struct SimWorldResource(pub SimWorld);

/// Frame loop fed with Bevy's elapsed time each frame
#[derive(Resource)]
pub struct FrameDriver(pub FrameLoop<ManualClock>);

impl Default for FrameDriver {
    fn default() -> Self {
        Self(FrameLoop::new(ManualClock::new()))
    }
}

/// Keys held this frame, translated into simulation input
#[derive(Resource, Default)]
pub struct HeldInput(pub DriveInput);

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Which piece of a road scanline band a sprite draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandPart {
    Surface,
    RumbleLeft,
    RumbleRight,
    /// Divider to the right of lane `n - 1`
    LaneLine(usize),
}

/// One horizontal band of road, drawn at a fixed screen row
#[derive(Component)]
pub struct RoadBand {
    /// Screen row of the band's top edge
    pub row: f32,
    pub part: BandPart,
}

/// Links a sprite to an opponent slot
#[derive(Component)]
pub struct OpponentSprite(pub usize);

/// Pooled sprite for drawing items
#[derive(Component)]
pub struct ItemSprite(pub usize);

#[derive(Component)]
pub struct PlayerSprite;

#[derive(Component)]
pub struct FinishLineSprite;

/// Full-screen tint layers
#[derive(Component, Clone, Copy, PartialEq, Eq)]
pub enum ScreenTint {
    /// Darkening after a harmful pickup
    Overlay,
    /// White flash after a harmful pickup
    Flash,
    /// Fade to black after the finish line
    Fade,
}

/// Short-lived spark or dust particle
#[derive(Component)]
pub struct Particle {
    pub velocity: Vec2,
    pub gravity: f32,
    pub life: f32,
}

/// HUD text elements
#[derive(Component, Clone, Copy, PartialEq, Eq)]
pub enum HudText {
    Speed,
    Timer,
    Status,
    Countdown,
    Tally,
}

/// Convert a top-left-origin screen point into Bevy 2D world coordinates
pub fn screen_to_world(viewport: Viewport, x: f32, y: f32) -> Vec2 {
    Vec2::new(x - viewport.width * 0.5, viewport.height * 0.5 - y)
}
