//! World setup systems for camera, sky, grass and road bands

use bevy::prelude::*;

use super::components::{screen_to_world, BandPart, MainCamera, RoadBand, SimWorldResource};

/// Height of one road band in pixels
pub const BAND_HEIGHT: f32 = 4.0;

const SKY_COLOR: Color = Color::srgb(0.45, 0.68, 0.92);
const GRASS_COLOR: Color = Color::srgb(0.18, 0.42, 0.2);

/// System to setup the camera, backdrop, and the pool of road band sprites
pub fn setup_world(mut commands: Commands, sim_world: Res<SimWorldResource>) {
    let viewport = sim_world.0.projector.viewport();
    let horizon = viewport.horizon();

    commands.spawn((MainCamera, Camera2d, Transform::default()));

    // Sky above the horizon
    let sky_center = screen_to_world(viewport, viewport.width * 0.5, horizon * 0.5);
    commands.spawn((
        Sprite::from_color(SKY_COLOR, Vec2::new(viewport.width * 1.2, horizon + 40.0)),
        Transform::from_translation(sky_center.extend(0.0)),
    ));

    // Grass below it
    let ground_height = viewport.height - horizon;
    let grass_center = screen_to_world(
        viewport,
        viewport.width * 0.5,
        horizon + ground_height * 0.5,
    );
    commands.spawn((
        Sprite::from_color(GRASS_COLOR, Vec2::new(viewport.width * 1.2, ground_height + 40.0)),
        Transform::from_translation(grass_center.extend(0.1)),
    ));

    let lane_count = sim_world.0.config.lane_count;
    let mut row = horizon;
    while row < viewport.height {
        let mut parts = vec![BandPart::Surface, BandPart::RumbleLeft, BandPart::RumbleRight];
        parts.extend((1..lane_count).map(BandPart::LaneLine));

        for part in parts {
            commands.spawn((
                RoadBand { row, part },
                Sprite::from_color(Color::BLACK, Vec2::ONE),
                Transform::default(),
                Visibility::Hidden,
            ));
        }
        row += BAND_HEIGHT;
    }
}
