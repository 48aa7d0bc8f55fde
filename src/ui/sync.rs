//! Systems for syncing Bevy entities with simulation state
//!
//! Every position here comes from `SimWorld::project_at`, the same
//! projection the simulation used for hit-testing this frame.

use bevy::prelude::*;

use super::components::{
    screen_to_world, BandPart, FinishLineSprite, FrameDriver, HeldInput, ItemSprite,
    OpponentSprite, PlayerSprite, RoadBand, SimWorldResource,
};
use super::world::BAND_HEIGHT;
use crate::simulation::{opponent_rect, ItemKind, STRIPE_LENGTH};

const ROAD_LIGHT: Color = Color::srgb(0.35, 0.35, 0.35);
const ROAD_DARK: Color = Color::srgb(0.31, 0.31, 0.31);
const RUMBLE_LIGHT: Color = Color::srgb(0.85, 0.85, 0.85);
const RUMBLE_DARK: Color = Color::srgb(0.72, 0.15, 0.15);
const LANE_COLOR: Color = Color::srgb(0.96, 0.96, 0.96);
const LIVERIES: [Color; 4] = [
    Color::srgb(0.16, 0.66, 1.0),
    Color::srgb(0.96, 0.64, 0.13),
    Color::srgb(0.42, 0.84, 0.42),
    Color::srgb(1.0, 0.31, 0.48),
];

/// System to run one simulation frame
pub fn tick_simulation(
    time: Res<Time>,
    held: Res<HeldInput>,
    mut driver: ResMut<FrameDriver>,
    mut sim_world: ResMut<SimWorldResource>,
) {
    driver.0.clock_mut().set(time.elapsed());
    driver.0.tick(&mut sim_world.0, held.0);
}

/// System to lay out the road bands for the current curvature and lateral position
pub fn sync_road(
    sim_world: Res<SimWorldResource>,
    mut band_query: Query<(&RoadBand, &mut Sprite, &mut Transform, &mut Visibility)>,
) {
    let world = &sim_world.0;
    let viewport = world.projector.viewport();
    let distance = world.distance();

    for (band, mut sprite, mut transform, mut visibility) in band_query.iter_mut() {
        let depth = world.projector.depth_for_row(band.row + BAND_HEIGHT * 0.5);
        let geometry = world.project_at(depth);
        let stripe = ((distance + depth) / STRIPE_LENGTH).floor() as i64;
        let light = stripe.rem_euclid(2) == 0;
        let y = band.row + BAND_HEIGHT * 0.5;

        let (left, right, color, z) = match band.part {
            BandPart::Surface => (
                geometry.road_left,
                geometry.road_right,
                if light { ROAD_LIGHT } else { ROAD_DARK },
                1.0,
            ),
            BandPart::RumbleLeft => {
                let rumble = geometry.road_width * 0.08;
                (
                    geometry.road_left - rumble,
                    geometry.road_left,
                    if light { RUMBLE_LIGHT } else { RUMBLE_DARK },
                    1.1,
                )
            }
            BandPart::RumbleRight => {
                let rumble = geometry.road_width * 0.08;
                (
                    geometry.road_right,
                    geometry.road_right + rumble,
                    if light { RUMBLE_LIGHT } else { RUMBLE_DARK },
                    1.1,
                )
            }
            BandPart::LaneLine(divider) => {
                if !light {
                    *visibility = Visibility::Hidden;
                    continue;
                }
                let x = geometry.lane_left + geometry.lane_width * divider as f32;
                let half = (geometry.road_width * 0.004).max(1.0);
                (x - half, x + half, LANE_COLOR, 1.2)
            }
        };

        let width = (right - left).max(0.0);
        let center = screen_to_world(viewport, (left + right) * 0.5, y);
        sprite.color = color;
        sprite.custom_size = Some(Vec2::new(width, BAND_HEIGHT + 0.5));
        transform.translation = center.extend(z);
        *visibility = Visibility::Visible;
    }
}

/// System to place opponent sprites
pub fn sync_opponents(
    sim_world: Res<SimWorldResource>,
    mut query: Query<(&OpponentSprite, &mut Sprite, &mut Transform, &mut Visibility)>,
) {
    let world = &sim_world.0;
    let viewport = world.projector.viewport();

    for (link, mut sprite, mut transform, mut visibility) in query.iter_mut() {
        let Some(opponent) = world.opponents().get(link.0) else {
            *visibility = Visibility::Hidden;
            continue;
        };
        let geometry = world.project_at(opponent.depth);
        if !geometry.is_on_screen() {
            *visibility = Visibility::Hidden;
            continue;
        }

        let rect = opponent_rect(&world.projector, &geometry, opponent.lane);
        let (cx, cy) = rect.center();
        sprite.color = LIVERIES[opponent.livery as usize % LIVERIES.len()];
        sprite.custom_size = Some(Vec2::new(rect.w, rect.h));
        transform.translation =
            screen_to_world(viewport, cx, cy).extend(3.0 + geometry.depth_fraction);
        *visibility = Visibility::Visible;
    }
}

/// System to place item sprites from the pool
pub fn sync_items(
    sim_world: Res<SimWorldResource>,
    mut query: Query<(&ItemSprite, &mut Sprite, &mut Transform, &mut Visibility)>,
) {
    let world = &sim_world.0;
    let viewport = world.projector.viewport();

    for (slot, mut sprite, mut transform, mut visibility) in query.iter_mut() {
        let Some(item) = world.items().get(slot.0) else {
            *visibility = Visibility::Hidden;
            continue;
        };
        let geometry = world.project_at(item.depth);
        if !geometry.is_on_screen() {
            *visibility = Visibility::Hidden;
            continue;
        }

        let size = geometry.lane_width * 0.22;
        let x = geometry.clamp_to_road(geometry.lane_center(item.lane), size * 0.7);
        let y = world.projector.screen_y(geometry.depth_fraction) - size * 0.1
            - item.bob_offset(geometry.depth_fraction);

        sprite.color = match item.kind {
            ItemKind::Beneficial => Color::srgb(0.23, 0.82, 0.44),
            ItemKind::Harmful => Color::srgb(1.0, 0.24, 0.24),
        };
        sprite.custom_size = Some(Vec2::splat(size));
        transform.translation =
            screen_to_world(viewport, x, y).extend(2.5 + geometry.depth_fraction);
        *visibility = Visibility::Visible;
    }
}

/// System to place the player car and lean it with the steering pose
pub fn sync_player(
    sim_world: Res<SimWorldResource>,
    mut query: Query<(&mut Sprite, &mut Transform), With<PlayerSprite>>,
) {
    let world = &sim_world.0;
    let viewport = world.projector.viewport();
    let rect = world.player_rect();
    let (cx, cy) = rect.center();

    for (mut sprite, mut transform) in query.iter_mut() {
        sprite.custom_size = Some(Vec2::new(rect.w, rect.h));
        transform.translation = screen_to_world(viewport, cx, cy).extend(5.0);
        transform.rotation = Quat::from_rotation_z(-world.steer_pose().sign() * 0.08);
    }
}

/// System to draw the finish line once it is within view
pub fn sync_finish_line(
    sim_world: Res<SimWorldResource>,
    mut query: Query<(&mut Sprite, &mut Transform, &mut Visibility), With<FinishLineSprite>>,
) {
    let world = &sim_world.0;
    let viewport = world.projector.viewport();
    let depth = world.finish_line_depth();
    let geometry = world.project_at(depth);

    for (mut sprite, mut transform, mut visibility) in query.iter_mut() {
        if depth <= 0.0 || !geometry.is_on_screen() {
            *visibility = Visibility::Hidden;
            continue;
        }
        let height = (26.0 * geometry.depth_fraction).max(6.0);
        let y = world.projector.screen_y(geometry.depth_fraction) - height * 0.5;
        sprite.custom_size = Some(Vec2::new(geometry.road_width, height));
        transform.translation = screen_to_world(viewport, geometry.center, y).extend(2.0);
        *visibility = Visibility::Visible;
    }
}
