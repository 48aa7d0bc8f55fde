//! Spawns the sprite pools that mirror simulation entities
//!
//! Opponents are replaced in place by the simulation, so one sprite per
//! opponent slot is enough. Items come and go, so they draw from a fixed
//! pool and unused sprites stay hidden.

use bevy::prelude::*;

use super::components::{
    FinishLineSprite, ItemSprite, OpponentSprite, PlayerSprite, ScreenTint, SimWorldResource,
};

/// Items drawn at once; the spawn spacing keeps far fewer than this on screen
pub const ITEM_POOL_SIZE: usize = 12;

const PLAYER_COLOR: Color = Color::srgb(0.83, 0.14, 0.16);

/// System to spawn sprites for the player, opponents, items and screen tints
pub fn spawn_initial_visuals(mut commands: Commands, sim_world: Res<SimWorldResource>) {
    let world = &sim_world.0;
    let viewport = world.projector.viewport();

    for slot in 0..world.opponents().len() {
        commands.spawn((
            OpponentSprite(slot),
            Sprite::from_color(Color::WHITE, Vec2::ONE),
            Transform::default(),
            Visibility::Hidden,
        ));
    }

    for slot in 0..ITEM_POOL_SIZE {
        commands.spawn((
            ItemSprite(slot),
            Sprite::from_color(Color::WHITE, Vec2::ONE),
            Transform::default(),
            Visibility::Hidden,
        ));
    }

    let rect = world.player_rect();
    commands.spawn((
        PlayerSprite,
        Sprite::from_color(PLAYER_COLOR, Vec2::new(rect.w, rect.h)),
        Transform::from_xyz(0.0, 0.0, 5.0),
    ));

    commands.spawn((
        FinishLineSprite,
        Sprite::from_color(Color::srgb(0.96, 0.96, 0.96), Vec2::ONE),
        Transform::default(),
        Visibility::Hidden,
    ));

    let full_screen = Vec2::new(viewport.width * 1.2, viewport.height * 1.2);
    for (tint, z) in [
        (ScreenTint::Overlay, 9.0),
        (ScreenTint::Flash, 9.5),
        (ScreenTint::Fade, 9.8),
    ] {
        commands.spawn((
            tint,
            Sprite::from_color(Color::NONE, full_screen),
            Transform::from_xyz(0.0, 0.0, z),
        ));
    }
}
