//! Presentation-only effects: sparks, dust, camera shake and screen tints
//!
//! The simulation decides when these happen (events and effect timers);
//! this module only turns them into pixels.

use bevy::prelude::*;
use rand::Rng;

use super::components::{screen_to_world, MainCamera, Particle, ScreenTint, SimWorldResource};
use crate::simulation::{
    SimEvent, FLASH_DURATION, ITEM_SHAKE_DURATION, ITEM_SHAKE_STRENGTH, OVERLAY_DURATION,
    SHAKE_DURATION,
};

const SPARK_COUNT: usize = 16;
const SPARK_GRAVITY: f32 = 140.0;
const OVERLAY_ALPHA: f32 = 0.18;
const FLASH_ALPHA: f32 = 0.35;
const FADE_ALPHA: f32 = 0.85;

/// System to spawn sparks for collisions raised during the last frame
pub fn spawn_sparks(mut commands: Commands, sim_world: Res<SimWorldResource>) {
    let viewport = sim_world.0.projector.viewport();
    let mut rng = rand::rng();

    for event in sim_world.0.events() {
        let SimEvent::Collision {
            spark_x, spark_y, ..
        } = *event
        else {
            continue;
        };

        for _ in 0..SPARK_COUNT {
            let x = spark_x + rng.random_range(-8.0..8.0);
            let y = spark_y + rng.random_range(-5.0..5.0);
            let color = if rng.random_bool(0.5) {
                Color::srgb(1.0, 0.84, 0.35)
            } else {
                Color::srgb(1.0, 0.55, 0.17)
            };
            commands.spawn((
                Particle {
                    velocity: Vec2::new(
                        rng.random_range(-130.0..130.0),
                        rng.random_range(60.0..280.0),
                    ),
                    gravity: SPARK_GRAVITY,
                    life: rng.random_range(0.3..0.55),
                },
                Sprite::from_color(color, Vec2::splat(3.0)),
                Transform::from_translation(screen_to_world(viewport, x, y).extend(6.0)),
            ));
        }
    }
}

/// System to kick up dust behind the car while it runs on the shoulder
pub fn spawn_dust(mut commands: Commands, sim_world: Res<SimWorldResource>) {
    let world = &sim_world.0;
    if world.effects().dust_timer <= 0.0 || world.speed() <= 0.0 {
        return;
    }

    let viewport = world.projector.viewport();
    let rect = world.player_rect();
    let mut rng = rand::rng();

    for wheel_x in [rect.x + rect.w * 0.15, rect.x + rect.w * 0.85] {
        let origin = screen_to_world(viewport, wheel_x, rect.y + rect.h);
        commands.spawn((
            Particle {
                velocity: Vec2::new(rng.random_range(-40.0..40.0), rng.random_range(10.0..50.0)),
                gravity: 0.0,
                life: rng.random_range(0.25..0.45),
            },
            Sprite::from_color(Color::srgba(0.55, 0.45, 0.3, 0.7), Vec2::splat(6.0)),
            Transform::from_translation(origin.extend(4.5)),
        ));
    }
}

/// System to move particles and despawn expired ones
pub fn update_particles(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Particle, &mut Transform)>,
) {
    let dt = time.delta_secs();
    for (entity, mut particle, mut transform) in query.iter_mut() {
        particle.life -= dt;
        if particle.life <= 0.0 {
            commands.entity(entity).despawn();
            continue;
        }
        transform.translation.x += particle.velocity.x * dt;
        transform.translation.y += particle.velocity.y * dt;
        particle.velocity.y -= particle.gravity * dt;
    }
}

/// System to shake the camera after collisions and harmful pickups
pub fn apply_camera_shake(
    sim_world: Res<SimWorldResource>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    let effects = sim_world.0.effects();
    let mut power = 0.0;
    if effects.shake_time > 0.0 {
        power += effects.shake_time / SHAKE_DURATION * effects.shake_intensity;
    }
    if effects.item_shake_time > 0.0 {
        power += effects.item_shake_time / ITEM_SHAKE_DURATION * ITEM_SHAKE_STRENGTH;
    }

    let mut rng = rand::rng();
    for mut transform in camera_query.iter_mut() {
        if power > 0.0 {
            transform.translation.x = rng.random_range(-0.5..0.5) * power;
            transform.translation.y = rng.random_range(-0.5..0.5) * power;
        } else {
            transform.translation.x = 0.0;
            transform.translation.y = 0.0;
        }
    }
}

/// System to set the alpha of the full-screen tints
pub fn update_screen_tints(
    sim_world: Res<SimWorldResource>,
    mut query: Query<(&ScreenTint, &mut Sprite)>,
) {
    let world = &sim_world.0;
    let effects = world.effects();

    for (tint, mut sprite) in query.iter_mut() {
        sprite.color = match tint {
            ScreenTint::Overlay => {
                let strength = effects.overlay_timer / OVERLAY_DURATION;
                Color::srgba(0.03, 0.04, 0.06, strength * OVERLAY_ALPHA)
            }
            ScreenTint::Flash => {
                let strength = effects.flash_timer / FLASH_DURATION;
                Color::srgba(1.0, 1.0, 1.0, strength * FLASH_ALPHA)
            }
            ScreenTint::Fade => Color::srgba(0.0, 0.0, 0.0, world.finish_fade() * FADE_ALPHA),
        };
    }
}
