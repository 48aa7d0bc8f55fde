//! UI module that draws the simulation state using Bevy
//!
//! This module is purely for presentation - all simulation logic is in the `simulation` module.
//! The UI reads state from `SimWorld` after each step and renders it as 2D sprites.

mod components;
mod effects;
mod hud;
mod input;
pub mod spawner;
mod sync;
mod world;

use bevy::prelude::*;

pub use components::{FrameDriver, HeldInput, SimWorldResource};

use effects::{apply_camera_shake, spawn_dust, spawn_sparks, update_particles, update_screen_tints};
use hud::{setup_hud, update_hud};
use input::{handle_exit, handle_reset, read_drive_input};
use spawner::spawn_initial_visuals;
use sync::{
    sync_finish_line, sync_items, sync_opponents, sync_player, sync_road, tick_simulation,
};
use world::setup_world;

/// Plugin to register all UI systems
///
/// Expects a `SimWorldResource` to be inserted by the caller.
pub struct RacerUIPlugin;

impl Plugin for RacerUIPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FrameDriver>()
            .init_resource::<HeldInput>()
            .add_systems(
                Startup,
                (
                    setup_world,
                    spawn_initial_visuals.after(setup_world),
                    setup_hud,
                ),
            )
            .add_systems(
                Update,
                (read_drive_input, handle_reset, handle_exit, tick_simulation).chain(),
            )
            .add_systems(
                Update,
                (
                    sync_road,
                    sync_opponents,
                    sync_items,
                    sync_player,
                    sync_finish_line,
                    update_hud,
                    spawn_sparks,
                    spawn_dust,
                    update_particles,
                    apply_camera_shake,
                    update_screen_tints,
                )
                    .after(tick_simulation),
            );
    }
}
