//! Input handling systems

use bevy::prelude::*;

use super::components::{FrameDriver, HeldInput, SimWorldResource};
use crate::simulation::DriveInput;

/// Translate held arrow keys into simulation input
pub fn read_drive_input(keyboard: Res<ButtonInput<KeyCode>>, mut held: ResMut<HeldInput>) {
    held.0 = DriveInput {
        accelerate: keyboard.pressed(KeyCode::ArrowUp),
        brake: keyboard.pressed(KeyCode::ArrowDown),
        steer_left: keyboard.pressed(KeyCode::ArrowLeft),
        steer_right: keyboard.pressed(KeyCode::ArrowRight),
    };
}

/// Restart the race on R
pub fn handle_reset(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut sim_world: ResMut<SimWorldResource>,
    mut driver: ResMut<FrameDriver>,
) {
    if keyboard.just_pressed(KeyCode::KeyR) {
        sim_world.0.reset();
        driver.0.resync();
    }
}

/// Handle basic keyboard input
pub fn handle_exit(keyboard: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keyboard.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
