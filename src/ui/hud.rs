//! Heads-up display: speed, time left, race status and countdown banner

use bevy::prelude::*;

use super::components::{HudText, SimWorldResource};
use crate::simulation::RaceState;

/// System to create the HUD text nodes
pub fn setup_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Auto,
                height: Val::Auto,
                position_type: PositionType::Absolute,
                top: Val::Px(10.0),
                left: Val::Px(10.0),
                padding: UiRect::all(Val::Px(10.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(5.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
        ))
        .with_children(|parent| {
            for (kind, label, size) in [
                (HudText::Speed, "Speed: 0", 22.0),
                (HudText::Timer, "Time: 45.0", 18.0),
                (HudText::Tally, "Hits: 0", 14.0),
                (HudText::Status, "", 18.0),
            ] {
                parent.spawn((
                    Text::new(label),
                    TextFont {
                        font_size: size,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                    kind,
                ));
            }
        });

    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            top: Val::Percent(28.0),
            justify_content: JustifyContent::Center,
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 96.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                HudText::Countdown,
            ));
        });
}

/// System to refresh HUD text from the simulation
pub fn update_hud(
    sim_world: Res<SimWorldResource>,
    mut text_query: Query<(&mut Text, &mut TextColor, &HudText)>,
) {
    let world = &sim_world.0;

    for (mut text, mut color, kind) in text_query.iter_mut() {
        match kind {
            HudText::Speed => {
                **text = format!("Speed: {:.0}", world.speed());
            }
            HudText::Timer => {
                **text = format!("Time: {:.1}", world.remaining_time());
            }
            HudText::Tally => {
                **text = format!(
                    "Hits: {} | Pickups: {} / {}",
                    world.stats.collisions,
                    world.stats.beneficial_pickups,
                    world.stats.harmful_pickups
                );
            }
            HudText::Status => {
                let (label, tint) = match world.race_state() {
                    RaceState::Finished => ("FINISH!", Color::srgb(0.4, 1.0, 0.4)),
                    RaceState::Failed => ("TIME UP", Color::srgb(1.0, 0.35, 0.35)),
                    _ => ("", Color::WHITE),
                };
                **text = label.to_string();
                color.0 = tint;
            }
            HudText::Countdown => match world.race.countdown_label() {
                Some(label) => {
                    color.0 = if label == "GO!" {
                        Color::srgb(1.0, 0.88, 0.3)
                    } else {
                        Color::WHITE
                    };
                    **text = label;
                }
                None => {
                    **text = String::new();
                }
            },
        }
    }
}
