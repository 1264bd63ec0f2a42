//! Results screen shown when the step budget runs out.

use bevy::app::AppExit;
use bevy::prelude::*;

use crate::shared::*;

#[derive(Component)]
pub struct EndScreenRoot;

pub fn spawn_end_screen(
    mut commands: Commands,
    player: Res<PlayerState>,
    mut fade_in: EventWriter<FadeInRequest>,
) {
    // The screen is black from the fade-out; reveal the results.
    fade_in.send(FadeInRequest { resume: None });

    let caught_line = if player.caught.is_empty() {
        "You didn't catch anything this time.".to_string()
    } else {
        let names: Vec<&str> = player.caught.iter().map(|p| p.name.as_str()).collect();
        format!("You caught {}: {}", player.caught.len(), names.join(", "))
    };

    commands
        .spawn((
            EndScreenRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(18.0),
                ..default()
            },
            BackgroundColor(Color::srgb(0.08, 0.1, 0.12)),
            GlobalZIndex(20),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("The safari is over!"),
                TextFont {
                    font_size: 36.0,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.9, 0.6)),
            ));
            parent.spawn((
                Text::new(caught_line),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.9, 0.9)),
            ));
            parent.spawn((
                Text::new(format!("Safari balls left: {}", player.safari_balls)),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.9, 0.9)),
            ));
            parent.spawn((
                Text::new("Esc: Quit"),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.6, 0.65, 0.7)),
            ));
        });
}

/// The end screen is terminal; the only exit is quitting the app.
pub fn end_screen_input(intent: Res<PlayerIntent>, mut exit: EventWriter<AppExit>) {
    if intent.ui_cancel {
        exit.send(AppExit::Success);
    }
}
