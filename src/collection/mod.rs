//! Collection screen: everything caught this safari, in capture order.

use bevy::prelude::*;

use crate::shared::*;

pub struct CollectionPlugin;

impl Plugin for CollectionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Collection), spawn_collection_screen)
            .add_systems(OnExit(GameState::Collection), despawn_collection_screen)
            .add_systems(
                Update,
                handle_collection_intents.run_if(in_state(GameState::Collection)),
            );
    }
}

#[derive(Component)]
struct CollectionRoot;

fn spawn_collection_screen(
    mut commands: Commands,
    player: Res<PlayerState>,
    mut fade_in: EventWriter<FadeInRequest>,
) {
    fade_in.send(FadeInRequest { resume: None });

    commands
        .spawn((
            CollectionRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(10.0),
                ..default()
            },
            BackgroundColor(Color::srgb(0.1, 0.12, 0.16)),
            GlobalZIndex(20),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Collection"),
                TextFont {
                    font_size: 32.0,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.9, 0.6)),
            ));

            if player.caught.is_empty() {
                parent.spawn((
                    Text::new("Nothing caught yet."),
                    TextFont {
                        font_size: 20.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.8, 0.8, 0.8)),
                ));
            } else {
                for pokemon in &player.caught {
                    parent.spawn((
                        Text::new(format!("{}  ({:?})", pokemon.name, pokemon.rarity)),
                        TextFont {
                            font_size: 20.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.85, 0.9, 0.85)),
                    ));
                }
            }

            parent.spawn((
                Text::new("Enter: Back"),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.6, 0.65, 0.7)),
            ));
        });
}

fn despawn_collection_screen(mut commands: Commands, query: Query<Entity, With<CollectionRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

/// Any confirm or cancel returns to the overworld menu.
fn handle_collection_intents(
    intent: Res<PlayerIntent>,
    mut return_ctx: ResMut<ReturnContext>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if intent.ui_confirm || intent.ui_cancel {
        return_ctx.from = Some(SceneOrigin::Collection);
        next_state.set(GameState::Overworld);
    }
}
