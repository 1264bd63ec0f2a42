//! Safari menu: steps readout plus two options, selected with an
//! oscillating arrow.
//!
//! The menu exists exactly as long as the `SafariMenuState` resource does.
//! Opening inserts it (cursor reset to the top), closing removes it; the
//! UI entities follow via `resource_added` / `resource_removed` conditions.

use bevy::prelude::*;

use crate::shared::*;

pub const MENU_OPTIONS: &[&str] = &["See Collection", "Close"];
const COLLECTION_INDEX: usize = 0;
const CLOSE_INDEX: usize = 1;

// ═══════════════════════════════════════════════════════════════════════
// STATE
// ═══════════════════════════════════════════════════════════════════════

/// Cursor and arrow animation for the open menu.
#[derive(Resource, Debug, Clone)]
pub struct SafariMenuState {
    pub cursor: usize,
    pub arrow_push: f32,
    pub arrow_going_right: bool,
}

impl SafariMenuState {
    pub fn open() -> Self {
        Self {
            cursor: 0,
            arrow_push: 0.0,
            arrow_going_right: true,
        }
    }

    /// No wraparound in either direction.
    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        self.cursor = (self.cursor + 1).min(MENU_OPTIONS.len() - 1);
    }

    /// One triangular-wave step for the selection arrow.
    pub fn tick_arrow(&mut self) {
        if self.arrow_going_right {
            self.arrow_push += MENU_ARROW_STEP;
            if self.arrow_push >= MENU_ARROW_MAX {
                self.arrow_push = MENU_ARROW_MAX;
                self.arrow_going_right = false;
            }
        } else {
            self.arrow_push -= MENU_ARROW_STEP;
            if self.arrow_push <= 0.0 {
                self.arrow_push = 0.0;
                self.arrow_going_right = true;
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct SafariMenuRoot;

#[derive(Component)]
pub struct MenuArrowSlot(pub usize);

#[derive(Component)]
pub struct MenuOptionLabel(pub usize);

#[derive(Component)]
pub struct StepsReadout;

// ═══════════════════════════════════════════════════════════════════════
// LOGIC
// ═══════════════════════════════════════════════════════════════════════

/// Menu-mode intent handler. Confirm on "See Collection" fades out to the
/// collection scene; "Close" or cancel resumes walking, which immediately
/// ends the safari if the step budget ran out while the menu was open.
pub fn handle_menu_intents(
    intent: Res<PlayerIntent>,
    player: Res<PlayerState>,
    mut overworld: ResMut<OverworldState>,
    state: Option<ResMut<SafariMenuState>>,
    mut commands: Commands,
    mut fade_out: EventWriter<FadeOutRequest>,
) {
    if overworld.mode != OverworldMode::MenuOpen {
        return;
    }
    let Some(mut state) = state else {
        return;
    };

    if intent.ui_up {
        state.move_up();
    }
    if intent.ui_down {
        state.move_down();
    }

    if intent.ui_cancel || (intent.ui_confirm && state.cursor == CLOSE_INDEX) {
        commands.remove_resource::<SafariMenuState>();
        overworld.mode = OverworldMode::Walking;
        if player.steps_remaining == 0 {
            overworld.mode = OverworldMode::Transitioning;
            fade_out.send(FadeOutRequest {
                to: SceneTarget::GameOver,
            });
        }
        return;
    }

    if intent.ui_confirm && state.cursor == COLLECTION_INDEX {
        overworld.mode = OverworldMode::Transitioning;
        fade_out.send(FadeOutRequest {
            to: SceneTarget::Collection,
        });
    }
}

pub fn animate_menu_arrow(overworld: Res<OverworldState>, mut state: ResMut<SafariMenuState>) {
    if overworld.mode == OverworldMode::MenuOpen {
        state.tick_arrow();
    }
}

/// The menu UI never outlives the overworld scene.
pub fn close_menu(mut commands: Commands) {
    commands.remove_resource::<SafariMenuState>();
}

// ═══════════════════════════════════════════════════════════════════════
// UI
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_safari_menu(mut commands: Commands, player: Res<PlayerState>) {
    commands
        .spawn((
            SafariMenuRoot,
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(16.0),
                top: Val::Px(16.0),
                width: Val::Px(220.0),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(12.0)),
                row_gap: Val::Px(8.0),
                border: UiRect::all(Val::Px(3.0)),
                ..default()
            },
            BackgroundColor(Color::srgb(0.96, 0.96, 0.9)),
            BorderColor(Color::srgb(0.15, 0.15, 0.2)),
            GlobalZIndex(10),
        ))
        .with_children(|panel| {
            panel.spawn((
                StepsReadout,
                Text::new(format!("Steps: {}", player.steps_remaining)),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(0.1, 0.1, 0.15)),
            ));

            for (i, label) in MENU_OPTIONS.iter().enumerate() {
                panel
                    .spawn(Node {
                        flex_direction: FlexDirection::Row,
                        column_gap: Val::Px(6.0),
                        ..default()
                    })
                    .with_children(|row| {
                        row.spawn((
                            MenuArrowSlot(i),
                            Node::default(),
                            Text::new(""),
                            TextFont {
                                font_size: 18.0,
                                ..default()
                            },
                            TextColor(Color::srgb(0.1, 0.1, 0.15)),
                        ));
                        row.spawn((
                            MenuOptionLabel(i),
                            Text::new(*label),
                            TextFont {
                                font_size: 18.0,
                                ..default()
                            },
                            TextColor(Color::srgb(0.1, 0.1, 0.15)),
                        ));
                    });
            }
        });
}

pub fn despawn_safari_menu(mut commands: Commands, query: Query<Entity, With<SafariMenuRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

/// Keeps the steps readout current and parks the arrow next to the
/// selected option, nudged right by the oscillation.
pub fn update_menu_visuals(
    state: Res<SafariMenuState>,
    player: Res<PlayerState>,
    mut steps_query: Query<&mut Text, (With<StepsReadout>, Without<MenuArrowSlot>)>,
    mut arrow_query: Query<(&MenuArrowSlot, &mut Text, &mut Node), Without<StepsReadout>>,
) {
    if let Ok(mut text) = steps_query.get_single_mut() {
        text.0 = format!("Steps: {}", player.steps_remaining);
    }

    for (slot, mut text, mut node) in arrow_query.iter_mut() {
        if slot.0 == state.cursor {
            text.0 = ">".to_string();
            node.margin.left = Val::Px(state.arrow_push);
        } else {
            text.0 = String::new();
            node.margin.left = Val::Px(0.0);
        }
    }
}
