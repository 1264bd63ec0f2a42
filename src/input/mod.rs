use bevy::prelude::*;

use crate::shared::*;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<KeyBindings>()
            .init_resource::<InputContext>()
            .init_resource::<PlayerIntent>()
            .add_systems(
                PreUpdate,
                (reset_and_read_input, manage_input_context).chain(),
            );
    }
}

/// The single point where hardware input becomes game intents. Everything
/// downstream consumes `PlayerIntent`; nothing else touches the keyboard.
pub fn reset_and_read_input(
    keys: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    context: Res<InputContext>,
    mut intent: ResMut<PlayerIntent>,
) {
    *intent = PlayerIntent::default();

    match *context {
        InputContext::Disabled => {}

        InputContext::Walking => {
            // First match wins: up, left, down, right.
            intent.move_dir = if keys.just_pressed(bindings.move_up)
                || keys.just_pressed(KeyCode::ArrowUp)
            {
                Some(Facing::North)
            } else if keys.just_pressed(bindings.move_left)
                || keys.just_pressed(KeyCode::ArrowLeft)
            {
                Some(Facing::West)
            } else if keys.just_pressed(bindings.move_down)
                || keys.just_pressed(KeyCode::ArrowDown)
            {
                Some(Facing::South)
            } else if keys.just_pressed(bindings.move_right)
                || keys.just_pressed(KeyCode::ArrowRight)
            {
                Some(Facing::East)
            } else {
                None
            };

            intent.menu_toggle = keys.just_pressed(bindings.menu_toggle);
        }

        InputContext::Menu => {
            intent.ui_up =
                keys.just_pressed(bindings.move_up) || keys.just_pressed(KeyCode::ArrowUp);
            intent.ui_down =
                keys.just_pressed(bindings.move_down) || keys.just_pressed(KeyCode::ArrowDown);
            intent.ui_confirm = keys.just_pressed(bindings.confirm);
            intent.ui_cancel =
                keys.just_pressed(bindings.menu_toggle) || keys.just_pressed(KeyCode::Escape);
        }
    }
}

/// Derives InputContext from the game state and overworld mode. ONE system,
/// replaces all per-domain guards. Animations lock input by construction:
/// a running walk or fade means the context is Disabled.
pub fn manage_input_context(
    game_state: Res<State<GameState>>,
    overworld: Res<OverworldState>,
    mut context: ResMut<InputContext>,
) {
    *context = match *game_state.get() {
        GameState::Loading => InputContext::Disabled,
        GameState::Overworld => match overworld.mode {
            OverworldMode::Walking if overworld.walk.is_none() => InputContext::Walking,
            OverworldMode::Walking => InputContext::Disabled,
            OverworldMode::MenuOpen => InputContext::Menu,
            OverworldMode::Transitioning => InputContext::Disabled,
        },
        GameState::Battle | GameState::Collection | GameState::GameOver => InputContext::Menu,
    };
}
