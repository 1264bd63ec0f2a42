pub mod end_screen;
pub mod transitions;

use bevy::prelude::*;

use crate::shared::*;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        // ─── FADE OVERLAY — always present ───
        app.init_resource::<transitions::ScreenFade>();
        app.add_systems(Startup, transitions::spawn_fade_overlay);
        app.add_systems(
            Update,
            (transitions::handle_fade_requests, transitions::update_fade).chain(),
        );

        // ─── END SCREEN ───
        app.add_systems(OnEnter(GameState::GameOver), end_screen::spawn_end_screen);
        app.add_systems(
            Update,
            end_screen::end_screen_input.run_if(in_state(GameState::GameOver)),
        );
    }
}
