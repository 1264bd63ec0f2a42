mod battle;
mod collection;
mod data;
mod input;
mod overworld;
mod shared;
mod ui;
mod world;

use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use shared::*;

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Pokemon Safari".into(),
                        resolution: WindowResolution::new(SCREEN_WIDTH, SCREEN_HEIGHT),
                        present_mode: PresentMode::AutoVsync,
                        resizable: false,
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin::default_nearest()),
        )
        // Game state
        .init_state::<GameState>()
        // Shared resources
        .init_resource::<PlayerState>()
        .init_resource::<SafariRng>()
        .init_resource::<PendingEncounter>()
        .init_resource::<ReturnContext>()
        // Events
        .add_event::<FadeOutRequest>()
        .add_event::<FadeInRequest>()
        .add_event::<FadeClearedEvent>()
        // Domain plugins
        .add_plugins(input::InputPlugin)
        .add_plugins(world::WorldPlugin)
        .add_plugins(overworld::OverworldPlugin)
        .add_plugins(battle::BattlePlugin)
        .add_plugins(collection::CollectionPlugin)
        .add_plugins(ui::UiPlugin)
        // Data loading
        .add_plugins(data::DataPlugin)
        // Camera
        .add_systems(Startup, setup_camera)
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
