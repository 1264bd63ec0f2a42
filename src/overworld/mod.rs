//! Overworld domain plugin for Pokemon Safari.
//!
//! Owns the per-frame scene state machine: Walking accepts movement and
//! opens the menu, MenuOpen routes intents to the safari menu, and
//! Transitioning hands the frame to the screen fade until another scene
//! takes over. Mode switches happen in exactly one place per edge, all of
//! them in this module tree.

use bevy::prelude::*;

use crate::shared::*;
use crate::world::{grid_to_world, TileMap};

pub mod camera;
pub mod encounter;
pub mod menu;
pub mod walk;

use menu::SafariMenuState;

// ═══════════════════════════════════════════════════════════════════════
// PLUGIN
// ═══════════════════════════════════════════════════════════════════════

pub struct OverworldPlugin;

impl Plugin for OverworldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OverworldState>()
            .init_resource::<TrainerSheet>()
            .add_systems(
                OnEnter(GameState::Overworld),
                (spawn_player_sprite, on_overworld_enter),
            )
            .add_systems(OnExit(GameState::Overworld), menu::close_menu)
            // Intent handling and the walk animation advance in a fixed
            // order so a commit is visible to everything after it in the
            // same frame.
            .add_systems(
                Update,
                (
                    handle_walking_intents,
                    walk::advance_walk_animation,
                    menu::handle_menu_intents,
                    handle_fade_cleared,
                )
                    .chain()
                    .run_if(in_state(GameState::Overworld)),
            )
            .add_systems(
                Update,
                (camera::sync_camera, camera::update_player_sprite)
                    .after(walk::advance_walk_animation)
                    .run_if(in_state(GameState::Overworld)),
            )
            // Menu UI follows the SafariMenuState resource lifecycle.
            .add_systems(
                Update,
                (
                    menu::spawn_safari_menu.run_if(resource_added::<SafariMenuState>),
                    menu::despawn_safari_menu.run_if(resource_removed::<SafariMenuState>),
                    menu::animate_menu_arrow.run_if(resource_exists::<SafariMenuState>),
                    menu::update_menu_visuals.run_if(resource_exists::<SafariMenuState>),
                ),
            );
    }
}

// ═══════════════════════════════════════════════════════════════════════
// COMPONENTS / RESOURCES
// ═══════════════════════════════════════════════════════════════════════

/// Marker for the trainer sprite entity.
#[derive(Component, Debug)]
pub struct PlayerSprite;

/// Trainer sheet handles: 4 facing rows x 3 walk columns.
#[derive(Resource, Default)]
pub struct TrainerSheet {
    pub image: Handle<Image>,
    pub layout: Handle<TextureAtlasLayout>,
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

/// Walking-mode intent handler. A blocked move still turns the player; a
/// clear move starts the walk animation, which locks input until commit.
pub fn handle_walking_intents(
    intent: Res<PlayerIntent>,
    map: Res<TileMap>,
    player: Res<PlayerState>,
    mut overworld: ResMut<OverworldState>,
    mut commands: Commands,
) {
    if overworld.mode != OverworldMode::Walking || overworld.walk.is_some() {
        return;
    }

    if intent.menu_toggle {
        overworld.mode = OverworldMode::MenuOpen;
        commands.insert_resource(SafariMenuState::open());
        return;
    }

    let Some(dir) = intent.move_dir else {
        return;
    };

    overworld.facing = dir;
    if map.is_walkable(player.position.shifted(dir)) {
        let camera = overworld.camera;
        overworld.walk = Some(WalkAnimation::start(dir, camera));
    }
}

/// Resumes the requested mode once a fade-in finishes. Resuming Walking
/// re-checks the step budget; an exhausted budget fades straight out to
/// the results screen.
pub fn handle_fade_cleared(
    mut events: EventReader<FadeClearedEvent>,
    mut overworld: ResMut<OverworldState>,
    player: Res<PlayerState>,
    mut fade_out: EventWriter<FadeOutRequest>,
) {
    for event in events.read() {
        match event.resume {
            Some(ResumeMode::Walking) => {
                overworld.mode = OverworldMode::Walking;
                if player.steps_remaining == 0 {
                    overworld.mode = OverworldMode::Transitioning;
                    fade_out.send(FadeOutRequest {
                        to: SceneTarget::GameOver,
                    });
                }
            }
            Some(ResumeMode::MenuOpen) => {
                overworld.mode = OverworldMode::MenuOpen;
            }
            None => {}
        }
    }
}

/// Picks the fade-in path for re-entry. Coming back from a battle resumes
/// walking; coming back from the collection reopens the menu first. The
/// initial entry from Loading starts with a clear screen and no fade.
pub fn on_overworld_enter(
    mut return_ctx: ResMut<ReturnContext>,
    mut commands: Commands,
    mut fade_in: EventWriter<FadeInRequest>,
) {
    match return_ctx.from.take() {
        Some(SceneOrigin::Battle) => {
            fade_in.send(FadeInRequest {
                resume: Some(ResumeMode::Walking),
            });
        }
        Some(SceneOrigin::Collection) => {
            commands.insert_resource(SafariMenuState::open());
            fade_in.send(FadeInRequest {
                resume: Some(ResumeMode::MenuOpen),
            });
        }
        None => {}
    }
}

/// Spawn the trainer sprite the first time the overworld is entered.
fn spawn_player_sprite(
    mut commands: Commands,
    player: Res<PlayerState>,
    mut sheet: ResMut<TrainerSheet>,
    asset_server: Res<AssetServer>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
    existing: Query<Entity, With<PlayerSprite>>,
) {
    if !existing.is_empty() {
        return;
    }

    if sheet.image == Handle::default() {
        sheet.image = asset_server.load("sprites/trainer_sprites.png");
        sheet.layout = layouts.add(TextureAtlasLayout::from_grid(
            UVec2::splat(32),
            3,
            4,
            None,
            None,
        ));
    }

    let mut translation = grid_to_world(player.position.row, player.position.col);
    translation.z = 10.0;

    commands.spawn((
        PlayerSprite,
        Sprite {
            image: sheet.image.clone(),
            texture_atlas: Some(TextureAtlas {
                layout: sheet.layout.clone(),
                index: walk::sprite_index(Facing::South, 0),
            }),
            custom_size: Some(Vec2::splat(TILE_SIZE)),
            ..default()
        },
        Transform::from_translation(translation),
    ));
}
