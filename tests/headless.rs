//! Headless integration tests for Pokemon Safari.
//!
//! These tests exercise the game's ECS logic without a window or GPU.
//! They use Bevy's `MinimalPlugins` to tick the app, register only the
//! pure-logic systems (skipping all rendering/UI), and verify that the
//! frame-stepped overworld, transitions, and battles work correctly.
//!
//! Run with: `cargo test --test headless`

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use rand::rngs::mock::StepRng;

use pokesafari::battle::{self, BattleOutcome, BattleState};
use pokesafari::data::{populate_pokemon, DataPlugin, PokemonRegistry};
use pokesafari::overworld::menu::SafariMenuState;
use pokesafari::overworld::{self, menu, walk};
use pokesafari::shared::*;
use pokesafari::ui::transitions::{self, FadeDirection, ScreenFade};
use pokesafari::world::{TileMap, OUT_OF_BOUNDS_TILE};

// ─────────────────────────────────────────────────────────────────────────────
// Test App Builder
// ─────────────────────────────────────────────────────────────────────────────

/// Builds a minimal Bevy app with all shared resources and events registered
/// but NO rendering, windowing, or asset loading. Systems must be added
/// per-test depending on what's being exercised.
fn build_test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(StatesPlugin);

    // ── Game State ───────────────────────────────────────────────────────
    app.init_state::<GameState>();

    // ── Shared Resources (mirrors main.rs) ───────────────────────────────
    app.init_resource::<PlayerState>()
        .init_resource::<PendingEncounter>()
        .init_resource::<ReturnContext>()
        .init_resource::<OverworldState>()
        .init_resource::<TileMap>()
        .init_resource::<PlayerIntent>()
        .init_resource::<KeyBindings>()
        .init_resource::<InputContext>()
        .init_resource::<ScreenFade>();

    // Deterministic rolls by default; tests override as needed.
    app.insert_resource(SafariRng(Box::new(StepRng::new(u64::MAX, 0))));

    let mut registry = PokemonRegistry::default();
    populate_pokemon(&mut registry);
    app.insert_resource(registry);

    // ── Shared Events (mirrors main.rs) ──────────────────────────────────
    app.add_event::<FadeOutRequest>()
        .add_event::<FadeInRequest>()
        .add_event::<FadeClearedEvent>();

    app
}

/// Forces every percent roll to 0 (encounter fires, common tier, catch).
fn force_min_rolls(app: &mut App) {
    app.insert_resource(SafariRng(Box::new(StepRng::new(0, 0))));
}

/// Replaces the current frame's intent wholesale.
fn set_intent(app: &mut App, build: impl FnOnce(&mut PlayerIntent)) {
    let mut intent = app.world_mut().resource_mut::<PlayerIntent>();
    *intent = PlayerIntent::default();
    build(&mut *intent);
}

fn clear_intent(app: &mut App) {
    set_intent(app, |_| {});
}

fn enter_state(app: &mut App, state: GameState) {
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(state);
    app.update(); // process state transition
}

fn overworld_state(app: &App) -> &OverworldState {
    app.world().resource::<OverworldState>()
}

fn player(app: &App) -> &PlayerState {
    app.world().resource::<PlayerState>()
}

// ─────────────────────────────────────────────────────────────────────────────
// Boot
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_boot_loads_data_and_reaches_overworld() {
    let mut app = build_test_app();
    app.insert_resource(PokemonRegistry::default());
    app.add_plugins(DataPlugin);

    // First update runs Loading; second applies NextState.
    app.update();
    app.update();

    let state = app.world().resource::<State<GameState>>();
    assert_eq!(
        state.get(),
        &GameState::Overworld,
        "Expected to reach the overworld after loading data"
    );

    let registry = app.world().resource::<PokemonRegistry>();
    assert_eq!(registry.pool(Rarity::Common).len(), 6);
    assert_eq!(registry.pool(Rarity::Uncommon).len(), 3);
    assert_eq!(registry.pool(Rarity::Rare).len(), 1);
}

#[test]
fn test_initial_session_state() {
    let app = build_test_app();
    let p = player(&app);
    assert_eq!(p.steps_remaining, 500);
    assert_eq!(p.safari_balls, 30);
    assert_eq!(p.position, GridPosition::new(6, 8));

    let ow = overworld_state(&app);
    assert_eq!(ow.mode, OverworldMode::Walking);
    assert_eq!(ow.facing, Facing::South);
    assert_eq!(ow.camera, CameraOffset { row: 2, col: 3 });

    let map = app.world().resource::<TileMap>();
    assert_eq!(map.tile_at(-1, -1), OUT_OF_BOUNDS_TILE);
    assert_eq!(map.tile_at(0, 10_000), OUT_OF_BOUNDS_TILE);
}

// ─────────────────────────────────────────────────────────────────────────────
// Walking
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_walkable_move_starts_walk_and_commits_after_twenty_frames() {
    let mut app = build_test_app();
    app.add_systems(
        Update,
        (
            overworld::handle_walking_intents,
            walk::advance_walk_animation,
        )
            .chain(),
    );

    set_intent(&mut app, |i| i.move_dir = Some(Facing::South));
    app.update();
    clear_intent(&mut app);

    {
        let ow = overworld_state(&app);
        assert_eq!(ow.facing, Facing::South);
        let walk = ow.walk.expect("walk should have started");
        assert_eq!(walk.frames, 1, "animation advances on the start frame");
        assert_eq!(walk.camera_snapshot, CameraOffset { row: 2, col: 3 });
    }
    assert_eq!(player(&app).position, GridPosition::new(6, 8));

    // 18 more frames: still animating, nothing committed.
    for _ in 0..18 {
        app.update();
    }
    assert!(overworld_state(&app).walk.is_some());
    assert_eq!(player(&app).position, GridPosition::new(6, 8));
    assert_eq!(player(&app).steps_remaining, 500);

    // Frame 20: position, camera, and step budget commit together.
    app.update();
    let ow = overworld_state(&app);
    assert!(ow.walk.is_none());
    assert_eq!(ow.camera, CameraOffset { row: 3, col: 3 });
    assert_eq!(ow.mode, OverworldMode::Walking);
    assert_eq!(player(&app).position, GridPosition::new(7, 8));
    assert_eq!(player(&app).steps_remaining, 499);
}

#[test]
fn test_blocked_move_updates_facing_only() {
    let mut app = build_test_app();
    app.add_systems(Update, overworld::handle_walking_intents);

    // Row 0 is the tree ring; stepping north from row 1 is blocked.
    app.world_mut().resource_mut::<PlayerState>().position = GridPosition::new(1, 5);

    set_intent(&mut app, |i| i.move_dir = Some(Facing::North));
    app.update();

    let ow = overworld_state(&app);
    assert_eq!(ow.facing, Facing::North, "facing turns toward the wall");
    assert!(ow.walk.is_none(), "no animation for a blocked move");
    assert_eq!(player(&app).position, GridPosition::new(1, 5));
}

#[test]
fn test_intents_ignored_while_walk_is_running() {
    let mut app = build_test_app();
    app.add_systems(Update, overworld::handle_walking_intents);

    let camera = overworld_state(&app).camera;
    app.world_mut().resource_mut::<OverworldState>().walk =
        Some(WalkAnimation::start(Facing::South, camera));

    set_intent(&mut app, |i| i.move_dir = Some(Facing::East));
    app.update();

    let ow = overworld_state(&app);
    assert_eq!(ow.facing, Facing::South, "facing unchanged mid-animation");
    assert_eq!(ow.walk.unwrap().facing, Facing::South);
}

#[test]
fn test_step_budget_clamps_at_zero() {
    let mut p = PlayerState::default();
    p.steps_remaining = 1;
    p.spend_step();
    assert_eq!(p.steps_remaining, 0);
    p.spend_step();
    assert_eq!(p.steps_remaining, 0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Encounters
// ─────────────────────────────────────────────────────────────────────────────

/// Puts the app one frame away from committing a walk in `facing`.
fn stage_commit(app: &mut App, from: GridPosition, facing: Facing) {
    app.world_mut().resource_mut::<PlayerState>().position = from;
    let mut ow = app.world_mut().resource_mut::<OverworldState>();
    ow.camera = CameraOffset::for_position(from);
    let mut anim = WalkAnimation::start(facing, ow.camera);
    anim.frames = WALK_FRAMES - 1;
    ow.walk = Some(anim);
}

#[test]
fn test_encounter_on_eligible_tile_stages_battle() {
    let mut app = build_test_app();
    app.add_systems(Update, walk::advance_walk_animation);
    force_min_rolls(&mut app);

    // (7,8) is tall grass; a zero gate roll forces the encounter.
    stage_commit(&mut app, GridPosition::new(6, 8), Facing::South);
    app.update();

    let ow = overworld_state(&app);
    assert_eq!(ow.mode, OverworldMode::Transitioning);
    let pending = app.world().resource::<PendingEncounter>();
    let pokemon = pending.0.as_ref().expect("an encounter must be staged");
    assert_eq!(pokemon.rarity, Rarity::Common, "zero rarity roll is common");

    let events = app.world().resource::<Events<FadeOutRequest>>();
    let mut cursor = events.get_cursor();
    let requests: Vec<_> = cursor.read(events).collect();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].to, SceneTarget::Battle);
}

#[test]
fn test_no_encounter_on_ineligible_tile_even_with_min_rolls() {
    let mut app = build_test_app();
    app.add_systems(Update, walk::advance_walk_animation);
    force_min_rolls(&mut app);

    // (3,6) -> (3,7) is path ground: the roll is never taken.
    stage_commit(&mut app, GridPosition::new(3, 6), Facing::East);
    app.update();

    assert_eq!(overworld_state(&app).mode, OverworldMode::Walking);
    assert!(app.world().resource::<PendingEncounter>().0.is_none());
}

#[test]
fn test_max_rolls_never_trigger_an_encounter() {
    let mut app = build_test_app();
    app.add_systems(Update, walk::advance_walk_animation);

    stage_commit(&mut app, GridPosition::new(6, 8), Facing::South);
    app.update();

    assert_eq!(overworld_state(&app).mode, OverworldMode::Walking);
    assert!(app.world().resource::<PendingEncounter>().0.is_none());
}

#[test]
fn test_encounter_preempts_end_of_steps() {
    let mut app = build_test_app();
    app.add_systems(Update, walk::advance_walk_animation);
    force_min_rolls(&mut app);

    app.world_mut().resource_mut::<PlayerState>().steps_remaining = 1;
    stage_commit(&mut app, GridPosition::new(6, 8), Facing::South);
    app.update();

    assert_eq!(player(&app).steps_remaining, 0);
    assert!(
        app.world().resource::<PendingEncounter>().0.is_some(),
        "the last step still produces its encounter"
    );

    let events = app.world().resource::<Events<FadeOutRequest>>();
    let mut cursor = events.get_cursor();
    let targets: Vec<_> = cursor.read(events).map(|r| r.to).collect();
    assert_eq!(targets, vec![SceneTarget::Battle]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Transitions
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_out_of_steps_fades_out_to_game_over() {
    let mut app = build_test_app();
    app.add_systems(
        Update,
        (
            walk::advance_walk_animation,
            transitions::handle_fade_requests,
            transitions::update_fade,
        )
            .chain(),
    );

    app.world_mut().resource_mut::<PlayerState>().steps_remaining = 1;
    // Commit onto the path so no encounter can interfere.
    stage_commit(&mut app, GridPosition::new(3, 6), Facing::East);
    app.update();

    assert_eq!(overworld_state(&app).mode, OverworldMode::Transitioning);
    assert!(app.world().resource::<ScreenFade>().active());

    for _ in 0..FADE_STEPS + 2 {
        app.update();
    }
    let state = app.world().resource::<State<GameState>>();
    assert_eq!(state.get(), &GameState::GameOver);
}

#[test]
fn test_fade_out_reaches_target_scene_in_exactly_25_steps() {
    let mut app = build_test_app();
    app.add_systems(
        Update,
        (transitions::handle_fade_requests, transitions::update_fade).chain(),
    );

    app.world_mut().send_event(FadeOutRequest {
        to: SceneTarget::Collection,
    });

    // 25 update frames tick the fade to black and queue the state switch.
    for _ in 0..FADE_STEPS {
        app.update();
        assert_eq!(
            app.world().resource::<State<GameState>>().get(),
            &GameState::Loading,
            "scene must not switch before the screen is black"
        );
    }
    assert_eq!(
        app.world().resource::<ScreenFade>().brightness(),
        BLACK_SCREEN_BRIGHTNESS
    );

    app.update();
    assert_eq!(
        app.world().resource::<State<GameState>>().get(),
        &GameState::Collection
    );
}

#[test]
fn test_fade_in_resumes_walking_and_rechecks_step_budget() {
    let mut app = build_test_app();
    app.add_systems(
        Update,
        (
            transitions::handle_fade_requests,
            transitions::update_fade,
            overworld::handle_fade_cleared,
        )
            .chain(),
    );

    app.world_mut().resource_mut::<OverworldState>().mode = OverworldMode::Transitioning;
    app.world_mut().resource_mut::<PlayerState>().steps_remaining = 0;
    app.world_mut().send_event(FadeInRequest {
        resume: Some(ResumeMode::Walking),
    });

    for _ in 0..FADE_STEPS {
        app.update();
    }

    // Walking resumed with an empty budget: straight back out to the end.
    let ow = overworld_state(&app);
    assert_eq!(ow.mode, OverworldMode::Transitioning);

    let events = app.world().resource::<Events<FadeOutRequest>>();
    let mut cursor = events.get_cursor();
    let targets: Vec<_> = cursor.read(events).map(|r| r.to).collect();
    assert_eq!(targets, vec![SceneTarget::GameOver]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Menu
// ─────────────────────────────────────────────────────────────────────────────

fn add_menu_systems(app: &mut App) {
    app.add_systems(
        Update,
        (
            overworld::handle_walking_intents,
            menu::handle_menu_intents,
        )
            .chain(),
    );
}

#[test]
fn test_menu_opens_at_top_and_never_wraps() {
    let mut app = build_test_app();
    add_menu_systems(&mut app);

    set_intent(&mut app, |i| i.menu_toggle = true);
    app.update();
    assert_eq!(overworld_state(&app).mode, OverworldMode::MenuOpen);
    assert_eq!(app.world().resource::<SafariMenuState>().cursor, 0);

    set_intent(&mut app, |i| i.ui_up = true);
    app.update();
    assert_eq!(app.world().resource::<SafariMenuState>().cursor, 0);

    set_intent(&mut app, |i| i.ui_down = true);
    app.update();
    set_intent(&mut app, |i| i.ui_down = true);
    app.update();
    assert_eq!(app.world().resource::<SafariMenuState>().cursor, 1);
}

#[test]
fn test_menu_close_resumes_walking() {
    let mut app = build_test_app();
    add_menu_systems(&mut app);

    set_intent(&mut app, |i| i.menu_toggle = true);
    app.update();

    set_intent(&mut app, |i| i.ui_cancel = true);
    app.update();

    assert_eq!(overworld_state(&app).mode, OverworldMode::Walking);
    assert!(app
        .world()
        .get_resource::<SafariMenuState>()
        .is_none());
}

#[test]
fn test_menu_close_with_empty_budget_ends_the_safari() {
    let mut app = build_test_app();
    add_menu_systems(&mut app);

    app.world_mut().resource_mut::<PlayerState>().steps_remaining = 0;
    set_intent(&mut app, |i| i.menu_toggle = true);
    app.update();

    set_intent(&mut app, |i| i.ui_cancel = true);
    app.update();

    assert_eq!(overworld_state(&app).mode, OverworldMode::Transitioning);
    let events = app.world().resource::<Events<FadeOutRequest>>();
    let mut cursor = events.get_cursor();
    let targets: Vec<_> = cursor.read(events).map(|r| r.to).collect();
    assert_eq!(targets, vec![SceneTarget::GameOver]);
}

#[test]
fn test_menu_confirm_on_collection_fades_out() {
    let mut app = build_test_app();
    add_menu_systems(&mut app);

    set_intent(&mut app, |i| i.menu_toggle = true);
    app.update();

    set_intent(&mut app, |i| i.ui_confirm = true);
    app.update();

    assert_eq!(overworld_state(&app).mode, OverworldMode::Transitioning);
    let events = app.world().resource::<Events<FadeOutRequest>>();
    let mut cursor = events.get_cursor();
    let targets: Vec<_> = cursor.read(events).map(|r| r.to).collect();
    assert_eq!(targets, vec![SceneTarget::Collection]);
}

#[test]
fn test_return_from_collection_reopens_the_menu() {
    let mut app = build_test_app();
    app.add_systems(OnEnter(GameState::Overworld), overworld::on_overworld_enter);
    app.add_systems(
        Update,
        (
            transitions::handle_fade_requests,
            transitions::update_fade,
            overworld::handle_fade_cleared,
        )
            .chain(),
    );

    app.world_mut().resource_mut::<OverworldState>().mode = OverworldMode::Transitioning;
    app.world_mut().resource_mut::<ReturnContext>().from = Some(SceneOrigin::Collection);

    enter_state(&mut app, GameState::Overworld);
    app.update();

    assert!(
        app.world().get_resource::<SafariMenuState>().is_some(),
        "menu must be restored before the fade-in"
    );
    let fade = app.world().resource::<ScreenFade>();
    assert_eq!(fade.direction, Some(FadeDirection::In));

    for _ in 0..FADE_STEPS {
        app.update();
    }
    assert_eq!(overworld_state(&app).mode, OverworldMode::MenuOpen);
}

// ─────────────────────────────────────────────────────────────────────────────
// Battle
// ─────────────────────────────────────────────────────────────────────────────

fn stage_battle(app: &mut App, pokemon: Pokemon) {
    app.world_mut().resource_mut::<PendingEncounter>().0 = Some(pokemon);
    enter_state(app, GameState::Battle);
}

fn safari_ball_target() -> Pokemon {
    Pokemon {
        name: "Paras".into(),
        max_hp: 35,
        catch_percent: 65,
        flee_percent: 10,
        max_duration: 6,
        rarity: Rarity::Common,
    }
}

#[test]
fn test_battle_catch_adds_to_collection_and_returns() {
    let mut app = build_test_app();
    app.add_plugins(battle::BattlePlugin);
    force_min_rolls(&mut app);

    stage_battle(&mut app, safari_ball_target());
    assert!(app.world().get_resource::<BattleState>().is_some());

    // Throw Ball is the top option; a zero roll catches.
    set_intent(&mut app, |i| i.ui_confirm = true);
    app.update();
    {
        let battle = app.world().resource::<BattleState>();
        assert_eq!(battle.outcome, Some(BattleOutcome::Caught));
    }
    assert_eq!(player(&app).safari_balls, 29);
    assert_eq!(player(&app).caught.len(), 1);
    assert_eq!(player(&app).caught[0].name, "Paras");

    // Confirm dismisses the result and returns to the overworld.
    clear_intent(&mut app);
    app.update();
    set_intent(&mut app, |i| i.ui_confirm = true);
    app.update();
    app.update();

    assert_eq!(
        app.world().resource::<State<GameState>>().get(),
        &GameState::Overworld
    );
    assert_eq!(
        app.world().resource::<ReturnContext>().from,
        Some(SceneOrigin::Battle)
    );
    assert!(app.world().get_resource::<BattleState>().is_none());
}

#[test]
fn test_battle_flee_ends_without_a_capture() {
    let mut app = build_test_app();
    app.add_plugins(battle::BattlePlugin);
    force_min_rolls(&mut app);

    let mut skittish = safari_ball_target();
    skittish.catch_percent = 0; // zero roll misses a 0% catch
    skittish.flee_percent = 100; // and always flees after the miss
    stage_battle(&mut app, skittish);

    set_intent(&mut app, |i| i.ui_confirm = true);
    app.update();

    let battle = app.world().resource::<BattleState>();
    assert_eq!(battle.outcome, Some(BattleOutcome::Fled));
    assert!(player(&app).caught.is_empty());
    assert_eq!(player(&app).safari_balls, 29);
}

#[test]
fn test_battle_run_ends_immediately() {
    let mut app = build_test_app();
    app.add_plugins(battle::BattlePlugin);

    stage_battle(&mut app, safari_ball_target());

    set_intent(&mut app, |i| i.ui_down = true);
    app.update();
    clear_intent(&mut app);
    app.update();
    set_intent(&mut app, |i| i.ui_confirm = true);
    app.update();

    let battle = app.world().resource::<BattleState>();
    assert_eq!(battle.outcome, Some(BattleOutcome::RanAway));
    assert_eq!(player(&app).safari_balls, 30, "running costs nothing");
}

#[test]
fn test_battle_patience_runs_out() {
    let mut app = build_test_app();
    app.add_plugins(battle::BattlePlugin);
    // Max rolls: never caught, never flees.
    app.insert_resource(SafariRng(Box::new(StepRng::new(u64::MAX, 0))));

    let mut stubborn = safari_ball_target();
    stubborn.max_duration = 2;
    stage_battle(&mut app, stubborn);

    for _ in 0..2 {
        set_intent(&mut app, |i| i.ui_confirm = true);
        app.update();
        clear_intent(&mut app);
        app.update();
    }

    let battle = app.world().resource::<BattleState>();
    assert_eq!(battle.outcome, Some(BattleOutcome::LostInterest));
    assert_eq!(player(&app).safari_balls, 28);
}
