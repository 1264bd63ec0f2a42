//! Battle domain plugin for Pokemon Safari.
//!
//! A safari battle has no attacking: each turn the player throws a ball or
//! runs. A throw rolls for the catch, then (if the ball missed) for the
//! creature fleeing. The creature also leaves on its own once its patience
//! runs out, and the battle cannot continue with an empty ball bag.

use bevy::prelude::*;

use crate::shared::*;

pub struct BattlePlugin;

impl Plugin for BattlePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Battle), setup_battle)
            .add_systems(OnExit(GameState::Battle), teardown_battle)
            .add_systems(
                Update,
                (handle_battle_intents, update_battle_visuals)
                    .chain()
                    .run_if(in_state(GameState::Battle)),
            );
    }
}

pub const BATTLE_OPTIONS: &[&str] = &["Throw Ball", "Run"];
const THROW_INDEX: usize = 0;
const RUN_INDEX: usize = 1;

// ═══════════════════════════════════════════════════════════════════════
// STATE
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Caught,
    Fled,
    LostInterest,
    OutOfBalls,
    RanAway,
}

/// One battle, inserted on entry and removed on exit.
#[derive(Resource, Debug, Clone)]
pub struct BattleState {
    pub pokemon: Pokemon,
    pub turns_used: u32,
    pub cursor: usize,
    /// Set once the battle is decided; the next confirm dismisses it.
    pub outcome: Option<BattleOutcome>,
    pub message: String,
}

impl BattleState {
    pub fn new(pokemon: Pokemon) -> Self {
        let message = format!("A wild {} appeared!", pokemon.name);
        Self {
            pokemon,
            turns_used: 0,
            cursor: 0,
            outcome: None,
            message,
        }
    }
}

/// Result of a single ball throw, before patience and ball accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrowOutcome {
    Caught,
    Fled,
    Stayed,
}

/// Catch roll first; the flee roll only happens after a miss.
pub fn resolve_throw(rng: &mut SafariRng, pokemon: &Pokemon) -> ThrowOutcome {
    if rng.percent_roll() < pokemon.catch_percent {
        ThrowOutcome::Caught
    } else if rng.percent_roll() < pokemon.flee_percent {
        ThrowOutcome::Fled
    } else {
        ThrowOutcome::Stayed
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

/// Builds the battle from the pending encounter and reveals the scene.
pub fn setup_battle(
    mut commands: Commands,
    mut pending: ResMut<PendingEncounter>,
    mut next_state: ResMut<NextState<GameState>>,
    mut return_ctx: ResMut<ReturnContext>,
    mut fade_in: EventWriter<FadeInRequest>,
) {
    let Some(pokemon) = pending.0.take() else {
        // No encounter was staged; nothing to fight.
        warn!("Battle entered without a pending encounter");
        return_ctx.from = Some(SceneOrigin::Battle);
        next_state.set(GameState::Overworld);
        return;
    };

    info!("Battle started against {}", pokemon.name);
    commands.insert_resource(BattleState::new(pokemon));
    spawn_battle_ui(&mut commands);
    fade_in.send(FadeInRequest { resume: None });
}

pub fn teardown_battle(mut commands: Commands, query: Query<Entity, With<BattleRoot>>) {
    commands.remove_resource::<BattleState>();
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

/// Turn handler. While the battle is undecided, confirm executes the
/// selected option; once decided, confirm returns to the overworld.
pub fn handle_battle_intents(
    intent: Res<PlayerIntent>,
    battle: Option<ResMut<BattleState>>,
    mut player: ResMut<PlayerState>,
    mut rng: ResMut<SafariRng>,
    mut next_state: ResMut<NextState<GameState>>,
    mut return_ctx: ResMut<ReturnContext>,
) {
    let Some(mut battle) = battle else {
        return;
    };

    if battle.outcome.is_some() {
        if intent.ui_confirm || intent.ui_cancel {
            return_ctx.from = Some(SceneOrigin::Battle);
            next_state.set(GameState::Overworld);
        }
        return;
    }

    if intent.ui_up {
        battle.cursor = battle.cursor.saturating_sub(1);
    }
    if intent.ui_down {
        battle.cursor = (battle.cursor + 1).min(BATTLE_OPTIONS.len() - 1);
    }

    if !intent.ui_confirm {
        return;
    }

    match battle.cursor {
        THROW_INDEX => {
            if player.safari_balls == 0 {
                battle.message = "No safari balls left!".to_string();
                battle.outcome = Some(BattleOutcome::OutOfBalls);
                return;
            }
            player.spend_ball();
            match resolve_throw(&mut rng, &battle.pokemon) {
                ThrowOutcome::Caught => {
                    let caught = battle.pokemon.clone();
                    battle.message = format!("Gotcha! {} was caught!", caught.name);
                    battle.outcome = Some(BattleOutcome::Caught);
                    info!("Caught {}", caught.name);
                    player.caught.push(caught);
                }
                ThrowOutcome::Fled => {
                    battle.message = format!("Oh no! {} fled!", battle.pokemon.name);
                    battle.outcome = Some(BattleOutcome::Fled);
                }
                ThrowOutcome::Stayed => {
                    battle.turns_used += 1;
                    if battle.turns_used >= battle.pokemon.max_duration {
                        battle.message =
                            format!("{} lost interest and wandered off", battle.pokemon.name);
                        battle.outcome = Some(BattleOutcome::LostInterest);
                    } else if player.safari_balls == 0 {
                        battle.message = "Out of safari balls!".to_string();
                        battle.outcome = Some(BattleOutcome::OutOfBalls);
                    } else {
                        battle.message = format!("{} broke free!", battle.pokemon.name);
                    }
                }
            }
        }
        RUN_INDEX => {
            battle.message = "Got away safely.".to_string();
            battle.outcome = Some(BattleOutcome::RanAway);
        }
        _ => {}
    }
}

// ═══════════════════════════════════════════════════════════════════════
// UI
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
struct BattleRoot;

#[derive(Component)]
struct BattleHeadline;

#[derive(Component)]
struct BattleMessage;

#[derive(Component)]
struct BattleOption(usize);

fn spawn_battle_ui(commands: &mut Commands) {
    commands
        .spawn((
            BattleRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(14.0),
                ..default()
            },
            BackgroundColor(Color::srgb(0.12, 0.16, 0.1)),
            GlobalZIndex(20),
        ))
        .with_children(|parent| {
            parent.spawn((
                BattleHeadline,
                Text::new(""),
                TextFont {
                    font_size: 28.0,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.95, 0.85)),
            ));
            parent.spawn((
                BattleMessage,
                Text::new(""),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::srgb(0.85, 0.85, 0.8)),
            ));
            for (i, label) in BATTLE_OPTIONS.iter().enumerate() {
                parent.spawn((
                    BattleOption(i),
                    Text::new(*label),
                    TextFont {
                        font_size: 22.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.7, 0.7, 0.7)),
                ));
            }
        });
}

fn update_battle_visuals(
    battle: Option<Res<BattleState>>,
    player: Res<PlayerState>,
    mut headline: Query<&mut Text, (With<BattleHeadline>, Without<BattleMessage>)>,
    mut message: Query<&mut Text, (With<BattleMessage>, Without<BattleHeadline>)>,
    mut options: Query<(&BattleOption, &mut TextColor)>,
) {
    let Some(battle) = battle else {
        return;
    };

    if let Ok(mut text) = headline.get_single_mut() {
        text.0 = format!(
            "{}  (HP {})    Balls: {}",
            battle.pokemon.name, battle.pokemon.max_hp, player.safari_balls
        );
    }
    if let Ok(mut text) = message.get_single_mut() {
        text.0 = battle.message.clone();
    }
    for (option, mut color) in options.iter_mut() {
        *color = if option.0 == battle.cursor && battle.outcome.is_none() {
            TextColor(Color::srgb(1.0, 0.9, 0.4))
        } else {
            TextColor(Color::srgb(0.7, 0.7, 0.7))
        };
    }
}
