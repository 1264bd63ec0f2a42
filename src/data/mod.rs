//! Data layer — populates the creature registry at game startup.
//!
//! This plugin runs in OnEnter(GameState::Loading), fills the
//! PokemonRegistry from the hard-coded game-design data in `pokemon`,
//! validates it, then transitions the game into GameState::Overworld.
//!
//! No other domain needs to seed the registry. All domain plugins can
//! safely read it once GameState has advanced past Loading.

mod pokemon;

pub use pokemon::populate_pokemon;

use bevy::prelude::*;
use rand::Rng;

use crate::shared::*;

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PokemonRegistry>()
            .add_systems(OnEnter(GameState::Loading), load_all_data);
    }
}

/// Per-rarity creature pools. Encounters draw from these uniformly once the
/// rarity tier has been rolled.
#[derive(Resource, Debug, Clone, Default)]
pub struct PokemonRegistry {
    common: Vec<Pokemon>,
    uncommon: Vec<Pokemon>,
    rare: Vec<Pokemon>,
}

impl PokemonRegistry {
    pub fn pool(&self, rarity: Rarity) -> &[Pokemon] {
        match rarity {
            Rarity::Common => &self.common,
            Rarity::Uncommon => &self.uncommon,
            Rarity::Rare => &self.rare,
        }
    }

    pub fn push(&mut self, pokemon: Pokemon) {
        match pokemon.rarity {
            Rarity::Common => self.common.push(pokemon),
            Rarity::Uncommon => self.uncommon.push(pokemon),
            Rarity::Rare => self.rare.push(pokemon),
        }
    }

    /// Uniform draw from the pool for a rarity tier. The Loading validation
    /// guarantees every pool is non-empty.
    pub fn pick(&self, rarity: Rarity, rng: &mut SafariRng) -> Pokemon {
        let pool = self.pool(rarity);
        let index = rng.0.gen_range(0..pool.len());
        pool[index].clone()
    }
}

/// Populates the registry and transitions to the overworld.
///
/// An empty rarity pool would make a later encounter roll unanswerable, so
/// that is treated as a fatal startup error rather than deferred.
fn load_all_data(
    mut registry: ResMut<PokemonRegistry>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    info!("DataPlugin: populating creature registry…");

    pokemon::populate_pokemon(&mut registry);

    for rarity in [Rarity::Common, Rarity::Uncommon, Rarity::Rare] {
        let count = registry.pool(rarity).len();
        if count == 0 {
            panic!("creature data invalid: no {:?} entries loaded", rarity);
        }
        info!("  {:?} creatures loaded: {}", rarity, count);
    }

    next_state.set(GameState::Overworld);
}
