//! Wild encounter rolls.
//!
//! Two draws from the injected rng: one gate roll against the flat
//! encounter chance, then one rarity roll against the cumulative
//! thresholds. Both are pure given the roll values, so the boundaries are
//! unit-testable without an app.

use crate::data::PokemonRegistry;
use crate::shared::*;
use crate::world::TileDescriptor;

/// Gate: does a [0,100) roll start an encounter?
pub fn encounter_triggered(roll: u32) -> bool {
    roll < WILD_ENCOUNTER_CHANCE
}

/// Tier for a [0,100) roll: [0,70) common, [70,95) uncommon, [95,100) rare.
pub fn rarity_for_roll(roll: u32) -> Rarity {
    if roll < UNCOMMON_THRESHOLD {
        Rarity::Common
    } else if roll < RARE_THRESHOLD {
        Rarity::Uncommon
    } else {
        Rarity::Rare
    }
}

/// Full encounter resolution for the tile the player just stepped onto.
/// Ineligible ground never consumes a roll.
pub fn roll_wild_encounter(
    rng: &mut SafariRng,
    registry: &PokemonRegistry,
    tile: TileDescriptor,
) -> Option<Pokemon> {
    if !tile.encounter_eligible {
        return None;
    }
    if !encounter_triggered(rng.percent_roll()) {
        return None;
    }
    let rarity = rarity_for_roll(rng.percent_roll());
    Some(registry.pick(rarity, rng))
}
