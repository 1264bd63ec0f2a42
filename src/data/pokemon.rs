use crate::shared::*;

use super::PokemonRegistry;

/// Populate the registry with the safari roster: 6 common, 3 uncommon,
/// 1 rare.
///
/// Each creature has:
///   - max_hp: shown on the battle screen
///   - catch_percent: chance a thrown ball catches it
///   - flee_percent: chance it flees after a failed throw
///   - max_duration: throws before it loses interest and escapes
pub fn populate_pokemon(registry: &mut PokemonRegistry) {
    let roster: Vec<Pokemon> = vec![
        // ── Common ───────────────────────────────────────────────────────
        Pokemon {
            name: "Nidoran".into(),
            max_hp: 46,
            catch_percent: 60,
            flee_percent: 15,
            max_duration: 6,
            rarity: Rarity::Common,
        },
        Pokemon {
            name: "Paras".into(),
            max_hp: 35,
            catch_percent: 65,
            flee_percent: 10,
            max_duration: 6,
            rarity: Rarity::Common,
        },
        Pokemon {
            name: "Venonat".into(),
            max_hp: 60,
            catch_percent: 55,
            flee_percent: 20,
            max_duration: 5,
            rarity: Rarity::Common,
        },
        Pokemon {
            name: "Doduo".into(),
            max_hp: 35,
            catch_percent: 50,
            flee_percent: 35,
            max_duration: 4,
            rarity: Rarity::Common,
        },
        Pokemon {
            name: "Exeggcute".into(),
            max_hp: 60,
            catch_percent: 45,
            flee_percent: 15,
            max_duration: 5,
            rarity: Rarity::Common,
        },
        Pokemon {
            name: "Rhyhorn".into(),
            max_hp: 80,
            catch_percent: 40,
            flee_percent: 25,
            max_duration: 5,
            rarity: Rarity::Common,
        },
        // ── Uncommon ─────────────────────────────────────────────────────
        Pokemon {
            name: "Parasect".into(),
            max_hp: 60,
            catch_percent: 35,
            flee_percent: 25,
            max_duration: 4,
            rarity: Rarity::Uncommon,
        },
        Pokemon {
            name: "Kangaskhan".into(),
            max_hp: 105,
            catch_percent: 25,
            flee_percent: 40,
            max_duration: 4,
            rarity: Rarity::Uncommon,
        },
        Pokemon {
            name: "Scyther".into(),
            max_hp: 70,
            catch_percent: 20,
            flee_percent: 50,
            max_duration: 3,
            rarity: Rarity::Uncommon,
        },
        // ── Rare ─────────────────────────────────────────────────────────
        Pokemon {
            name: "Chansey".into(),
            max_hp: 250,
            catch_percent: 10,
            flee_percent: 60,
            max_duration: 3,
            rarity: Rarity::Rare,
        },
    ];

    for pokemon in roster {
        registry.push(pokemon);
    }
}
